use std::io::{self, ErrorKind, Read, Write};

/// What the reader protocol needs from a connection.
pub trait Transport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Fills `buf` completely, waiting as long as it takes.
    fn recv_exact(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

/// Any byte stream works, including `Box<dyn SerialPort>`.
///
/// Serial ports come back with `TimedOut` once the port's timeout runs out,
/// for writes as well as reads; that only means the device is not ready yet,
/// so we keep waiting. Moving zero bytes is the device going away.
impl<T: Read + Write + ?Sized> Transport for T {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut sent = 0;
        while sent < bytes.len() {
            match self.write(&bytes[sent..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        ErrorKind::WriteZero,
                        format!("connection closed after {sent} of {} bytes", bytes.len()),
                    ))
                }
                Ok(n) => sent += n,
                Err(e) if still_waiting(&e) => {}
                Err(e) => return Err(e),
            }
        }
        loop {
            match self.flush() {
                Err(e) if still_waiting(&e) => {}
                other => return other,
            }
        }
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        ErrorKind::UnexpectedEof,
                        format!("connection closed after {filled} of {} bytes", buf.len()),
                    ))
                }
                Ok(n) => filled += n,
                Err(e) if still_waiting(&e) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

fn still_waiting(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted)
}
