use std::convert::Infallible;
use std::io::Write;

use crate::error::Result;
use crate::filter::RunFilter;
use crate::protocol;
use crate::transport::Transport;

/// Polls the reader for POST frames and writes the codes to `out`.
pub struct Poller<T, W> {
    conn: T,
    out: W,
    filter: RunFilter,
}

impl<T: Transport, W: Write> Poller<T, W> {
    pub fn new(conn: T, out: W) -> Self {
        Self { conn, out, filter: RunFilter::default() }
    }

    /// One request/response round. Output is flushed before returning so
    /// codes show up while the device is still booting.
    pub fn poll_once(&mut self) -> Result<()> {
        let frame = protocol::get_post(&mut self.conn)?;
        let text = self.filter.feed(&frame);
        if !text.is_empty() {
            self.out.write_all(text.as_bytes())?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Polls back to back until an I/O error ends it.
    pub fn run(&mut self) -> Result<Infallible> {
        loop {
            self.poll_once()?;
        }
    }

    pub fn last(&self) -> u8 {
        self.filter.last()
    }

    pub fn into_parts(self) -> (T, W) {
        (self.conn, self.out)
    }
}
