//! Host side of the reader's command protocol.
//!
//! Every request is a packed 5-byte frame: an opcode followed by a
//! little-endian `u32` argument. POST commands always send a zero argument.

use crate::error::Result;
use crate::transport::Transport;

pub const COMMAND_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    GetVersion = 0x00,
    GetPost = 0x80,
    StartSmc = 0xC0,
    StopSmc = 0xC1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub opcode: Opcode,
    pub arg: u32,
}

impl Command {
    pub const fn new(opcode: Opcode) -> Self {
        Self { opcode, arg: 0 }
    }

    pub fn encode(&self) -> [u8; COMMAND_LEN] {
        let mut frame = [0u8; COMMAND_LEN];
        frame[0] = self.opcode as u8;
        frame[1..].copy_from_slice(&self.arg.to_le_bytes());
        frame
    }
}

fn send<T: Transport + ?Sized>(conn: &mut T, cmd: Command) -> Result<()> {
    log::debug!("-> {:?} {}", cmd.opcode, hex::encode_upper(cmd.encode()));
    conn.send(&cmd.encode())?;
    Ok(())
}

/// Tells the reader to start the SMC. Nothing comes back.
pub fn start_smc<T: Transport + ?Sized>(conn: &mut T) -> Result<()> {
    send(conn, Command::new(Opcode::StartSmc))
}

pub fn stop_smc<T: Transport + ?Sized>(conn: &mut T) -> Result<()> {
    send(conn, Command::new(Opcode::StopSmc))
}

/// Drains the reader's POST buffer: one length byte, then that many codes.
/// An empty frame is normal when nothing new was latched.
pub fn get_post<T: Transport + ?Sized>(conn: &mut T) -> Result<Vec<u8>> {
    send(conn, Command::new(Opcode::GetPost))?;

    let mut len = [0u8; 1];
    conn.recv_exact(&mut len)?;

    let mut frame = vec![0u8; len[0] as usize];
    conn.recv_exact(&mut frame)?;
    if !frame.is_empty() {
        log::trace!("<- POST {}", hex::encode_upper(&frame));
    }
    Ok(frame)
}

pub fn get_version<T: Transport + ?Sized>(conn: &mut T) -> Result<u32> {
    send(conn, Command::new(Opcode::GetVersion))?;
    let mut raw = [0u8; 4];
    conn.recv_exact(&mut raw)?;
    Ok(u32::from_le_bytes(raw))
}
