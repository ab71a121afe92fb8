//! Core functionalities: serial port access, reader protocol, POST code filtering.

pub mod error;
pub mod serial_service;
pub mod transport;
pub mod protocol;
pub mod filter;
pub mod poller;

pub use error::{Error, Result};
pub use serial_service::{SerialConfig, SerialService, PortInfo};
pub use transport::Transport;
pub use protocol::{Command, Opcode, get_post, get_version, start_smc, stop_smc};
pub use filter::{RunFilter, render_frame, IDLE, RUN_BREAK};
pub use poller::Poller;
