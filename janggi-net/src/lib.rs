//! Two-process Janggi over TCP.
//!
//! The server process accepts one connection and plays Red; the client
//! connects and plays Blue. Messages are JSON documents wrapped in the
//! fixed-width length header described in [`frame`].

pub mod command;
pub mod config;
pub mod error;
pub mod frame;
pub mod message;
pub mod session;

pub use command::Command;
pub use config::{init_logging, Config};
pub use error::{CommandError, NetError};
pub use frame::FrameStream;
pub use message::Message;
pub use session::{Session, SessionEnd};
