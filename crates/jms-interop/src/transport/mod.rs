//! The messaging layer as the drivers see it.

mod memory;
mod stdio;

pub use memory::MemoryTransport;
pub use stdio::{Frame, FrameReader, FrameWriter};

use crate::{HarnessError, Message};

/// One link on one connection.
///
/// Implementations carry (annotations, body) pairs; framing and flow
/// control belong to them, not to the drivers.
pub trait Transport {
    fn send(&mut self, message: Message) -> Result<(), HarnessError>;

    fn close_link(&mut self) -> Result<(), HarnessError>;

    fn close_connection(&mut self) -> Result<(), HarnessError>;
}
