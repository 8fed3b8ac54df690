use std::collections::VecDeque;

use super::Transport;
use crate::{HarnessError, Message};

/// In-process link: sent messages queue up in `outbox` until the peer
/// drains them.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    pub outbox: VecDeque<Message>,
    pub link_closed: bool,
    pub connection_closed: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.link_closed || self.connection_closed
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, message: Message) -> Result<(), HarnessError> {
        if self.is_closed() {
            return Err(HarnessError::Transport("send on a closed link".into()));
        }
        self.outbox.push_back(message);
        Ok(())
    }

    fn close_link(&mut self) -> Result<(), HarnessError> {
        self.link_closed = true;
        Ok(())
    }

    fn close_connection(&mut self) -> Result<(), HarnessError> {
        self.connection_closed = true;
        Ok(())
    }
}
