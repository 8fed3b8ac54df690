//! Line-delimited JSON frames over any reader or writer.
//!
//! One frame per line:
//!
//! ```text
//! {"address":"localhost:5672/jms.queue.test",
//!  "annotations":{"x-opt-jms-msg-type":{"type":"byte","value":3}},
//!  "body":{"section":"data","content":"00000001"}}
//! ```
//!
//! (shown wrapped; on the wire each frame is a single line)

use std::io::{BufRead, Write};

use indexmap::IndexMap;
use jms_interop_codec::{Body, TypedValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Transport;
use crate::{HarnessError, Message};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub address: String,
    #[serde(default)]
    pub annotations: IndexMap<String, TypedValue>,
    pub body: Body,
}

impl Frame {
    pub fn new(address: impl Into<String>, message: Message) -> Self {
        Self {
            address: address.into(),
            annotations: message.annotations,
            body: message.body,
        }
    }

    pub fn into_message(self) -> Message {
        Message {
            annotations: self.annotations,
            body: self.body,
        }
    }
}

/// Sending side: writes one frame per message and flushes it.
#[derive(Debug)]
pub struct FrameWriter<W: Write> {
    address: String,
    writer: W,
    closed: bool,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(address: impl Into<String>, writer: W) -> Self {
        Self {
            address: address.into(),
            writer,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for FrameWriter<W> {
    fn send(&mut self, message: Message) -> Result<(), HarnessError> {
        if self.closed {
            return Err(HarnessError::Transport("send on a closed link".into()));
        }
        let frame = Frame::new(self.address.clone(), message);
        serde_json::to_writer(&mut self.writer, &frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn close_link(&mut self) -> Result<(), HarnessError> {
        self.closed = true;
        self.writer.flush()?;
        Ok(())
    }

    fn close_connection(&mut self) -> Result<(), HarnessError> {
        self.close_link()
    }
}

/// Receiving side: yields the messages of frames addressed to `address`.
#[derive(Debug)]
pub struct FrameReader<R: BufRead> {
    address: String,
    reader: R,
    line: String,
    closed: bool,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(address: impl Into<String>, reader: R) -> Self {
        Self {
            address: address.into(),
            reader,
            line: String::new(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Next message for this address; `None` at end of input or once the
    /// link is closed.
    pub fn next_message(&mut self) -> Result<Option<Message>, HarnessError> {
        while !self.closed {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            let frame: Frame = serde_json::from_str(line)?;
            if frame.address != self.address {
                debug!(address = %frame.address, "skipping frame for another address");
                continue;
            }
            return Ok(Some(frame.into_message()));
        }
        Ok(None)
    }
}

impl<R: BufRead> Transport for FrameReader<R> {
    fn send(&mut self, _message: Message) -> Result<(), HarnessError> {
        Err(HarnessError::Transport("cannot send on a receiving link".into()))
    }

    fn close_link(&mut self) -> Result<(), HarnessError> {
        self.closed = true;
        Ok(())
    }

    fn close_connection(&mut self) -> Result<(), HarnessError> {
        self.close_link()
    }
}
