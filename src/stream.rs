//!
//! Incremental IPP header parser
//!
//! [`IppStreamParser`] consumes a message as arbitrary byte chunks, delivers the parsed
//! header as soon as the end-of-attributes marker has arrived and passes everything after
//! it through verbatim. Only the header prefix is ever buffered; how body bytes reach
//! their destination (and any back-pressure) is up to the caller.
//!
use bytes::{Bytes, BytesMut};
use log::trace;

use crate::{
    message::IppMessage,
    model::DelimiterTag,
    parser::{IppParseError, IppParser},
    FromPrimitive as _,
};

/// Stream error enum
#[derive(Debug, thiserror::Error)]
pub enum IppStreamError {
    #[error(transparent)]
    /// Header prefix failed to parse
    Parse(#[from] IppParseError),

    #[error("Stream ended before the end of IPP attributes")]
    /// Writable side finished while the header was still incomplete
    PrematureEnd,
}

/// Outcome of feeding one chunk to the stream parser
#[derive(Debug, PartialEq)]
pub enum IppStreamEvent {
    /// Header not complete yet, nothing to deliver
    Incomplete,
    /// Header just completed. Fires exactly once; `body` holds any bytes past the
    /// end-of-attributes marker that arrived in the same chunk.
    HeaderReady { message: IppMessage, body: Bytes },
    /// Body bytes, delivered in write order
    Body(Bytes),
}

enum StreamState {
    Collecting,
    PassThrough,
    Failed,
}

/// Stateful header parser over chunked input
pub struct IppStreamParser {
    buffer: BytesMut,
    state: StreamState,
}

impl IppStreamParser {
    /// Create stream parser
    pub fn new() -> IppStreamParser {
        IppStreamParser {
            buffer: BytesMut::new(),
            state: StreamState::Collecting,
        }
    }

    /// Feed one chunk. While the header is incomplete the chunk is buffered and scanned;
    /// once the end-of-attributes marker is seen the decoded message is returned together
    /// with any body bytes from the same chunk, and all later chunks flow through
    /// unchanged. After an error, input is discarded.
    pub fn write(&mut self, chunk: &[u8]) -> Result<IppStreamEvent, IppStreamError> {
        match self.state {
            StreamState::PassThrough => Ok(IppStreamEvent::Body(Bytes::copy_from_slice(chunk))),
            StreamState::Failed => Ok(IppStreamEvent::Incomplete),
            StreamState::Collecting => {
                self.buffer.extend_from_slice(chunk);

                let end = match end_of_attributes(&self.buffer) {
                    Some(end) => end,
                    None => return Ok(IppStreamEvent::Incomplete),
                };
                trace!("end of IPP attributes at offset {}", end);

                let collected = std::mem::take(&mut self.buffer).freeze();
                let body = collected.slice(end..);
                match IppParser::new(collected.slice(..end)).parse() {
                    Ok(message) => {
                        self.state = StreamState::PassThrough;
                        Ok(IppStreamEvent::HeaderReady { message, body })
                    }
                    Err(e) => {
                        self.state = StreamState::Failed;
                        Err(e.into())
                    }
                }
            }
        }
    }

    /// Signal the end of input. Finishing before the header completed is an error.
    pub fn finish(&mut self) -> Result<(), IppStreamError> {
        match self.state {
            StreamState::Collecting => {
                self.state = StreamState::Failed;
                Err(IppStreamError::PrematureEnd)
            }
            _ => Ok(()),
        }
    }
}

impl Default for IppStreamParser {
    fn default() -> Self {
        IppStreamParser::new()
    }
}

/// Loose scan for the end-of-attributes marker, starting past the 8-byte header.
/// Alternates between expecting a delimiter and walking attribute records; lengths are
/// skipped without validating the value tags, the full decode of the prefix happens
/// afterwards. Returns the offset just past the marker, or `None` when more input is
/// needed (or the scan cannot make progress, in which case the decoder rejects the
/// prefix once it completes).
fn end_of_attributes(buf: &[u8]) -> Option<usize> {
    let mut pos = 8;
    loop {
        let tag = *buf.get(pos)?;
        pos += 1;
        match DelimiterTag::from_u8(tag) {
            Some(DelimiterTag::EndOfAttributes) => return Some(pos),
            Some(_) => {}
            None => return None,
        }

        // attribute records until the next delimiter byte
        loop {
            let next = *buf.get(pos)?;
            if next < 0x10 {
                break;
            }
            pos += 1;
            let name_len = read_length(buf, pos)?;
            pos += 2 + name_len;
            let value_len = read_length(buf, pos)?;
            pos += 2 + value_len;
        }
    }
}

fn read_length(buf: &[u8], pos: usize) -> Option<usize> {
    let hi = *buf.get(pos)?;
    let lo = *buf.get(pos + 1)?;
    let len = u16::from_be_bytes([hi, lo]);
    // a negative length cannot be skipped; give up and let the decoder reject it
    if len > i16::MAX as u16 {
        return None;
    }
    Some(len as usize)
}
