//! Length-prefixed frame extraction.
//!
//! The connection buffer is a `BytesMut`: arrivals are appended at the back and
//! each complete frame is split off the front without copying what remains.
//! Nothing here validates the length field. A corrupt length desynchronizes
//! the stream for the rest of the connection; there is no resync marker in the
//! protocol to recover from.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;
use tracing::trace;

use crate::types::{MessageCode, FRAME_HEADER_LEN, MAX_FRAME_BODY};

/// One complete protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub code: u8,
    pub body: Bytes,
}

impl Frame {
    pub fn message_code(&self) -> MessageCode {
        MessageCode::from_u8(self.code)
    }

    /// Size of this frame on the wire, header included.
    pub fn wire_len(&self) -> usize {
        FRAME_HEADER_LEN + self.body.len()
    }
}

#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: BytesMut,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Append `bytes` and iterate the frames that are now complete.
    ///
    /// The iterator is lazy and stops as soon as no whole frame is left;
    /// leftover bytes stay buffered for the next call. Dropping it early is
    /// fine: unread frames are returned by the next `feed` or
    /// [`FrameDecoder::next_frame`].
    pub fn feed(&mut self, bytes: &[u8]) -> Frames<'_> {
        self.buf.extend_from_slice(bytes);
        Frames { decoder: self }
    }

    /// Split the next complete frame off the buffer, if there is one.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.buf.len() < FRAME_HEADER_LEN {
            trace!(buffered = self.buf.len(), "header incomplete, waiting for data");
            return None;
        }

        let declared = u16::from_be_bytes([self.buf[1], self.buf[2]]) as usize;
        let total = FRAME_HEADER_LEN + declared;
        if self.buf.len() < total {
            trace!(
                buffered = self.buf.len(),
                needed = total,
                "body incomplete, waiting for data"
            );
            return None;
        }

        let mut raw = self.buf.split_to(total);
        let code = raw[0];
        raw.advance(FRAME_HEADER_LEN);
        Some(Frame {
            code,
            body: raw.freeze(),
        })
    }

    /// Bytes held back waiting for the rest of a frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

/// Frames completed by one [`FrameDecoder::feed`] call.
pub struct Frames<'a> {
    decoder: &'a mut FrameDecoder,
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.decoder.next_frame()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("frame body of {0} bytes exceeds the {max} byte limit", max = MAX_FRAME_BODY)]
pub struct BodyTooLarge(pub usize);

/// Build the wire bytes for one frame.
pub fn encode_frame(code: u8, body: &[u8]) -> Result<Vec<u8>, BodyTooLarge> {
    let len = u16::try_from(body.len()).map_err(|_| BodyTooLarge(body.len()))?;
    let mut out = Vec::with_capacity(FRAME_HEADER_LEN + body.len());
    out.put_u8(code);
    out.put_u16(len);
    out.extend_from_slice(body);
    Ok(out)
}
