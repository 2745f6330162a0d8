//! Frame codec for the search protocol
//!
//! Requests are an `i32` opcode followed by either nothing, one fixed-width
//! `i32` argument, or an `i32` length prefix and that many payload bytes.
//! Responses are either a status + message envelope (confirm commands) or a
//! single length-prefixed payload (query commands). Every integer is 32-bit
//! little-endian; there is no compression or checksum.
//!
//! Decoders work incrementally over a [`BytesMut`] read buffer: they return
//! `Ok(None)` until a complete frame is buffered, so a short read never
//! produces a partial frame.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::opcode::Opcode;
use crate::result::CommandResult;

/// Maximum packet size (64 MB)
pub const MAX_PACKET_SIZE: usize = 64 * 1024 * 1024;

/// Frame codec error
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Negative packet length: {0}")]
    InvalidLength(i32),

    #[error("Packet too large: {size} bytes (max {max})")]
    PacketTooLarge { size: usize, max: usize },

    #[error("Response message is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode a no-argument request: `[opcode]`
pub fn encode_command(dst: &mut BytesMut, opcode: Opcode) {
    dst.reserve(4);
    dst.put_i32_le(opcode.as_i32());
}

/// Encode a fixed-argument request: `[opcode][value]`
pub fn encode_command_fixed(dst: &mut BytesMut, opcode: Opcode, value: i32) {
    dst.reserve(8);
    dst.put_i32_le(opcode.as_i32());
    dst.put_i32_le(value);
}

/// Encode a variable-payload request: `[opcode][length][payload]`
pub fn encode_command_packet(
    dst: &mut BytesMut,
    opcode: Opcode,
    payload: &[u8],
) -> Result<(), CodecError> {
    if payload.len() > MAX_PACKET_SIZE {
        return Err(CodecError::PacketTooLarge {
            size: payload.len(),
            max: MAX_PACKET_SIZE,
        });
    }

    dst.reserve(8 + payload.len());
    dst.put_i32_le(opcode.as_i32());
    dst.put_i32_le(payload.len() as i32);
    dst.put_slice(payload);
    Ok(())
}

/// Incremental decoder for a length-prefixed packet: `[length][payload]`
#[derive(Debug, Default)]
pub struct PacketDecoder;

impl PacketDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode one packet, or `Ok(None)` if the buffer does not yet hold a
    /// complete frame.
    ///
    /// The length field is validated before any payload byte is consumed: a
    /// negative or oversized declared length fails immediately.
    pub fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, CodecError> {
        if src.len() < 4 {
            return Ok(None);
        }

        // Peek at the length without consuming it
        let len = i32::from_le_bytes([src[0], src[1], src[2], src[3]]);
        if len < 0 {
            return Err(CodecError::InvalidLength(len));
        }

        let len = len as usize;
        if len > MAX_PACKET_SIZE {
            return Err(CodecError::PacketTooLarge {
                size: len,
                max: MAX_PACKET_SIZE,
            });
        }

        if src.len() < 4 + len {
            src.reserve(4 + len - src.len());
            return Ok(None);
        }

        src.advance(4);
        Ok(Some(src.split_to(len).freeze()))
    }
}

/// Incremental decoder for a confirm response: `[status][msg_length][message]`
#[derive(Debug, Default)]
pub struct ResponseDecoder {
    status: Option<i32>,
    packets: PacketDecoder,
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, src: &mut BytesMut) -> Result<Option<CommandResult>, CodecError> {
        let status = match self.status {
            Some(status) => status,
            None => {
                if src.len() < 4 {
                    return Ok(None);
                }
                let status = src.get_i32_le();
                self.status = Some(status);
                status
            }
        };

        match self.packets.decode(src)? {
            None => Ok(None),
            Some(message) => {
                self.status = None;
                let message = String::from_utf8(message.to_vec())?;
                Ok(Some(CommandResult::new(status, message)))
            }
        }
    }
}
