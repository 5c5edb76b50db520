// SMPP v3.4 Codec - wire primitives shared by every PDU
//
// Big-endian integer packing, the fixed 16-byte PDU header, decoder
// configuration and the error type used throughout the crate.

use crate::datatypes::{CommandId, CommandStatus, FieldName};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Cursor;
use thiserror::Error;

/// Maximum allowed PDU size to prevent memory exhaustion attacks
pub const MAX_PDU_SIZE: u32 = 65536; // 64KB

pub fn unpack_u32(b: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*b)
}

pub fn unpack_u16(b: &[u8; 2]) -> u16 {
    u16::from_be_bytes(*b)
}

pub fn pack_u32(n: u32) -> [u8; 4] {
    n.to_be_bytes()
}

pub fn pack_u16(n: u16) -> [u8; 2] {
    n.to_be_bytes()
}

/// Packs through the 16-bit packer and keeps the low octet.
pub fn pack_u8(n: u8) -> [u8; 1] {
    let [_, low] = pack_u16(u16::from(n));
    [low]
}

/// SMPP v3.4 PDU Header (16 bytes, common to all PDUs)
///
/// All four words are kept raw. Interpreting them (`command()`, `status()`)
/// is left to the caller so that a header always survives decode/encode
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    pub command_length: u32,
    pub command_id: u32,
    pub command_status: u32,
    pub sequence_number: u32,
}

impl PduHeader {
    pub const SIZE: usize = 16;

    /// Decode the four header words from exactly 16 bytes. No field is validated.
    pub fn from_bytes(data: &[u8; PduHeader::SIZE]) -> Self {
        let word = |i: usize| unpack_u32(&[data[i], data[i + 1], data[i + 2], data[i + 3]]);
        PduHeader {
            command_length: word(0),
            command_id: word(4),
            command_status: word(8),
            sequence_number: word(12),
        }
    }

    /// Decode PDU header from the front of a cursor
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        if buf.remaining() < Self::SIZE {
            return Err(CodecError::TooShort {
                len: buf.remaining(),
            });
        }

        Ok(PduHeader {
            command_length: buf.get_u32(),
            command_id: buf.get_u32(),
            command_status: buf.get_u32(),
            sequence_number: buf.get_u32(),
        })
    }

    pub fn to_bytes(&self) -> [u8; PduHeader::SIZE] {
        let mut out = [0u8; PduHeader::SIZE];
        out[0..4].copy_from_slice(&pack_u32(self.command_length));
        out[4..8].copy_from_slice(&pack_u32(self.command_id));
        out[8..12].copy_from_slice(&pack_u32(self.command_status));
        out[12..16].copy_from_slice(&pack_u32(self.sequence_number));
        out
    }

    /// Encode PDU header to buffer
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.to_bytes());
    }

    /// The command id, if it is one SMPP v3.4 defines.
    pub fn command(&self) -> Option<CommandId> {
        CommandId::try_from(self.command_id).ok()
    }

    /// The command status, if it is one this crate names.
    pub fn status(&self) -> Option<CommandStatus> {
        CommandStatus::try_from(self.command_status).ok()
    }

    pub fn is_response(&self) -> bool {
        self.command_id & 0x8000_0000 != 0
    }
}

/// Trait for types that can be encoded to bytes
pub trait Encodable {
    /// Encode this PDU to the buffer
    fn encode(&self, buf: &mut BytesMut);

    /// Calculate the encoded size without keeping the encoding
    fn encoded_size(&self) -> usize {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf.len()
    }

    /// Encode into a fresh buffer, fixing the command_length word to the
    /// number of bytes actually written.
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);

        if buf.len() >= 4 {
            let length = buf.len() as u32;
            buf[0..4].copy_from_slice(&pack_u32(length));
        }

        buf.freeze()
    }
}

/// Knobs for the top-level decode entry points.
///
/// The default is permissive: the header's `command_length` is not checked
/// against the buffer and decoding runs until the buffer is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Reject PDUs whose `command_length` is out of bounds or disagrees with
    /// the number of bytes supplied.
    pub strict_length: bool,
    /// Upper bound on `command_length`, in octets.
    pub max_pdu_size: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict_length: false,
            max_pdu_size: MAX_PDU_SIZE,
        }
    }
}

impl DecoderConfig {
    pub fn strict() -> Self {
        Self {
            strict_length: true,
            ..Self::default()
        }
    }

    pub fn strict_length(mut self, strict: bool) -> Self {
        self.strict_length = strict;
        self
    }

    pub fn max_pdu_size(mut self, max: u32) -> Self {
        self.max_pdu_size = max;
        self
    }

    /// Check the declared length against the bytes actually available.
    /// Always succeeds in permissive mode.
    pub fn check_length(&self, header: &PduHeader, actual: usize) -> Result<(), CodecError> {
        if !self.strict_length {
            return Ok(());
        }

        let length = header.command_length;
        if length < PduHeader::SIZE as u32 || length > self.max_pdu_size {
            return Err(CodecError::InvalidPduLength {
                length,
                min: PduHeader::SIZE as u32,
                max: self.max_pdu_size,
            });
        }

        if length as usize != actual {
            return Err(CodecError::LengthMismatch {
                declared: length,
                actual,
            });
        }

        Ok(())
    }
}

/// Codec errors with detailed context for debugging
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid PDU: {len} bytes is under the 16 byte header")]
    TooShort { len: usize },

    #[error("Unknown PDU command_id: {0:#010x}")]
    UnknownCommand(u32),

    #[error("Truncated TLV at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedTlv {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Field '{0}' is not part of this PDU")]
    UnknownField(FieldName),

    #[error("Field '{0}' is absent: the PDU ended before it")]
    FieldAbsent(FieldName),

    #[error("Invalid PDU length: {length}, must be {min}-{max}")]
    InvalidPduLength { length: u32, min: u32, max: u32 },

    #[error("PDU length mismatch: header declares {declared} bytes, buffer holds {actual}")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert codec errors to appropriate SMPP command_status codes
impl CodecError {
    pub fn to_command_status(&self) -> CommandStatus {
        match self {
            CodecError::TooShort { .. }
            | CodecError::InvalidPduLength { .. }
            | CodecError::LengthMismatch { .. } => CommandStatus::InvalidCommandLength,
            CodecError::UnknownCommand(_) => CommandStatus::InvalidCommandId,
            CodecError::TruncatedTlv { .. } => CommandStatus::InvalidParameterLength,
            _ => CommandStatus::SystemError,
        }
    }
}
