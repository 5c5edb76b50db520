//! Decoding of SMPP v3.4 protocol data units.
//!
//! A PDU is a 16-byte header, a command-specific run of mandatory fields and
//! an optional tail of tag-length-value parameters. [`decode`] reads the
//! header, picks the PDU type from its `command_id`, decodes the mandatory
//! fields against that type's [`schema::Schema`] and then the TLV tail.
//!
//! ```rust
//! use smpp_pdu::{Encodable, FieldName, decode};
//!
//! let data = [
//!     0x00, 0x00, 0x00, 0x15, // command_length
//!     0x80, 0x00, 0x00, 0x04, // submit_sm_resp
//!     0x00, 0x00, 0x00, 0x00, // command_status
//!     0x00, 0x00, 0x00, 0x07, // sequence_number
//!     b'a', b'b', b'c', b'd', 0x00, // message_id
//! ];
//!
//! let pdu = decode(&data)?;
//! assert_eq!(pdu.lookup(FieldName::MessageId)?.as_str(), Some("abcd"));
//! assert_eq!(pdu.to_bytes().as_ref(), &data[..]);
//! # Ok::<(), smpp_pdu::CodecError>(())
//! ```

#[macro_use]
mod macros;

pub mod codec;
pub mod datatypes;
pub mod fields;
pub mod pdu;
pub mod registry;
pub mod schema;

#[cfg(test)]
mod tests;

pub use codec::{CodecError, DecoderConfig, Encodable, MAX_PDU_SIZE, PduHeader};
pub use datatypes::{CommandId, CommandStatus, Field, FieldKind, FieldName, TlvField};
pub use pdu::Pdu;
pub use registry::{PduKind, PduRegistry};

/// A specialized `Result` type for PDU decoding.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Decode one complete PDU held in `data`.
///
/// Fails with `TooShort` under 16 bytes, `UnknownCommand` for a command id
/// with no registered decoder and `TruncatedTlv` when the optional parameter
/// block is cut short. Running out of bytes inside the mandatory fields is
/// not an error; see [`Pdu::is_truncated`].
pub fn decode(data: &[u8]) -> Result<Pdu> {
    PduRegistry::standard().decode(data)
}

/// [`decode`] with explicit length checking options.
pub fn decode_with_config(data: &[u8], config: &DecoderConfig) -> Result<Pdu> {
    PduRegistry::standard().decode_with(data, config)
}

/// Read one PDU from a byte stream, `Ok(None)` at a clean end of stream.
pub fn decode_from_reader<R: std::io::Read>(
    reader: &mut R,
    config: &DecoderConfig,
) -> Result<Option<Pdu>> {
    PduRegistry::standard().read_pdu(reader, config)
}
