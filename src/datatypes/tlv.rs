use crate::codec::CodecError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Cursor;

/// Size of the tag and length words that precede every TLV value.
pub const TLV_HEADER_SIZE: usize = 4;

/// An optional parameter from the tail of a PDU body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlvField {
    /// The Tag field is used to uniquely identify the particular optional parameter in question.
    pub tag: u16,

    /// The Length field indicates the length of the Value field in octets.
    /// Note that this length does not include the length of the Tag and Length fields.
    pub length: u16,

    /// The Value field contains the actual data for the optional parameter in question.
    pub value: Bytes,
}

impl TlvField {
    /// Builds a TLV whose length word matches `value`.
    ///
    /// Values longer than `u16::MAX` are cut to fit the length word.
    pub fn new(tag: u16, value: impl Into<Bytes>) -> Self {
        let mut value = value.into();
        value.truncate(u16::MAX as usize);
        Self {
            tag,
            length: value.len() as u16,
            value,
        }
    }

    pub fn encoded_len(&self) -> usize {
        TLV_HEADER_SIZE + self.value.len()
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.tag);
        buf.put_u16(self.length);
        buf.put_slice(&self.value);
    }

    /// Read one TLV. The cursor is left untouched on error.
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let offset = buf.position() as usize;

        if buf.remaining() < TLV_HEADER_SIZE {
            return Err(CodecError::TruncatedTlv {
                offset,
                needed: TLV_HEADER_SIZE,
                available: buf.remaining(),
            });
        }

        let chunk = buf.chunk();
        let tag = u16::from_be_bytes([chunk[0], chunk[1]]);
        let length = u16::from_be_bytes([chunk[2], chunk[3]]);

        let available = buf.remaining() - TLV_HEADER_SIZE;
        if available < length as usize {
            return Err(CodecError::TruncatedTlv {
                offset,
                needed: length as usize,
                available,
            });
        }

        buf.advance(TLV_HEADER_SIZE);
        let value = buf.copy_to_bytes(length as usize);

        Ok(TlvField { tag, length, value })
    }
}

/// Consume the rest of the cursor as a sequence of TLVs, in wire order.
///
/// Duplicate tags are kept as separate entries. An exhausted cursor yields an
/// empty list; a record cut short anywhere is a `TruncatedTlv` error.
pub fn decode_tlvs(buf: &mut Cursor<&[u8]>) -> Result<Vec<TlvField>, CodecError> {
    let mut tlvs = Vec::new();
    while buf.has_remaining() {
        tlvs.push(TlvField::decode(buf)?);
    }
    Ok(tlvs)
}
