// ABOUTME: The decoded PDU value: header, mandatory field slots, TLV tail and the schema behind them
// ABOUTME: Provides named field lookup and re-encoding back to wire format

use crate::codec::{CodecError, Encodable, PduHeader};
use crate::datatypes::{Field, FieldName, TlvField, decode_tlvs};
use crate::fields::decode_mandatory;
use crate::registry::PduKind;
use crate::schema::Schema;
use bytes::BytesMut;
use std::collections::BTreeMap;
use std::io::Cursor;

/// One decoded SMPP message.
///
/// Built once by a decode call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    header: PduHeader,
    kind: PduKind,
    fields: BTreeMap<usize, Field>,
    tlvs: Vec<TlvField>,
    truncated: bool,
}

impl Pdu {
    /// Decode the body that follows `header` using the schema of `kind`.
    ///
    /// The TLV tail is only attempted when every mandatory field was read;
    /// after an early EOF it is empty.
    pub fn decode_body(
        kind: PduKind,
        header: PduHeader,
        buf: &mut Cursor<&[u8]>,
    ) -> Result<Self, CodecError> {
        let mandatory = decode_mandatory(kind.schema(), buf);

        let tlvs = if mandatory.early_eof {
            Vec::new()
        } else {
            decode_tlvs(buf)?
        };

        tracing::trace!(
            "decoded {:?} seq={} slots={} tlvs={}",
            kind,
            header.sequence_number,
            mandatory.fields.len(),
            tlvs.len()
        );

        Ok(Pdu {
            header,
            kind,
            fields: mandatory.fields,
            tlvs,
            truncated: mandatory.early_eof,
        })
    }

    /// A PDU that is only a header (enquire_link, unbind, generic_nack, ...).
    pub fn header_only(kind: PduKind, header: PduHeader) -> Self {
        tracing::trace!("decoded {:?} seq={}", kind, header.sequence_number);

        Pdu {
            header,
            kind,
            fields: BTreeMap::new(),
            tlvs: Vec::new(),
            truncated: false,
        }
    }

    pub fn header(&self) -> &PduHeader {
        &self.header
    }

    pub fn kind(&self) -> PduKind {
        self.kind
    }

    pub fn fields(&self) -> &BTreeMap<usize, Field> {
        &self.fields
    }

    pub fn mandatory_schema(&self) -> &'static Schema {
        self.kind.schema()
    }

    /// The ordered mandatory field names of this PDU's schema.
    pub fn mandatory_field_names(&self) -> Vec<FieldName> {
        self.kind.schema().field_names()
    }

    /// Look up a mandatory field by name.
    ///
    /// Fails with `UnknownField` when the schema has no such field and with
    /// `FieldAbsent` when the PDU ended before it.
    pub fn lookup(&self, name: FieldName) -> Result<&Field, CodecError> {
        let schema = self.kind.schema();
        if !schema.contains(name) {
            return Err(CodecError::UnknownField(name));
        }

        schema
            .slot_of(name)
            .and_then(|slot| self.fields.get(&slot))
            .ok_or(CodecError::FieldAbsent(name))
    }

    pub fn tlv_fields(&self) -> &[TlvField] {
        &self.tlvs
    }

    /// First TLV carrying `tag`, if any.
    pub fn tlv(&self, tag: u16) -> Option<&TlvField> {
        self.tlvs.iter().find(|tlv| tlv.tag == tag)
    }

    /// Whether the input ran out before all mandatory fields were read.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn body_len(&self) -> usize {
        let fields: usize = self.fields.values().map(Field::encoded_len).sum();
        let tlvs: usize = self.tlvs.iter().map(TlvField::encoded_len).sum();
        fields + tlvs
    }
}

impl Encodable for Pdu {
    /// Header with `command_length` recomputed, then each field slot in
    /// order, then the TLVs in their original order.
    fn encode(&self, buf: &mut BytesMut) {
        let length = PduHeader::SIZE + self.body_len();
        buf.reserve(length);

        let header = PduHeader {
            command_length: length as u32,
            ..self.header
        };
        header.encode(buf);

        for field in self.fields.values() {
            field.encode(buf);
        }

        for tlv in &self.tlvs {
            tlv.encode(buf);
        }
    }

    fn encoded_size(&self) -> usize {
        PduHeader::SIZE + self.body_len()
    }
}

impl Pdu {
    /// Wire bytes of this PDU.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}
