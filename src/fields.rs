// ABOUTME: Schema-driven decoder for the mandatory part of a PDU body
// ABOUTME: Walks the schema once, reading C-Octet Strings, single octets and the sm_length/short_message pair

use crate::datatypes::{Field, FieldKind};
use crate::schema::Schema;
use bytes::{Buf, Bytes};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Result of decoding the mandatory fields of one PDU.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MandatoryFields {
    /// Decoded values keyed by slot, in slot order.
    pub fields: BTreeMap<usize, Field>,
    /// The input ran out before the schema was exhausted.
    pub early_eof: bool,
}

/// Decode the mandatory fields described by `schema` from the cursor.
///
/// Running out of input is not an error: SMSCs routinely omit trailing
/// fields (a failed `submit_sm_resp` has no `message_id` at all). Decoding
/// stops at the first field that cannot be completed and `early_eof` is set.
/// A C-Octet String cut short keeps the octets that were read; a field with
/// no octets at all gets no slot.
pub fn decode_mandatory(schema: &Schema, buf: &mut Cursor<&[u8]>) -> MandatoryFields {
    let mut out = MandatoryFields::default();
    let mut slot = 0;

    for spec in schema.fields() {
        match spec.kind {
            FieldKind::NullTerminated => {
                let (value, terminated) = read_cstring(buf);
                if !value.is_empty() {
                    out.fields.insert(slot, Field::Variable(value));
                }
                if !terminated {
                    out.early_eof = true;
                    break;
                }
                slot += 1;
            }
            FieldKind::Fixed => {
                let Some(value) = read_u8(buf) else {
                    out.early_eof = true;
                    break;
                };
                out.fields.insert(slot, Field::Fixed(value));
                slot += 1;
            }
            FieldKind::ShortMessageLength => {
                let Some(sm_length) = read_u8(buf) else {
                    out.early_eof = true;
                    break;
                };
                out.fields.insert(slot, Field::Fixed(sm_length));

                let body = read_up_to(buf, sm_length as usize);
                let complete = body.len() == sm_length as usize;
                out.fields.insert(slot + 1, Field::Variable(body));
                slot += 2;

                if !complete {
                    out.early_eof = true;
                    break;
                }
            }
            // Already read together with sm_length.
            FieldKind::ShortMessage => {}
        }
    }

    if out.early_eof {
        tracing::debug!(
            "{} ended after {} of {} mandatory field slots",
            schema.name(),
            out.fields.len(),
            schema.slot_count()
        );
    }

    out
}

fn read_u8(buf: &mut Cursor<&[u8]>) -> Option<u8> {
    buf.has_remaining().then(|| buf.get_u8())
}

/// Read up to and including the next `0x00`. Returns the octets read and
/// whether the terminator was found.
fn read_cstring(buf: &mut Cursor<&[u8]>) -> (Bytes, bool) {
    let terminator = buf.chunk().iter().position(|&b| b == 0x00);
    match terminator {
        Some(end) => (buf.copy_to_bytes(end + 1), true),
        None => {
            let rest = buf.remaining();
            (buf.copy_to_bytes(rest), false)
        }
    }
}

fn read_up_to(buf: &mut Cursor<&[u8]>, len: usize) -> Bytes {
    let take = len.min(buf.remaining());
    buf.copy_to_bytes(take)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::FieldName;
    use crate::schema::{BIND, FieldSpec, MESSAGE_ID_RESP, QUERY_SM_RESP, SUBMIT_SM};

    fn variable(bytes: &'static [u8]) -> Field {
        Field::Variable(Bytes::from_static(bytes))
    }

    #[test]
    fn decodes_bind_body() {
        let data = b"smppclient1\0secret08\0SUBMIT1\0\x34\x01\x01\0";
        let mut cursor = Cursor::new(&data[..]);

        let decoded = decode_mandatory(&BIND, &mut cursor);

        assert!(!decoded.early_eof);
        assert_eq!(decoded.fields.len(), 7);
        assert_eq!(decoded.fields[&0], variable(b"smppclient1\0"));
        assert_eq!(decoded.fields[&1], variable(b"secret08\0"));
        assert_eq!(decoded.fields[&2], variable(b"SUBMIT1\0"));
        assert_eq!(decoded.fields[&3], Field::Fixed(0x34));
        assert_eq!(decoded.fields[&4], Field::Fixed(0x01));
        assert_eq!(decoded.fields[&5], Field::Fixed(0x01));
        assert_eq!(decoded.fields[&6], variable(b"\0"));
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn short_message_length_fills_two_slots() {
        let mut data = vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        data.extend_from_slice(&[0x00, 0x00, 0x00]); // esm_class, protocol_id, priority_flag
        data.extend_from_slice(&[0x00, 0x00]); // schedule_delivery_time, validity_period
        data.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x05, b'h', b'e', b'l', b'l', b'o']);
        data.extend_from_slice(&[0x02, 0x04, 0x00, 0x02, 0x00, 0x01]); // trailing TLV
        let mut cursor = Cursor::new(data.as_slice());

        let decoded = decode_mandatory(&SUBMIT_SM, &mut cursor);

        assert!(!decoded.early_eof);
        assert_eq!(decoded.fields.len(), 18);
        assert_eq!(decoded.fields[&16], Field::Fixed(5));
        assert_eq!(decoded.fields[&17], variable(b"hello"));
        assert_eq!(decoded.fields[&12], Field::Fixed(0x01));
        // The TLV is left for the tail decoder.
        assert_eq!(cursor.remaining(), 6);
    }

    #[test]
    fn zero_sm_length_gives_empty_body() {
        const PAIR: Schema = Schema::new(
            "pair",
            &[
                FieldSpec::new(FieldName::SmLength),
                FieldSpec::new(FieldName::ShortMessage),
            ],
        );
        let data = [0x00];
        let mut cursor = Cursor::new(&data[..]);

        let decoded = decode_mandatory(&PAIR, &mut cursor);

        assert!(!decoded.early_eof);
        assert_eq!(decoded.fields[&0], Field::Fixed(0));
        assert_eq!(decoded.fields[&1], Field::Variable(Bytes::new()));
    }

    #[test]
    fn empty_body_is_early_eof() {
        let mut cursor = Cursor::new(&[][..]);

        let decoded = decode_mandatory(&MESSAGE_ID_RESP, &mut cursor);

        assert!(decoded.early_eof);
        assert!(decoded.fields.is_empty());
    }

    #[test]
    fn stops_after_last_complete_field() {
        // message_id and final_date, then the PDU ends.
        let data = b"0A1B\0\0";
        let mut cursor = Cursor::new(&data[..]);

        let decoded = decode_mandatory(&QUERY_SM_RESP, &mut cursor);

        assert!(decoded.early_eof);
        assert_eq!(decoded.fields.len(), 2);
        assert_eq!(decoded.fields[&0], variable(b"0A1B\0"));
        assert_eq!(decoded.fields[&1], variable(b"\0"));
    }

    #[test]
    fn unterminated_string_keeps_partial_bytes() {
        let data = b"smppcl";
        let mut cursor = Cursor::new(&data[..]);

        let decoded = decode_mandatory(&BIND, &mut cursor);

        assert!(decoded.early_eof);
        assert_eq!(decoded.fields.len(), 1);
        assert_eq!(decoded.fields[&0], variable(b"smppcl"));
    }

    #[test]
    fn short_message_body_cut_short() {
        let mut data = vec![0x00; 16];
        data.extend_from_slice(&[0x0A, b'a', b'b', b'c']);
        let mut cursor = Cursor::new(data.as_slice());

        let decoded = decode_mandatory(&SUBMIT_SM, &mut cursor);

        assert!(decoded.early_eof);
        assert_eq!(decoded.fields[&16], Field::Fixed(10));
        assert_eq!(decoded.fields[&17], variable(b"abc"));
    }
}
