//! Integration tests for SMPP PDU decoding and re-encoding

use crate::codec::{CodecError, DecoderConfig, Encodable, PduHeader};
use crate::datatypes::*;
use crate::registry::PduKind;
use crate::{decode, decode_from_reader, decode_with_config};
use bytes::Bytes;
use std::io::Cursor;

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Complete PDU bytes with a correct command_length.
    fn pdu_bytes(command_id: u32, command_status: u32, sequence_number: u32, body: &[u8]) -> Vec<u8> {
        let header = PduHeader {
            command_length: (PduHeader::SIZE + body.len()) as u32,
            command_id,
            command_status,
            sequence_number,
        };
        let mut data = header.to_bytes().to_vec();
        data.extend_from_slice(body);
        data
    }

    fn tlv_bytes(tag: u16, value: &[u8]) -> Vec<u8> {
        let mut data = tag.to_be_bytes().to_vec();
        data.extend_from_slice(&(value.len() as u16).to_be_bytes());
        data.extend_from_slice(value);
        data
    }

    fn variable(bytes: &'static [u8]) -> Field {
        Field::Variable(Bytes::from_static(bytes))
    }

    #[test]
    fn test_enquire_link_header_only() {
        let data = pdu_bytes(CommandId::EnquireLink as u32, 0, 7, &[]);
        assert_eq!(data.len(), 16);

        let pdu = decode(&data).unwrap();

        assert_eq!(pdu.kind(), PduKind::EnquireLink);
        assert_eq!(
            *pdu.header(),
            PduHeader {
                command_length: 16,
                command_id: 0x0000_0015,
                command_status: 0,
                sequence_number: 7,
            }
        );
        assert!(pdu.fields().is_empty());
        assert!(pdu.tlv_fields().is_empty());
        assert!(!pdu.is_truncated());
        assert_eq!(pdu.to_bytes().as_ref(), data.as_slice());
    }

    #[test]
    fn test_too_short_for_every_length_and_command() {
        for kind in PduKind::ALL {
            let full = pdu_bytes(kind.command_id() as u32, 0, 1, &[]);
            for len in 0..PduHeader::SIZE {
                let result = decode(&full[..len]);
                assert!(
                    matches!(result, Err(CodecError::TooShort { len: l }) if l == len),
                    "{kind:?} with {len} bytes"
                );
            }
        }
    }

    #[test]
    fn test_unknown_command_carries_id() {
        let ids = [
            0x0000_0000,
            0x0000_000A,
            0x0000_0021, // submit_multi has no flat schema
            0x8000_0021,
            0x8000_0102,
            0x0001_0200,
            0xFFFF_FFFF,
        ];

        for id in ids {
            let data = pdu_bytes(id, 0, 1, &[0x00, 0x00]);
            match decode(&data) {
                Err(CodecError::UnknownCommand(got)) => assert_eq!(got, id),
                other => panic!("expected UnknownCommand({id:#x}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_submit_sm_empty_strings_and_two_tlvs() {
        let mut body = vec![
            0x00, // service_type
            0x00, 0x00, // source_addr_ton, source_addr_npi
            0x00, // source_addr
            0x00, 0x00, // dest_addr_ton, dest_addr_npi
            0x00, // destination_addr
            0x00, 0x00, 0x00, // esm_class, protocol_id, priority_flag
            0x00, // schedule_delivery_time
            0x00, // validity_period
            0x00, 0x00, 0x00, 0x00, // registered_delivery .. sm_default_msg_id
            0x00, // sm_length
        ];
        body.extend(tlv_bytes(0x0204, &[0x00, 0x2A]));
        body.extend(tlv_bytes(0x0424, b"long text"));
        let data = pdu_bytes(CommandId::SubmitSm as u32, 0, 2, &body);

        let pdu = decode(&data).unwrap();

        assert_eq!(pdu.kind(), PduKind::SubmitSm);
        assert!(!pdu.is_truncated());
        for name in [
            FieldName::ServiceType,
            FieldName::SourceAddr,
            FieldName::DestinationAddr,
            FieldName::ScheduleDeliveryTime,
            FieldName::ValidityPeriod,
        ] {
            assert_eq!(pdu.lookup(name).unwrap(), &variable(b"\0"), "{name}");
        }
        assert_eq!(pdu.lookup(FieldName::SmLength).unwrap(), &Field::Fixed(0));
        assert_eq!(
            pdu.lookup(FieldName::ShortMessage).unwrap(),
            &Field::Variable(Bytes::new())
        );

        let tlvs = pdu.tlv_fields();
        assert_eq!(tlvs.len(), 2);
        assert_eq!(tlvs[0], TlvField::new(0x0204, vec![0x00u8, 0x2A]));
        assert_eq!(tlvs[1].tag, 0x0424);
        assert_eq!(tlvs[1].length, 9);
        assert_eq!(tlvs[1].value.as_ref(), b"long text");

        assert_eq!(pdu.to_bytes().as_ref(), data.as_slice());
    }

    #[test]
    fn test_deliver_sm_roundtrip() {
        let mut body = Vec::new();
        body.extend_from_slice(b"CMT\0");
        body.extend_from_slice(&[0x01, 0x01]);
        body.extend_from_slice(b"447700900123\0");
        body.extend_from_slice(&[0x05, 0x00]);
        body.extend_from_slice(b"ACME\0");
        body.extend_from_slice(&[0x04, 0x00, 0x01]);
        body.extend_from_slice(b"\0\0");
        body.extend_from_slice(&[0x00, 0x00, 0x03, 0x00]);
        let text = b"id:0A1B sub:001 dlvrd:001 stat:DELIVRD err:000";
        body.push(text.len() as u8);
        body.extend_from_slice(text);
        body.extend(tlv_bytes(0x001E, b"0A1B\0"));
        body.extend(tlv_bytes(0x0427, &[0x02]));
        let data = pdu_bytes(CommandId::DeliverSm as u32, 0, 99, &body);

        let pdu = decode(&data).unwrap();

        assert_eq!(pdu.lookup(FieldName::ServiceType).unwrap().as_str(), Some("CMT"));
        assert_eq!(
            pdu.lookup(FieldName::SourceAddr).unwrap().as_str(),
            Some("447700900123")
        );
        assert_eq!(pdu.lookup(FieldName::DestAddrTon).unwrap().as_u8(), Some(0x05));
        assert_eq!(pdu.lookup(FieldName::EsmClass).unwrap().as_u8(), Some(0x04));
        assert_eq!(pdu.lookup(FieldName::DataCoding).unwrap().as_u8(), Some(0x03));
        assert_eq!(
            pdu.lookup(FieldName::SmLength).unwrap().as_u8(),
            Some(text.len() as u8)
        );
        assert_eq!(
            pdu.lookup(FieldName::ShortMessage).unwrap().as_bytes(),
            Some(&text[..])
        );
        assert_eq!(pdu.tlv(0x001E).unwrap().value.as_ref(), b"0A1B\0");
        assert_eq!(pdu.mandatory_schema().name(), "deliver_sm");
        assert_eq!(pdu.fields().len(), 18);

        assert_eq!(pdu.to_bytes().as_ref(), data.as_slice());
    }

    #[test]
    fn test_short_message_pairing_leaves_rest_to_tlvs() {
        let mut body = vec![
            b'7', 0x00, // message_id
            0x01, 0x01, b'1', 0x00, // source ton/npi/addr
            0x00, 0x00, // schedule_delivery_time, validity_period
            0x00, 0x00, // registered_delivery, sm_default_msg_id
            0x03, 0xAA, 0xBB, 0xCC, // sm_length + short_message
        ];
        body.extend(tlv_bytes(0x0019, &[0x01]));
        let data = pdu_bytes(CommandId::ReplaceSm as u32, 0, 3, &body);

        let pdu = decode(&data).unwrap();

        let sm_length_slot = pdu.mandatory_schema().slot_of(FieldName::SmLength).unwrap();
        assert_eq!(pdu.fields()[&sm_length_slot], Field::Fixed(3));
        assert_eq!(
            pdu.fields()[&(sm_length_slot + 1)],
            Field::Variable(Bytes::from_static(&[0xAA, 0xBB, 0xCC]))
        );
        assert_eq!(pdu.tlv_fields(), &[TlvField::new(0x0019, vec![0x01u8])]);
    }

    #[test]
    fn test_tlv_sequence_roundtrip() {
        let records: Vec<TlvField> = vec![
            TlvField::new(0x0210, vec![0x01u8]),
            TlvField::new(0x020E, vec![0x00u8, 0x10]),
            TlvField::new(0x020F, vec![0x03u8]),
            TlvField::new(0x0426, Bytes::new()),
            TlvField::new(0x020E, vec![0x00u8, 0x11]),
        ];
        let mut body = b"msg-1\0".to_vec();
        for tlv in &records {
            body.extend(tlv_bytes(tlv.tag, &tlv.value));
        }
        let data = pdu_bytes(CommandId::DataSmResp as u32, 0, 10, &body);

        let pdu = decode(&data).unwrap();

        assert_eq!(pdu.tlv_fields(), records.as_slice());
    }

    #[test]
    fn test_truncated_tlv_value() {
        let mut body = b"abc\0".to_vec();
        body.extend_from_slice(&[0x00, 0x1D, 0x00, 0x05, 0x01, 0x02, 0x03]);
        let data = pdu_bytes(CommandId::SubmitSmResp as u32, 0, 4, &body);

        let result = decode(&data);

        assert!(matches!(
            result,
            Err(CodecError::TruncatedTlv {
                offset: 20,
                needed: 5,
                available: 3
            })
        ));
    }

    #[test]
    fn test_early_eof_keeps_leading_fields() {
        // bind_transmitter carrying only system_id, password and system_type.
        let body = b"esme\0pw\0VMA\0";
        let data = pdu_bytes(CommandId::BindTransmitter as u32, 0, 1, body);

        let pdu = decode(&data).unwrap();

        assert!(pdu.is_truncated());
        assert_eq!(pdu.fields().len(), 3);
        assert_eq!(pdu.lookup(FieldName::SystemId).unwrap(), &variable(b"esme\0"));
        assert_eq!(pdu.lookup(FieldName::Password).unwrap(), &variable(b"pw\0"));
        assert_eq!(pdu.lookup(FieldName::SystemType).unwrap(), &variable(b"VMA\0"));
        assert!(matches!(
            pdu.lookup(FieldName::InterfaceVersion),
            Err(CodecError::FieldAbsent(FieldName::InterfaceVersion))
        ));
        assert!(pdu.tlv_fields().is_empty());
    }

    #[test]
    fn test_error_response_without_body() {
        let data = pdu_bytes(
            CommandId::SubmitSmResp as u32,
            CommandStatus::MessageQueueFull as u32,
            12,
            &[],
        );

        let pdu = decode(&data).unwrap();

        assert_eq!(pdu.header().status(), Some(CommandStatus::MessageQueueFull));
        assert!(pdu.is_truncated());
        assert!(pdu.fields().is_empty());
        assert_eq!(pdu.to_bytes().as_ref(), data.as_slice());
    }

    #[test]
    fn test_bind_transceiver_resp_with_interface_version_tlv() {
        let mut body = b"SMSC\0".to_vec();
        body.extend(tlv_bytes(0x0210, &[0x34]));
        let data = pdu_bytes(CommandId::BindTransceiverResp as u32, 0, 1, &body);

        let pdu = decode(&data).unwrap();

        assert_eq!(pdu.kind(), PduKind::BindTransceiverResp);
        assert_eq!(pdu.lookup(FieldName::SystemId).unwrap().as_str(), Some("SMSC"));
        assert_eq!(pdu.tlv(0x0210).unwrap().value.as_ref(), &[0x34]);
        assert_eq!(pdu.mandatory_field_names(), vec![FieldName::SystemId]);
    }

    #[test]
    fn test_null_terminated_field_roundtrip() {
        let body = b"system-with-a-long-id\0secret\0\0\x34\x00\x00\0";
        let data = pdu_bytes(CommandId::BindReceiver as u32, 0, 8, body);

        let pdu = decode(&data).unwrap();
        let reencoded = pdu.to_bytes();

        assert_eq!(reencoded.as_ref(), data.as_slice());
        let again = decode(&reencoded).unwrap();
        assert_eq!(again, pdu);
        assert_eq!(
            again.lookup(FieldName::SystemId).unwrap(),
            &variable(b"system-with-a-long-id\0")
        );
    }

    #[test]
    fn test_strict_length_checks() {
        let mut data = pdu_bytes(CommandId::Unbind as u32, 0, 2, &[]);
        data[3] = 0x20; // command_length claims 32 bytes

        assert!(decode(&data).is_ok());
        assert!(matches!(
            decode_with_config(&data, &DecoderConfig::strict()),
            Err(CodecError::LengthMismatch {
                declared: 32,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_decode_from_reader_sequence() {
        let mut stream = pdu_bytes(CommandId::QuerySm as u32, 0, 1, b"0A1B\0\x01\x01123\0");
        stream.extend(pdu_bytes(
            CommandId::QuerySmResp as u32,
            0,
            1,
            b"0A1B\0\0\x02\x00",
        ));
        let mut reader = Cursor::new(stream);
        let config = DecoderConfig::default();

        let query = decode_from_reader(&mut reader, &config).unwrap().unwrap();
        let resp = decode_from_reader(&mut reader, &config).unwrap().unwrap();

        assert_eq!(query.kind(), PduKind::QuerySm);
        assert_eq!(query.lookup(FieldName::SourceAddr).unwrap().as_str(), Some("123"));
        assert_eq!(resp.kind(), PduKind::QuerySmResp);
        assert_eq!(resp.lookup(FieldName::MessageState).unwrap().as_u8(), Some(2));
        assert!(decode_from_reader(&mut reader, &config).unwrap().is_none());
    }
}
