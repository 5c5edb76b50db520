// ABOUTME: Mandatory field layouts of the SMPP v3.4 PDUs, one static schema per PDU body
// ABOUTME: Also derives the field slot index of a name from the schema order

use crate::datatypes::{FieldKind, FieldName};

/// One entry of a schema: a field name with its wire layout resolved up front.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: FieldName) -> Self {
        Self {
            name,
            kind: name.kind(),
        }
    }
}

/// Ordered mandatory field layout of one PDU type.
///
/// Slots are numbered in schema order. `sm_length` fills two slots (the length
/// octet and the body it bounds) and the `short_message` entry that follows it
/// fills none of its own, so in the standard schemas a field's slot equals its
/// position in the list.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    name: &'static str,
    fields: &'static [FieldSpec],
}

impl Schema {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    /// PDU name as written in the SMPP specification, e.g. `"submit_sm"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field_names(&self) -> Vec<FieldName> {
        self.fields.iter().map(|spec| spec.name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: FieldName) -> bool {
        self.fields.iter().any(|spec| spec.name == name)
    }

    /// The slot a fully decoded PDU stores `name` in, or `None` if the schema
    /// does not carry it.
    pub fn slot_of(&self, name: FieldName) -> Option<usize> {
        let mut slot = 0;
        for spec in self.fields {
            match spec.kind {
                FieldKind::ShortMessage => {}
                FieldKind::ShortMessageLength => {
                    if name == spec.name {
                        return Some(slot);
                    }
                    if name == FieldName::ShortMessage {
                        return Some(slot + 1);
                    }
                    slot += 2;
                }
                FieldKind::NullTerminated | FieldKind::Fixed => {
                    if name == spec.name {
                        return Some(slot);
                    }
                    slot += 1;
                }
            }
        }
        None
    }

    /// Number of slots a fully decoded PDU of this schema holds.
    pub fn slot_count(&self) -> usize {
        self.fields
            .iter()
            .map(|spec| match spec.kind {
                FieldKind::ShortMessage => 0,
                FieldKind::ShortMessageLength => 2,
                FieldKind::NullTerminated | FieldKind::Fixed => 1,
            })
            .sum()
    }
}

use FieldName::*;

/// Schema shared by every PDU that has no mandatory body.
pub const HEADER_ONLY: Schema = Schema::new("header_only", &[]);

/// bind_transmitter, bind_receiver and bind_transceiver (Section 4.1)
pub const BIND: Schema = Schema::new(
    "bind",
    &[
        FieldSpec::new(SystemId),
        FieldSpec::new(Password),
        FieldSpec::new(SystemType),
        FieldSpec::new(InterfaceVersion),
        FieldSpec::new(AddrTon),
        FieldSpec::new(AddrNpi),
        FieldSpec::new(AddressRange),
    ],
);

/// bind_*_resp (Section 4.1). sc_interface_version follows as a TLV.
pub const BIND_RESP: Schema = Schema::new("bind_resp", &[FieldSpec::new(SystemId)]);

/// outbind (Section 4.1.7)
pub const OUTBIND: Schema = Schema::new(
    "outbind",
    &[FieldSpec::new(SystemId), FieldSpec::new(Password)],
);

/// submit_sm (Section 4.4.1)
pub const SUBMIT_SM: Schema = Schema::new(
    "submit_sm",
    &[
        FieldSpec::new(ServiceType),
        FieldSpec::new(SourceAddrTon),
        FieldSpec::new(SourceAddrNpi),
        FieldSpec::new(SourceAddr),
        FieldSpec::new(DestAddrTon),
        FieldSpec::new(DestAddrNpi),
        FieldSpec::new(DestinationAddr),
        FieldSpec::new(EsmClass),
        FieldSpec::new(ProtocolId),
        FieldSpec::new(PriorityFlag),
        FieldSpec::new(ScheduleDeliveryTime),
        FieldSpec::new(ValidityPeriod),
        FieldSpec::new(RegisteredDelivery),
        FieldSpec::new(ReplaceIfPresentFlag),
        FieldSpec::new(DataCoding),
        FieldSpec::new(SmDefaultMsgId),
        FieldSpec::new(SmLength),
        FieldSpec::new(ShortMessage),
    ],
);

/// deliver_sm (Section 4.6.1). Same layout as submit_sm.
pub const DELIVER_SM: Schema = Schema::new("deliver_sm", SUBMIT_SM.fields);

/// submit_sm_resp, deliver_sm_resp and data_sm_resp
pub const MESSAGE_ID_RESP: Schema = Schema::new("message_id_resp", &[FieldSpec::new(MessageId)]);

/// query_sm (Section 4.8.1)
pub const QUERY_SM: Schema = Schema::new(
    "query_sm",
    &[
        FieldSpec::new(MessageId),
        FieldSpec::new(SourceAddrTon),
        FieldSpec::new(SourceAddrNpi),
        FieldSpec::new(SourceAddr),
    ],
);

/// query_sm_resp (Section 4.8.2)
pub const QUERY_SM_RESP: Schema = Schema::new(
    "query_sm_resp",
    &[
        FieldSpec::new(MessageId),
        FieldSpec::new(FinalDate),
        FieldSpec::new(MessageState),
        FieldSpec::new(ErrorCode),
    ],
);

/// replace_sm (Section 4.10.1)
pub const REPLACE_SM: Schema = Schema::new(
    "replace_sm",
    &[
        FieldSpec::new(MessageId),
        FieldSpec::new(SourceAddrTon),
        FieldSpec::new(SourceAddrNpi),
        FieldSpec::new(SourceAddr),
        FieldSpec::new(ScheduleDeliveryTime),
        FieldSpec::new(ValidityPeriod),
        FieldSpec::new(RegisteredDelivery),
        FieldSpec::new(SmDefaultMsgId),
        FieldSpec::new(SmLength),
        FieldSpec::new(ShortMessage),
    ],
);

/// cancel_sm (Section 4.9.1)
pub const CANCEL_SM: Schema = Schema::new(
    "cancel_sm",
    &[
        FieldSpec::new(ServiceType),
        FieldSpec::new(MessageId),
        FieldSpec::new(SourceAddrTon),
        FieldSpec::new(SourceAddrNpi),
        FieldSpec::new(SourceAddr),
        FieldSpec::new(DestAddrTon),
        FieldSpec::new(DestAddrNpi),
        FieldSpec::new(DestinationAddr),
    ],
);

/// data_sm (Section 4.7.1). The message itself travels in the message_payload TLV.
pub const DATA_SM: Schema = Schema::new(
    "data_sm",
    &[
        FieldSpec::new(ServiceType),
        FieldSpec::new(SourceAddrTon),
        FieldSpec::new(SourceAddrNpi),
        FieldSpec::new(SourceAddr),
        FieldSpec::new(DestAddrTon),
        FieldSpec::new(DestAddrNpi),
        FieldSpec::new(DestinationAddr),
        FieldSpec::new(EsmClass),
        FieldSpec::new(RegisteredDelivery),
        FieldSpec::new(DataCoding),
    ],
);

/// alert_notification (Section 4.12.1)
pub const ALERT_NOTIFICATION: Schema = Schema::new(
    "alert_notification",
    &[
        FieldSpec::new(SourceAddrTon),
        FieldSpec::new(SourceAddrNpi),
        FieldSpec::new(SourceAddr),
        FieldSpec::new(EsmeAddrTon),
        FieldSpec::new(EsmeAddrNpi),
        FieldSpec::new(EsmeAddr),
    ],
);
