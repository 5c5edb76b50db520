use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use std::str::FromStr;

/// Wire layout of a mandatory field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// C-Octet String: bytes up to and including a `0x00` terminator.
    NullTerminated,
    /// A single octet (TON, NPI, flags, enumerations).
    Fixed,
    /// The `sm_length` octet. It is followed by exactly that many octets of
    /// `short_message`, so one schema entry yields two field slots.
    ShortMessageLength,
    /// The `short_message` body. Consumed together with `sm_length`, never on its own.
    ShortMessage,
}

field_names! {
    ServiceType => ("service_type", NullTerminated),
    SourceAddrTon => ("source_addr_ton", Fixed),
    SourceAddrNpi => ("source_addr_npi", Fixed),
    SourceAddr => ("source_addr", NullTerminated),
    DestAddrTon => ("dest_addr_ton", Fixed),
    DestAddrNpi => ("dest_addr_npi", Fixed),
    DestinationAddr => ("destination_addr", NullTerminated),
    EsmClass => ("esm_class", Fixed),
    ProtocolId => ("protocol_id", Fixed),
    PriorityFlag => ("priority_flag", Fixed),
    ScheduleDeliveryTime => ("schedule_delivery_time", NullTerminated),
    ValidityPeriod => ("validity_period", NullTerminated),
    RegisteredDelivery => ("registered_delivery", Fixed),
    ReplaceIfPresentFlag => ("replace_if_present_flag", Fixed),
    DataCoding => ("data_coding", Fixed),
    SmDefaultMsgId => ("sm_default_msg_id", Fixed),
    SmLength => ("sm_length", ShortMessageLength),
    ShortMessage => ("short_message", ShortMessage),
    SystemId => ("system_id", NullTerminated),
    Password => ("password", NullTerminated),
    SystemType => ("system_type", NullTerminated),
    InterfaceVersion => ("interface_version", Fixed),
    AddrTon => ("addr_ton", Fixed),
    AddrNpi => ("addr_npi", Fixed),
    AddressRange => ("address_range", NullTerminated),
    MessageId => ("message_id", NullTerminated),
    FinalDate => ("final_date", NullTerminated),
    MessageState => ("message_state", Fixed),
    ErrorCode => ("error_code", Fixed),
    EsmeAddrTon => ("esme_addr_ton", Fixed),
    EsmeAddrNpi => ("esme_addr_npi", Fixed),
    EsmeAddr => ("esme_addr", NullTerminated),
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognised field name: {0:?}")]
pub struct UnknownFieldName(pub String);

impl FromStr for FieldName {
    type Err = UnknownFieldName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownFieldName(s.to_string()))
    }
}

/// A decoded mandatory field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    /// One octet.
    Fixed(u8),
    /// Raw octets exactly as they appeared on the wire. For C-Octet Strings
    /// this includes the trailing `0x00`; for `short_message` it is the body
    /// bounded by `sm_length`.
    Variable(Bytes),
}

impl Field {
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Field::Fixed(value) => Some(*value),
            Field::Variable(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Field::Fixed(_) => None,
            Field::Variable(bytes) => Some(bytes.as_ref()),
        }
    }

    /// The text of a variable field with its terminator stripped, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        let bytes = self.as_bytes()?;
        let text = bytes.strip_suffix(&[0x00]).unwrap_or(bytes);
        std::str::from_utf8(text).ok()
    }

    /// Number of octets this field occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Field::Fixed(_) => 1,
            Field::Variable(bytes) => bytes.len(),
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        match self {
            Field::Fixed(value) => buf.put_u8(*value),
            Field::Variable(bytes) => buf.put_slice(bytes),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Fixed(value) => write!(f, "{value}"),
            Field::Variable(bytes) => {
                let bytes: &[u8] = bytes;
                let text = bytes.strip_suffix(&[0x00]).unwrap_or(bytes);
                write!(f, "{}", String::from_utf8_lossy(text))
            }
        }
    }
}
