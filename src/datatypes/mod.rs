mod command_id;
mod command_status;
mod field;
mod tlv;

pub use command_id::CommandId;
pub use command_status::CommandStatus;
pub use field::{Field, FieldKind, FieldName, UnknownFieldName};
pub use tlv::{TLV_HEADER_SIZE, TlvField, decode_tlvs};
