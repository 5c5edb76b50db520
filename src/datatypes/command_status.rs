use num_enum::TryFromPrimitive;

/// Status codes carried in the `command_status` header word (Section 5.1.3).
///
/// Only the codes a decoder has reason to produce or inspect are listed; the
/// header keeps the raw `u32`, so unlisted codes survive a decode untouched.
#[derive(TryFromPrimitive)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandStatus {
    /// No Error
    Ok = 0x0000_0000,

    /// Message Length is invalid
    InvalidMsgLength = 0x0000_0001,

    /// Command Length is invalid
    InvalidCommandLength = 0x0000_0002,

    /// Invalid Command ID
    InvalidCommandId = 0x0000_0003,

    /// Incorrect BIND Status for given command
    IncorrectBindStatus = 0x0000_0004,

    /// ESME Already in Bound State
    AlreadyBoundState = 0x0000_0005,

    /// System Error
    SystemError = 0x0000_0008,

    /// Invalid Source Address
    InvalidSourceAddress = 0x0000_000A,

    /// Invalid Dest Addr
    InvalidDestinationAddress = 0x0000_000B,

    /// Message ID is invalid
    InvalidMessageId = 0x0000_000C,

    /// Bind Failed
    BindFailed = 0x0000_000D,

    /// Invalid Password
    InvalidPassword = 0x0000_000E,

    /// Invalid System ID
    InvalidSystemId = 0x0000_000F,

    /// Message Queue Full
    MessageQueueFull = 0x0000_0014,

    /// Throttling error
    ThrottlingError = 0x0000_0058,

    /// Error in the optional part of the PDU Body.
    ErrorInOptionalPartOfPduBody = 0x0000_00C0,

    /// Optional Parameter not allowed
    OptionalParameterNotAllowed = 0x0000_00C1,

    /// Invalid Parameter Length.
    InvalidParameterLength = 0x0000_00C2,

    /// Expected Optional Parameter missing
    ExpectedOptionalParameterMissing = 0x0000_00C3,

    /// Invalid Optional Parameter Value
    InvalidOptionalParameterValue = 0x0000_00C4,

    /// Delivery Failure (data_sm_resp)
    DeliveryFailed = 0x0000_00FE,

    UnknownError = 0x0000_00FF,
}
