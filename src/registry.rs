// ABOUTME: Dispatch from command_id to the PDU type that decodes it
// ABOUTME: Holds the closed set of supported PDU kinds, the registry, and the buffer/reader entry points

use crate::codec::{CodecError, DecoderConfig, PduHeader};
use crate::datatypes::CommandId;
use crate::pdu::Pdu;
use crate::schema::{self, Schema};
use std::collections::HashMap;
use std::io::{Cursor, ErrorKind, Read};
use std::sync::OnceLock;

/// The PDU types this crate knows how to decode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PduKind {
    GenericNack,
    BindReceiver,
    BindReceiverResp,
    BindTransmitter,
    BindTransmitterResp,
    BindTransceiver,
    BindTransceiverResp,
    Outbind,
    Unbind,
    UnbindResp,
    QuerySm,
    QuerySmResp,
    SubmitSm,
    SubmitSmResp,
    DeliverSm,
    DeliverSmResp,
    ReplaceSm,
    ReplaceSmResp,
    CancelSm,
    CancelSmResp,
    DataSm,
    DataSmResp,
    AlertNotification,
    EnquireLink,
    EnquireLinkResp,
}

impl PduKind {
    pub const ALL: &'static [PduKind] = &[
        PduKind::GenericNack,
        PduKind::BindReceiver,
        PduKind::BindReceiverResp,
        PduKind::BindTransmitter,
        PduKind::BindTransmitterResp,
        PduKind::BindTransceiver,
        PduKind::BindTransceiverResp,
        PduKind::Outbind,
        PduKind::Unbind,
        PduKind::UnbindResp,
        PduKind::QuerySm,
        PduKind::QuerySmResp,
        PduKind::SubmitSm,
        PduKind::SubmitSmResp,
        PduKind::DeliverSm,
        PduKind::DeliverSmResp,
        PduKind::ReplaceSm,
        PduKind::ReplaceSmResp,
        PduKind::CancelSm,
        PduKind::CancelSmResp,
        PduKind::DataSm,
        PduKind::DataSmResp,
        PduKind::AlertNotification,
        PduKind::EnquireLink,
        PduKind::EnquireLinkResp,
    ];

    pub fn command_id(self) -> CommandId {
        match self {
            PduKind::GenericNack => CommandId::GenericNack,
            PduKind::BindReceiver => CommandId::BindReceiver,
            PduKind::BindReceiverResp => CommandId::BindReceiverResp,
            PduKind::BindTransmitter => CommandId::BindTransmitter,
            PduKind::BindTransmitterResp => CommandId::BindTransmitterResp,
            PduKind::BindTransceiver => CommandId::BindTransceiver,
            PduKind::BindTransceiverResp => CommandId::BindTransceiverResp,
            PduKind::Outbind => CommandId::Outbind,
            PduKind::Unbind => CommandId::Unbind,
            PduKind::UnbindResp => CommandId::UnbindResp,
            PduKind::QuerySm => CommandId::QuerySm,
            PduKind::QuerySmResp => CommandId::QuerySmResp,
            PduKind::SubmitSm => CommandId::SubmitSm,
            PduKind::SubmitSmResp => CommandId::SubmitSmResp,
            PduKind::DeliverSm => CommandId::DeliverSm,
            PduKind::DeliverSmResp => CommandId::DeliverSmResp,
            PduKind::ReplaceSm => CommandId::ReplaceSm,
            PduKind::ReplaceSmResp => CommandId::ReplaceSmResp,
            PduKind::CancelSm => CommandId::CancelSm,
            PduKind::CancelSmResp => CommandId::CancelSmResp,
            PduKind::DataSm => CommandId::DataSm,
            PduKind::DataSmResp => CommandId::DataSmResp,
            PduKind::AlertNotification => CommandId::AlertNotification,
            PduKind::EnquireLink => CommandId::EnquireLink,
            PduKind::EnquireLinkResp => CommandId::EnquireLinkResp,
        }
    }

    /// Mandatory field layout of this PDU type.
    pub fn schema(self) -> &'static Schema {
        match self {
            PduKind::BindReceiver | PduKind::BindTransmitter | PduKind::BindTransceiver => {
                &schema::BIND
            }
            PduKind::BindReceiverResp
            | PduKind::BindTransmitterResp
            | PduKind::BindTransceiverResp => &schema::BIND_RESP,
            PduKind::Outbind => &schema::OUTBIND,
            PduKind::QuerySm => &schema::QUERY_SM,
            PduKind::QuerySmResp => &schema::QUERY_SM_RESP,
            PduKind::SubmitSm => &schema::SUBMIT_SM,
            PduKind::DeliverSm => &schema::DELIVER_SM,
            PduKind::SubmitSmResp | PduKind::DeliverSmResp | PduKind::DataSmResp => {
                &schema::MESSAGE_ID_RESP
            }
            PduKind::ReplaceSm => &schema::REPLACE_SM,
            PduKind::CancelSm => &schema::CANCEL_SM,
            PduKind::DataSm => &schema::DATA_SM,
            PduKind::AlertNotification => &schema::ALERT_NOTIFICATION,
            PduKind::GenericNack
            | PduKind::Unbind
            | PduKind::UnbindResp
            | PduKind::ReplaceSmResp
            | PduKind::CancelSmResp
            | PduKind::EnquireLink
            | PduKind::EnquireLinkResp => &schema::HEADER_ONLY,
        }
    }

    /// PDU types made of the header alone. Anything after the header is ignored.
    pub fn is_header_only(self) -> bool {
        self.schema().is_empty()
    }

    /// Build the PDU from its header and the cursor positioned after it.
    pub fn decode(self, header: PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Pdu, CodecError> {
        if self.is_header_only() {
            return Ok(Pdu::header_only(self, header));
        }
        Pdu::decode_body(self, header, buf)
    }
}

/// Maps command ids to the PDU type that decodes them.
#[derive(Debug, Clone)]
pub struct PduRegistry {
    decoders: HashMap<CommandId, PduKind>,
}

impl PduRegistry {
    /// Create a new registry with standard SMPP v3.4 PDUs registered
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for kind in PduKind::ALL {
            registry.register(kind.command_id(), *kind);
        }
        registry
    }

    /// A registry that decodes nothing.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Shared registry with every standard PDU type, used by [`crate::decode`].
    pub fn standard() -> &'static PduRegistry {
        static STANDARD: OnceLock<PduRegistry> = OnceLock::new();
        STANDARD.get_or_init(PduRegistry::new)
    }

    /// Decode `command_id` with the layout of `kind`, replacing any previous entry.
    pub fn register(&mut self, command_id: CommandId, kind: PduKind) -> Option<PduKind> {
        self.decoders.insert(command_id, kind)
    }

    pub fn unregister(&mut self, command_id: CommandId) -> Option<PduKind> {
        self.decoders.remove(&command_id)
    }

    /// Check if a command_id is registered
    pub fn is_registered(&self, command_id: CommandId) -> bool {
        self.decoders.contains_key(&command_id)
    }

    /// Get all registered command_ids
    pub fn registered_commands(&self) -> Vec<CommandId> {
        self.decoders.keys().copied().collect()
    }

    /// The PDU type for a raw command_id.
    pub fn kind_for(&self, command_id: u32) -> Result<PduKind, CodecError> {
        CommandId::try_from(command_id)
            .ok()
            .and_then(|id| self.decoders.get(&id).copied())
            .ok_or_else(|| {
                tracing::warn!("Unknown PDU command_id: {:#x}", command_id);
                CodecError::UnknownCommand(command_id)
            })
    }

    /// Decode one PDU from a buffer holding it, with the default configuration.
    pub fn decode(&self, data: &[u8]) -> Result<Pdu, CodecError> {
        self.decode_with(data, &DecoderConfig::default())
    }

    pub fn decode_with(&self, data: &[u8], config: &DecoderConfig) -> Result<Pdu, CodecError> {
        let mut cursor = Cursor::new(data);
        let header = PduHeader::decode(&mut cursor)?;
        config.check_length(&header, data.len())?;

        let kind = self.kind_for(header.command_id)?;
        kind.decode(header, &mut cursor)
    }

    /// Read and decode one PDU from a byte stream.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly before the first
    /// header byte. A stream that ends anywhere inside a PDU is an
    /// `UnexpectedEof` I/O error.
    pub fn read_pdu<R: Read>(
        &self,
        reader: &mut R,
        config: &DecoderConfig,
    ) -> Result<Option<Pdu>, CodecError> {
        let mut head = [0u8; PduHeader::SIZE];
        if !read_header(reader, &mut head)? {
            return Ok(None);
        }

        let header = PduHeader::from_bytes(&head);
        let length = header.command_length;
        if length < PduHeader::SIZE as u32 || length > config.max_pdu_size {
            return Err(CodecError::InvalidPduLength {
                length,
                min: PduHeader::SIZE as u32,
                max: config.max_pdu_size,
            });
        }

        let mut data = vec![0u8; length as usize];
        data[..PduHeader::SIZE].copy_from_slice(&head);
        reader.read_exact(&mut data[PduHeader::SIZE..])?;

        self.decode_with(&data, config).map(Some)
    }
}

impl Default for PduRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill `head`, distinguishing a clean end of stream (`Ok(false)`) from one
/// that cuts the header short.
fn read_header<R: Read>(reader: &mut R, head: &mut [u8]) -> Result<bool, std::io::Error> {
    let mut filled = 0;
    while filled < head.len() {
        match reader.read(&mut head[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(ErrorKind::UnexpectedEof.into()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}
