//!
//! IPP message
//!
use bytes::{BufMut, Bytes, BytesMut};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    attribute::{IppAttribute, IppAttributes},
    error::IppError,
    model::{DelimiterTag, IppVersion, Operation, StatusCode},
    parser::{IppParseError, IppParser},
    value::IppValue,
    FromPrimitive as _, IppHeader,
};

/// IPP request/response message: header, grouped attributes and the optional document data
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppMessage {
    pub(crate) header: IppHeader,
    pub(crate) attributes: IppAttributes,
    pub(crate) data: Bytes,
}

impl IppMessage {
    /// Create new IPP request for the given operation. The operation group is seeded with
    /// the mandatory `attributes-charset` and `attributes-natural-language` attributes.
    pub fn new(version: IppVersion, operation: Operation) -> IppMessage {
        let mut message = IppMessage {
            header: IppHeader::new(version, operation as u16, 1),
            attributes: IppAttributes::new(),
            data: Bytes::new(),
        };
        message.add_required_attributes();
        message
    }

    /// Create new IPP response from status and id
    pub fn new_response(version: IppVersion, status: StatusCode, id: u32) -> IppMessage {
        let mut message = IppMessage {
            header: IppHeader::new(version, status as u16, id),
            attributes: IppAttributes::new(),
            data: Bytes::new(),
        };
        message.add_required_attributes();
        message
    }

    fn add_required_attributes(&mut self) {
        self.attributes.add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(IppAttribute::ATTRIBUTES_CHARSET, IppValue::Charset("utf-8".to_owned())),
        );
        self.attributes.add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(
                IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE,
                IppValue::NaturalLanguage("en-us".to_owned()),
            ),
        );
    }

    /// Parse a complete IPP message from a byte buffer
    pub fn parse<B>(data: B) -> Result<IppMessage, IppParseError>
    where
        B: Into<Bytes>,
    {
        IppParser::new(crate::reader::IppReader::new(data.into())).parse()
    }

    /// Get IPP header
    pub fn header(&self) -> &IppHeader {
        &self.header
    }

    /// Get mutable IPP header
    pub fn header_mut(&mut self) -> &mut IppHeader {
        &mut self.header
    }

    /// Get attributes
    pub fn attributes(&self) -> &IppAttributes {
        &self.attributes
    }

    /// Get mutable attributes
    pub fn attributes_mut(&mut self) -> &mut IppAttributes {
        &mut self.attributes
    }

    /// Get document data
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Set document data
    pub fn set_data<B>(&mut self, data: B)
    where
        B: Into<Bytes>,
    {
        self.data = data.into();
    }

    /// Look up the symbolic operation name for the header code. Returns `None` when the
    /// code is not a known operation, e.g. for responses.
    pub fn operation_name(&self) -> Option<String> {
        Operation::from_u16(self.header.operation_or_status).map(|op| format!("{:?}", op))
    }

    /// Build a response for this message: same version and request id, the given status,
    /// and a seeded operation group. Pass [`StatusCode::SuccessfulOk`] for the default
    /// success response.
    pub fn derive_response(&self, status: StatusCode) -> IppMessage {
        IppMessage::new_response(self.header.version, status, self.header.request_id)
    }

    /// Write the message to a byte array: header, attribute groups in canonical order,
    /// end-of-attributes marker and the document data.
    pub fn to_bytes(&self) -> Result<Bytes, IppError> {
        if self.header.version.major() == 0 {
            return Err(IppError::InvalidVersion(self.header.version.0));
        }
        if self.header.request_id == 0 {
            return Err(IppError::InvalidRequestId);
        }

        let mut buffer = BytesMut::new();
        buffer.put(self.header.to_bytes());
        buffer.put(self.attributes.to_bytes()?);
        buffer.put_slice(&self.data);
        Ok(buffer.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_seeds_operation_group() {
        let message = IppMessage::new(IppVersion::v1_1(), Operation::PrintJob);
        let group = message.attributes().group(DelimiterTag::OperationAttributes).unwrap();

        assert_eq!(group.attributes().len(), 2);
        assert_eq!(
            group.attributes()[0].value(),
            &IppValue::Charset("utf-8".to_owned())
        );
        assert_eq!(
            group.attributes()[1].value(),
            &IppValue::NaturalLanguage("en-us".to_owned())
        );
    }

    #[test]
    fn test_model_round_trip() {
        let mut message = IppMessage::new(IppVersion::v1_1(), Operation::GetPrinterAttributes);
        message.attributes_mut().add(
            DelimiterTag::OperationAttributes,
            IppAttribute::with_values(
                IppAttribute::REQUESTED_ATTRIBUTES,
                vec![
                    IppValue::Keyword("copies".to_owned()),
                    IppValue::Keyword("media".to_owned()),
                ],
            ),
        );
        message.attributes_mut().add(
            DelimiterTag::JobAttributes,
            IppAttribute::new(IppAttribute::JOB_ID, IppValue::Integer(42)),
        );
        message.set_data(&b"document"[..]);

        let parsed = IppMessage::parse(message.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_wire_round_trip() {
        let mut message = IppMessage::new(IppVersion::v1_1(), Operation::PrintJob);
        message.attributes_mut().add(
            DelimiterTag::PrinterAttributes,
            IppAttribute::new(IppAttribute::PRINTER_STATE, IppValue::Enum(3)),
        );

        let wire = message.to_bytes().unwrap();
        let reencoded = IppMessage::parse(wire.clone()).unwrap().to_bytes().unwrap();
        assert_eq!(reencoded, wire);
    }

    #[test]
    fn test_operation_name() {
        let message = IppMessage::new(IppVersion::v1_1(), Operation::GetPrinterAttributes);
        assert_eq!(message.operation_name().as_deref(), Some("GetPrinterAttributes"));

        let response = message.derive_response(StatusCode::SuccessfulOk);
        assert_eq!(response.operation_name(), None);
    }

    #[test]
    fn test_derive_response_copies_version_and_id() {
        let mut request = IppMessage::new(IppVersion::v2_0(), Operation::PrintJob);
        request.header_mut().request_id = 77;

        let response = request.derive_response(StatusCode::ServerErrorBusy);
        assert_eq!(response.header().version, IppVersion::v2_0());
        assert_eq!(response.header().request_id, 77);
        assert_eq!(response.header().status_code(), StatusCode::ServerErrorBusy);
        assert!(response
            .attributes()
            .group(DelimiterTag::OperationAttributes)
            .unwrap()
            .get(IppAttribute::ATTRIBUTES_CHARSET)
            .is_some());
    }

    #[test]
    fn test_encode_rejects_zero_request_id() {
        let mut message = IppMessage::new(IppVersion::v1_1(), Operation::PrintJob);
        message.header_mut().request_id = 0;
        assert!(matches!(message.to_bytes(), Err(IppError::InvalidRequestId)));
    }

    #[test]
    fn test_encode_rejects_zero_major_version() {
        let mut message = IppMessage::new(IppVersion::v1_1(), Operation::PrintJob);
        message.header_mut().version = IppVersion(0x0001);
        assert!(matches!(message.to_bytes(), Err(IppError::InvalidVersion(_))));
    }

    #[test]
    fn test_unknown_operation_code_is_preserved() {
        let wire = vec![1, 1, 0x3f, 0xfe, 0, 0, 0, 1, 3];
        let message = IppMessage::parse(wire.clone()).unwrap();
        assert_eq!(message.header().operation_or_status, 0x3ffe);
        assert_eq!(message.operation_name(), None);
        assert_eq!(message.to_bytes().unwrap(), wire);
    }
}
