//!
//! IPP message parser
//!
use bytes::{Buf, Bytes};
use log::trace;

use crate::{
    attribute::{IppAttribute, IppAttributes},
    message::IppMessage,
    model::{DelimiterTag, ValueTag},
    reader::IppReader,
    value::IppValue,
    FromPrimitive as _,
};

/// Parse error enum
#[derive(Debug, thiserror::Error)]
pub enum IppParseError {
    #[error("Message truncated")]
    /// Buffer ended in the middle of a field
    Truncated,

    #[error("Malformed message: {0}")]
    /// A length or fixed-size value failed its invariant
    Malformed(&'static str),

    #[error("Unsupported group tag: {0:#04x}")]
    /// Delimiter byte outside the known set
    UnsupportedGroup(u8),

    #[error("Unsupported value tag: {0:#04x}")]
    /// Value tag not in the dispatch table
    UnsupportedValueTag(u32),

    #[error("Additional value without a preceding named attribute")]
    /// Zero-length name with no prior named attribute in the group
    UnexpectedContinuation,
}

/// IPP message parser
pub struct IppParser {
    reader: IppReader,
}

impl IppParser {
    /// Create IPP parser from a reader
    pub fn new<T>(reader: T) -> IppParser
    where
        T: Into<IppReader>,
    {
        IppParser { reader: reader.into() }
    }

    fn parse_attribute(
        &mut self,
        group: DelimiterTag,
        last_name: &mut Option<String>,
        attributes: &mut IppAttributes,
    ) -> Result<(), IppParseError> {
        let tag_byte = self.reader.read_tag()?;
        let name_len = self.reader.read_length()?;
        let name = if name_len > 0 {
            let raw = self.reader.read_bytes(name_len)?;
            Some(String::from_utf8_lossy(&raw).into_owned())
        } else {
            None
        };

        let value_len = self.reader.read_length()?;
        let mut value = self.reader.read_bytes(value_len)?;

        // extension escape: the real tag sits in the first 4 value octets
        let mut value_tag = tag_byte as u32;
        if tag_byte == ValueTag::Extension as u8 {
            if value.len() < 4 {
                return Err(IppParseError::Malformed("extension value shorter than 4 octets"));
            }
            value_tag = value.get_u32();
            if value_tag > u8::MAX as u32 {
                return Err(IppParseError::UnsupportedValueTag(value_tag));
            }
        }

        let ipp_value = IppValue::parse(value_tag as u8, value)?;
        trace!("Value tag {:#04x}: {:?}: {}", value_tag, name, ipp_value);

        match name {
            Some(name) => {
                attributes.group_mut(group).insert(IppAttribute::new(&name, ipp_value));
                *last_name = Some(name);
            }
            None => {
                // additional value of the most recent named attribute
                let attr = last_name
                    .as_deref()
                    .and_then(|name| attributes.group_mut(group).get_mut(name));
                match attr {
                    Some(attr) => attr.push(ipp_value),
                    None => return Err(IppParseError::UnexpectedContinuation),
                }
            }
        }
        Ok(())
    }

    fn parse_group(&mut self, group: DelimiterTag, attributes: &mut IppAttributes) -> Result<(), IppParseError> {
        trace!("Delimiter tag: {:#04x}", group as u8);
        attributes.group_mut(group);

        let mut last_name: Option<String> = None;
        loop {
            // a byte below 0x10 is the next delimiter, not a value tag
            if self.reader.peek_u8()? < 0x10 {
                return Ok(());
            }
            self.parse_attribute(group, &mut last_name, attributes)?;
        }
    }

    /// Parse an IPP message. Bytes past the end-of-attributes marker become the
    /// document data.
    pub fn parse(mut self) -> Result<IppMessage, IppParseError> {
        let header = self.reader.read_header()?;
        trace!("IPP header: {:?}", header);

        let mut attributes = IppAttributes::new();
        loop {
            let tag = self.reader.read_tag()?;
            match DelimiterTag::from_u8(tag) {
                Some(DelimiterTag::EndOfAttributes) => break,
                Some(group) => self.parse_group(group, &mut attributes)?,
                None => return Err(IppParseError::UnsupportedGroup(tag)),
            }
        }

        Ok(IppMessage {
            header,
            attributes,
            data: self.reader.into_remaining(),
        })
    }
}

impl From<Bytes> for IppParser {
    fn from(b: Bytes) -> Self {
        IppParser::new(IppReader::new(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IppVersion;

    fn parse(data: Vec<u8>) -> Result<IppMessage, IppParseError> {
        IppParser::new(IppReader::new(Bytes::from(data))).parse()
    }

    #[test]
    fn test_parse_no_attributes() {
        let res = parse(vec![1, 1, 0, 0, 0, 0, 0, 0, 3]).unwrap();
        assert!(res.attributes().groups().is_empty());
        assert!(res.data().is_empty());
    }

    #[test]
    fn test_parse_single_value() {
        let res = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
        ])
        .unwrap();

        let attrs = res.attributes().group(DelimiterTag::PrinterAttributes).unwrap();
        let attr = attrs.get("test").unwrap();
        assert_eq!(attr.value().as_integer(), Some(&0x1234_5678));
    }

    #[test]
    fn test_parse_additional_values() {
        let res = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78,
            0x21, 0x00, 0x00, 0x00, 0x04, 0x77, 0x65, 0x43, 0x21, 3,
        ])
        .unwrap();

        let attrs = res.attributes().group(DelimiterTag::PrinterAttributes).unwrap();
        let attr = attrs.get("test").unwrap();
        assert_eq!(
            attr.values(),
            &[IppValue::Integer(0x1234_5678), IppValue::Integer(0x7765_4321)]
        );
    }

    #[test]
    fn test_parse_groups() {
        let res = parse(vec![
            0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04,
            0x12, 0x34, 0x56, 0x78, 0x21, 0x00, 0x05, b't', b'e', b's', b't', b'2', 0x00, 0x04, 0x12, 0x34, 0x56, 0xFF,
            0x04, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x87, 0x65, 0x43, 0x21, 0x03,
        ])
        .unwrap();

        assert_eq!(
            res.attributes()
                .group(DelimiterTag::OperationAttributes)
                .unwrap()
                .attributes()
                .len(),
            2
        );
        assert_eq!(
            res.attributes()
                .group(DelimiterTag::PrinterAttributes)
                .unwrap()
                .attributes()
                .len(),
            1
        );
    }

    #[test]
    fn test_parse_with_data() {
        let res = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
            b'f', b'o', b'o',
        ])
        .unwrap();

        assert_eq!(res.header().version, IppVersion::v1_1());
        assert_eq!(res.data().as_ref(), b"foo");
    }

    #[test]
    fn test_parse_truncated() {
        assert!(matches!(
            parse(vec![1, 1, 0, 0, 0, 0]),
            Err(IppParseError::Truncated)
        ));
        // group opened, no end marker
        assert!(matches!(
            parse(vec![1, 1, 0, 0, 0, 0, 0, 0, 0x01]),
            Err(IppParseError::Truncated)
        ));
        // value bytes missing
        assert!(matches!(
            parse(vec![1, 1, 0, 0, 0, 0, 0, 0, 0x01, 0x21, 0x00, 0x01, b'a', 0x00, 0x04, 0x12]),
            Err(IppParseError::Truncated)
        ));
    }

    #[test]
    fn test_parse_unsupported_group() {
        assert!(matches!(
            parse(vec![1, 1, 0, 0, 0, 0, 0, 0, 0x07, 3]),
            Err(IppParseError::UnsupportedGroup(0x07))
        ));
    }

    #[test]
    fn test_parse_unsupported_value_tag() {
        assert!(matches!(
            parse(vec![1, 1, 0, 0, 0, 0, 0, 0, 0x01, 0x20, 0x00, 0x01, b'a', 0x00, 0x00, 3]),
            Err(IppParseError::UnsupportedValueTag(0x20))
        ));
    }

    #[test]
    fn test_parse_unexpected_continuation() {
        // zero-length name with no named attribute before it
        assert!(matches!(
            parse(vec![1, 1, 0, 0, 0, 0, 0, 0, 0x01, 0x21, 0x00, 0x00, 0x00, 0x04, 0, 0, 0, 1, 3]),
            Err(IppParseError::UnexpectedContinuation)
        ));
    }

    #[test]
    fn test_continuation_does_not_cross_groups() {
        // named attribute in the operation group, continuation record in the printer group
        assert!(matches!(
            parse(vec![
                1, 1, 0, 0, 0, 0, 0, 0, 0x01, 0x21, 0x00, 0x01, b'a', 0x00, 0x04, 0, 0, 0, 1, 0x04, 0x21, 0x00, 0x00,
                0x00, 0x04, 0, 0, 0, 2, 3,
            ]),
            Err(IppParseError::UnexpectedContinuation)
        ));
    }

    #[test]
    fn test_parse_extension_tag() {
        // 0x7f escape carrying a keyword tag (0x44) and payload "ab"
        let res = parse(vec![
            1, 1, 0, 0, 0, 0, 0, 0, 0x01, 0x7f, 0x00, 0x03, b'e', b'x', b't', 0x00, 0x06, 0x00, 0x00, 0x00, 0x44,
            b'a', b'b', 3,
        ])
        .unwrap();

        let attrs = res.attributes().group(DelimiterTag::OperationAttributes).unwrap();
        assert_eq!(attrs.get("ext").unwrap().value(), &IppValue::Keyword("ab".to_owned()));
    }

    #[test]
    fn test_parse_extension_tag_too_short() {
        assert!(matches!(
            parse(vec![
                1, 1, 0, 0, 0, 0, 0, 0, 0x01, 0x7f, 0x00, 0x03, b'e', b'x', b't', 0x00, 0x02, 0x00, 0x44, 3,
            ]),
            Err(IppParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_negative_name_length() {
        assert!(matches!(
            parse(vec![1, 1, 0, 0, 0, 0, 0, 0, 0x01, 0x21, 0x80, 0x00, 3]),
            Err(IppParseError::Malformed(_))
        ));
    }
}
