//!
//! Attribute-related structs
//!
use bytes::{BufMut, Bytes, BytesMut};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::IppError, model::DelimiterTag, value::IppValue};

/// `IppAttribute` represents an IPP attribute: a name plus an ordered list of values (1setOf)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppAttribute {
    /// Attribute name
    name: String,
    /// Attribute values, at least one
    values: Vec<IppValue>,
}

impl IppAttribute {
    pub const ATTRIBUTES_CHARSET: &'static str = "attributes-charset";
    pub const ATTRIBUTES_NATURAL_LANGUAGE: &'static str = "attributes-natural-language";
    pub const CHARSET_CONFIGURED: &'static str = "charset-configured";
    pub const CHARSET_SUPPORTED: &'static str = "charset-supported";
    pub const DOCUMENT_FORMAT: &'static str = "document-format";
    pub const DOCUMENT_FORMAT_DEFAULT: &'static str = "document-format-default";
    pub const DOCUMENT_FORMAT_SUPPORTED: &'static str = "document-format-supported";
    pub const JOB_ID: &'static str = "job-id";
    pub const JOB_NAME: &'static str = "job-name";
    pub const JOB_STATE: &'static str = "job-state";
    pub const JOB_STATE_REASONS: &'static str = "job-state-reasons";
    pub const JOB_URI: &'static str = "job-uri";
    pub const LAST_DOCUMENT: &'static str = "last-document";
    pub const OPERATIONS_SUPPORTED: &'static str = "operations-supported";
    pub const PRINTER_IS_ACCEPTING_JOBS: &'static str = "printer-is-accepting-jobs";
    pub const PRINTER_MAKE_AND_MODEL: &'static str = "printer-make-and-model";
    pub const PRINTER_NAME: &'static str = "printer-name";
    pub const PRINTER_RESOLUTION_DEFAULT: &'static str = "printer-resolution-default";
    pub const PRINTER_STATE: &'static str = "printer-state";
    pub const PRINTER_STATE_REASONS: &'static str = "printer-state-reasons";
    pub const PRINTER_URI: &'static str = "printer-uri";
    pub const PRINTER_URI_SUPPORTED: &'static str = "printer-uri-supported";
    pub const REQUESTED_ATTRIBUTES: &'static str = "requested-attributes";
    pub const REQUESTING_USER_NAME: &'static str = "requesting-user-name";
    pub const STATUS_MESSAGE: &'static str = "status-message";

    /// Create new instance of the attribute with a single value
    ///
    /// * `name` - Attribute name<br/>
    /// * `value` - Attribute value<br/>
    pub fn new<S>(name: S, value: IppValue) -> IppAttribute
    where
        S: AsRef<str>,
    {
        IppAttribute {
            name: name.as_ref().to_owned(),
            values: vec![value],
        }
    }

    /// Create new instance of a multi-valued (1setOf) attribute
    ///
    /// * `name` - Attribute name<br/>
    /// * `values` - Attribute values in wire order<br/>
    pub fn with_values<S>(name: S, values: Vec<IppValue>) -> IppAttribute
    where
        S: AsRef<str>,
    {
        IppAttribute {
            name: name.as_ref().to_owned(),
            values,
        }
    }

    /// Return attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the first attribute value
    pub fn value(&self) -> &IppValue {
        &self.values[0]
    }

    /// Return all attribute values in wire order
    pub fn values(&self) -> &[IppValue] {
        &self.values
    }

    /// Append an additional value
    pub fn push(&mut self, value: IppValue) {
        self.values.push(value);
    }

    /// Consume this attribute and return the values
    pub fn into_values(self) -> Vec<IppValue> {
        self.values
    }

    /// Write attribute to byte array. The first value record carries the name, each
    /// following value repeats the record with a zero-length name.
    pub fn to_bytes(&self) -> Result<Bytes, IppError> {
        if self.name.len() > i16::MAX as usize {
            return Err(IppError::NameTooLong(self.name.len()));
        }

        let mut buffer = BytesMut::new();

        for (i, value) in self.values.iter().enumerate() {
            buffer.put_u8(value.tag() as u8);
            if i == 0 {
                buffer.put_u16(self.name.len() as u16);
                buffer.put_slice(self.name.as_bytes());
            } else {
                buffer.put_u16(0);
            }
            buffer.put(value.to_bytes());
        }
        Ok(buffer.freeze())
    }
}

/// Attribute group: an insertion-ordered set of attributes under one delimiter tag
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IppAttributeGroup {
    tag: DelimiterTag,
    attributes: Vec<IppAttribute>,
}

impl IppAttributeGroup {
    /// Create new attribute group of a given type
    pub fn new(tag: DelimiterTag) -> IppAttributeGroup {
        IppAttributeGroup {
            tag,
            attributes: Vec::new(),
        }
    }

    /// Return group type tag
    pub fn tag(&self) -> DelimiterTag {
        self.tag
    }

    /// Return attributes in insertion order
    pub fn attributes(&self) -> &[IppAttribute] {
        &self.attributes
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&IppAttribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// Look up a mutable attribute by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut IppAttribute> {
        self.attributes.iter_mut().find(|a| a.name() == name)
    }

    /// Insert an attribute. A name seen before keeps its position and gets its values
    /// replaced, otherwise the attribute is appended.
    pub fn insert(&mut self, attribute: IppAttribute) {
        match self.get_mut(attribute.name()) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Consume this group and return the attributes
    pub fn into_attributes(self) -> Vec<IppAttribute> {
        self.attributes
    }

    fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Attribute list: one group bucket per delimiter tag
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IppAttributes {
    groups: Vec<IppAttributeGroup>,
}

impl IppAttributes {
    /// Create attribute list
    pub fn new() -> IppAttributes {
        IppAttributes { ..Default::default() }
    }

    /// Get all groups
    pub fn groups(&self) -> &[IppAttributeGroup] {
        &self.groups
    }

    /// Consume this attribute list and return all attribute groups
    pub fn into_groups(self) -> Vec<IppAttributeGroup> {
        self.groups
    }

    /// Get the group matching a given delimiter tag
    pub fn group(&self, tag: DelimiterTag) -> Option<&IppAttributeGroup> {
        self.groups.iter().find(|g| g.tag() == tag)
    }

    /// Get or create the mutable group for a given delimiter tag
    pub fn group_mut(&mut self, tag: DelimiterTag) -> &mut IppAttributeGroup {
        let idx = match self.groups.iter().position(|g| g.tag() == tag) {
            Some(idx) => idx,
            None => {
                self.groups.push(IppAttributeGroup::new(tag));
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx]
    }

    /// Add attribute to a given group
    pub fn add(&mut self, tag: DelimiterTag, attribute: IppAttribute) {
        self.group_mut(tag).insert(attribute);
    }

    /// Write attribute list to byte array. Non-empty groups are emitted in the canonical
    /// operation, job, printer, unsupported order followed by the end-of-attributes marker.
    pub fn to_bytes(&self) -> Result<Bytes, IppError> {
        let mut buffer = BytesMut::new();

        for &tag in &DelimiterTag::GROUP_ORDER {
            if let Some(group) = self.group(tag).filter(|g| !g.is_empty()) {
                buffer.put_u8(tag as u8);
                for attr in group.attributes() {
                    buffer.put(attr.to_bytes()?);
                }
            }
        }
        buffer.put_u8(DelimiterTag::EndOfAttributes as u8);

        Ok(buffer.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_to_bytes() {
        let attr = IppAttribute::new("copies", IppValue::Integer(2));
        assert_eq!(
            attr.to_bytes().unwrap().to_vec(),
            vec![0x21, 0x00, 0x06, b'c', b'o', b'p', b'i', b'e', b's', 0x00, 0x04, 0x00, 0x00, 0x00, 0x02],
        );
    }

    #[test]
    fn test_multi_value_continuation() {
        let attr = IppAttribute::with_values(
            "requested-attributes",
            vec![
                IppValue::Keyword("copies".to_owned()),
                IppValue::Keyword("media".to_owned()),
            ],
        );
        let buf = attr.to_bytes().unwrap().to_vec();

        let mut expected = vec![0x44, 0x00, 0x14];
        expected.extend_from_slice(b"requested-attributes");
        expected.extend_from_slice(&[0x00, 0x06]);
        expected.extend_from_slice(b"copies");
        expected.extend_from_slice(&[0x44, 0x00, 0x00, 0x00, 0x05]);
        expected.extend_from_slice(b"media");

        assert_eq!(buf, expected);
    }

    #[test]
    fn test_group_order_is_canonical() {
        let mut attrs = IppAttributes::new();
        attrs.add(
            DelimiterTag::PrinterAttributes,
            IppAttribute::new("printer-name", IppValue::NameWithoutLanguage("p".to_owned())),
        );
        attrs.add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(IppAttribute::ATTRIBUTES_CHARSET, IppValue::Charset("utf-8".to_owned())),
        );

        let buf = attrs.to_bytes().unwrap();
        assert_eq!(buf[0], DelimiterTag::OperationAttributes as u8);
        assert_eq!(*buf.last().unwrap(), DelimiterTag::EndOfAttributes as u8);

        let printer_pos = buf
            .iter()
            .position(|&b| b == DelimiterTag::PrinterAttributes as u8)
            .unwrap();
        assert!(printer_pos > 0);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut group = IppAttributeGroup::new(DelimiterTag::OperationAttributes);
        group.insert(IppAttribute::new("a", IppValue::Integer(1)));
        group.insert(IppAttribute::new("b", IppValue::Integer(2)));
        group.insert(IppAttribute::new("a", IppValue::Integer(3)));

        assert_eq!(group.attributes().len(), 2);
        assert_eq!(group.attributes()[0].name(), "a");
        assert_eq!(group.get("a").unwrap().value(), &IppValue::Integer(3));
    }

    #[test]
    fn test_empty_group_is_not_emitted() {
        let mut attrs = IppAttributes::new();
        attrs.group_mut(DelimiterTag::JobAttributes);

        assert_eq!(attrs.to_bytes().unwrap().to_vec(), vec![0x03]);
    }
}
