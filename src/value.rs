//!
//! IPP value
//!
use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use enum_as_inner::EnumAsInner;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{model::ValueTag, parser::IppParseError, FromPrimitive as _};

/// IPP attribute values as defined in [RFC 2910](https://tools.ietf.org/html/rfc2910)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, EnumAsInner)]
pub enum IppValue {
    Unsupported,
    Default,
    Unknown,
    NoValue,
    Integer(i32),
    Boolean(bool),
    Enum(i32),
    OctetString(Bytes),
    DateTime {
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minutes: u8,
        seconds: u8,
        deci_seconds: u8,
        utc_dir: char,
        utc_hours: u8,
        utc_mins: u8,
    },
    Resolution {
        cross_feed: i32,
        feed: i32,
        units: i8,
    },
    RangeOfInteger {
        lower: i32,
        upper: i32,
    },
    TextWithLanguage {
        language: String,
        text: String,
    },
    NameWithLanguage {
        language: String,
        name: String,
    },
    TextWithoutLanguage(String),
    NameWithoutLanguage(String),
    Keyword(String),
    Uri(String),
    UriScheme(String),
    Charset(String),
    NaturalLanguage(String),
    MimeMediaType(String),
}

fn string_value(data: &Bytes) -> String {
    String::from_utf8_lossy(data).into_owned()
}

// language-tagged payload: [len; language][len; string]
fn parse_with_language(mut data: Bytes) -> Result<(String, String), IppParseError> {
    if data.remaining() < 2 {
        return Err(IppParseError::Malformed("language length overruns the value"));
    }
    let lang_len = data.get_u16() as usize;
    if data.remaining() < lang_len {
        return Err(IppParseError::Malformed("language overruns the value"));
    }
    let language = string_value(&data.split_to(lang_len));
    if data.remaining() < 2 {
        return Err(IppParseError::Malformed("string length overruns the value"));
    }
    let str_len = data.get_u16() as usize;
    if data.remaining() != str_len {
        return Err(IppParseError::Malformed("string length does not match the value"));
    }
    Ok((language, string_value(&data)))
}

impl IppValue {
    /// Convert to the binary value tag
    pub fn tag(&self) -> ValueTag {
        match *self {
            IppValue::Unsupported => ValueTag::Unsupported,
            IppValue::Default => ValueTag::Default,
            IppValue::Unknown => ValueTag::Unknown,
            IppValue::NoValue => ValueTag::NoValue,
            IppValue::Integer(_) => ValueTag::Integer,
            IppValue::Boolean(_) => ValueTag::Boolean,
            IppValue::Enum(_) => ValueTag::Enum,
            IppValue::OctetString(_) => ValueTag::OctetStringUnspecified,
            IppValue::DateTime { .. } => ValueTag::DateTime,
            IppValue::Resolution { .. } => ValueTag::Resolution,
            IppValue::RangeOfInteger { .. } => ValueTag::RangeOfInteger,
            IppValue::TextWithLanguage { .. } => ValueTag::TextWithLanguage,
            IppValue::NameWithLanguage { .. } => ValueTag::NameWithLanguage,
            IppValue::TextWithoutLanguage(_) => ValueTag::TextWithoutLanguage,
            IppValue::NameWithoutLanguage(_) => ValueTag::NameWithoutLanguage,
            IppValue::Keyword(_) => ValueTag::Keyword,
            IppValue::Uri(_) => ValueTag::Uri,
            IppValue::UriScheme(_) => ValueTag::UriScheme,
            IppValue::Charset(_) => ValueTag::Charset,
            IppValue::NaturalLanguage(_) => ValueTag::NaturalLanguage,
            IppValue::MimeMediaType(_) => ValueTag::MimeMediaType,
        }
    }

    /// Parse value from byte array which does not include the value length field.
    /// Fixed-size kinds reject any other payload length.
    pub fn parse(value_tag: u8, mut data: Bytes) -> Result<IppValue, IppParseError> {
        let ipp_tag = ValueTag::from_u8(value_tag).ok_or(IppParseError::UnsupportedValueTag(value_tag as u32))?;

        let value = match ipp_tag {
            ValueTag::Unsupported | ValueTag::Default | ValueTag::Unknown | ValueTag::NoValue => {
                if !data.is_empty() {
                    return Err(IppParseError::Malformed("out-of-band value with a payload"));
                }
                match ipp_tag {
                    ValueTag::Unsupported => IppValue::Unsupported,
                    ValueTag::Default => IppValue::Default,
                    ValueTag::Unknown => IppValue::Unknown,
                    _ => IppValue::NoValue,
                }
            }
            ValueTag::Integer | ValueTag::Enum => {
                if data.len() != 4 {
                    return Err(IppParseError::Malformed("integer value is not 4 octets"));
                }
                if ipp_tag == ValueTag::Integer {
                    IppValue::Integer(data.get_i32())
                } else {
                    IppValue::Enum(data.get_i32())
                }
            }
            ValueTag::Boolean => {
                if data.len() != 1 {
                    return Err(IppParseError::Malformed("boolean value is not 1 octet"));
                }
                IppValue::Boolean(data.get_u8() != 0)
            }
            ValueTag::OctetStringUnspecified => IppValue::OctetString(data),
            ValueTag::DateTime => {
                if data.len() != 11 {
                    return Err(IppParseError::Malformed("date-time value is not 11 octets"));
                }
                let year = data.get_u16();
                let month = data.get_u8();
                let day = data.get_u8();
                let hour = data.get_u8();
                let minutes = data.get_u8();
                let seconds = data.get_u8();
                let deci_seconds = data.get_u8();
                let utc_dir = data.get_u8() as char;
                if utc_dir != '+' && utc_dir != '-' {
                    return Err(IppParseError::Malformed("invalid UTC direction"));
                }
                IppValue::DateTime {
                    year,
                    month,
                    day,
                    hour,
                    minutes,
                    seconds,
                    deci_seconds,
                    utc_dir,
                    utc_hours: data.get_u8(),
                    utc_mins: data.get_u8(),
                }
            }
            ValueTag::Resolution => {
                if data.len() != 9 {
                    return Err(IppParseError::Malformed("resolution value is not 9 octets"));
                }
                IppValue::Resolution {
                    cross_feed: data.get_i32(),
                    feed: data.get_i32(),
                    units: data.get_i8(),
                }
            }
            ValueTag::RangeOfInteger => {
                if data.len() != 8 {
                    return Err(IppParseError::Malformed("range value is not 8 octets"));
                }
                IppValue::RangeOfInteger {
                    lower: data.get_i32(),
                    upper: data.get_i32(),
                }
            }
            ValueTag::TextWithLanguage => {
                let (language, text) = parse_with_language(data)?;
                IppValue::TextWithLanguage { language, text }
            }
            ValueTag::NameWithLanguage => {
                let (language, name) = parse_with_language(data)?;
                IppValue::NameWithLanguage { language, name }
            }
            ValueTag::TextWithoutLanguage => IppValue::TextWithoutLanguage(string_value(&data)),
            ValueTag::NameWithoutLanguage => IppValue::NameWithoutLanguage(string_value(&data)),
            ValueTag::Keyword => IppValue::Keyword(string_value(&data)),
            ValueTag::Uri => IppValue::Uri(string_value(&data)),
            ValueTag::UriScheme => IppValue::UriScheme(string_value(&data)),
            ValueTag::Charset => IppValue::Charset(string_value(&data)),
            ValueTag::NaturalLanguage => IppValue::NaturalLanguage(string_value(&data)),
            ValueTag::MimeMediaType => IppValue::MimeMediaType(string_value(&data)),
            ValueTag::Extension => return Err(IppParseError::UnsupportedValueTag(value_tag as u32)),
        };
        Ok(value)
    }

    /// Write value to byte array, including leading value length field, excluding value tag
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::new();

        match *self {
            IppValue::Unsupported | IppValue::Default | IppValue::Unknown | IppValue::NoValue => {
                buffer.put_u16(0);
            }
            IppValue::Integer(i) | IppValue::Enum(i) => {
                buffer.put_u16(4);
                buffer.put_i32(i);
            }
            IppValue::Boolean(b) => {
                buffer.put_u16(1);
                buffer.put_u8(b as u8);
            }
            IppValue::OctetString(ref data) => {
                buffer.put_u16(data.len() as u16);
                buffer.put_slice(data);
            }
            IppValue::DateTime {
                year,
                month,
                day,
                hour,
                minutes,
                seconds,
                deci_seconds,
                utc_dir,
                utc_hours,
                utc_mins,
            } => {
                buffer.put_u16(11);
                buffer.put_u16(year);
                buffer.put_u8(month);
                buffer.put_u8(day);
                buffer.put_u8(hour);
                buffer.put_u8(minutes);
                buffer.put_u8(seconds);
                buffer.put_u8(deci_seconds);
                buffer.put_u8(utc_dir as u8);
                buffer.put_u8(utc_hours);
                buffer.put_u8(utc_mins);
            }
            IppValue::Resolution {
                cross_feed,
                feed,
                units,
            } => {
                buffer.put_u16(9);
                buffer.put_i32(cross_feed);
                buffer.put_i32(feed);
                buffer.put_i8(units);
            }
            IppValue::RangeOfInteger { lower, upper } => {
                buffer.put_u16(8);
                buffer.put_i32(lower);
                buffer.put_i32(upper);
            }
            IppValue::TextWithLanguage {
                ref language,
                text: ref string,
            }
            | IppValue::NameWithLanguage {
                ref language,
                name: ref string,
            } => {
                buffer.put_u16((2 + language.len() + 2 + string.len()) as u16);
                buffer.put_u16(language.len() as u16);
                buffer.put_slice(language.as_bytes());
                buffer.put_u16(string.len() as u16);
                buffer.put_slice(string.as_bytes());
            }
            IppValue::TextWithoutLanguage(ref s)
            | IppValue::NameWithoutLanguage(ref s)
            | IppValue::Keyword(ref s)
            | IppValue::Uri(ref s)
            | IppValue::UriScheme(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s)
            | IppValue::MimeMediaType(ref s) => {
                buffer.put_u16(s.len() as u16);
                buffer.put_slice(s.as_bytes());
            }
        }
        buffer.freeze()
    }
}

/// Implement Display trait to print the value
impl fmt::Display for IppValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IppValue::Unsupported => write!(f, "unsupported"),
            IppValue::Default => write!(f, "default"),
            IppValue::Unknown => write!(f, "unknown"),
            IppValue::NoValue => Ok(()),
            IppValue::Integer(i) | IppValue::Enum(i) => write!(f, "{}", i),
            IppValue::Boolean(b) => write!(f, "{}", if b { "true" } else { "false" }),
            IppValue::OctetString(ref data) => write!(f, "{:?}", data),
            IppValue::DateTime {
                year,
                month,
                day,
                hour,
                minutes,
                seconds,
                deci_seconds,
                utc_dir,
                utc_hours,
                ..
            } => write!(
                f,
                "{}-{}-{},{}:{}:{}.{},{}{}utc",
                year, month, day, hour, minutes, seconds, deci_seconds, utc_dir, utc_hours
            ),
            IppValue::Resolution {
                cross_feed,
                feed,
                units,
            } => {
                write!(f, "{}x{}{}", cross_feed, feed, if units == 3 { "in" } else { "cm" })
            }
            IppValue::RangeOfInteger { lower, upper } => write!(f, "{}..{}", lower, upper),
            IppValue::TextWithLanguage {
                ref language,
                text: ref string,
            }
            | IppValue::NameWithLanguage {
                ref language,
                name: ref string,
            } => write!(f, "{} [{}]", string, language),
            IppValue::TextWithoutLanguage(ref s)
            | IppValue::NameWithoutLanguage(ref s)
            | IppValue::Keyword(ref s)
            | IppValue::Uri(ref s)
            | IppValue::UriScheme(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s)
            | IppValue::MimeMediaType(ref s) => write!(f, "{}", s),
        }
    }
}
