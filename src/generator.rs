//!
//! Validated IPP value constructors
//!
//! Thin helpers that check native inputs against the wire rules before producing an
//! [`IppValue`]. The decoder does not go through these; they exist for callers building
//! messages from scratch.
//!
use bytes::Bytes;

use crate::{error::IppError, model::ResolutionUnit, value::IppValue};

fn ascii_value(kind: &'static str, value: &str) -> Result<String, IppError> {
    if !value.is_ascii() {
        return Err(IppError::NonAsciiValue(kind));
    }
    Ok(value.to_owned())
}

fn with_language(language: &str, string: &str) -> Result<(String, String), IppError> {
    let language = language.trim();
    if language.is_empty() {
        return Err(IppError::EmptyLanguage);
    }
    if string.is_empty() {
        return Err(IppError::EmptyLanguage);
    }
    Ok((language.to_owned(), string.to_owned()))
}

/// 32-bit signed integer
pub fn integer(value: i64) -> Result<IppValue, IppError> {
    i32::try_from(value)
        .map(IppValue::Integer)
        .map_err(|_| IppError::ValueOutOfRange(value))
}

/// Boolean value
pub fn boolean(value: bool) -> IppValue {
    IppValue::Boolean(value)
}

/// Enum value by code
pub fn enum_value(value: i64) -> Result<IppValue, IppError> {
    if !(2..=i32::MAX as i64).contains(&value) {
        return Err(IppError::ValueOutOfRange(value));
    }
    Ok(IppValue::Enum(value as i32))
}

/// Enum value by label. The domain is the ordered registry keyword list; the first entry
/// maps to 3, the origin of the standard RFC 2911 enum registries.
pub fn enum_label(label: &str, domain: &[&str]) -> Result<IppValue, IppError> {
    domain
        .iter()
        .position(|&entry| entry == label)
        .map(|idx| IppValue::Enum(idx as i32 + 3))
        .ok_or_else(|| IppError::InvalidEnumValue(label.to_owned()))
}

/// Opaque octet string
pub fn octet_string<B>(data: B) -> IppValue
where
    B: Into<Bytes>,
{
    IppValue::OctetString(data.into())
}

/// RFC 2579 date-time
#[allow(clippy::too_many_arguments)]
pub fn datetime(
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
) -> Result<IppValue, IppError> {
    if !(1..=12).contains(&month) {
        return Err(IppError::InvalidDateTime("month"));
    }
    if !(1..=31).contains(&day) {
        return Err(IppError::InvalidDateTime("day"));
    }
    if hour > 23 {
        return Err(IppError::InvalidDateTime("hour"));
    }
    if minutes > 59 {
        return Err(IppError::InvalidDateTime("minutes"));
    }
    if seconds > 60 {
        return Err(IppError::InvalidDateTime("seconds"));
    }
    if deci_seconds > 9 {
        return Err(IppError::InvalidDateTime("deci-seconds"));
    }
    if utc_dir != '+' && utc_dir != '-' {
        return Err(IppError::InvalidDateTime("UTC direction"));
    }
    if utc_hours > 11 {
        return Err(IppError::InvalidDateTime("UTC hours"));
    }
    if utc_mins > 59 {
        return Err(IppError::InvalidDateTime("UTC minutes"));
    }
    Ok(IppValue::DateTime {
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
    })
}

/// Resolution with non-negative components
pub fn resolution(cross_feed: i32, feed: i32, units: ResolutionUnit) -> Result<IppValue, IppError> {
    if cross_feed < 0 || feed < 0 {
        return Err(IppError::NegativeResolution);
    }
    Ok(IppValue::Resolution {
        cross_feed,
        feed,
        units: units as i8,
    })
}

/// Integer range; the bounds are normalised so that lower <= upper
pub fn range_of_integer(a: i32, b: i32) -> IppValue {
    IppValue::RangeOfInteger {
        lower: a.min(b),
        upper: a.max(b),
    }
}

/// Text tagged with its natural language
pub fn text_with_language(language: &str, text: &str) -> Result<IppValue, IppError> {
    let (language, text) = with_language(language, text)?;
    Ok(IppValue::TextWithLanguage { language, text })
}

/// Name tagged with its natural language
pub fn name_with_language(language: &str, name: &str) -> Result<IppValue, IppError> {
    let (language, name) = with_language(language, name)?;
    Ok(IppValue::NameWithLanguage { language, name })
}

/// Plain text value
pub fn text_without_language(text: &str) -> IppValue {
    IppValue::TextWithoutLanguage(text.to_owned())
}

/// Plain name value
pub fn name_without_language(name: &str) -> IppValue {
    IppValue::NameWithoutLanguage(name.to_owned())
}

/// US-ASCII keyword
pub fn keyword(value: &str) -> Result<IppValue, IppError> {
    ascii_value("keyword", value).map(IppValue::Keyword)
}

/// US-ASCII URI
pub fn uri(value: &str) -> Result<IppValue, IppError> {
    ascii_value("uri", value).map(IppValue::Uri)
}

/// US-ASCII URI scheme
pub fn uri_scheme(value: &str) -> Result<IppValue, IppError> {
    ascii_value("uriScheme", value).map(IppValue::UriScheme)
}

/// US-ASCII charset name
pub fn charset(value: &str) -> Result<IppValue, IppError> {
    ascii_value("charset", value).map(IppValue::Charset)
}

/// US-ASCII natural language code
pub fn natural_language(value: &str) -> Result<IppValue, IppError> {
    ascii_value("naturalLanguage", value).map(IppValue::NaturalLanguage)
}

/// US-ASCII MIME media type
pub fn mime_media_type(value: &str) -> Result<IppValue, IppError> {
    ascii_value("mimeMediaType", value).map(IppValue::MimeMediaType)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_range() {
        assert_eq!(integer(42).unwrap(), IppValue::Integer(42));
        assert_eq!(integer(i32::MIN as i64).unwrap(), IppValue::Integer(i32::MIN));
        assert!(matches!(
            integer(i32::MAX as i64 + 1),
            Err(IppError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_enum_value_range() {
        assert_eq!(enum_value(3).unwrap(), IppValue::Enum(3));
        assert!(matches!(enum_value(1), Err(IppError::ValueOutOfRange(1))));
        assert!(matches!(
            enum_value(i32::MAX as i64 + 1),
            Err(IppError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_enum_label() {
        let states = ["idle", "processing", "stopped"];
        assert_eq!(enum_label("idle", &states).unwrap(), IppValue::Enum(3));
        assert_eq!(enum_label("stopped", &states).unwrap(), IppValue::Enum(5));
        assert!(matches!(
            enum_label("sleeping", &states),
            Err(IppError::InvalidEnumValue(_))
        ));
    }

    #[test]
    fn test_range_normalisation() {
        assert_eq!(
            range_of_integer(9, 4),
            IppValue::RangeOfInteger { lower: 4, upper: 9 }
        );
        assert_eq!(
            range_of_integer(4, 9),
            IppValue::RangeOfInteger { lower: 4, upper: 9 }
        );
    }

    #[test]
    fn test_resolution() {
        assert_eq!(
            resolution(300, 600, ResolutionUnit::PerInch).unwrap(),
            IppValue::Resolution {
                cross_feed: 300,
                feed: 600,
                units: 3,
            }
        );
        assert!(matches!(
            resolution(-1, 600, ResolutionUnit::PerCm),
            Err(IppError::NegativeResolution)
        ));
    }

    #[test]
    fn test_datetime_validation() {
        assert!(datetime(2020, 2, 13, 12, 34, 22, 1, '+', 1, 30).is_ok());
        assert!(matches!(
            datetime(2020, 13, 13, 12, 34, 22, 1, '+', 1, 30),
            Err(IppError::InvalidDateTime("month"))
        ));
        assert!(matches!(
            datetime(2020, 2, 13, 12, 34, 22, 1, 'c', 1, 30),
            Err(IppError::InvalidDateTime("UTC direction"))
        ));
    }

    #[test]
    fn test_with_language_validation() {
        let value = text_with_language("  en  ", "hello").unwrap();
        assert_eq!(
            value,
            IppValue::TextWithLanguage {
                language: "en".to_owned(),
                text: "hello".to_owned(),
            }
        );
        assert!(matches!(text_with_language("   ", "hello"), Err(IppError::EmptyLanguage)));
        assert!(matches!(name_with_language("en", ""), Err(IppError::EmptyLanguage)));
    }

    #[test]
    fn test_ascii_only_kinds() {
        assert!(keyword("two-sided-long-edge").is_ok());
        assert!(matches!(keyword("naïve"), Err(IppError::NonAsciiValue("keyword"))));
        assert!(matches!(uri("ipp://host/ä"), Err(IppError::NonAsciiValue("uri"))));
        assert!(charset("utf-8").is_ok());
        assert!(mime_media_type("application/pdf").is_ok());
    }
}
