//!
//! Wire codec for the Internet Printing Protocol (RFC 2910/2911). This crate can be used in
//! several ways:
//! * one-shot: decode a complete message from bytes with [`IppMessage::parse`](message::IppMessage::parse)
//!   and serialize it back with [`IppMessage::to_bytes`](message::IppMessage::to_bytes).
//! * incrementally: feed arbitrary byte chunks to [`IppStreamParser`](stream::IppStreamParser),
//!   receive the parsed header as soon as it is complete and the document body as pass-through
//!   bytes.
//! * constructing messages from scratch via the validated constructors in [`generator`].
//!
//! The crate covers the framing layer only: header, attribute groups, typed values and the
//! trailing document body. Operation semantics (job scheduling, printer state) and the HTTP
//! transport are intentionally left to the caller.
//!
//! Usage example:
//!
//!```rust
//! use ipp_codec::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut req = IppMessage::new(IppVersion::v1_1(), Operation::GetPrinterAttributes);
//!     req.attributes_mut().add(
//!         DelimiterTag::OperationAttributes,
//!         IppAttribute::new(IppAttribute::REQUESTED_ATTRIBUTES, IppValue::Keyword("media".to_owned())),
//!     );
//!     let wire = req.to_bytes()?;
//!     let parsed = IppMessage::parse(wire)?;
//!     assert_eq!(parsed.operation_name().as_deref(), Some("GetPrinterAttributes"));
//!     Ok(())
//! }
//!```

use bytes::{BufMut, Bytes, BytesMut};
use num_traits::FromPrimitive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{IppVersion, StatusCode};

pub mod attribute;
pub mod error;
pub mod generator;
pub mod message;
pub mod model;
pub mod parser;
pub mod reader;
pub mod stream;
pub mod value;

pub mod prelude {
    //!
    //! Common imports
    //!
    pub use num_traits::FromPrimitive as _;

    pub use crate::{
        attribute::{IppAttribute, IppAttributeGroup, IppAttributes},
        error::IppError,
        message::IppMessage,
        model::*,
        parser::IppParseError,
        stream::{IppStreamError, IppStreamEvent, IppStreamParser},
        value::IppValue,
    };

    pub use super::IppHeader;
}

/// IPP request and response header
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IppHeader {
    /// IPP protocol version
    pub version: IppVersion,
    /// Operation tag for requests, status for responses
    pub operation_or_status: u16,
    /// ID of the request
    pub request_id: u32,
}

impl IppHeader {
    /// Create IPP header
    pub fn new(version: IppVersion, operation_or_status: u16, request_id: u32) -> IppHeader {
        IppHeader {
            version,
            operation_or_status,
            request_id,
        }
    }

    /// Write header to a byte array
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(8);
        buffer.put_u16(self.version.0);
        buffer.put_u16(self.operation_or_status);
        buffer.put_u32(self.request_id);

        buffer.freeze()
    }

    /// Decode and get IPP status code from the header
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.operation_or_status).unwrap_or(StatusCode::UnknownStatusCode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_to_bytes() {
        let header = IppHeader::new(IppVersion::v2_1(), 0x1234, 0xaa55_aa55);
        let buf = header.to_bytes();
        assert_eq!(buf, vec![0x02, 0x01, 0x12, 0x34, 0xaa, 0x55, 0xaa, 0x55]);
    }

    #[test]
    fn test_header_status_code() {
        let header = IppHeader::new(IppVersion::v1_1(), 0x0400, 1);
        assert_eq!(header.status_code(), StatusCode::ClientErrorBadRequest);

        let header = IppHeader::new(IppVersion::v1_1(), 0x7777, 1);
        assert_eq!(header.status_code(), StatusCode::UnknownStatusCode);
    }
}
