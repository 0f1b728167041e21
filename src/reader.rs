//!
//! Bounded field reads over an IPP byte buffer
//!
use bytes::{Buf, Bytes};

use crate::{model::IppVersion, parser::IppParseError, IppHeader};

/// `IppReader` reads the wire-level fields of an IPP message out of a byte buffer.
/// Every read checks the remaining length first, so running out of input surfaces
/// as [`IppParseError::Truncated`] instead of a panic.
pub struct IppReader {
    inner: Bytes,
}

impl IppReader {
    /// Create IppReader over a byte buffer
    pub fn new(inner: Bytes) -> Self {
        IppReader { inner }
    }

    fn ensure(&self, len: usize) -> Result<(), IppParseError> {
        if self.inner.remaining() < len {
            Err(IppParseError::Truncated)
        } else {
            Ok(())
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, IppParseError> {
        self.ensure(1)?;
        Ok(self.inner.get_u8())
    }

    /// Look at the next byte without consuming it
    pub fn peek_u8(&self) -> Result<u8, IppParseError> {
        self.ensure(1)?;
        Ok(self.inner.chunk()[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, IppParseError> {
        self.ensure(2)?;
        Ok(self.inner.get_u16())
    }

    pub fn read_u32(&mut self) -> Result<u32, IppParseError> {
        self.ensure(4)?;
        Ok(self.inner.get_u32())
    }

    /// Read a 16-bit length field. The wire type is a signed integer, so anything
    /// above 0x7fff is a negative length and therefore malformed.
    pub fn read_length(&mut self) -> Result<usize, IppParseError> {
        let len = self.read_u16()?;
        if len > i16::MAX as u16 {
            return Err(IppParseError::Malformed("negative length field"));
        }
        Ok(len as usize)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, IppParseError> {
        self.ensure(len)?;
        Ok(self.inner.split_to(len))
    }

    /// Read tag
    pub fn read_tag(&mut self) -> Result<u8, IppParseError> {
        self.read_u8()
    }

    /// Read IPP name from [len; name] element
    pub fn read_name(&mut self) -> Result<String, IppParseError> {
        let name_len = self.read_length()?;
        let name = self.read_bytes(name_len)?;
        Ok(String::from_utf8_lossy(&name).into_owned())
    }

    /// Read IPP header
    pub fn read_header(&mut self) -> Result<IppHeader, IppParseError> {
        let version = IppVersion(self.read_u16()?);
        let operation_status = self.read_u16()?;
        let request_id = self.read_u32()?;

        Ok(IppHeader::new(version, operation_status, request_id))
    }

    /// Whether the buffer is exhausted
    pub fn is_empty(&self) -> bool {
        !self.inner.has_remaining()
    }

    /// Consume the reader and return the unread remainder
    pub fn into_remaining(self) -> Bytes {
        self.inner
    }
}

impl From<Bytes> for IppReader {
    fn from(b: Bytes) -> Self {
        IppReader::new(b)
    }
}
