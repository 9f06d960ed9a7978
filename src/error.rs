//! Protocol error types
//!
//! Semua kegagalan decode yang recoverable muncul sebagai `ProtocolError`.
//! Akses field di luar batas (bug decoder) bukan error di sini, tapi panic.

use thiserror::Error;

use crate::protocol::DatagramType;

/// Errors that can occur while decoding or building datagrams
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Input slice is empty, no type tag to read
    #[error("empty input: no datagram type tag")]
    Empty,

    /// Slice shorter than the fixed header of the datagram
    #[error("truncated {kind}: expected at least {expected} bytes, got {actual}")]
    Truncated {
        kind: DatagramType,
        expected: usize,
        actual: usize,
    },

    /// Declared `Size` disagrees with the trailing bytes available
    #[error("length mismatch in {kind}: declared {declared} payload bytes, {available} available")]
    LengthMismatch {
        kind: DatagramType,
        declared: usize,
        available: usize,
    },

    /// Type tag does not belong to the decoder that was called
    #[error("unexpected datagram type: expected {expected}, found code {found:#04x}")]
    UnexpectedType { expected: DatagramType, found: u8 },

    /// Known tag without a wire layout (or the `Unknown` tag)
    #[error("unsupported datagram type: {0}")]
    UnsupportedType(DatagramType),

    /// Identifier run is not `count * 8` bytes
    #[error("malformed identifier set: {len} bytes is not a whole number of ids")]
    MalformedIdSet { len: usize },

    /// Same identifier appears twice in a set payload
    #[error("duplicate identifier in set: {0}")]
    DuplicateId(u64),

    /// Variable payload does not fit in a `Size` field
    #[error("payload too large: {len} bytes exceeds maximum {max}")]
    PayloadTooLarge { len: usize, max: usize },
}

impl ProtocolError {
    /// Create a truncated-input error
    #[inline]
    pub fn truncated(kind: DatagramType, expected: usize, actual: usize) -> Self {
        Self::Truncated {
            kind,
            expected,
            actual,
        }
    }

    /// Create a length mismatch error
    #[inline]
    pub fn length_mismatch(kind: DatagramType, declared: usize, available: usize) -> Self {
        Self::LengthMismatch {
            kind,
            declared,
            available,
        }
    }

    /// Create a payload-too-large error against the `Size` limit
    #[inline]
    pub fn payload_too_large(len: usize) -> Self {
        Self::PayloadTooLarge {
            len,
            max: crate::protocol::MAX_PAYLOAD_SIZE,
        }
    }

    /// True when more bytes could turn this failure into a success
    /// (receive buffer cut in the middle of a datagram).
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::Empty | Self::Truncated { .. } | Self::LengthMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_truncated() {
        let err = ProtocolError::truncated(DatagramType::Data, 15, 4);
        assert_eq!(
            err.to_string(),
            "truncated Data: expected at least 15 bytes, got 4"
        );
    }

    #[test]
    fn test_error_display_length_mismatch() {
        let err = ProtocolError::length_mismatch(DatagramType::ConnectNack, 10, 3);
        assert_eq!(
            err.to_string(),
            "length mismatch in Connect_NACK: declared 10 payload bytes, 3 available"
        );
    }

    #[test]
    fn test_error_display_unexpected_type() {
        let err = ProtocolError::UnexpectedType {
            expected: DatagramType::Ping,
            found: 0x72,
        };
        assert_eq!(
            err.to_string(),
            "unexpected datagram type: expected Ping, found code 0x72"
        );
    }

    #[test]
    fn test_payload_too_large_uses_size_limit() {
        let err = ProtocolError::payload_too_large(70_000);
        assert_eq!(
            err,
            ProtocolError::PayloadTooLarge {
                len: 70_000,
                max: 65_535
            }
        );
    }

    #[test]
    fn test_truncation_classification() {
        assert!(ProtocolError::Empty.is_truncation());
        assert!(ProtocolError::truncated(DatagramType::Ping, 2, 1).is_truncation());
        assert!(ProtocolError::length_mismatch(DatagramType::Data, 2, 1).is_truncation());
        assert!(!ProtocolError::DuplicateId(7).is_truncation());
        assert!(!ProtocolError::UnsupportedType(DatagramType::OpenStream).is_truncation());
    }
}
