//! Shutdown: `[tag][reason: u8]`

use super::{check_header, DatagramCodec};
use crate::core::DatagramBuffer;
use crate::protocol::{DatagramType, EndConnectionReason};
use crate::Result;

/// Either side ends the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shutdown {
    /// Byte yang tidak dikenal di-decode sebagai `Unknown`, bukan error
    pub reason: EndConnectionReason,
}

impl Shutdown {
    pub fn new(reason: EndConnectionReason) -> Self {
        Self { reason }
    }
}

impl DatagramCodec for Shutdown {
    const TYPE: DatagramType = DatagramType::Shutdown;
    const HEADER_LEN: usize = 2;

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u8(self.reason.to_code());
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
        let reason = EndConnectionReason::from_code(buf[1]);
        Ok((Self { reason }, Self::HEADER_LEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_layout() {
        let bytes = Shutdown::new(EndConnectionReason::TimeOut).encode();
        assert_eq!(&bytes[..], &[0xFF, 0x01]);
    }

    #[test]
    fn test_unknown_reason_is_not_an_error() {
        let (shutdown, consumed) = Shutdown::decode(&[0xFF, 0x37]).unwrap();
        assert_eq!(shutdown.reason, EndConnectionReason::Unknown);
        assert_eq!(consumed, 2);
        assert_eq!(&shutdown.encode()[..], &[0xFF, 0xAA]);
    }
}
