//! Server status probe
//!
//! ```text
//! ServerStatus     [tag]
//! ServerStatusAck  [tag][connected_clients: u64]
//! ```

use super::{check_header, unit_datagram, DatagramCodec};
use crate::core::field::read_u64_at;
use crate::core::DatagramBuffer;
use crate::protocol::{ClientId, DatagramType};
use crate::Result;

unit_datagram! {
    /// Ask the server how many peers are connected
    ServerStatus
}

/// Reply to `ServerStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStatusAck {
    /// Jumlah peer yang sedang terkoneksi (ditulis dengan lebar ClientId)
    pub connected_clients: ClientId,
}

impl ServerStatusAck {
    pub fn new(connected_clients: ClientId) -> Self {
        Self { connected_clients }
    }
}

impl DatagramCodec for ServerStatusAck {
    const TYPE: DatagramType = DatagramType::ServerStatusAck;
    const HEADER_LEN: usize = 1 + 8;

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(Self::HEADER_LEN);
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u64(self.connected_clients);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
        let connected_clients = read_u64_at(buf, 1);
        Ok((Self { connected_clients }, Self::HEADER_LEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_status_ack_layout() {
        let bytes = ServerStatusAck::new(3).encode();
        assert_eq!(bytes.len(), 9);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(read_u64_at(&bytes, 1), 3);
    }

    #[test]
    fn test_status_ack_truncated() {
        let bytes = ServerStatusAck::new(3).encode();
        assert_eq!(
            ServerStatusAck::decode(&bytes[..8]),
            Err(ProtocolError::truncated(DatagramType::ServerStatusAck, 9, 8))
        );
    }

    #[test]
    fn test_status_probe() {
        assert_eq!(&ServerStatus::new().encode()[..], &[0x30]);
        assert!(ServerStatus::decode(&[0x00]).is_err());
    }
}
