//! Connection handshake: Connect / ConnectAck / ConnectNack
//!
//! ```text
//! Connect      [tag]
//! ConnectAck   [tag][client_id: u64][heartbeat_period: u16]
//! ConnectNack  [tag][size: u16][message: size bytes]
//! ```

use std::borrow::Cow;

use super::{check_header, check_payload_len, copy_payload, unit_datagram, DatagramCodec};
use crate::core::field::{read_u16_at, read_u64_at};
use crate::core::DatagramBuffer;
use crate::protocol::{ClientId, DatagramType};
use crate::Result;

unit_datagram! {
    /// Client asks to open a session
    Connect
}

/// Accepting side assigns a client id and the heartbeat period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectAck {
    pub client_id: ClientId,
    /// Heartbeat period agreed for this session (unit chosen by the session layer)
    pub heartbeat_period: u16,
}

impl ConnectAck {
    pub fn new(client_id: ClientId, heartbeat_period: u16) -> Self {
        Self {
            client_id,
            heartbeat_period,
        }
    }
}

impl DatagramCodec for ConnectAck {
    const TYPE: DatagramType = DatagramType::ConnectAck;
    const HEADER_LEN: usize = 1 + 8 + 2;

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(Self::HEADER_LEN);
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u64(self.client_id);
        buf.push_u16(self.heartbeat_period);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
        let ack = Self {
            client_id: read_u64_at(buf, 1),
            heartbeat_period: read_u16_at(buf, 9),
        };
        Ok((ack, Self::HEADER_LEN))
    }
}

/// Connection refused, with a diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectNack {
    message: Vec<u8>,
}

impl ConnectNack {
    pub fn new(message: &str) -> Result<Self> {
        Self::from_bytes(message.as_bytes().to_vec())
    }

    /// Raw message bytes; not required to be valid UTF-8
    pub fn from_bytes(message: Vec<u8>) -> Result<Self> {
        check_payload_len(message.len())?;
        Ok(Self { message })
    }

    #[inline]
    pub fn message_bytes(&self) -> &[u8] {
        &self.message
    }

    /// Message as text, lossy for invalid UTF-8
    pub fn message(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.message)
    }
}

impl DatagramCodec for ConnectNack {
    const TYPE: DatagramType = DatagramType::ConnectNack;
    const HEADER_LEN: usize = 1 + 2;

    #[inline]
    fn encoded_len(&self) -> usize {
        Self::HEADER_LEN + self.message.len()
    }

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(self.encoded_len());
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u16(self.message.len() as u16);
        buf.push_bytes(&self.message);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
        let size = read_u16_at(buf, 1) as usize;
        let message = copy_payload(buf, Self::TYPE, Self::HEADER_LEN, size)?;
        Ok((Self { message }, Self::HEADER_LEN + size))
    }
}
