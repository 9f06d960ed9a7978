//! Topic subscription: TopicRequest / TopicRequestAck / TopicRequestNack
//!
//! ```text
//! TopicRequest      [tag][action: u8][topic_id: u64]
//! TopicRequestAck   [tag][response: u8][topic_id: u64]
//! TopicRequestNack  [tag][response: u8][size: u16][message: size bytes]
//! ```

use std::borrow::Cow;

use super::{check_header, check_payload_len, copy_payload, DatagramCodec};
use crate::core::field::{read_u16_at, read_u64_at};
use crate::core::DatagramBuffer;
use crate::protocol::{DatagramType, TopicAction, TopicId, TopicResponse};
use crate::Result;

/// Subscribe to or unsubscribe from a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicRequest {
    pub action: TopicAction,
    pub topic_id: TopicId,
}

impl TopicRequest {
    pub fn new(action: TopicAction, topic_id: TopicId) -> Self {
        Self { action, topic_id }
    }
}

impl DatagramCodec for TopicRequest {
    const TYPE: DatagramType = DatagramType::TopicRequest;
    const HEADER_LEN: usize = 1 + 1 + 8;

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(Self::HEADER_LEN);
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u8(self.action.to_code());
        buf.push_u64(self.topic_id);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
        let request = Self {
            action: TopicAction::from_code(buf[1]),
            topic_id: read_u64_at(buf, 2),
        };
        Ok((request, Self::HEADER_LEN))
    }
}

/// Outcome of a `TopicRequest`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicRequestAck {
    pub response: TopicResponse,
    pub topic_id: TopicId,
}

impl TopicRequestAck {
    pub fn new(response: TopicResponse, topic_id: TopicId) -> Self {
        Self { response, topic_id }
    }
}

impl DatagramCodec for TopicRequestAck {
    const TYPE: DatagramType = DatagramType::TopicRequestAck;
    const HEADER_LEN: usize = 1 + 1 + 8;

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(Self::HEADER_LEN);
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u8(self.response.to_code());
        buf.push_u64(self.topic_id);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
        let ack = Self {
            response: TopicResponse::from_code(buf[1]),
            topic_id: read_u64_at(buf, 2),
        };
        Ok((ack, Self::HEADER_LEN))
    }
}

/// Rejected `TopicRequest`, with a diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRequestNack {
    response: TopicResponse,
    message: Vec<u8>,
}

impl TopicRequestNack {
    pub fn new(response: TopicResponse, message: &str) -> Result<Self> {
        check_payload_len(message.len())?;
        Ok(Self {
            response,
            message: message.as_bytes().to_vec(),
        })
    }

    #[inline(always)]
    pub fn response(&self) -> TopicResponse {
        self.response
    }

    pub fn message(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.message)
    }
}

impl DatagramCodec for TopicRequestNack {
    const TYPE: DatagramType = DatagramType::TopicRequestNack;
    const HEADER_LEN: usize = 1 + 1 + 2;

    #[inline]
    fn encoded_len(&self) -> usize {
        Self::HEADER_LEN + self.message.len()
    }

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(self.encoded_len());
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u8(self.response.to_code());
        buf.push_u16(self.message.len() as u16);
        buf.push_bytes(&self.message);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
        let response = TopicResponse::from_code(buf[1]);
        let size = read_u16_at(buf, 2) as usize;
        let message = copy_payload(buf, Self::TYPE, Self::HEADER_LEN, size)?;
        Ok((Self { response, message }, Self::HEADER_LEN + size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_topic_request_layout() {
        let bytes = TopicRequest::new(TopicAction::Unsubscribe, 42).encode();
        assert_eq!(bytes.len(), 10);
        assert_eq!(&bytes[..2], &[0x45, 0xFF]);
        assert_eq!(read_u64_at(&bytes, 2), 42);
    }

    #[test]
    fn test_topic_request_unknown_action_roundtrips() {
        let mut raw = TopicRequest::new(TopicAction::Subscribe, 1).encode().into_vec();
        raw[1] = 0x33;

        let (request, _) = TopicRequest::decode(&raw).unwrap();
        assert_eq!(request.action, TopicAction::Unknown);
        assert_eq!(request.encode()[1], 0xAA);
    }

    #[test]
    fn test_topic_ack_roundtrip() {
        let ack = TopicRequestAck::new(TopicResponse::UnsubSuccess, u64::MAX);
        let (decoded, consumed) = TopicRequestAck::decode(&ack.encode()).unwrap();
        assert_eq!(decoded, ack);
        assert_eq!(consumed, 10);
        assert!(decoded.response.is_success());
    }

    #[test]
    fn test_topic_nack_roundtrip() {
        let nack = TopicRequestNack::new(TopicResponse::SubFailure, "no such topic").unwrap();
        let bytes = nack.encode();
        assert_eq!(bytes.len(), 4 + 13);

        let (decoded, consumed) = TopicRequestNack::decode(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded.response(), TopicResponse::SubFailure);
        assert_eq!(decoded.message(), "no such topic");
    }

    #[test]
    fn test_topic_nack_short_payload() {
        let bytes = TopicRequestNack::new(TopicResponse::SubFailure, "oops").unwrap().encode();
        assert_eq!(
            TopicRequestNack::decode(&bytes[..6]),
            Err(ProtocolError::length_mismatch(DatagramType::TopicRequestNack, 4, 2))
        );
    }
}
