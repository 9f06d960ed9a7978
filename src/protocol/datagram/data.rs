//! Data: topic-sequenced application payload
//!
//! ```text
//! [tag][size: u16][sequence: u32][topic_id: u64][payload: size bytes]
//! ```
//!
//! Sequence ditentukan producer, naik monoton per topic. Receiver cukup
//! membandingkan dengan `classify_sequence` untuk deteksi gap/reorder.

use super::{check_header, check_payload_len, copy_payload, DatagramCodec};
use crate::core::field::{read_u16_at, read_u32_at, read_u64_at};
use crate::core::DatagramBuffer;
use crate::protocol::{DatagramType, TopicId};
use crate::Result;

/// Application bytes published on a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    sequence: u32,
    topic_id: TopicId,
    payload: Vec<u8>,
}

impl Data {
    /// Fails with `PayloadTooLarge` above 65535 bytes
    pub fn new(sequence: u32, topic_id: TopicId, payload: Vec<u8>) -> Result<Self> {
        check_payload_len(payload.len())?;
        Ok(Self {
            sequence,
            topic_id,
            payload,
        })
    }

    #[inline(always)]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    #[inline(always)]
    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    #[inline(always)]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl DatagramCodec for Data {
    const TYPE: DatagramType = DatagramType::Data;
    const HEADER_LEN: usize = 1 + 2 + 4 + 8;

    #[inline]
    fn encoded_len(&self) -> usize {
        Self::HEADER_LEN + self.payload.len()
    }

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(self.encoded_len());
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u16(self.payload.len() as u16);
        buf.push_u32(self.sequence);
        buf.push_u64(self.topic_id);
        buf.push_bytes(&self.payload);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;

        let size = read_u16_at(buf, 1) as usize;
        let sequence = read_u32_at(buf, 3);
        let topic_id = read_u64_at(buf, 7);
        let payload = copy_payload(buf, Self::TYPE, Self::HEADER_LEN, size)?;

        let data = Self {
            sequence,
            topic_id,
            payload,
        };
        Ok((data, Self::HEADER_LEN + size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_data_layout() {
        let data = Data::new(7, 99, b"hi".to_vec()).unwrap();
        let bytes = data.encode();

        assert_eq!(bytes.len(), 17);
        assert_eq!(bytes[0], 0x42);
        assert_eq!(read_u16_at(&bytes, 1), 2);
        assert_eq!(read_u32_at(&bytes, 3), 7);
        assert_eq!(read_u64_at(&bytes, 7), 99);
        assert_eq!(&bytes[15..], b"hi");
    }

    #[test]
    fn test_data_truncated_payload_is_length_mismatch() {
        let bytes = Data::new(1, 1, b"hi".to_vec()).unwrap().encode();
        let cut = &bytes[..bytes.len() - 1];

        assert_eq!(
            Data::decode(cut),
            Err(ProtocolError::LengthMismatch {
                kind: DatagramType::Data,
                declared: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_data_reencode_is_byte_identical() {
        let original = Data::new(u32::MAX, 0, vec![0xAB; 300]).unwrap().encode();
        let (decoded, consumed) = Data::decode(&original).unwrap();

        assert_eq!(consumed, original.len());
        assert_eq!(decoded.encode().as_bytes(), original.as_bytes());
    }

    #[test]
    fn test_data_consumes_only_declared_size() {
        let mut wire = Data::new(2, 5, b"abc".to_vec()).unwrap().encode().into_vec();
        wire.extend_from_slice(&[0x62, 9]);

        let (data, consumed) = Data::decode(&wire).unwrap();
        assert_eq!(data.payload(), b"abc");
        assert_eq!(consumed, 18);
        assert_eq!(&wire[consumed..], &[0x62, 9]);
    }

    #[test]
    fn test_data_empty_payload() {
        let data = Data::new(0, 0, Vec::new()).unwrap();
        assert_eq!(data.encoded_len(), 15);
        assert_eq!(Data::decode(&data.encode()).unwrap().0, data);
    }

    #[test]
    fn test_data_max_payload() {
        assert!(Data::new(0, 0, vec![0; 65_535]).is_ok());
        assert_eq!(
            Data::new(0, 0, vec![0; 65_536]),
            Err(ProtocolError::payload_too_large(65_536))
        );
    }
}
