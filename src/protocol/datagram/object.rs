//! Object lifecycle: ObjectRequest / ObjectRequestAck / ObjectRequestNack
//!
//! ```text
//! ObjectRequest      [tag][action: u8][size: u16][object_id: u64][topic ids: size bytes]
//! ObjectRequestAck   [tag][flag: u8][object_id: u64]([final_object_id: u64])
//! ObjectRequestNack  [tag][flag: u8][size: u16][object_id: u64][message: size bytes]
//! ```
//!
//! Bit `FINAL_ID_PRESENT` (0x80) pada flag Ack milik codec: diturunkan dari
//! `final_object_id` saat encode, dibuang dari flag saat decode. Tanpa bit
//! itu decoder TIDAK membaca 8 byte berikutnya (bisa milik datagram lain).

use std::borrow::Cow;
use std::collections::BTreeSet;

use super::{check_header, check_payload_len, copy_payload, DatagramCodec};
use crate::core::field::{read_u16_at, read_u64_at};
use crate::core::DatagramBuffer;
use crate::error::ProtocolError;
use crate::protocol::id_set::{count_for_size, decode_ids, encode_ids, encoded_ids_len};
use crate::protocol::{flags, DatagramType, Flag, ObjectId, ObjectRequestAction, TopicId};
use crate::Result;

/// Create/update/delete an object, or (un)subscribe it to a set of topics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRequest {
    action: ObjectRequestAction,
    object_id: ObjectId,
    topic_ids: BTreeSet<TopicId>,
}

impl ObjectRequest {
    /// Fails with `PayloadTooLarge` when the id set exceeds the `Size` field
    pub fn new(
        action: ObjectRequestAction,
        object_id: ObjectId,
        topic_ids: BTreeSet<TopicId>,
    ) -> Result<Self> {
        check_payload_len(encoded_ids_len(topic_ids.len()))?;
        Ok(Self {
            action,
            object_id,
            topic_ids,
        })
    }

    #[inline(always)]
    pub fn action(&self) -> ObjectRequestAction {
        self.action
    }

    #[inline(always)]
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    #[inline(always)]
    pub fn topic_ids(&self) -> &BTreeSet<TopicId> {
        &self.topic_ids
    }
}

impl DatagramCodec for ObjectRequest {
    const TYPE: DatagramType = DatagramType::ObjectRequest;
    const HEADER_LEN: usize = 1 + 1 + 2 + 8;

    #[inline]
    fn encoded_len(&self) -> usize {
        Self::HEADER_LEN + encoded_ids_len(self.topic_ids.len())
    }

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(self.encoded_len());
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u8(self.action.to_code());
        buf.push_u16(encoded_ids_len(self.topic_ids.len()) as u16);
        buf.push_u64(self.object_id);
        encode_ids(&self.topic_ids, buf);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;

        let action = ObjectRequestAction::from_code(buf[1]);
        let size = read_u16_at(buf, 2) as usize;
        let object_id = read_u64_at(buf, 4);

        let end = Self::HEADER_LEN + size;
        if buf.len() < end {
            return Err(ProtocolError::length_mismatch(
                Self::TYPE,
                size,
                buf.len() - Self::HEADER_LEN,
            ));
        }
        let count = count_for_size(size)?;
        let topic_ids = decode_ids(&buf[Self::HEADER_LEN..end], count)?;

        let request = Self {
            action,
            object_id,
            topic_ids,
        };
        Ok((request, end))
    }
}

/// Acknowledges an `ObjectRequest`.
///
/// `final_object_id` is set on the terminating ack of a multi-step
/// operation, e.g. a Create where the server picks a different id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRequestAck {
    flag: Flag,
    object_id: ObjectId,
    final_object_id: Option<ObjectId>,
}

impl ObjectRequestAck {
    const FINAL_ID_LEN: usize = 8;

    /// `flag` without the codec-owned presence bit; the bit is cleared if passed.
    pub fn new(flag: Flag, object_id: ObjectId, final_object_id: Option<ObjectId>) -> Self {
        Self {
            flag: flag & !flags::FINAL_ID_PRESENT,
            object_id,
            final_object_id,
        }
    }

    #[inline(always)]
    pub fn flag(&self) -> Flag {
        self.flag
    }

    #[inline(always)]
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    #[inline(always)]
    pub fn final_object_id(&self) -> Option<ObjectId> {
        self.final_object_id
    }

    /// Flag byte as written on the wire
    #[inline]
    pub fn wire_flag(&self) -> Flag {
        match self.final_object_id {
            Some(_) => self.flag | flags::FINAL_ID_PRESENT,
            None => self.flag,
        }
    }
}

impl DatagramCodec for ObjectRequestAck {
    const TYPE: DatagramType = DatagramType::ObjectRequestAck;
    const HEADER_LEN: usize = 1 + 1 + 8;

    #[inline]
    fn encoded_len(&self) -> usize {
        match self.final_object_id {
            Some(_) => Self::HEADER_LEN + Self::FINAL_ID_LEN,
            None => Self::HEADER_LEN,
        }
    }

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(self.encoded_len());
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u8(self.wire_flag());
        buf.push_u64(self.object_id);
        if let Some(final_id) = self.final_object_id {
            buf.push_u64(final_id);
        }
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;

        let wire_flag = buf[1];
        let object_id = read_u64_at(buf, 2);

        if !flags::has(wire_flag, flags::FINAL_ID_PRESENT) {
            return Ok((Self::new(wire_flag, object_id, None), Self::HEADER_LEN));
        }

        let full_len = Self::HEADER_LEN + Self::FINAL_ID_LEN;
        if buf.len() < full_len {
            return Err(ProtocolError::truncated(Self::TYPE, full_len, buf.len()));
        }
        let final_id = read_u64_at(buf, Self::HEADER_LEN);
        Ok((Self::new(wire_flag, object_id, Some(final_id)), full_len))
    }
}

/// Rejected `ObjectRequest`, with a diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRequestNack {
    flag: Flag,
    object_id: ObjectId,
    message: Vec<u8>,
}

impl ObjectRequestNack {
    /// Sets `flags::FAILED` on top of the given action bits
    pub fn new(flag: Flag, object_id: ObjectId, message: &str) -> Result<Self> {
        check_payload_len(message.len())?;
        Ok(Self {
            flag: flag | flags::FAILED,
            object_id,
            message: message.as_bytes().to_vec(),
        })
    }

    #[inline(always)]
    pub fn flag(&self) -> Flag {
        self.flag
    }

    #[inline(always)]
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    pub fn message(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.message)
    }
}

impl DatagramCodec for ObjectRequestNack {
    const TYPE: DatagramType = DatagramType::ObjectRequestNack;
    const HEADER_LEN: usize = 1 + 1 + 2 + 8;

    #[inline]
    fn encoded_len(&self) -> usize {
        Self::HEADER_LEN + self.message.len()
    }

    fn encode_into(&self, buf: &mut DatagramBuffer) {
        buf.reserve(self.encoded_len());
        buf.push_u8(Self::TYPE.to_code());
        buf.push_u8(self.flag);
        buf.push_u16(self.message.len() as u16);
        buf.push_u64(self.object_id);
        buf.push_bytes(&self.message);
    }

    fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        check_header(buf, Self::TYPE, Self::HEADER_LEN)?;

        let flag = buf[1];
        let size = read_u16_at(buf, 2) as usize;
        let object_id = read_u64_at(buf, 4);
        let message = copy_payload(buf, Self::TYPE, Self::HEADER_LEN, size)?;

        let nack = Self {
            flag,
            object_id,
            message,
        };
        Ok((nack, Self::HEADER_LEN + size))
    }
}
