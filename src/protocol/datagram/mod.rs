//! Per-Datagram Codecs
//!
//! Layout umum:
//! ┌──────────┬────────────────────────┬──────────────────────────┐
//! │ tag (1B) │ fixed fields (LE)      │ payload (Size bytes)     │
//! └──────────┴────────────────────────┴──────────────────────────┘
//!
//! Tidak ada terminator dan tidak ada padding. Receiver hanya tahu akhir
//! datagram dari `Size` (atau lebar fixed). Decoder menerima slice yang
//! boleh lebih panjang dari datagram-nya, dan mengembalikan jumlah byte
//! yang dikonsumsi supaya caller bisa lanjut decode datagram berikutnya.

use tracing::{debug, trace};

use crate::core::{field, DatagramBuffer};
use crate::error::ProtocolError;
use crate::protocol::registry::{peek_type, DatagramType};
use crate::Result;

mod connect;
mod data;
mod heartbeat;
mod latency;
mod object;
mod shutdown;
mod status;
mod topic;

pub use connect::{Connect, ConnectAck, ConnectNack};
pub use data::Data;
pub use heartbeat::{Heartbeat, HeartbeatRequest};
pub use latency::{Ping, Pong};
pub use object::{ObjectRequest, ObjectRequestAck, ObjectRequestNack};
pub use shutdown::Shutdown;
pub use status::{ServerStatus, ServerStatusAck};
pub use topic::{TopicRequest, TopicRequestAck, TopicRequestNack};

/// Encode/decode pair for one datagram kind.
pub trait DatagramCodec: Sized {
    /// Wire tag written as the first byte
    const TYPE: DatagramType;

    /// Tag + fixed fields, in bytes
    const HEADER_LEN: usize;

    /// Exact number of bytes `encode` produces
    #[inline]
    fn encoded_len(&self) -> usize {
        Self::HEADER_LEN
    }

    /// Append the wire form to `buf`. Never fails.
    fn encode_into(&self, buf: &mut DatagramBuffer);

    /// Encode into a freshly allocated, exactly-sized buffer.
    #[inline]
    fn encode(&self) -> DatagramBuffer {
        let mut buf = DatagramBuffer::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }

    /// Decode from the front of `buf`; returns the value and bytes consumed.
    ///
    /// Trailing bytes after the datagram are ignored.
    fn decode(buf: &[u8]) -> Result<(Self, usize)>;
}

/// Validasi tag dan panjang header fixed sebelum baca field apa pun.
#[inline]
pub(crate) fn check_header(buf: &[u8], kind: DatagramType, header_len: usize) -> Result<()> {
    let Some(&tag) = buf.first() else {
        return Err(ProtocolError::Empty);
    };
    if tag != kind.to_code() {
        return Err(ProtocolError::UnexpectedType {
            expected: kind,
            found: tag,
        });
    }
    if buf.len() < header_len {
        return Err(ProtocolError::truncated(kind, header_len, buf.len()));
    }
    Ok(())
}

/// Copy `size` payload bytes starting at `start`, after checking they exist.
#[inline]
pub(crate) fn copy_payload(
    buf: &[u8],
    kind: DatagramType,
    start: usize,
    size: usize,
) -> Result<Vec<u8>> {
    let available = buf.len().saturating_sub(start);
    if available < size {
        return Err(ProtocolError::length_mismatch(kind, size, available));
    }
    Ok(field::subrange(buf, start, start + size))
}

/// Validate a payload length against the `Size` field limit
#[inline]
pub(crate) fn check_payload_len(len: usize) -> Result<()> {
    if len > crate::protocol::MAX_PAYLOAD_SIZE {
        return Err(ProtocolError::payload_too_large(len));
    }
    Ok(())
}

/// Tag-only datagram: satu byte, tanpa field.
macro_rules! unit_datagram {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            pub const fn new() -> Self {
                Self
            }
        }

        impl $crate::protocol::datagram::DatagramCodec for $name {
            const TYPE: $crate::protocol::DatagramType =
                $crate::protocol::DatagramType::$name;
            const HEADER_LEN: usize = 1;

            #[inline]
            fn encode_into(&self, buf: &mut $crate::core::DatagramBuffer) {
                buf.push_u8(Self::TYPE.to_code());
            }

            #[inline]
            fn decode(buf: &[u8]) -> $crate::Result<(Self, usize)> {
                $crate::protocol::datagram::check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
                Ok((Self, Self::HEADER_LEN))
            }
        }
    };
}
pub(crate) use unit_datagram;

/// Any datagram of the closed protocol set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datagram {
    Connect(Connect),
    ConnectAck(ConnectAck),
    ConnectNack(ConnectNack),
    Shutdown(Shutdown),
    ServerStatus(ServerStatus),
    ServerStatusAck(ServerStatusAck),
    Heartbeat(Heartbeat),
    HeartbeatRequest(HeartbeatRequest),
    Ping(Ping),
    Pong(Pong),
    TopicRequest(TopicRequest),
    TopicRequestAck(TopicRequestAck),
    TopicRequestNack(TopicRequestNack),
    ObjectRequest(ObjectRequest),
    ObjectRequestAck(ObjectRequestAck),
    ObjectRequestNack(ObjectRequestNack),
    Data(Data),
}

/// Dispatch `$body` over every variant with the inner value bound to `$dtg`.
macro_rules! for_each_kind {
    ($value:expr, $dtg:ident => $body:expr) => {
        match $value {
            Datagram::Connect($dtg) => $body,
            Datagram::ConnectAck($dtg) => $body,
            Datagram::ConnectNack($dtg) => $body,
            Datagram::Shutdown($dtg) => $body,
            Datagram::ServerStatus($dtg) => $body,
            Datagram::ServerStatusAck($dtg) => $body,
            Datagram::Heartbeat($dtg) => $body,
            Datagram::HeartbeatRequest($dtg) => $body,
            Datagram::Ping($dtg) => $body,
            Datagram::Pong($dtg) => $body,
            Datagram::TopicRequest($dtg) => $body,
            Datagram::TopicRequestAck($dtg) => $body,
            Datagram::TopicRequestNack($dtg) => $body,
            Datagram::ObjectRequest($dtg) => $body,
            Datagram::ObjectRequestAck($dtg) => $body,
            Datagram::ObjectRequestNack($dtg) => $body,
            Datagram::Data($dtg) => $body,
        }
    };
}

impl Datagram {
    /// Registry tag of this datagram
    pub fn datagram_type(&self) -> DatagramType {
        fn type_of<T: DatagramCodec>(_: &T) -> DatagramType {
            T::TYPE
        }
        for_each_kind!(self, dtg => type_of(dtg))
    }

    /// Exact encoded size in bytes
    pub fn encoded_len(&self) -> usize {
        for_each_kind!(self, dtg => dtg.encoded_len())
    }

    /// Append the wire form to `buf`
    pub fn encode_into(&self, buf: &mut DatagramBuffer) {
        for_each_kind!(self, dtg => dtg.encode_into(buf))
    }

    /// Encode into an owned buffer
    pub fn encode(&self) -> DatagramBuffer {
        for_each_kind!(self, dtg => dtg.encode())
    }

    /// Peek the tag and decode with the matching codec.
    ///
    /// Returns the datagram and the number of bytes it occupied.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize)> {
        let kind = peek_type(buf).ok_or(ProtocolError::Empty)?;

        let result = match kind {
            DatagramType::Connect => decode_as(buf, Datagram::Connect),
            DatagramType::ConnectAck => decode_as(buf, Datagram::ConnectAck),
            DatagramType::ConnectNack => decode_as(buf, Datagram::ConnectNack),
            DatagramType::Shutdown => decode_as(buf, Datagram::Shutdown),
            DatagramType::ServerStatus => decode_as(buf, Datagram::ServerStatus),
            DatagramType::ServerStatusAck => decode_as(buf, Datagram::ServerStatusAck),
            DatagramType::Heartbeat => decode_as(buf, Datagram::Heartbeat),
            DatagramType::HeartbeatRequest => decode_as(buf, Datagram::HeartbeatRequest),
            DatagramType::Ping => decode_as(buf, Datagram::Ping),
            DatagramType::Pong => decode_as(buf, Datagram::Pong),
            DatagramType::TopicRequest => decode_as(buf, Datagram::TopicRequest),
            DatagramType::TopicRequestAck => decode_as(buf, Datagram::TopicRequestAck),
            DatagramType::TopicRequestNack => decode_as(buf, Datagram::TopicRequestNack),
            DatagramType::ObjectRequest => decode_as(buf, Datagram::ObjectRequest),
            DatagramType::ObjectRequestAck => decode_as(buf, Datagram::ObjectRequestAck),
            DatagramType::ObjectRequestNack => decode_as(buf, Datagram::ObjectRequestNack),
            DatagramType::Data => decode_as(buf, Datagram::Data),
            DatagramType::OpenStream | DatagramType::Unknown => {
                Err(ProtocolError::UnsupportedType(kind))
            }
        };

        match &result {
            Ok((_, consumed)) => trace!(%kind, consumed, "decoded datagram"),
            Err(err) => debug!(%kind, available = buf.len(), error = %err, "datagram rejected"),
        }
        result
    }
}

#[inline]
fn decode_as<T: DatagramCodec>(buf: &[u8], wrap: fn(T) -> Datagram) -> Result<(Datagram, usize)> {
    T::decode(buf).map(|(dtg, consumed)| (wrap(dtg), consumed))
}

macro_rules! impl_from_kind {
    ($($kind:ident),+ $(,)?) => {
        $(
            impl From<$kind> for Datagram {
                #[inline]
                fn from(dtg: $kind) -> Self {
                    Datagram::$kind(dtg)
                }
            }
        )+
    };
}

impl_from_kind!(
    Connect,
    ConnectAck,
    ConnectNack,
    Shutdown,
    ServerStatus,
    ServerStatusAck,
    Heartbeat,
    HeartbeatRequest,
    Ping,
    Pong,
    TopicRequest,
    TopicRequestAck,
    TopicRequestNack,
    ObjectRequest,
    ObjectRequestAck,
    ObjectRequestNack,
    Data,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{EndConnectionReason, ObjectRequestAction, TopicAction, TopicResponse};

    /// One valid instance of every kind
    fn every_kind() -> Vec<Datagram> {
        vec![
            Connect::new().into(),
            ConnectAck::new(0, 5).into(),
            ConnectNack::new("broker full").unwrap().into(),
            Shutdown::new(EndConnectionReason::TimeOut).into(),
            ServerStatus::new().into(),
            ServerStatusAck::new(3).into(),
            Heartbeat::new().into(),
            HeartbeatRequest::new().into(),
            Ping::new(0).into(),
            Pong::new(255).into(),
            TopicRequest::new(TopicAction::Subscribe, 12).into(),
            TopicRequestAck::new(TopicResponse::SubSuccess, 12).into(),
            TopicRequestNack::new(TopicResponse::UnsubFailure, "not subscribed")
                .unwrap()
                .into(),
            ObjectRequest::new(ObjectRequestAction::Create, 1, [4, 2, 9].into_iter().collect())
                .unwrap()
                .into(),
            ObjectRequestAck::new(0b01, 1, Some(77)).into(),
            ObjectRequestNack::new(0b01, 1, "denied").unwrap().into(),
            Data::new(1, 99, b"hi".to_vec()).unwrap().into(),
        ]
    }

    #[test]
    fn test_dispatch_roundtrip_every_kind() {
        for dtg in every_kind() {
            let bytes = dtg.encode();
            assert_eq!(bytes.len(), dtg.encoded_len());
            assert_eq!(bytes[0], dtg.datagram_type().to_code());

            let (decoded, consumed) = Datagram::decode(&bytes).unwrap();
            assert_eq!(decoded, dtg);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn test_every_proper_prefix_fails() {
        for dtg in every_kind() {
            let bytes = dtg.encode();
            for cut in 0..bytes.len() {
                let result = Datagram::decode(&bytes[..cut]);
                assert!(
                    result.is_err(),
                    "{} decoded from {} of {} bytes",
                    dtg.datagram_type(),
                    cut,
                    bytes.len()
                );
            }
        }
    }

    #[test]
    fn test_unsupported_tags() {
        assert_eq!(Datagram::decode(&[]), Err(ProtocolError::Empty));
        assert_eq!(
            Datagram::decode(&[0xFA, 0, 0]),
            Err(ProtocolError::UnsupportedType(DatagramType::OpenStream))
        );
        assert_eq!(
            Datagram::decode(&[0x13]),
            Err(ProtocolError::UnsupportedType(DatagramType::Unknown))
        );
    }

    #[test]
    fn test_codec_rejects_foreign_tag() {
        let bytes = Pong::new(5).encode();
        assert_eq!(
            Ping::decode(&bytes),
            Err(ProtocolError::UnexpectedType {
                expected: DatagramType::Ping,
                found: 0x72
            })
        );
    }

    #[test]
    fn test_sequential_decode_with_consumed_count() {
        let mut wire = DatagramBuffer::new();
        Ping::new(1).encode_into(&mut wire);
        Data::new(7, 3, b"abc".to_vec()).unwrap().encode_into(&mut wire);
        Heartbeat::new().encode_into(&mut wire);

        let (first, n1) = Datagram::decode(&wire).unwrap();
        let (second, n2) = Datagram::decode(&wire[n1..]).unwrap();
        let (third, n3) = Datagram::decode(&wire[n1 + n2..]).unwrap();

        assert_eq!(first, Datagram::Ping(Ping::new(1)));
        assert_eq!(second.datagram_type(), DatagramType::Data);
        assert_eq!(third, Datagram::Heartbeat(Heartbeat));
        assert_eq!(n1 + n2 + n3, wire.len());
    }
}
