//! Protocol Layer: RektProtocol Datagram Codec
//!
//! Prinsip desain:
//! - Flat Binary: field fixed-width little-endian, tanpa varint dan padding
//! - Tag-first: byte pertama selalu kode `DatagramType`
//! - Size-framed: payload variable diakhiri oleh `Size`, bukan terminator
//! - Decode tidak pernah panic: semua input untrusted jadi `ProtocolError`

#[macro_use]
mod registry;

pub mod datagram;
mod enums;
pub mod id_set;
mod reader;
mod sequence;
mod types;

pub use datagram::{Datagram, DatagramCodec};
pub use enums::{EndConnectionReason, ObjectRequestAction, TopicAction, TopicResponse};
pub use reader::DatagramReader;
pub use registry::{peek_type, DatagramType};
pub use sequence::{classify_sequence, SequenceOrder};
pub use types::{flags, ClientId, Flag, ObjectId, PingId, Size, TopicId, MAX_PAYLOAD_SIZE};
