//! # rekt-protocol
//!
//! Compact typed binary codec for the RektProtocol messaging layer:
//! liveness, topic publish/subscribe, and object lifecycle replication.
//!
//! ```
//! use rekt_protocol::protocol::datagram::Ping;
//! use rekt_protocol::{Datagram, DatagramCodec};
//!
//! let bytes = Ping::new(5).encode();
//! assert_eq!(&bytes[..], &[0x62, 5]);
//!
//! let (datagram, consumed) = Datagram::decode(&bytes).unwrap();
//! assert_eq!(datagram, Datagram::Ping(Ping::new(5)));
//! assert_eq!(consumed, 2);
//! ```

pub mod core;
pub mod error;
pub mod protocol;

pub use crate::core::DatagramBuffer;
pub use error::ProtocolError;
pub use protocol::{peek_type, Datagram, DatagramCodec, DatagramReader, DatagramType};

/// Result alias for codec operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
