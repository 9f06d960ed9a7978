//! Ping / Pong: `[tag][ping_id: u8]`
//!
//! PingId wrap di 256; korelasi Ping→Pong urusan session layer.

use super::{check_header, DatagramCodec};
use crate::core::DatagramBuffer;
use crate::protocol::{DatagramType, PingId};
use crate::Result;

/// Round-trip probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ping {
    pub ping_id: PingId,
}

/// Answer to a `Ping`, echoing its id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pong {
    pub ping_id: PingId,
}

impl Ping {
    pub fn new(ping_id: PingId) -> Self {
        Self { ping_id }
    }

    /// The `Pong` that answers this probe
    pub fn reply(&self) -> Pong {
        Pong::new(self.ping_id)
    }
}

impl Pong {
    pub fn new(ping_id: PingId) -> Self {
        Self { ping_id }
    }

    #[inline]
    pub fn answers(&self, ping: &Ping) -> bool {
        self.ping_id == ping.ping_id
    }
}

macro_rules! impl_probe_codec {
    ($name:ident) => {
        impl DatagramCodec for $name {
            const TYPE: DatagramType = DatagramType::$name;
            const HEADER_LEN: usize = 2;

            #[inline]
            fn encode_into(&self, buf: &mut DatagramBuffer) {
                buf.push_u8(Self::TYPE.to_code());
                buf.push_u8(self.ping_id);
            }

            #[inline]
            fn decode(buf: &[u8]) -> Result<(Self, usize)> {
                check_header(buf, Self::TYPE, Self::HEADER_LEN)?;
                Ok((Self { ping_id: buf[1] }, Self::HEADER_LEN))
            }
        }
    };
}

impl_probe_codec!(Ping);
impl_probe_codec!(Pong);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_ping_scenario() {
        let bytes = Ping::new(5).encode();
        assert_eq!(&bytes[..], &[0x62, 5]);
        assert_eq!(Ping::decode(&bytes).unwrap(), (Ping::new(5), 2));
    }

    #[test]
    fn test_ping_truncated() {
        assert_eq!(
            Ping::decode(&[0x62]),
            Err(ProtocolError::truncated(DatagramType::Ping, 2, 1))
        );
        assert_eq!(Ping::decode(&[]), Err(ProtocolError::Empty));
    }

    #[test]
    fn test_pong_answers_ping() {
        let ping = Ping::new(u8::MAX);
        let pong = ping.reply();
        assert!(pong.answers(&ping));
        assert!(!Pong::new(0).answers(&ping));

        let (decoded, _) = Pong::decode(&pong.encode()).unwrap();
        assert_eq!(decoded, pong);
    }
}
