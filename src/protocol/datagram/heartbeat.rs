//! Liveness datagrams, tag-only

use super::unit_datagram;

unit_datagram! {
    /// Periodic liveness signal
    Heartbeat
}

unit_datagram! {
    /// Ask the peer to answer with a `Heartbeat` now
    HeartbeatRequest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::DatagramCodec;

    #[test]
    fn test_heartbeat_tags() {
        assert_eq!(&Heartbeat::new().encode()[..], &[0x60]);
        assert_eq!(&HeartbeatRequest::new().encode()[..], &[0x61]);
    }

    #[test]
    fn test_heartbeat_ignores_trailing_bytes() {
        let (_, consumed) = HeartbeatRequest::decode(&[0x61, 0x60, 0x60]).unwrap();
        assert_eq!(consumed, 1);
    }
}
