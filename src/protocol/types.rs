//! Common wire types
//!
//! Semua identifier fixed-width, tanpa varint.

/// Declared payload length of a variable-payload datagram
pub type Size = u16;
/// Bit-encoded outcome/option field of acknowledgements
pub type Flag = u8;
/// Connected peer, assigned by the accepting side
pub type ClientId = u64;
/// Publish/subscribe topic
pub type TopicId = u64;
/// Replicated object
pub type ObjectId = u64;
/// Ping/Pong correlation tag (wraps at 256)
pub type PingId = u8;

/// Max payload yang muat di field `Size`
pub const MAX_PAYLOAD_SIZE: usize = Size::MAX as usize;

/// Bit assignment of the acknowledgement `Flag` byte.
///
/// ```text
/// bit  7   6   5   4   3   2   1   0
///      F   E   -   U   S   D   M   C
/// C/M/D/S/U: create, update, delete, subscribe, unsubscribe
/// E: operation failed
/// F: final object id follows (ObjectRequestAck only, owned by the codec)
/// ```
pub mod flags {
    use super::Flag;

    pub const CREATE: Flag = 0x01;
    pub const UPDATE: Flag = 0x02;
    pub const DELETE: Flag = 0x04;
    pub const SUBSCRIBE: Flag = 0x08;
    pub const UNSUBSCRIBE: Flag = 0x10;
    pub const FAILED: Flag = 0x40;
    pub const FINAL_ID_PRESENT: Flag = 0x80;

    /// All action bits (C, M, D, S, U)
    pub const ACTIONS: Flag = CREATE | UPDATE | DELETE | SUBSCRIBE | UNSUBSCRIBE;

    #[inline(always)]
    pub fn has(flag: Flag, bits: Flag) -> bool {
        flag & bits == bits
    }
}

#[cfg(test)]
mod tests {
    use super::flags::*;
    use super::*;

    #[test]
    fn test_max_payload() {
        assert_eq!(MAX_PAYLOAD_SIZE, 65_535);
    }

    #[test]
    fn test_flag_bits_disjoint() {
        let all = [CREATE, UPDATE, DELETE, SUBSCRIBE, UNSUBSCRIBE, FAILED, FINAL_ID_PRESENT];
        let mut seen: Flag = 0;
        for bit in all {
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
        assert_eq!(ACTIONS & FINAL_ID_PRESENT, 0);
    }

    #[test]
    fn test_has() {
        assert!(has(CREATE | FAILED, FAILED));
        assert!(!has(CREATE, FINAL_ID_PRESENT));
        assert!(has(0b0001_0001, CREATE | UNSUBSCRIBE));
    }
}
