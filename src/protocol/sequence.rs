//! Sequence number classification untuk `Data`
//!
//! Stateless: caller yang menyimpan `last_seen` per topic. Hanya deteksi,
//! tidak ada retransmission di layer ini. Aritmetika wrapping (serial
//! number), jadi 0 setelah u32::MAX dianggap in-order.

/// Position of an incoming sequence number relative to the last one seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOrder {
    /// Exactly `last_seen + 1`
    InOrder,
    /// Ahead of `last_seen + 1`; `missing` numbers were skipped
    Gap { missing: u32 },
    /// Same as `last_seen`
    Duplicate,
    /// Behind `last_seen` (late arrival)
    Reordered,
}

/// Classify `incoming` against `last_seen` on the same topic
#[inline]
pub fn classify_sequence(last_seen: u32, incoming: u32) -> SequenceOrder {
    let delta = incoming.wrapping_sub(last_seen);
    match delta {
        0 => SequenceOrder::Duplicate,
        1 => SequenceOrder::InOrder,
        d if d <= i32::MAX as u32 => SequenceOrder::Gap { missing: d - 1 },
        _ => SequenceOrder::Reordered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_and_duplicate() {
        assert_eq!(classify_sequence(10, 11), SequenceOrder::InOrder);
        assert_eq!(classify_sequence(10, 10), SequenceOrder::Duplicate);
    }

    #[test]
    fn test_gap() {
        assert_eq!(classify_sequence(10, 14), SequenceOrder::Gap { missing: 3 });
    }

    #[test]
    fn test_reordered() {
        assert_eq!(classify_sequence(10, 9), SequenceOrder::Reordered);
        assert_eq!(classify_sequence(10, 0), SequenceOrder::Reordered);
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(classify_sequence(u32::MAX, 0), SequenceOrder::InOrder);
        assert_eq!(classify_sequence(u32::MAX - 1, 1), SequenceOrder::Gap { missing: 2 });
        assert_eq!(classify_sequence(0, u32::MAX), SequenceOrder::Reordered);
    }
}
