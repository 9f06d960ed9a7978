//! Identifier Set Encoding
//!
//! Set `u64` di-encode sebagai run flat 8-byte little-endian, tanpa
//! separator. Count tidak ditulis terpisah; diturunkan dari `Size / 8`.
//!
//! Memakai `BTreeSet` supaya urutan encode deterministik (ascending),
//! jadi re-encode hasil decode selalu byte-identical.

use std::collections::BTreeSet;
use std::mem::size_of;

use crate::core::field::read_u64_at;
use crate::core::DatagramBuffer;
use crate::error::ProtocolError;
use crate::Result;

const ID_WIDTH: usize = size_of::<u64>();

/// Bytes needed to encode `count` identifiers
#[inline(always)]
pub fn encoded_ids_len(count: usize) -> usize {
    count * ID_WIDTH
}

/// Append every id of `ids` to `buf` in ascending order
pub fn encode_ids(ids: &BTreeSet<u64>, buf: &mut DatagramBuffer) {
    buf.reserve(encoded_ids_len(ids.len()));
    for &id in ids {
        buf.push_u64(id);
    }
}

/// Number of ids carried by a payload of `size` bytes
pub fn count_for_size(size: usize) -> Result<usize> {
    if size % ID_WIDTH != 0 {
        return Err(ProtocolError::MalformedIdSet { len: size });
    }
    Ok(size / ID_WIDTH)
}

/// Decode exactly `count` ids from `bytes`.
///
/// Gagal jika panjang bytes bukan tepat `count * 8`, atau ada id duplikat.
pub fn decode_ids(bytes: &[u8], count: usize) -> Result<BTreeSet<u64>> {
    if Some(bytes.len()) != count.checked_mul(ID_WIDTH) {
        return Err(ProtocolError::MalformedIdSet { len: bytes.len() });
    }

    let mut ids = BTreeSet::new();
    for index in 0..count {
        let id = read_u64_at(bytes, index * ID_WIDTH);
        if !ids.insert(id) {
            return Err(ProtocolError::DuplicateId(id));
        }
    }
    Ok(ids)
}

/// Selisih dua set subscription: `(added, removed)` relatif ke `current`.
pub fn diff_ids(new: &BTreeSet<u64>, current: &BTreeSet<u64>) -> (Vec<u64>, Vec<u64>) {
    let added = new.difference(current).copied().collect();
    let removed = current.difference(new).copied().collect();
    (added, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(ids: &BTreeSet<u64>) -> Vec<u8> {
        let mut buf = DatagramBuffer::new();
        encode_ids(ids, &mut buf);
        buf.into_vec()
    }

    #[test]
    fn test_set_roundtrip_any_insertion_order() {
        let forward: BTreeSet<u64> = [7, 42, 1_000_000_007].into_iter().collect();
        let backward: BTreeSet<u64> = [1_000_000_007, 42, 7].into_iter().collect();

        let bytes = encode(&backward);
        assert_eq!(bytes, encode(&forward));
        assert_eq!(bytes.len(), 24);

        let count = count_for_size(bytes.len()).unwrap();
        assert_eq!(count, 3);
        assert_eq!(decode_ids(&bytes, count).unwrap(), forward);
    }

    #[test]
    fn test_empty_set() {
        let bytes = encode(&BTreeSet::new());
        assert!(bytes.is_empty());
        assert_eq!(count_for_size(0).unwrap(), 0);
        assert!(decode_ids(&bytes, 0).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let bytes = [0u8; 12];
        assert_eq!(
            count_for_size(bytes.len()),
            Err(ProtocolError::MalformedIdSet { len: 12 })
        );
        assert_eq!(
            decode_ids(&bytes, 2),
            Err(ProtocolError::MalformedIdSet { len: 12 })
        );
        assert!(decode_ids(&bytes[..8], 2).is_err());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&5u64.to_le_bytes());
        bytes.extend_from_slice(&5u64.to_le_bytes());

        assert_eq!(decode_ids(&bytes, 2), Err(ProtocolError::DuplicateId(5)));
    }

    #[test]
    fn test_diff_ids() {
        let current: BTreeSet<u64> = [1, 2, 3, 4, 5].into_iter().collect();
        let new: BTreeSet<u64> = [2, 3, 4, 5, 6].into_iter().collect();

        assert_eq!(diff_ids(&new, &current), (vec![6], vec![1]));
        assert_eq!(diff_ids(&current, &current), (vec![], vec![]));
    }
}
