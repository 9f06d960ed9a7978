//! Primitive Field Access
//!
//! Baca integer fixed-width (little-endian) dan sub-range byte dari
//! borrowed slice.
//!
//! Semua bound check di sini adalah kontrak internal: decoder WAJIB
//! memvalidasi panjang (minimum header / `Size`) sebelum memanggil fungsi
//! ini. Akses di luar batas = bug pada decoder, bukan input yang rusak,
//! jadi langsung panic.

/// Read a little-endian `u16` at `position`.
///
/// # Panics
/// Panic jika `position + 2 > buf.len()`.
#[inline(always)]
#[track_caller]
pub fn read_u16_at(buf: &[u8], position: usize) -> u16 {
    u16::from_le_bytes(read_array(buf, position))
}

/// Read a little-endian `u32` at `position`.
///
/// # Panics
/// Panic jika `position + 4 > buf.len()`.
#[inline(always)]
#[track_caller]
pub fn read_u32_at(buf: &[u8], position: usize) -> u32 {
    u32::from_le_bytes(read_array(buf, position))
}

/// Read a little-endian `u64` at `position`.
///
/// # Panics
/// Panic jika `position + 8 > buf.len()`.
#[inline(always)]
#[track_caller]
pub fn read_u64_at(buf: &[u8], position: usize) -> u64 {
    u64::from_le_bytes(read_array(buf, position))
}

/// Copy `buf[from..to]` ke Vec baru (end exclusive).
///
/// # Panics
/// Panic jika `from > to` atau `to > buf.len()`.
#[inline]
#[track_caller]
pub fn subrange(buf: &[u8], from: usize, to: usize) -> Vec<u8> {
    if from > to || to > buf.len() {
        out_of_bounds(from, to.saturating_sub(from), buf.len());
    }
    buf[from..to].to_vec()
}

#[inline(always)]
#[track_caller]
fn read_array<const N: usize>(buf: &[u8], position: usize) -> [u8; N] {
    let end = match position.checked_add(N) {
        Some(end) if end <= buf.len() => end,
        _ => out_of_bounds(position, N, buf.len()),
    };

    let mut out = [0u8; N];
    out.copy_from_slice(&buf[position..end]);
    out
}

#[cold]
#[inline(never)]
#[track_caller]
fn out_of_bounds(position: usize, width: usize, len: usize) -> ! {
    panic!(
        "field access out of bounds: {} bytes at offset {} in a {}-byte slice",
        width, position, len
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integers_at_position() {
        let buf = u64::MAX.to_le_bytes();

        assert_eq!(read_u64_at(&buf, 0), u64::MAX);
        assert_eq!(read_u32_at(&buf, 4), u32::MAX);
        assert_eq!(read_u16_at(&buf, 6), u16::MAX);
        assert_eq!(read_u16_at(&buf, 0), u16::MAX);
    }

    #[test]
    fn test_little_endian_layout() {
        let buf = [0x34, 0x12, 0x78, 0x56, 0x00];

        assert_eq!(read_u16_at(&buf, 0), 0x1234);
        assert_eq!(read_u32_at(&buf, 0), 0x5678_1234);
        assert_eq!(read_u16_at(&buf, 3), 0x0056);
    }

    #[test]
    fn test_subrange() {
        let buf = [1u8, 2, 3, 4, 5, 6];

        assert_eq!(subrange(&buf, 2, 5), vec![3, 4, 5]);
        assert_eq!(subrange(&buf, 0, 6), buf.to_vec());
        assert!(subrange(&buf, 3, 3).is_empty());
    }

    #[test]
    #[should_panic(expected = "field access out of bounds")]
    fn test_read_past_end_panics() {
        let buf = [0u8; 7];
        read_u64_at(&buf, 0);
    }

    #[test]
    #[should_panic(expected = "field access out of bounds")]
    fn test_position_overflow_panics() {
        let buf = [0u8; 4];
        read_u16_at(&buf, usize::MAX);
    }

    #[test]
    #[should_panic(expected = "field access out of bounds")]
    fn test_inverted_subrange_panics() {
        let buf = [0u8; 4];
        subrange(&buf, 3, 1);
    }
}
