//! Growable Byte Buffer untuk output encoder
//!
//! Setiap encoder menulis ke satu `DatagramBuffer`. Buffer ini move-only:
//! tidak ada `Clone`, jadi hanya ada satu owner pada satu waktu. Serahkan
//! ke transport lewat `freeze()` / `into_vec()`, atau buang dengan
//! `release()`. Drop juga melepas storage (tepat satu kali).

use std::fmt;
use std::ops::Deref;

use bytes::{BufMut, Bytes, BytesMut};

/// Owned, exclusively-held byte buffer (`len <= capacity`).
pub struct DatagramBuffer {
    inner: BytesMut,
}

impl DatagramBuffer {
    /// Buffer kosong tanpa alokasi
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: BytesMut::new(),
        }
    }

    /// Pre-allocate `capacity` bytes
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: BytesMut::with_capacity(capacity),
        }
    }

    /// Pastikan `capacity >= len + additional`. Tidak pernah shrink.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.inner.reserve(additional);
    }

    /// Append raw bytes, reserve dulu jika perlu
    #[inline]
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.inner.reserve(bytes.len());
        self.inner.extend_from_slice(bytes);
    }

    #[inline(always)]
    pub fn push_u8(&mut self, value: u8) {
        self.inner.put_u8(value);
    }

    #[inline(always)]
    pub fn push_u16(&mut self, value: u16) {
        self.inner.put_u16_le(value);
    }

    #[inline(always)]
    pub fn push_u32(&mut self, value: u32) {
        self.inner.put_u32_le(value);
    }

    #[inline(always)]
    pub fn push_u64(&mut self, value: u64) {
        self.inner.put_u64_le(value);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Get current buffer content
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Serahkan ownership ke transport sebagai `Bytes` (zero-copy).
    #[inline]
    pub fn freeze(self) -> Bytes {
        self.inner.freeze()
    }

    /// Serahkan ownership sebagai `Vec<u8>`.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.inner.into()
    }

    /// Lepas storage secara eksplisit. Buffer tidak bisa dipakai lagi
    /// setelah ini (dijamin oleh move semantics).
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

impl Default for DatagramBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for DatagramBuffer {
    type Target = [u8];

    #[inline(always)]
    fn deref(&self) -> &[u8] {
        &self.inner
    }
}

impl AsRef<[u8]> for DatagramBuffer {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl fmt::Debug for DatagramBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatagramBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
