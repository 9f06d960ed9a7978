//! Sequential decoding dari satu receive buffer
//!
//! Satu buffer bisa berisi beberapa datagram berurutan. Reader maju sesuai
//! `consumed` dari tiap decode. Tidak ada resync marker di wire, jadi
//! setelah error pertama reader berhenti (error dikembalikan satu kali).

use crate::protocol::datagram::Datagram;
use crate::Result;

/// Iterator over the datagrams packed in a borrowed buffer
pub struct DatagramReader<'a> {
    buffer: &'a [u8],
    read_pos: usize,
    failed: bool,
}

impl<'a> DatagramReader<'a> {
    #[inline(always)]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            read_pos: 0,
            failed: false,
        }
    }

    /// Offset of the next datagram (or of the failing one)
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.read_pos
    }

    /// Bytes not yet consumed
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.read_pos)
    }

    /// Unconsumed tail, e.g. a datagram cut at the end of a receive buffer
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.read_pos..]
    }

    #[inline(always)]
    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

impl<'a> Iterator for DatagramReader<'a> {
    type Item = Result<Datagram>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.read_pos >= self.buffer.len() {
            return None;
        }

        match Datagram::decode(&self.buffer[self.read_pos..]) {
            Ok((datagram, consumed)) => {
                self.read_pos += consumed;
                Some(Ok(datagram))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
