//! Core module: byte-level primitives untuk codec
//!
//! Prinsip desain:
//! - Pure reads: field access tidak pernah memutasi input
//! - Single owner: buffer output move-only, tidak ada shared ownership
//! - Allocation-aware: reserve sekali, lalu append tanpa realokasi
//! - Zero-copy capture: file capture di-mmap, decode langsung dari mapping

mod buffer;
mod capture;
pub mod field;

pub use buffer::DatagramBuffer;
pub use capture::{write_capture, CaptureFile};
