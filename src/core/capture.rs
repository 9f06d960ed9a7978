//! Memory-Mapped Capture File
//!
//! Capture = datagram yang di-concat apa adanya (format wire, tanpa header
//! file). File di-mmap read-only, jadi decode langsung dari page cache
//! tanpa copy ke heap.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

/// Read-only view over a capture file
pub struct CaptureFile {
    // None untuk file kosong (mmap panjang 0 ditolak sebagian platform)
    mmap: Option<Mmap>,
}

impl CaptureFile {
    /// Map an existing capture file
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len == 0 {
            return Ok(Self { mmap: None });
        }

        // SAFETY: mapping read-only; capture tidak boleh ditulis proses lain
        // selama CaptureFile hidup.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[..],
            None => &[],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write encoded datagrams to `path`, replacing any previous content.
///
/// Returns the number of bytes written.
pub fn write_capture<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<usize> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(bytes.len())
}
