//! Mismatch diagnostics for failed benchmark round trips.
//!
//! When a decoded buffer does not match the input, [`compare_buffer_to_file`]
//! re-reads the original file in 1 KiB blocks, finds the first block that
//! differs, and prints both sides with [`hexdump`].

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::displaylevel;
use crate::util::get_file_size;

/// Bytes compared per step.
pub const COMPARE_BLOCK: usize = 1024;

/// Bytes per hexdump line.
pub const HEXDUMP_WIDTH: usize = 16;

/// Render `buffer` as hex + ASCII lines of `width` bytes.
///
/// Each line starts with its address (`base_offset` + index).  When
/// `error_at` falls on a line, an extra line with a `^^ MISMATCH` marker
/// under the offending byte follows it.
pub fn hexdump(buffer: &[u8], width: usize, error_at: Option<usize>, base_offset: u64) -> String {
    let width = width.max(1);
    let mut out = String::new();
    for start in (0..buffer.len()).step_by(width) {
        out.push_str(&format!("0x{:08X} : ", start as u64 + base_offset));
        for a in start..start + width {
            match buffer.get(a) {
                Some(b) => out.push_str(&format!("{:02x} ", b)),
                None => out.push_str("   "),
            }
        }
        out.push_str("   : ");
        for a in start..start + width {
            match buffer.get(a) {
                Some(&b) if (32..127).contains(&b) => out.push(b as char),
                Some(_) => out.push('.'),
                None => out.push(' '),
            }
        }
        if let Some(err) = error_at {
            if (start..start + width).contains(&err) {
                out.push_str("\n             ");
                out.push_str(&"   ".repeat(err - start));
                out.push_str("^^ MISMATCH");
            }
        }
        out.push('\n');
    }
    out
}

/// First differing 1 KiB block found by [`compare_buffer_to_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Offset of the block in the file.
    pub block_offset: u64,
    /// Index of the first differing byte within the block.
    pub index: usize,
}

/// Compare `buf` with the contents of `path` starting at `offset` and print
/// the first mismatching block from both sides.
///
/// Returns `Ok(None)` when every byte of `buf` matches.  A file that ends
/// before `buf` is reported but not treated as a mismatch.
///
/// # Errors
/// If the file cannot be opened, positioned, or read.
pub fn compare_buffer_to_file(buf: &[u8], path: &Path, offset: u64) -> io::Result<Option<Mismatch>> {
    let mut file = File::open(path).map_err(|e| {
        displaylevel!(1, "ERROR: Could not open {} to compare\n", path.display());
        e
    })?;
    let file_size = get_file_size(path);
    displaylevel!(1, "Looking for differences from {} ({} bytes)\n", path.display(), file_size);
    if offset + buf.len() as u64 > file_size {
        displaylevel!(
            1,
            "PROBLEM: Buffer extends to {}, but file only {} long.\n",
            offset + buf.len() as u64,
            file_size
        );
    }
    file.seek(SeekFrom::Start(offset))?;

    let mut orig = [0u8; COMPARE_BLOCK];
    let mut done = 0usize;
    while done < buf.len() {
        let want = COMPARE_BLOCK.min(buf.len() - done);
        let read = read_up_to(&mut file, &mut orig[..want])?;
        if read == 0 {
            break;
        }
        let decoded = &buf[done..done + read];
        if let Some(index) = orig[..read].iter().zip(decoded).position(|(a, b)| a != b) {
            let block_offset = offset + done as u64;
            displaylevel!(1, "First Mismatch 1K Block @ {} (offset {})\n", block_offset, index);
            displaylevel!(1, "Original 1K Block :\n");
            displaylevel!(1, "{}", hexdump(&orig[..read], HEXDUMP_WIDTH, Some(index), block_offset));
            displaylevel!(1, "Decompressed 1K Block :\n");
            displaylevel!(1, "{}", hexdump(decoded, HEXDUMP_WIDTH, Some(index), block_offset));
            return Ok(Some(Mismatch { block_offset, index }));
        }
        done += read;
    }

    if done < buf.len() {
        displaylevel!(1, "PROBLEM: File finished but {} left in buffer\n", buf.len() - done);
    }
    Ok(None)
}

/// Fill as much of `buf` as the reader can supply.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
