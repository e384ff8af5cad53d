//! Index persistence.
//!
//! File layout: magic (u32 LE), format version (u16 LE), payload
//! length (u64 LE), bincode payload, CRC32 of the payload (u32 LE).
//! The checksum catches truncation and bit rot before deserialization
//! gets a chance to misread them.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use recall_core::error::{Error, Result};
use recall_core::traits::VectorIndex;

use crate::factory::AnyIndex;

const MAGIC: u32 = 0x5243_4958; // "RCIX"
const VERSION: u16 = 1;

pub fn write_index(index: &AnyIndex, path: &Path) -> Result<()> {
    let payload = bincode::serialize(index)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    let checksum = crc32fast::hash(&payload);
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(&MAGIC.to_le_bytes())?;
    w.write_all(&VERSION.to_le_bytes())?;
    w.write_all(&(payload.len() as u64).to_le_bytes())?;
    w.write_all(&payload)?;
    w.write_all(&checksum.to_le_bytes())?;
    w.flush()?;
    debug!(path = %path.display(), ntotal = index.ntotal(), "wrote index");
    Ok(())
}

pub fn read_index(path: &Path) -> Result<AnyIndex> {
    let mut r = BufReader::new(File::open(path)?);

    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if u32::from_le_bytes(magic) != MAGIC {
        return Err(Error::Corrupt(format!("{}: bad magic", path.display())));
    }
    let mut version = [0u8; 2];
    r.read_exact(&mut version)?;
    let version = u16::from_le_bytes(version);
    if version != VERSION {
        return Err(Error::Corrupt(format!(
            "{}: unsupported format version {}",
            path.display(),
            version
        )));
    }
    let mut len = [0u8; 8];
    r.read_exact(&mut len)?;
    let len = u64::from_le_bytes(len);
    // The header is untrusted; never allocate more than the file can
    // actually hold (magic + version + length = 14, checksum = 4).
    let budget = std::fs::metadata(path)?.len().saturating_sub(18);
    if len > budget {
        return Err(Error::Corrupt(format!(
            "{}: payload length {} exceeds file size",
            path.display(),
            len
        )));
    }
    let len = usize::try_from(len)
        .map_err(|_| Error::Corrupt(format!("{}: absurd payload length", path.display())))?;
    let mut payload = vec![0u8; len];
    r.read_exact(&mut payload)?;
    let mut stored = [0u8; 4];
    r.read_exact(&mut stored)?;
    if crc32fast::hash(&payload) != u32::from_le_bytes(stored) {
        return Err(Error::Corrupt(format!("{}: checksum mismatch", path.display())));
    }

    let index: AnyIndex = bincode::deserialize(&payload)
        .map_err(|e| Error::Corrupt(format!("{}: {}", path.display(), e)))?;
    // A well-formed payload can still encode an inconsistent index
    // (e.g. an id table shorter than the vector count); reject it
    // here rather than panic on the first search.
    index.validate().map_err(|e| match e {
        Error::Corrupt(msg) => Error::Corrupt(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    debug!(path = %path.display(), ntotal = index.ntotal(), "read index");
    Ok(index)
}
