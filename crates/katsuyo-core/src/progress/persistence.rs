use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Stars, Stats, STARS_MAGIC, STATS_MAGIC, VERSION};

/// magic (4) + version (1) + crc32 of body (4, little-endian)
const HEADER_LEN: usize = 9;

fn encode<T: Serialize>(magic: &[u8; 4], value: &T) -> Result<Vec<u8>, io::Error> {
    let body = bincode::serialize(value).map_err(io::Error::other)?;
    let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
    buf.extend_from_slice(magic);
    buf.push(VERSION);
    buf.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
    buf.extend_from_slice(&body);
    Ok(buf)
}

fn decode<T: DeserializeOwned>(magic: &[u8; 4], bytes: &[u8]) -> Result<T, io::Error> {
    if bytes.len() < HEADER_LEN {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "too short"));
    }
    if &bytes[0..4] != magic {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "bad magic"));
    }
    if bytes[4] != VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "unsupported version",
        ));
    }
    let expected_crc = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
    let body = &bytes[HEADER_LEN..];
    if crc32fast::hash(body) != expected_crc {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "checksum mismatch"));
    }
    bincode::deserialize(body).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Atomic write: write to .tmp then rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), io::Error> {
    let tmp = path.with_extension("tmp");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Read `path`, or `None` if it doesn't exist.
fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, io::Error> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

impl Stars {
    /// Serialize to bytes (KTST format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, io::Error> {
        encode(STARS_MAGIC, self)
    }

    /// Deserialize from bytes (KTST format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, io::Error> {
        decode(STARS_MAGIC, bytes)
    }

    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        write_atomic(path, &self.to_bytes()?)
    }

    /// Open from file, returning an empty set if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, io::Error> {
        match read_optional(path)? {
            Some(bytes) => Self::from_bytes(&bytes),
            None => Ok(Self::new()),
        }
    }
}

impl Stats {
    /// Serialize to bytes (KTSS format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, io::Error> {
        encode(STATS_MAGIC, self)
    }

    /// Deserialize from bytes (KTSS format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, io::Error> {
        decode(STATS_MAGIC, bytes)
    }

    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        write_atomic(path, &self.to_bytes()?)
    }

    /// Open from file, returning zeroed stats if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, io::Error> {
        match read_optional(path)? {
            Some(bytes) => Self::from_bytes(&bytes),
            None => Ok(Self::new()),
        }
    }
}
