use crate::player::Waypoint;
use crate::tiles::TileKind;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Magic number for save files ("MLSV" in ASCII)
const MAGIC_NUMBER: [u8; 4] = [b'M', b'L', b'S', b'V'];

/// Current save file format version
const VERSION: u16 = 1;

/// Bytes before the payload: magic + version
const HEADER_LEN: usize = 6;

/// Trailing crc32 of the payload
const CHECKSUM_LEN: usize = 4;

/// Everything a profile carries between sessions. Terrain itself is
/// not stored; the world regenerates from `seed` on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub money: i64,
    pub fuel: f32,
    pub max_fuel: f32,
    pub tank_tier: u32,
    pub speed_tier: u32,
    pub cargo_tier: u32,
    pub position: (f32, f32),
    pub cargo: Vec<TileKind>,
    pub seed: u64,
    pub waypoints: Vec<Waypoint>,
}

/// Error type for save-file operations. Callers treat every variant as
/// "no save": a failed load never applies partial state.
#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    InvalidMagicNumber,
    UnknownVersion(u16),
    InvalidLength(usize),
    InvalidChecksum,
    Encoding(bincode::Error),
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        SaveError::Io(err)
    }
}

impl From<bincode::Error> for SaveError {
    fn from(err: bincode::Error) -> Self {
        SaveError::Encoding(err)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::InvalidMagicNumber => write!(f, "Invalid magic number"),
            SaveError::UnknownVersion(v) => write!(f, "Unknown save version: {}", v),
            SaveError::InvalidLength(n) => write!(f, "Save file too short: {} bytes", n),
            SaveError::InvalidChecksum => write!(f, "Checksum mismatch"),
            SaveError::Encoding(e) => write!(f, "Encoding error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}

/// Default on-disk location of the profile save
pub fn default_save_path() -> PathBuf {
    PathBuf::from("saves").join("profile.sav")
}

/// Save the profile to disk in binary format
pub fn save_game<P: AsRef<Path>>(data: &SaveData, path: P) -> Result<(), SaveError> {
    // Ensure directory exists
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = bincode::serialize(data)?;
    let checksum = crc32fast::hash(&payload);

    let mut file = File::create(path)?;
    file.write_all(&MAGIC_NUMBER)?;
    file.write_all(&VERSION.to_le_bytes())?;
    file.write_all(&payload)?;
    file.write_all(&checksum.to_le_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Load the profile from disk. Validates magic, version and checksum
/// before decoding; any failure leaves the caller with no record at
/// all rather than a partially-read one.
pub fn load_game<P: AsRef<Path>>(path: P) -> Result<SaveData, SaveError> {
    let bytes = fs::read(path)?;

    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(SaveError::InvalidLength(bytes.len()));
    }

    if bytes[0..4] != MAGIC_NUMBER {
        return Err(SaveError::InvalidMagicNumber);
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(SaveError::UnknownVersion(version));
    }

    let payload = &bytes[HEADER_LEN..bytes.len() - CHECKSUM_LEN];
    let checksum_bytes = &bytes[bytes.len() - CHECKSUM_LEN..];
    let expected = u32::from_le_bytes([
        checksum_bytes[0],
        checksum_bytes[1],
        checksum_bytes[2],
        checksum_bytes[3],
    ]);
    if crc32fast::hash(payload) != expected {
        return Err(SaveError::InvalidChecksum);
    }

    Ok(bincode::deserialize(payload)?)
}

/// Check if a save file exists
pub fn save_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::GridPos;
    use std::env;

    fn sample_save() -> SaveData {
        SaveData {
            money: 1250,
            fuel: 4.5,
            max_fuel: 15.0,
            tank_tier: 1,
            speed_tier: 2,
            cargo_tier: 0,
            position: (384.0, 224.0),
            cargo: vec![TileKind::Dirt, TileKind::Coal, TileKind::Dirt],
            seed: 0xDEADBEEF,
            waypoints: vec![Waypoint {
                name: "Depth 40".to_string(),
                pos: GridPos::new(12, 48),
            }],
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = env::temp_dir().join("prospector_roundtrip.sav");

        let original = sample_save();
        save_game(&original, &path).expect("Failed to save");
        let loaded = load_game(&path).expect("Failed to load");

        assert_eq!(loaded, original);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_payload_fails_checksum() {
        let path = env::temp_dir().join("prospector_corrupt.sav");

        save_game(&sample_save(), &path).expect("Failed to save");
        let mut bytes = fs::read(&path).expect("Failed to read back");
        // Flip one payload byte, leave header and checksum alone
        let mid = HEADER_LEN + (bytes.len() - HEADER_LEN - CHECKSUM_LEN) / 2;
        bytes[mid] ^= 0xFF;
        fs::write(&path, &bytes).expect("Failed to rewrite");

        assert!(matches!(
            load_game(&path),
            Err(SaveError::InvalidChecksum)
        ));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let path = env::temp_dir().join("prospector_version.sav");

        save_game(&sample_save(), &path).expect("Failed to save");
        let mut bytes = fs::read(&path).expect("Failed to read back");
        bytes[4] = 0xFE;
        bytes[5] = 0xFF;
        fs::write(&path, &bytes).expect("Failed to rewrite");

        assert!(matches!(
            load_game(&path),
            Err(SaveError::UnknownVersion(0xFFFE))
        ));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let path = env::temp_dir().join("prospector_magic.sav");

        save_game(&sample_save(), &path).expect("Failed to save");
        let mut bytes = fs::read(&path).expect("Failed to read back");
        bytes[0] = b'X';
        fs::write(&path, &bytes).expect("Failed to rewrite");

        assert!(matches!(
            load_game(&path),
            Err(SaveError::InvalidMagicNumber)
        ));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_truncated_file_rejected() {
        let path = env::temp_dir().join("prospector_short.sav");

        fs::write(&path, [b'M', b'L']).expect("Failed to write");
        assert!(matches!(load_game(&path), Err(SaveError::InvalidLength(2))));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = env::temp_dir().join("prospector_never_written.sav");
        let _ = fs::remove_file(&path);

        assert!(matches!(load_game(&path), Err(SaveError::Io(_))));
        assert!(!save_exists(&path));
    }
}
