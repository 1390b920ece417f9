// Service Registry
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Local file that holds the state of the emulated ledger between invocations of the CLI.

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Error as IOError;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

use service_registry_client::MemoryLedger;

/// Version of the file layout written by [save].
const FORMAT_VERSION: u32 = 1;

const FILE: &str = "ledger.json";

#[derive(Serialize, Deserialize)]
struct LedgerFile {
    version: u32,
    ledger: MemoryLedger,
}

#[derive(Debug, ThisError)]
pub enum Error {
    /// No ledger file was given and there is no data directory to put one in
    #[error("No ledger file was given and no data directory is available")]
    NoDataDir,

    /// The ledger file was written by an incompatible version
    #[error("The ledger file has the incompatible format version {0}")]
    IncompatibleVersion(u32),

    /// Failed to write to the ledger file
    #[error("Failed to write to the ledger file: {0}")]
    FailedWrite(#[from] WritingError),

    /// Failed to read the ledger file
    #[error("Failed to read the ledger file: {0}")]
    FailedRead(#[from] ReadingError),
}

#[derive(Debug, ThisError)]
pub enum WritingError {
    #[error(transparent)]
    IO(IOError),

    #[error(transparent)]
    Serialization(serde_json::Error),
}

#[derive(Debug, ThisError)]
pub enum ReadingError {
    #[error(transparent)]
    IO(IOError),

    #[error(transparent)]
    Deserialization(serde_json::Error),
}

/// The ledger file in the data directory of the current user.
pub fn default_path() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;
    Some(dirs.data_dir().join("service-registry-cli").join(FILE))
}

/// Load the ledger stored at `path`. Returns `None` if there is no file yet.
pub fn load(path: &Path) -> Result<Option<MemoryLedger>, Error> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path).map_err(ReadingError::IO)?;
    let stored: LedgerFile = serde_json::from_reader(&file)
        .map_err(ReadingError::Deserialization)?;
    if stored.version != FORMAT_VERSION {
        return Err(Error::IncompatibleVersion(stored.version));
    }
    Ok(Some(stored.ledger))
}

pub fn save(path: &Path, ledger: &MemoryLedger) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(WritingError::IO)?;
    }
    let stored = LedgerFile {
        version: FORMAT_VERSION,
        ledger: ledger.clone(),
    };
    let content = serde_json::to_vec(&stored)
        .map_err(WritingError::Serialization)?;
    std::fs::write(path, content).map_err(WritingError::IO)?;
    log::debug!("Saved ledger to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use service_registry_client::{Balance, INCENTIVE_TOKEN};

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("service-registry-cli-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file() {
        assert!(load(&scratch_path("missing.json")).unwrap().is_none());
    }

    #[test]
    fn save_and_load() {
        let path = scratch_path("ledger.json");
        let mut ledger = MemoryLedger::new();
        ledger.mint("addr-a", INCENTIVE_TOKEN, Balance::from(7u32));
        ledger.set_timestamp(1_136_214_245);

        save(&path, &ledger).unwrap();
        let loaded = load(&path).unwrap().unwrap();

        assert_eq!(
            loaded.balance("addr-a", INCENTIVE_TOKEN),
            Balance::from(7u32)
        );
        assert_eq!(loaded.timestamp(), 1_136_214_245);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn incompatible_version() {
        let path = scratch_path("old.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let content = serde_json::json!({
            "version": 0,
            "ledger": MemoryLedger::new(),
        });
        std::fs::write(&path, content.to_string()).unwrap();

        assert!(matches!(load(&path), Err(Error::IncompatibleVersion(0))));
        std::fs::remove_file(&path).unwrap();
    }
}
