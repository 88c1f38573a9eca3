use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::snapshot::SessionSnapshot;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value persistence for session snapshots.
pub trait SnapshotStore {
    fn fetch(&self, key: &str) -> Result<Option<SessionSnapshot>, StoreError>;
    fn save(&mut self, key: &str, snapshot: &SessionSnapshot) -> Result<(), StoreError>;
}

/// All snapshots live in one JSON object on disk, keyed by game id.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, SessionSnapshot>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl SnapshotStore for JsonFileStore {
    fn fetch(&self, key: &str) -> Result<Option<SessionSnapshot>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), snapshot.clone());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, &all)?;
        out.flush()?;
        debug!("saved snapshot '{key}' to {}", self.path.display());
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, SessionSnapshot>,
}

impl SnapshotStore for MemoryStore {
    fn fetch(&self, key: &str) -> Result<Option<SessionSnapshot>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), snapshot.clone());
        Ok(())
    }
}
