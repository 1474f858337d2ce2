use std::env;
use std::fs;
use std::path::PathBuf;

use log::*;
use rand::random;

use infra::persistence::FileStorage;

/// A storage file under the temp dir, removed again on drop.
#[derive(Debug)]
pub(crate) struct ScratchFile {
    pub(crate) path: PathBuf,
}

impl ScratchFile {
    pub(crate) fn new(name: &str) -> Self {
        let path = env::temp_dir().join(format!("zaykaa-{}-{:x}.json", name, random::<u64>()));
        debug!("Use scratch storage: {:?}", path);
        ScratchFile { path }
    }

    /// A fresh handle on the same file, as a reloaded page would get.
    pub(crate) fn storage(&self) -> FileStorage {
        FileStorage::open(&self.path)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            debug!("Leaving {:?}: {}", self.path, e);
        }
    }
}
