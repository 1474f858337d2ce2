use anyhow::{Context, Result};
use log::*;
use serde::{de::DeserializeOwned, Serialize};

use crate::persistence::Storage;

/// A JSON document kept whole under one fixed storage key.
pub trait Document: Serialize + DeserializeOwned {
    const KEY: &'static str;
}

pub struct Documents<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: Storage + ?Sized> Documents<'a, S> {
    pub fn wrap(storage: &'a S) -> Self {
        Documents { storage }
    }

    /// `Ok(None)` when nothing has been stored yet; an error when the stored
    /// value can't be read or doesn't parse.
    pub fn load<D: Document>(&self) -> Result<Option<D>> {
        let raw = match self.storage.get_item(D::KEY).context("read document")? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let doc = serde_json::from_str(&raw).with_context(|| format!("parse {}", D::KEY))?;
        debug!("Loaded {} ({} bytes)", D::KEY, raw.len());
        Ok(Some(doc))
    }

    pub fn save<D: Document>(&self, doc: &D) -> Result<()> {
        let json = serde_json::to_string(doc).with_context(|| format!("encode {}", D::KEY))?;
        self.storage
            .set_item(D::KEY, &json)
            .with_context(|| format!("write {}", D::KEY))?;
        debug!("Saved {} ({} bytes)", D::KEY, json.len());
        Ok(())
    }

    pub fn remove<D: Document>(&self) -> Result<()> {
        self.storage
            .remove_item(D::KEY)
            .with_context(|| format!("remove {}", D::KEY))?;
        Ok(())
    }
}
