//! JSON persistence for genomes, networks, populations and their configuration.

use crate::error::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::{fs, path::Path};

/// Types that can be written to and read back from JSON strings and files
pub trait Persist: Serialize + DeserializeOwned {
    fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, Persist::to_string(self)?)?;
        Ok(())
    }

    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}
