use super::IndexSnapshot;
use crate::cache::{CACHE_FILE_NAME, IndexCache};
use crate::error::{Result, StormscopeError};
use crate::external::load_model_dump;
use std::path::PathBuf;
use stormscope_api::runtime::ModelDump;

/// Version used when neither the caller nor the model dump names one.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Where the metadata index comes from: a cache directory, an optional
/// runtime model dump to rebuild from, and the running system's version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSource {
    pub datadir: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub version: Option<String>,
}

impl IndexSource {
    /// Resolves the system version and reads the dump it came from, if any.
    ///
    /// An explicit version wins; otherwise the dump's own version is used,
    /// and a dump without one counts as `unknown`. With neither a version nor
    /// a model there is nothing to check the cache against, so the version
    /// stays unresolved.
    fn resolve(&self) -> Result<(Option<String>, Option<ModelDump>)> {
        let dump = match &self.model {
            Some(path) if self.version.is_none() => Some(load_model_dump(path)?),
            _ => None,
        };

        let version = self.version.clone().or_else(|| {
            dump.as_ref()
                .map(|d| d.version.clone().unwrap_or_else(|| UNKNOWN_VERSION.to_string()))
        });

        Ok((version, dump))
    }

    fn cache_path(&self) -> PathBuf {
        match &self.datadir {
            Some(dir) => dir.join(CACHE_FILE_NAME),
            None => IndexCache::default_location(),
        }
    }

    /// The cache for `version`, or one that accepts any stored version.
    pub fn cache(&self, version: Option<String>) -> IndexCache {
        match version {
            Some(version) => IndexCache::new(self.cache_path(), version),
            None => IndexCache::unversioned(self.cache_path()),
        }
    }

    fn build(&self, dump: Option<ModelDump>, version: &str) -> Result<IndexSnapshot> {
        let dump = match (dump, &self.model) {
            (Some(dump), _) => dump,
            (None, Some(path)) => load_model_dump(path)?,
            (None, None) => {
                return Err(StormscopeError::Model(
                    "no runtime model configured to build the index from".to_string(),
                ));
            }
        };
        Ok(IndexSnapshot::build(&dump, version))
    }

    /// Loads the cached index, rebuilding it from the model when stale.
    /// Without a resolved version any stored index is used as is.
    pub fn load(&self) -> Result<IndexSnapshot> {
        let (version, dump) = self.resolve()?;
        self.cache(version)
            .load_or_build(|version| self.build(dump, version))
    }

    /// Rebuilds from the model regardless of the cache, and persists the result.
    pub fn rebuild(&self) -> Result<IndexSnapshot> {
        let (version, dump) = self.resolve()?;
        let version = version.unwrap_or_else(|| UNKNOWN_VERSION.to_string());
        let snapshot = self.build(dump, &version)?;
        self.cache(Some(version)).save(&snapshot)?;
        Ok(snapshot)
    }
}
