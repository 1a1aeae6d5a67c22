//! Catalog persistence service
//!
//! Reads and writes a unit sequence as one JSON document through the
//! filesystem boundary.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::codec::{self, EncodeOptions};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{EntityFactory, MutableFactory, MutableUnit, Unit, UnitView};
use crate::infrastructure::traits::FileSystem;

/// Service for loading and saving unit catalogs.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    options: EncodeOptions,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>, options: EncodeOptions) -> Self {
        Self { fs, options }
    }

    /// Load frozen units from `path`.
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<Unit>> {
        let text = self.read(path)?;
        codec::decode(&text)
    }

    /// Load editable units from `path`.
    pub fn load_mutable(&self, path: &Path) -> ApplicationResult<Vec<MutableUnit>> {
        self.load_with(&MutableFactory, path)
    }

    /// Load units from `path`, building them with `factory`.
    pub fn load_with<F: EntityFactory>(
        &self,
        factory: &F,
        path: &Path,
    ) -> ApplicationResult<Vec<F::Unit>> {
        let text = self.read(path)?;
        codec::decode_with(factory, &text)
    }

    /// Encode `units` and write them to `path`, replacing its contents.
    ///
    /// Nothing is written when encoding fails.
    pub fn save<U: UnitView>(&self, path: &Path, units: &[U]) -> ApplicationResult<()> {
        debug!("save: path={}, units={}", path.display(), units.len());
        let mut text = codec::encode(units, &self.options)?;
        text.push('\n');
        self.fs
            .write(path, &text)
            .with_path_context("write catalog", path)
    }

    /// Encode `units` with this service's layout.
    pub fn render<U: UnitView>(&self, units: &[U]) -> ApplicationResult<String> {
        codec::encode(units, &self.options)
    }

    fn read(&self, path: &Path) -> ApplicationResult<String> {
        debug!("load: path={}", path.display());
        self.fs
            .read_to_string(path)
            .with_path_context("read catalog", path)
    }
}
