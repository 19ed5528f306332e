//! Honeycomb blocks break back into honeycomb when mined with a tool.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ensure_dir, paths, Generator};
use crate::error::{BuildError, IoResultExt};
use crate::palette::Palette;

pub const LOOT_TABLE_FILENAME: &str = "honeycomb_block.json";

/// Loot table shipped inside the binary.
pub const BUNDLED_LOOT_TABLE: &[u8] =
    include_bytes!("../../resources/honeycomb_block_drop_honeycomb.json");

pub struct HoneycombLootTable {
    /// Replacement file; the bundled table is used when unset.
    source: Option<PathBuf>,
}

impl HoneycombLootTable {
    pub fn bundled() -> Self {
        Self { source: None }
    }

    pub fn from_file(source: &Path) -> Self {
        Self { source: Some(source.to_path_buf()) }
    }
}

impl Generator for HoneycombLootTable {
    fn name(&self) -> &'static str { "honeycomb_breaking" }

    fn generate(&self, data_dir: &Path, _palette: &Palette) -> Result<usize, BuildError> {
        let folder = ensure_dir(data_dir, paths::BLOCK_LOOT_TABLES)?;
        let target = folder.join(LOOT_TABLE_FILENAME);

        match &self.source {
            Some(source) => {
                debug!("Copying {} to {}", source.display(), target.display());
                fs::copy(source, &target).at(source)?;
            }
            None => {
                debug!("Writing bundled loot table to {}", target.display());
                fs::write(&target, BUNDLED_LOOT_TABLE).at(&target)?;
            }
        }
        Ok(1)
    }
}
