//! Feature Generators
//!
//! Each generator owns one namespaced subtree of the pack's `data/` folder
//! and reports how many documents it wrote.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, IoResultExt};
use crate::json::{write_json, Json};
use crate::palette::Palette;

pub mod advancements;
pub mod loot_table;
pub mod recipes;
pub mod tags;

pub use advancements::AdvancementGenerator;
pub use loot_table::HoneycombLootTable;
pub use recipes::RecipeGenerator;
pub use tags::TagGenerator;

/// Pack resource folders, relative to `data`.
pub mod paths {
    pub const RECIPES: &str = "universal_dyeing/recipe";
    pub const ITEM_TAGS: &str = "universal_dyeing/tags/item";
    pub const DYE_TAGS: &str = "universal_dyeing/tags/item/dyes";
    pub const ADVANCEMENTS: &str =
        "universal_dyeing/advancement/recipes/building_blocks/universal_dyeing";
    pub const BLOCK_LOOT_TABLES: &str = "minecraft/loot_table/blocks";
}

/// A generator writes its documents under `data_dir`.
pub trait Generator {
    fn name(&self) -> &'static str;
    fn generate(&self, data_dir: &Path, palette: &Palette) -> Result<usize, BuildError>;
}

/// Create `data_dir/relative` and everything above it.
pub(crate) fn ensure_dir(data_dir: &Path, relative: &str) -> Result<PathBuf, BuildError> {
    let dir = data_dir.join(relative);
    fs::create_dir_all(&dir).at(&dir)?;
    Ok(dir)
}

pub(crate) fn write_document(path: &Path, doc: &Json) -> Result<(), BuildError> {
    write_json(path, doc).at(path)
}

/// All generators in build order.
pub fn standard_generators(loot_table_source: Option<&Path>) -> Vec<Box<dyn Generator>> {
    let loot_table = match loot_table_source {
        Some(path) => HoneycombLootTable::from_file(path),
        None => HoneycombLootTable::bundled(),
    };
    vec![
        Box::new(loot_table),
        Box::new(RecipeGenerator),
        Box::new(TagGenerator),
        Box::new(AdvancementGenerator),
    ]
}
