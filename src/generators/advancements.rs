//! Recipe advancements: holding any colour of a block and any dye unlocks
//! every universal dyeing recipe for that block.

use log::debug;
use std::path::Path;

use super::{ensure_dir, paths, write_document, Generator};
use crate::error::BuildError;
use crate::json::Json;
use crate::palette::{pack_id, recipe_name, Palette};

pub const PARENT: &str = "minecraft:recipes/root";
pub const TRIGGER: &str = "minecraft:inventory_changed";

const HAS_BLOCK: &str = "has_block";
const HAS_DYE: &str = "has_dye";

/// `inventory_changed` criterion matching any member of `tag`.
fn has_item_criterion(tag: &str) -> Json {
    let predicate = Json::object([("items", Json::from(format!("#{}", tag)))]);
    Json::object([
        ("trigger", Json::from(TRIGGER)),
        ("conditions", Json::object([("items", Json::Array(vec![predicate]))]).inline()),
    ])
}

/// Recipe ids rewarded for `category`, one per colour.
pub fn reward_recipes(palette: &Palette, category: &str) -> Vec<String> {
    palette
        .colours()
        .iter()
        .map(|colour| pack_id(&recipe_name(colour, category)))
        .collect()
}

pub fn advancement_document(palette: &Palette, category: &str) -> Json {
    let criteria = Json::object([
        // Category tag written by the tag generator
        (HAS_BLOCK, has_item_criterion(&pack_id(category))),
        (HAS_DYE, has_item_criterion(&pack_id("dyes"))),
    ]);

    // Separate groups, so both criteria are required
    let requirements = Json::array([Json::array([HAS_BLOCK]), Json::array([HAS_DYE])]).inline();

    Json::object([
        ("parent", Json::from(PARENT)),
        ("criteria", criteria),
        ("requirements", requirements),
        ("rewards", Json::object([("recipes", Json::array(reward_recipes(palette, category)))])),
    ])
}

pub struct AdvancementGenerator;

impl Generator for AdvancementGenerator {
    fn name(&self) -> &'static str { "advancements" }

    fn generate(&self, data_dir: &Path, palette: &Palette) -> Result<usize, BuildError> {
        let folder = ensure_dir(data_dir, paths::ADVANCEMENTS)?;

        for category in palette.categories() {
            let path = folder.join(format!("{}.json", category));
            write_document(&path, &advancement_document(palette, category))?;
        }

        debug!("Wrote {} advancements", palette.categories().len());
        Ok(palette.categories().len())
    }
}
