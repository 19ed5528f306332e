//! Universal dyeing recipes: eight blocks of any colour around one dye give
//! eight blocks of the dye's colour.

use log::debug;
use std::path::Path;

use super::{ensure_dir, paths, write_document, Generator};
use crate::error::BuildError;
use crate::json::Json;
use crate::palette::{recipe_name, variant_id, Colour, Palette};

pub const RECIPE_TYPE: &str = "crafting_shaped";
pub const RESULT_COUNT: i64 = 8;
pub const PATTERN: [&str; 3] = ["###", "#O#", "###"];

const BLOCK_SYMBOL: &str = "#";
const DYE_SYMBOL: &str = "O";

/// A single recipe ingredient choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingredient {
    Item(String),
    Tag(String),
}

impl Ingredient {
    pub fn to_json(&self) -> Json {
        let (kind, id) = match self {
            Ingredient::Item(id) => ("item", id),
            Ingredient::Tag(id) => ("tag", id),
        };
        Json::object([(kind, Json::from(id.as_str()))]).inline()
    }
}

/// Any colour variant of `category` is accepted around the dye.
pub fn block_ingredients(palette: &Palette, category: &str) -> Vec<Ingredient> {
    palette.variants(category).into_iter().map(Ingredient::Item).collect()
}

/// Every colour goes through its own dye tag.
pub fn dye_ingredient(colour: &Colour) -> Ingredient {
    Ingredient::Tag(colour.dye_tag())
}

pub fn group_name(category: &str) -> String {
    format!("universal_dyeing_{}", category)
}

pub fn recipe_document(palette: &Palette, category: &str, colour: &Colour) -> Json {
    let blocks = block_ingredients(palette, category).iter().map(Ingredient::to_json).collect::<Vec<_>>();

    let key = Json::object([
        (BLOCK_SYMBOL, Json::Array(blocks)),
        (DYE_SYMBOL, dye_ingredient(colour).to_json()),
    ]);

    let result = Json::object([
        ("id", Json::from(variant_id(colour, category))),
        ("count", Json::from(RESULT_COUNT)),
    ]);

    Json::object([
        ("type", Json::from(RECIPE_TYPE)),
        ("pattern", Json::array(PATTERN)),
        ("key", key),
        ("result", result),
        ("group", Json::from(group_name(category))),
    ])
}

pub struct RecipeGenerator;

impl Generator for RecipeGenerator {
    fn name(&self) -> &'static str { "recipes" }

    fn generate(&self, data_dir: &Path, palette: &Palette) -> Result<usize, BuildError> {
        let folder = ensure_dir(data_dir, paths::RECIPES)?;

        let mut written = 0;
        for (category, colour) in palette.combinations() {
            let path = folder.join(format!("{}.json", recipe_name(colour, category)));
            write_document(&path, &recipe_document(palette, category, colour))?;
            written += 1;
        }

        debug!("Wrote {} recipes", written);
        Ok(written)
    }
}
