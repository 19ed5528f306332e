//! Item tags: per-colour dyes, per-category variants and the dye union.

use log::debug;
use std::path::Path;

use super::{ensure_dir, paths, write_document, Generator};
use crate::error::BuildError;
use crate::json::Json;
use crate::palette::{Colour, Palette};

pub const DYE_UNION_FILENAME: &str = "dyes.json";

fn tag_document(values: Vec<String>) -> Json {
    Json::object([("values", Json::array(values))])
}

/// Whole document on one line: `{"values": [...]}`.
pub fn colour_dye_tag(colour: &Colour) -> Json {
    tag_document(colour.dye_items()).inline()
}

pub fn category_tag(palette: &Palette, category: &str) -> Json {
    tag_document(palette.variants(category))
}

pub fn dye_union_tag(palette: &Palette) -> Json {
    tag_document(palette.all_dye_items())
}

pub struct TagGenerator;

impl Generator for TagGenerator {
    fn name(&self) -> &'static str { "tags" }

    fn generate(&self, data_dir: &Path, palette: &Palette) -> Result<usize, BuildError> {
        let tags_folder = ensure_dir(data_dir, paths::ITEM_TAGS)?;
        let dyes_folder = ensure_dir(data_dir, paths::DYE_TAGS)?;
        let mut written = 0;

        for colour in palette.colours() {
            let path = dyes_folder.join(format!("{}.json", colour.dye_name()));
            write_document(&path, &colour_dye_tag(colour))?;
            written += 1;
        }

        for category in palette.categories() {
            let path = tags_folder.join(format!("{}.json", category));
            write_document(&path, &category_tag(palette, category))?;
            written += 1;
        }

        write_document(&tags_folder.join(DYE_UNION_FILENAME), &dye_union_tag(palette))?;
        written += 1;

        debug!("Wrote {} tags", written);
        Ok(written)
    }
}
