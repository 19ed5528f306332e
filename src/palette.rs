//! Palette - The Fixed Colour and Item Tables
//!
//! Built once at startup and handed to every generator.

use std::collections::HashSet;
use thiserror::Error;

pub const VANILLA_NAMESPACE: &str = "minecraft";
pub const PACK_NAMESPACE: &str = "universal_dyeing";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Duplicate colour: {0}")]
    DuplicateColour(String),

    #[error("Duplicate item category: {0}")]
    DuplicateCategory(String),

    #[error("Palette needs at least one colour and one item category")]
    Empty,
}

/// A dye colour and any materials accepted in place of its named dye.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colour {
    pub name: String,
    pub extra_dyes: Vec<String>,
}

impl Colour {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), extra_dyes: vec![] }
    }

    pub fn with_extras(name: &str, extras: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extra_dyes: extras.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Bare item name of the colour's own dye, e.g. `red_dye`.
    pub fn dye_name(&self) -> String {
        format!("{}_dye", self.name)
    }

    /// Every vanilla item id that counts as this colour's dye, named dye first.
    pub fn dye_items(&self) -> Vec<String> {
        std::iter::once(self.dye_name())
            .chain(self.extra_dyes.iter().cloned())
            .map(|item| vanilla_id(&item))
            .collect()
    }

    /// Pack tag id for this colour's dyes, without the `#` prefix.
    pub fn dye_tag(&self) -> String {
        format!("{}:dyes/{}", PACK_NAMESPACE, self.dye_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<Colour>,
    categories: Vec<String>,
}

impl Palette {
    pub fn new(colours: Vec<Colour>, categories: Vec<String>) -> Result<Self, PaletteError> {
        if colours.is_empty() || categories.is_empty() {
            return Err(PaletteError::Empty);
        }

        let mut seen = HashSet::new();
        for colour in &colours {
            if !seen.insert(colour.name.as_str()) {
                return Err(PaletteError::DuplicateColour(colour.name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.as_str()) {
                return Err(PaletteError::DuplicateCategory(category.clone()));
            }
        }

        Ok(Self { colours, categories })
    }

    /// The sixteen vanilla colours and the eight dyeable block families.
    pub fn standard() -> Self {
        let colours = vec![
            Colour::with_extras("black", &["ink_sac"]),
            Colour::with_extras("blue", &["lapis_lazuli"]),
            Colour::with_extras("brown", &["cocoa_beans"]),
            Colour::new("cyan"),
            Colour::new("gray"),
            Colour::new("green"),
            Colour::new("light_blue"),
            Colour::new("light_gray"),
            Colour::new("lime"),
            Colour::new("magenta"),
            Colour::new("orange"),
            Colour::new("pink"),
            Colour::new("purple"),
            Colour::new("red"),
            Colour::with_extras("white", &["bone_meal"]),
            Colour::new("yellow"),
        ];
        let categories = [
            "candle",
            "concrete",
            "concrete_powder",
            "glazed_terracotta",
            "stained_glass",
            "stained_glass_pane",
            "terracotta",
            "wool",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();

        Self { colours, categories }
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Every (category, colour) pair, category-major.
    pub fn combinations(&self) -> impl Iterator<Item = (&str, &Colour)> + '_ {
        self.categories
            .iter()
            .flat_map(move |cat| self.colours.iter().map(move |col| (cat.as_str(), col)))
    }

    /// Vanilla ids of every colour variant of `category`, in colour order.
    pub fn variants(&self, category: &str) -> Vec<String> {
        self.colours
            .iter()
            .map(|colour| variant_id(colour, category))
            .collect()
    }

    /// Named dyes in colour order, then extra materials, without duplicates.
    pub fn all_dye_items(&self) -> Vec<String> {
        let named = self.colours.iter().map(|c| c.dye_name());
        let extras = self.colours.iter().flat_map(|c| c.extra_dyes.iter().cloned());

        let mut seen = HashSet::new();
        named
            .chain(extras)
            .filter(|item| seen.insert(item.clone()))
            .map(|item| vanilla_id(&item))
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn vanilla_id(item: &str) -> String {
    format!("{}:{}", VANILLA_NAMESPACE, item)
}

pub fn pack_id(name: &str) -> String {
    format!("{}:{}", PACK_NAMESPACE, name)
}

/// `minecraft:<colour>_<category>`
pub fn variant_id(colour: &Colour, category: &str) -> String {
    vanilla_id(&format!("{}_{}", colour.name, category))
}

/// File stem and recipe name for a pair, e.g. `red_wool`.
pub fn recipe_name(colour: &Colour, category: &str) -> String {
    format!("{}_{}", colour.name, category)
}
