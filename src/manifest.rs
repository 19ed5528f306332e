//! Pack Manifest - `pack.mcmeta`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BuildError, IoResultExt};
use crate::json::{write_json, Json};

pub const PACK_MCMETA_FILENAME: &str = "pack.mcmeta";
pub const PACK_FORMAT: u32 = 48;
pub const PACK_DESCRIPTION: &str = "FLS datapack";

/// Manifest settings as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackManifest {
    #[serde(default = "default_pack_format")]
    pub pack_format: u32,
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_pack_format() -> u32 { PACK_FORMAT }
fn default_description() -> String { PACK_DESCRIPTION.to_string() }

impl Default for PackManifest {
    fn default() -> Self {
        Self {
            pack_format: PACK_FORMAT,
            description: PACK_DESCRIPTION.to_string(),
        }
    }
}

// On-disk layout. Field order is the key order in the file.
#[derive(Serialize)]
struct McMeta<'a> {
    pack: PackSection<'a>,
}

#[derive(Serialize)]
struct PackSection<'a> {
    pack_format: u32,
    // Only one format is targeted, upgrades are rare
    supported_formats: FormatRange,
    description: &'a str,
}

#[derive(Serialize)]
struct FormatRange {
    min_inclusive: u32,
    max_inclusive: u32,
}

impl PackManifest {
    pub fn to_json(&self) -> Result<Json, serde_json::Error> {
        let meta = McMeta {
            pack: PackSection {
                pack_format: self.pack_format,
                supported_formats: FormatRange {
                    min_inclusive: self.pack_format,
                    max_inclusive: self.pack_format,
                },
                description: &self.description,
            },
        };
        Json::from_serialize(&meta)
    }

    /// Write `pack.mcmeta` into `output_root`.
    pub fn write(&self, output_root: &Path) -> Result<PathBuf, BuildError> {
        let path = output_root.join(PACK_MCMETA_FILENAME);
        write_json(&path, &self.to_json()?).at(&path)?;
        Ok(path)
    }
}
