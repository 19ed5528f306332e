//! FLS Data Pack Builder
//!
//! Generates the FLS Minecraft data pack:
//! 1. Honeycomb blocks break back into honeycomb
//! 2. Universal dyeing: any colour of a block plus a dye gives that colour
//!
//! The pack tree is rebuilt from fixed tables on every run, zipped, and the
//! archive is named after a digest of its contents.

pub mod archive;
pub mod config;
pub mod error;
pub mod generators;
pub mod hashing;
pub mod json;
pub mod manifest;
pub mod palette;
pub mod pipeline;

pub use archive::{write_folder_to_zip, ArchivedPack};
pub use config::BuildConfig;
pub use error::BuildError;
pub use json::{write_json, Json};
pub use manifest::PackManifest;
pub use palette::{Colour, Palette, PaletteError};
pub use pipeline::{BuildPipeline, BuildReport};

pub const BUILDER_VERSION: &str = env!("CARGO_PKG_VERSION");
