//! Build Pipeline - Single Entry Point
//!
//! Steps run in a fixed order and the first failure aborts the build. A
//! half-written output folder is left behind; the next run wipes it.

use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::write_folder_to_zip;
use crate::config::BuildConfig;
use crate::error::{BuildError, IoResultExt};
use crate::generators::{standard_generators, Generator};
use crate::palette::Palette;

/// What a finished build produced.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub archive: PathBuf,
    pub digest: String,
    pub short_digest: String,
    pub documents: usize,
    pub archived_files: usize,
}

/// The build pipeline - resets the output, runs generators, zips the result
pub struct BuildPipeline {
    config: BuildConfig,
    palette: Palette,
    generators: Vec<Box<dyn Generator>>,
}

impl BuildPipeline {
    pub fn new(config: BuildConfig, palette: Palette) -> Self {
        let generators = standard_generators(config.loot_table_source.as_deref());
        Self { config, palette, generators }
    }

    /// Names of the generators, in run order.
    pub fn generator_names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    /// Run the whole build.
    pub fn run(&self) -> Result<BuildReport, BuildError> {
        let output_dir = &self.config.output_dir;
        ensure_empty_folder(output_dir)?;

        let data_dir = self.config.data_dir();
        fs::create_dir(&data_dir).at(&data_dir)?;

        let mut documents = 0;
        for generator in &self.generators {
            let written = generator.generate(&data_dir, &self.palette)?;
            info!("{}: {} documents", generator.name(), written);
            documents += written;
        }

        self.config.manifest.write(output_dir)?;
        documents += 1;

        let packed = write_folder_to_zip(output_dir, &self.config.archive_path())?;

        Ok(BuildReport {
            short_digest: packed.short_digest().to_string(),
            archive: packed.path,
            digest: packed.digest,
            documents,
            archived_files: packed.entries,
        })
    }
}

impl Default for BuildPipeline {
    fn default() -> Self {
        Self::new(BuildConfig::default(), Palette::standard())
    }
}

/// Make sure `folder` exists and is empty.
pub fn ensure_empty_folder(folder: &Path) -> Result<(), BuildError> {
    if folder.exists() {
        fs::remove_dir_all(folder).at(folder)?;
    }
    fs::create_dir_all(folder).at(folder)
}
