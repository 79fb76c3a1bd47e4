use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const STORE_FILE_NAME: &str = "entries.csv";

pub struct Config {
    pub store_path: PathBuf,
}

impl Config {
    /// Resolve where entries live. An explicit `--store` path wins over the
    /// platform data directory.
    pub fn load(store_override: Option<PathBuf>) -> Result<Self> {
        if let Some(store_path) = store_override {
            return Ok(Config { store_path });
        }

        let proj_dirs =
            ProjectDirs::from("", "", "daylog").context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let store_path = data_dir.join(STORE_FILE_NAME);

        Ok(Config { store_path })
    }
}
