use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use bio_core::Shuffler;
use bio_core::model::QuestionBank;
use storage::Storage;

/// Settings shared by every command. Each flag falls back to an environment
/// variable.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Directory holding the stats snapshot and tutorial flags
    #[arg(
        long,
        global = true,
        env = "BIODINAMICA_DATA_DIR",
        default_value = ".biodinamica"
    )]
    pub data_dir: PathBuf,

    /// Question bank JSON to use instead of the bundled one
    #[arg(long, global = true, env = "BIODINAMICA_BANK")]
    pub bank: Option<PathBuf>,

    /// Seed for shuffling questions and options
    #[arg(long, global = true, env = "BIODINAMICA_SEED")]
    pub seed: Option<u64>,
}

impl AppConfig {
    pub fn storage(&self) -> Result<Storage> {
        Storage::file(&self.data_dir).with_context(|| {
            format!("cannot open data directory {}", self.data_dir.display())
        })
    }

    pub fn question_bank(&self) -> Result<Arc<QuestionBank>> {
        let bank = match &self.bank {
            Some(path) => QuestionBank::from_path(path)
                .with_context(|| format!("cannot load question bank {}", path.display()))?,
            None => QuestionBank::bundled().context("bundled question bank is invalid")?,
        };
        Ok(Arc::new(bank))
    }

    #[must_use]
    pub fn shuffler(&self) -> Shuffler {
        match self.seed {
            Some(seed) => Shuffler::seeded(seed),
            None => Shuffler::Random,
        }
    }
}
