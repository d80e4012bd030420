use crate::error::Result;
use ptmcanon::core::patterns::PatternLibrary;
use ptmcanon::engine::config as core_config;
use std::path::PathBuf;
use tracing::info;

/// The patterns a command works with: the built-ins, a file, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSource {
    pub include_builtin: bool,
    pub extra: Option<PathBuf>,
}

impl PatternSource {
    pub fn load(&self) -> Result<PatternLibrary> {
        let library = match (&self.extra, self.include_builtin) {
            (Some(path), true) => {
                info!("Extending built-in patterns with {:?}", path);
                PatternLibrary::with_builtin_and(path)?
            }
            (Some(path), false) => {
                info!("Loading patterns from {:?}", path);
                PatternLibrary::load(path)?
            }
            (None, true) => PatternLibrary::builtin().clone(),
            (None, false) => PatternLibrary::default(),
        };
        info!("Pattern library holds {} pattern(s).", library.len());
        Ok(library)
    }
}

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub patterns: PatternSource,
    pub core_config: core_config::CanonicalizationConfig,
}
