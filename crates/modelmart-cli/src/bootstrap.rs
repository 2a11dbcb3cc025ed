//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the listing source and settings are
//! wired together for the CLI adapter. Command handlers receive the composed
//! `CliContext`.

use std::path::PathBuf;
use std::sync::Arc;

use modelmart_catalog::{FileCatalog, StaticCatalog};
use modelmart_core::{BrowseSettings, ListingSourcePort, validate_settings};

use crate::error::CliError;
use crate::parser::Cli;

/// Listings in the built-in sample catalog.
pub const SAMPLE_CATALOG_SIZE: usize = 48;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Catalog file; `None` selects the sample catalog.
    pub catalog_path: Option<PathBuf>,
    /// Settings file; `None` uses defaults.
    pub settings_path: Option<PathBuf>,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            catalog_path: cli.catalog.clone(),
            settings_path: cli.settings.clone(),
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Where listings come from.
    pub source: Arc<dyn ListingSourcePort>,
    /// Validated browse settings.
    pub settings: BrowseSettings,
}

impl CliContext {
    pub fn source(&self) -> &Arc<dyn ListingSourcePort> {
        &self.source
    }

    pub const fn settings(&self) -> &BrowseSettings {
        &self.settings
    }
}

/// Bootstrap the CLI application.
///
/// Settings from the file are layered over the defaults and validated. The
/// catalog file, if any, is read lazily on first fetch.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let settings = load_settings(config.settings_path.as_deref())?;

    let source: Arc<dyn ListingSourcePort> = match config.catalog_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Using catalog file");
            Arc::new(FileCatalog::new(path))
        }
        None => {
            tracing::debug!(count = SAMPLE_CATALOG_SIZE, "Using sample catalog");
            Arc::new(StaticCatalog::sample(SAMPLE_CATALOG_SIZE))
        }
    };

    Ok(CliContext { source, settings })
}

fn load_settings(path: Option<&std::path::Path>) -> Result<BrowseSettings, CliError> {
    let mut settings = BrowseSettings::with_defaults();

    if let Some(path) = path {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        let overrides: BrowseSettings = serde_json::from_str(&raw)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        settings.merge(&overrides);
    }

    validate_settings(&settings)?;
    Ok(settings)
}
