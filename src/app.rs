use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::compose::{ChatComposer, Composer, ListComposer};
use crate::config::Config;
use crate::core::store::{Catalog, RecordStore};
use crate::error::{Result, SiftError};
use crate::fetch::{HarvestReport, HttpListingSource, harvest};
use crate::import::ListingParser;

/// Composer selected for answering, and whether it is the offline list
/// standing in for the chat model.
pub struct ComposerChoice {
    pub composer: Box<dyn Composer>,
    pub fallback: bool,
}

impl ComposerChoice {
    fn fallback() -> Self {
        Self {
            composer: Box::new(ListComposer),
            fallback: true,
        }
    }
}

pub struct AppContext {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub data_path: PathBuf,
    pub catalog: Catalog,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| default_config_path(&root));
        let config = Config::load(cli.config.as_deref(), &root)?;
        Self::new(
            root,
            config_path,
            config,
            cli.robot,
            cli.output_format(),
            cli.verbose,
        )
    }

    /// Context over an explicit root, loading whatever table already exists.
    pub fn new(
        root: PathBuf,
        config_path: PathBuf,
        config: Config,
        robot_mode: bool,
        output_format: OutputFormat,
        verbosity: u8,
    ) -> Result<Self> {
        let data_path = config.data_path(&root);
        let store = RecordStore::load_or_empty(&data_path)?;
        info!(path = %data_path.display(), records = store.len(), "record table loaded");

        Ok(Self {
            root,
            config_path,
            config,
            data_path,
            catalog: Catalog::new(store),
            robot_mode,
            output_format,
            verbosity,
        })
    }

    /// Current store snapshot.
    #[must_use]
    pub fn store(&self) -> Arc<RecordStore> {
        self.catalog.snapshot()
    }

    /// Harvest every configured category, persist the result and swap it in.
    /// The existing table is left alone when nothing was harvested.
    pub fn refresh(&self) -> Result<HarvestReport> {
        let source = HttpListingSource::new(&self.config.fetch)?;
        let report = harvest(
            &source,
            &self.config.fetch.sources,
            &ListingParser::new(),
            Duration::from_millis(self.config.fetch.delay_ms),
        );

        if report.records.is_empty() {
            warn!(
                failures = report.failures.len(),
                "harvest produced no records; keeping current table"
            );
            return Ok(report);
        }

        let store = report.clone().into_store();
        store.save(&self.data_path)?;
        let previous = self.catalog.replace(store);
        info!(
            previous = previous.len(),
            current = self.catalog.snapshot().len(),
            path = %self.data_path.display(),
            "record table refreshed"
        );
        Ok(report)
    }

    /// Chat composer when enabled and keyed, otherwise the offline list.
    #[must_use]
    pub fn composer(&self) -> ComposerChoice {
        if !self.config.composer.enabled {
            warn!("chat composer disabled; using plain list");
            return ComposerChoice::fallback();
        }
        match ChatComposer::from_config(&self.config.composer) {
            Ok(composer) => ComposerChoice {
                composer: Box::new(composer),
                fallback: false,
            },
            Err(err) => {
                warn!(error = %err, "chat composer unavailable; using plain list");
                ComposerChoice::fallback()
            }
        }
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("JOBSIFT_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".jobsift") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| SiftError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("jobsift"))
    }
}

fn default_config_path(root: &Path) -> PathBuf {
    if root.ends_with(".jobsift") {
        root.join("config.toml")
    } else {
        dirs::config_dir()
            .unwrap_or_else(|| root.to_path_buf())
            .join("jobsift/config.toml")
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
