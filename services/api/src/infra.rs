use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

use clap::Args;
use metrics_exporter_prometheus::PrometheusHandle;
use phonexchange::catalog::{Catalog, CatalogImporter};
use phonexchange::config::CatalogConfig;
use phonexchange::error::AppError;
use phonexchange::leads::{LeadId, LeadRecord, LeadRepository, RepositoryError};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog overrides accepted by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CatalogArgs {
    /// CSV export replacing the standard question battery
    #[arg(long, global = true)]
    pub(crate) questions_csv: Option<PathBuf>,
    /// CSV export replacing the standard phone models
    #[arg(long, global = true)]
    pub(crate) models_csv: Option<PathBuf>,
}

impl CatalogArgs {
    /// Command-line paths win over the environment.
    pub(crate) fn merged_with(self, config: &CatalogConfig) -> CatalogConfig {
        CatalogConfig {
            questions_csv: self.questions_csv.or_else(|| config.questions_csv.clone()),
            models_csv: self.models_csv.or_else(|| config.models_csv.clone()),
        }
    }
}

pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<Catalog, AppError> {
    let catalog = CatalogImporter::catalog_from_paths(
        config.questions_csv.as_deref(),
        config.models_csv.as_deref(),
    )?;

    info!(
        brands = catalog.brands().len(),
        models = catalog.models().len(),
        questions = catalog.questions().len(),
        custom_questions = config.questions_csv.is_some(),
        custom_models = config.models_csv.is_some(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Process-local lead store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<Vec<LeadRecord>>>,
}

impl InMemoryLeadRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<LeadRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lead store mutex poisoned".to_string()))
    }
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| record.id == *id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}
