//! Step-by-step trade-in flow: brand, model, then one question at a time.
//!
//! A [`WizardSession`] is owned by a single user and driven by one input at a
//! time. Every transition either applies fully or returns an error and leaves
//! the session untouched, so the caller can retry.

mod session;
mod step;

#[cfg(test)]
mod tests;

pub use session::WizardSession;
pub use step::{BackOutcome, Progress, WizardPosition, WizardStep};

use crate::catalog::{BrandId, CatalogError, ModelId};
use crate::valuation::ValuationError;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("failed to load catalog data: {0}")]
    DataLoad(#[from] CatalogError),
    #[error("cannot {action} while {}", .step.label())]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },
    #[error("brand {0} is not available")]
    UnknownBrand(BrandId),
    #[error("model {0} is not available for the selected brand")]
    UnknownModel(ModelId),
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}
