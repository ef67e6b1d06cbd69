//! Condition questions, deduction rules, and the valuation fold.

pub mod domain;
mod engine;
mod outcome;
pub mod reveal;
pub mod rules;
mod service;

#[cfg(test)]
mod tests;

pub use domain::{AnswerSet, DeductionRule, Question, QuestionId, Trigger};
pub use engine::evaluate;
pub use outcome::{BlockResult, Deduction, PriceResult, Valuation, ValuationView};
pub use reveal::PriceReveal;
pub use rules::{triggers, RuleEffect};
pub use service::ValuationService;

use crate::catalog::{CatalogError, ModelId};

/// Error raised while computing a valuation.
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    #[error("answer set is incomplete: {} unanswered question(s)", .missing.len())]
    IncompleteAnswerSet { missing: Vec<QuestionId> },
    #[error("phone model {0} not found")]
    UnknownModel(ModelId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
