use std::sync::Arc;

use tracing::{info, warn};

use super::domain::AnswerSet;
use super::engine;
use super::outcome::Valuation;
use super::ValuationError;
use crate::catalog::{CatalogProvider, ModelId};

/// Resolves a model through the catalog and runs the engine against the
/// current battery.
pub struct ValuationService<C: ?Sized> {
    catalog: Arc<C>,
}

impl<C> ValuationService<C>
where
    C: CatalogProvider + ?Sized,
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub fn compute(
        &self,
        model_id: &ModelId,
        answers: &AnswerSet,
    ) -> Result<Valuation, ValuationError> {
        let model = self
            .catalog
            .find_model(model_id)?
            .ok_or_else(|| ValuationError::UnknownModel(model_id.clone()))?;
        let battery = self.catalog.list_questions()?;

        let valuation = engine::evaluate(&model, answers, &battery).map_err(|err| {
            warn!(model_id = %model_id, error = %err, "valuation rejected");
            err
        })?;

        match &valuation {
            Valuation::Price(result) => info!(
                model_id = %model_id,
                base_price = result.base_price,
                final_price = result.final_price,
                deductions = result.deductions.len(),
                "valuation priced"
            ),
            Valuation::Blocked(result) => info!(
                model_id = %model_id,
                block_reason = %result.block_reason,
                "valuation blocked"
            ),
        }

        Ok(valuation)
    }
}

impl<C: ?Sized> Clone for ValuationService<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
        }
    }
}
