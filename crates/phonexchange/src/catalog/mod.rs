//! Reference data for the trade-in flow: brands, models, and the question
//! battery.

mod domain;
pub mod import;
mod standard;

use std::collections::HashSet;

pub use domain::{Brand, BrandId, ModelId, PhoneModel};
pub use import::{CatalogImportError, CatalogImporter};

use crate::valuation::{DeductionRule, Question};

/// Data source the wizard and the valuation service read from.
///
/// `list_questions` returns the battery in presentation order; every model
/// shares it.
pub trait CatalogProvider: Send + Sync {
    fn list_brands(&self) -> Result<Vec<Brand>, CatalogError>;
    fn list_models(&self, brand_id: &BrandId) -> Result<Vec<PhoneModel>, CatalogError>;
    fn list_questions(&self) -> Result<Vec<Question>, CatalogError>;
    fn find_model(&self, model_id: &ModelId) -> Result<Option<PhoneModel>, CatalogError>;
}

/// Catalog could not be reached or returned unusable data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("malformed catalog data: {0}")]
    Malformed(String),
}

/// Validated, in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    brands: Vec<Brand>,
    models: Vec<PhoneModel>,
    questions: Vec<Question>,
}

impl Catalog {
    pub fn new(
        brands: Vec<Brand>,
        models: Vec<PhoneModel>,
        mut questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        validate_brands(&brands)?;
        validate_models(&brands, &models)?;
        validate_questions(&questions)?;
        questions.sort_by_key(|question| question.order);

        Ok(Self {
            brands,
            models,
            questions,
        })
    }

    /// The seeded PhoneXchange catalog.
    pub fn standard() -> Self {
        Self {
            brands: standard::brands(),
            models: standard::models(),
            questions: standard::questions(),
        }
    }

    pub fn with_models(self, models: Vec<PhoneModel>) -> Result<Self, CatalogError> {
        Self::new(self.brands, models, self.questions)
    }

    pub fn with_questions(self, questions: Vec<Question>) -> Result<Self, CatalogError> {
        Self::new(self.brands, self.models, questions)
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn models(&self) -> &[PhoneModel] {
        &self.models
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl CatalogProvider for Catalog {
    fn list_brands(&self) -> Result<Vec<Brand>, CatalogError> {
        Ok(self.brands.clone())
    }

    fn list_models(&self, brand_id: &BrandId) -> Result<Vec<PhoneModel>, CatalogError> {
        Ok(self
            .models
            .iter()
            .filter(|model| model.brand_id == *brand_id)
            .cloned()
            .collect())
    }

    fn list_questions(&self) -> Result<Vec<Question>, CatalogError> {
        Ok(self.questions.clone())
    }

    fn find_model(&self, model_id: &ModelId) -> Result<Option<PhoneModel>, CatalogError> {
        Ok(self
            .models
            .iter()
            .find(|model| model.id == *model_id)
            .cloned())
    }
}

fn validate_brands(brands: &[Brand]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for brand in brands {
        if !seen.insert(&brand.id) {
            return Err(CatalogError::Malformed(format!(
                "duplicate brand id {}",
                brand.id
            )));
        }
    }
    Ok(())
}

fn validate_models(brands: &[Brand], models: &[PhoneModel]) -> Result<(), CatalogError> {
    let known: HashSet<&BrandId> = brands.iter().map(|brand| &brand.id).collect();
    let mut seen = HashSet::new();
    for model in models {
        if !seen.insert(&model.id) {
            return Err(CatalogError::Malformed(format!(
                "duplicate model id {}",
                model.id
            )));
        }
        if !known.contains(&model.brand_id) {
            return Err(CatalogError::Malformed(format!(
                "model {} references unknown brand {}",
                model.id, model.brand_id
            )));
        }
    }
    Ok(())
}

fn validate_questions(questions: &[Question]) -> Result<(), CatalogError> {
    if questions.is_empty() {
        return Err(CatalogError::Malformed(
            "question battery is empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for question in questions {
        if !seen.insert(&question.id) {
            return Err(CatalogError::Malformed(format!(
                "duplicate question id {}",
                question.id
            )));
        }

        match &question.rule {
            DeductionRule::Percentage { percent, .. }
                if !percent.is_finite() || !(0.0..=100.0).contains(percent) =>
            {
                return Err(CatalogError::Malformed(format!(
                    "question {} deducts {percent}%, expected 0..=100",
                    question.id
                )));
            }
            DeductionRule::Block { reason, .. } if reason.trim().is_empty() => {
                return Err(CatalogError::Malformed(format!(
                    "blocking question {} has no reason",
                    question.id
                )));
            }
            _ => {}
        }
    }
    Ok(())
}
