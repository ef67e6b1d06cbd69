use tracing::debug;

use super::step::{BackOutcome, Progress, WizardPosition, WizardStep};
use super::WizardError;
use crate::catalog::{Brand, BrandId, CatalogError, CatalogProvider, ModelId, PhoneModel};
use crate::valuation::{evaluate, AnswerSet, Question, Valuation};

/// One user's pass through the trade-in flow.
///
/// Opened with [`WizardSession::start`] and discarded with
/// [`WizardSession::finish`]; nothing outlives the session.
#[derive(Debug)]
pub struct WizardSession {
    brands: Vec<Brand>,
    questions: Vec<Question>,
    step: WizardStep,
    brand: Option<Brand>,
    models: Vec<PhoneModel>,
    model: Option<PhoneModel>,
    answers: AnswerSet,
    outcome: Option<Valuation>,
}

impl WizardSession {
    /// Loads brands and the question battery; no session exists if either
    /// load fails or the battery is empty.
    pub fn start<C>(catalog: &C) -> Result<Self, WizardError>
    where
        C: CatalogProvider + ?Sized,
    {
        let brands = catalog.list_brands()?;
        let questions = catalog.list_questions()?;
        if questions.is_empty() {
            return Err(CatalogError::Malformed("question battery is empty".to_string()).into());
        }

        Ok(Self {
            brands,
            questions,
            step: WizardStep::SelectingBrand,
            brand: None,
            models: Vec::new(),
            model: None,
            answers: AnswerSet::new(),
            outcome: None,
        })
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn position(&self) -> WizardPosition {
        let question_index = match self.step {
            WizardStep::Answering(index) => index,
            _ => 0,
        };
        WizardPosition {
            step: self.step,
            question_index,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::for_step(self.step, self.questions.len())
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

    pub fn selected_brand(&self) -> Option<&Brand> {
        self.brand.as_ref()
    }

    pub fn selected_model(&self) -> Option<&PhoneModel> {
        self.model.as_ref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&Valuation> {
        self.outcome.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.step {
            WizardStep::Answering(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// Brand pick: fetches that brand's models before advancing.
    pub fn pick_brand<C>(
        &mut self,
        catalog: &C,
        brand_id: &BrandId,
    ) -> Result<WizardStep, WizardError>
    where
        C: CatalogProvider + ?Sized,
    {
        self.expect_step(WizardStep::SelectingBrand, "pick a brand")?;

        let brand = self
            .brands
            .iter()
            .find(|brand| brand.id == *brand_id)
            .cloned()
            .ok_or_else(|| WizardError::UnknownBrand(brand_id.clone()))?;
        let models = catalog.list_models(brand_id)?;

        debug!(brand_id = %brand_id, models = models.len(), "brand selected");
        self.brand = Some(brand);
        self.models = models;
        self.step = WizardStep::SelectingModel;
        Ok(self.step)
    }

    /// Model pick: starts the battery with an empty answer set.
    pub fn pick_model(&mut self, model_id: &ModelId) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::SelectingModel, "pick a model")?;

        let model = self
            .models
            .iter()
            .find(|model| model.id == *model_id)
            .cloned()
            .ok_or_else(|| WizardError::UnknownModel(model_id.clone()))?;

        debug!(model_id = %model_id, "model selected");
        self.model = Some(model);
        self.answers.clear();
        self.outcome = None;
        self.step = WizardStep::Answering(0);
        Ok(self.step)
    }

    /// Records the answer for the current question. The last answer runs the
    /// valuation over the full set.
    pub fn answer(&mut self, answer: bool) -> Result<WizardStep, WizardError> {
        let WizardStep::Answering(index) = self.step else {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "answer a question",
            });
        };
        let Some(question) = self.questions.get(index) else {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "answer a question",
            });
        };
        let question_id = question.id.clone();

        if index + 1 < self.questions.len() {
            self.answers.record(question_id, answer);
            self.step = WizardStep::Answering(index + 1);
            return Ok(self.step);
        }

        let Some(model) = self.model.as_ref() else {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "answer a question",
            });
        };

        let mut answers = self.answers.clone();
        answers.record(question_id, answer);
        let outcome = evaluate(model, &answers, &self.questions)?;

        debug!(model_id = %model.id, blocked = outcome.is_blocked(), "battery complete");
        self.answers = answers;
        self.outcome = Some(outcome);
        self.step = WizardStep::Done;
        Ok(self.step)
    }

    /// Steps back one screen.
    ///
    /// Inside the battery answers are kept, so re-answering overwrites them.
    /// Leaving the battery from the first question discards every answer;
    /// re-entering from the same model starts again at question one.
    pub fn back(&mut self) -> BackOutcome {
        let next = match self.step {
            WizardStep::SelectingBrand => return BackOutcome::ExitFlow,
            WizardStep::SelectingModel => {
                self.brand = None;
                self.model = None;
                self.models.clear();
                WizardStep::SelectingBrand
            }
            WizardStep::Answering(0) => {
                self.answers.clear();
                self.model = None;
                WizardStep::SelectingModel
            }
            WizardStep::Answering(index) => WizardStep::Answering(index - 1),
            WizardStep::Done => {
                self.outcome = None;
                WizardStep::Answering(self.questions.len().saturating_sub(1))
            }
        };

        debug!(from = self.step.label(), to = next.label(), "wizard back");
        self.step = next;
        BackOutcome::Moved(next)
    }

    /// Ends the session, handing back the valuation if one was reached.
    pub fn finish(self) -> Option<Valuation> {
        self.outcome
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }
}
