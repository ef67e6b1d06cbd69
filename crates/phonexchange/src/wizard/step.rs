use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "question_index", rename_all = "snake_case")]
pub enum WizardStep {
    SelectingBrand,
    SelectingModel,
    Answering(usize),
    Done,
}

impl WizardStep {
    pub const fn label(self) -> &'static str {
        match self {
            WizardStep::SelectingBrand => "selecting a brand",
            WizardStep::SelectingModel => "selecting a model",
            WizardStep::Answering(_) => "answering condition questions",
            WizardStep::Done => "showing the result",
        }
    }
}

/// Result of a back action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Moved(WizardStep),
    /// Back from brand selection leaves the flow; the caller navigates away.
    ExitFlow,
}

/// Snapshot of where the user is, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardPosition {
    pub step: WizardStep,
    pub question_index: usize,
}

/// `current / total` where total counts the brand step, the model step, and
/// one step per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub(crate) fn for_step(step: WizardStep, question_count: usize) -> Self {
        let total = 2 + question_count;
        let current = match step {
            WizardStep::SelectingBrand => 1,
            WizardStep::SelectingModel => 2,
            WizardStep::Answering(index) => 2 + index + 1,
            WizardStep::Done => total,
        };
        Self { current, total }
    }

    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 / self.total as f64
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}
