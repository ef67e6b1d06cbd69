use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier wrapper for condition questions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One entry of the condition battery shared by every model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub category: String,
    pub order: u32,
    pub rule: DeductionRule,
}

/// Which answer activates a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    OnYes,
    OnNo,
}

impl Trigger {
    /// Maps the catalog's `yes_deducts` flag onto a polarity.
    pub const fn from_yes_deducts(yes_deducts: bool) -> Self {
        if yes_deducts {
            Self::OnYes
        } else {
            Self::OnNo
        }
    }

    pub const fn fires_on(self, answer: bool) -> bool {
        match self {
            Self::OnYes => answer,
            Self::OnNo => !answer,
        }
    }
}

/// Price effect attached to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeductionRule {
    /// Deduct `percent`% of the base price.
    Percentage { percent: f64, trigger: Trigger },
    /// Veto the whole offer.
    Block { reason: String, trigger: Trigger },
    NoEffect,
}

impl DeductionRule {
    pub fn trigger(&self) -> Option<Trigger> {
        match self {
            DeductionRule::Percentage { trigger, .. } | DeductionRule::Block { trigger, .. } => {
                Some(*trigger)
            }
            DeductionRule::NoEffect => None,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, DeductionRule::Block { .. })
    }
}

/// Answers keyed by question id, kept in the order they were first recorded.
///
/// Recording an answer for a question that already has one overwrites it in
/// place, so the wizard can revisit a question without reordering the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<(QuestionId, bool)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_id: QuestionId, answer: bool) {
        match self.entries.iter_mut().find(|(id, _)| *id == question_id) {
            Some(entry) => entry.1 = answer,
            None => self.entries.push((question_id, answer)),
        }
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<bool> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, answer)| *answer)
    }

    pub fn contains(&self, question_id: &QuestionId) -> bool {
        self.get(question_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, bool)> {
        self.entries.iter().map(|(id, answer)| (id, *answer))
    }
}

impl FromIterator<(QuestionId, bool)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, bool)>>(iter: I) -> Self {
        let mut answers = AnswerSet::new();
        for (id, answer) in iter {
            answers.record(id, answer);
        }
        answers
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, answer) in &self.entries {
            map.serialize_entry(id, answer)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<QuestionId, bool>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
