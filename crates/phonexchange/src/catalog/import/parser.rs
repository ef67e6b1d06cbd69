use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::catalog::domain::{BrandId, ModelId, PhoneModel};
use crate::valuation::{DeductionRule, Question, QuestionId, Trigger};

/// Question export columns, one row per question in presentation order.
#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: String,
    text: String,
    category: String,
    #[serde(default, deserialize_with = "blank_as_zero")]
    deduction_percentage: f64,
    #[serde(deserialize_with = "flexible_bool")]
    is_blocking: bool,
    #[serde(deserialize_with = "flexible_bool")]
    yes_deducts: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    block_reason: Option<String>,
}

impl QuestionRow {
    fn into_question(self, order: u32) -> Question {
        let trigger = Trigger::from_yes_deducts(self.yes_deducts);
        let rule = if self.is_blocking {
            DeductionRule::Block {
                reason: self.block_reason.unwrap_or_else(|| self.text.clone()),
                trigger,
            }
        } else if self.deduction_percentage != 0.0 {
            DeductionRule::Percentage {
                percent: self.deduction_percentage,
                trigger,
            }
        } else {
            DeductionRule::NoEffect
        };

        Question {
            id: QuestionId(self.id),
            text: self.text,
            category: self.category,
            order,
            rule,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelRow {
    id: String,
    brand_id: String,
    name: String,
    base_price: u64,
    #[serde(default)]
    image: String,
}

pub(crate) fn parse_questions<R: Read>(reader: R) -> Result<Vec<Question>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut questions = Vec::new();

    for (index, record) in csv_reader.deserialize::<QuestionRow>().enumerate() {
        let row = record?;
        questions.push(row.into_question(index as u32 + 1));
    }

    Ok(questions)
}

pub(crate) fn parse_models<R: Read>(reader: R) -> Result<Vec<PhoneModel>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut models = Vec::new();

    for record in csv_reader.deserialize::<ModelRow>() {
        let row = record?;
        models.push(PhoneModel {
            id: ModelId(row.id),
            brand_id: BrandId(row.brand_id),
            name: row.name,
            base_price: row.base_price,
            image: row.image,
        });
    }

    Ok(models)
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_bool(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("expected true/false or yes/no, got '{raw}'"))
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn blank_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(value) => value.parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("expected a percentage, got '{value}'"))
        }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn parse_bool_for_tests(value: &str) -> Option<bool> {
    parse_bool(value)
}
