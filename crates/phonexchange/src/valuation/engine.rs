use super::domain::{AnswerSet, Question, QuestionId};
use super::outcome::{BlockResult, Deduction, PriceResult, Valuation};
use super::rules::{self, RuleEffect};
use super::ValuationError;
use crate::catalog::PhoneModel;

/// Folds a complete answer set over the battery into an offer or a veto.
///
/// `battery` is walked in slice order, which must be question order. The
/// first triggered block rule wins. Percentage deductions are additive
/// fractions of the base price and the final figure is rounded once.
pub fn evaluate(
    model: &PhoneModel,
    answers: &AnswerSet,
    battery: &[Question],
) -> Result<Valuation, ValuationError> {
    let missing: Vec<QuestionId> = battery
        .iter()
        .filter(|question| !answers.contains(&question.id))
        .map(|question| question.id.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ValuationError::IncompleteAnswerSet { missing });
    }

    let mut deductions = Vec::new();
    for question in battery {
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };

        match rules::effect(&question.rule, answer) {
            RuleEffect::Block(reason) => {
                return Ok(Valuation::Blocked(BlockResult {
                    block_reason: reason.to_string(),
                }));
            }
            RuleEffect::Deduct(percentage) => deductions.push(Deduction {
                question_id: question.id.clone(),
                question_text: question.text.clone(),
                percentage,
            }),
            RuleEffect::None => {}
        }
    }

    let final_price = discounted_price(model.base_price, &deductions);
    Ok(Valuation::Price(PriceResult {
        base_price: model.base_price,
        deductions,
        final_price,
    }))
}

/// `round(max(0, base * (100 - Σp) / 100))`, half away from zero.
pub(crate) fn discounted_price(base_price: u64, deductions: &[Deduction]) -> u64 {
    let total_percentage: f64 = deductions
        .iter()
        .map(|deduction| deduction.percentage)
        .sum();
    let remaining = (100.0 - total_percentage).max(0.0);
    let price = (base_price as f64 * remaining / 100.0).round();

    if price <= 0.0 {
        0
    } else {
        price as u64
    }
}
