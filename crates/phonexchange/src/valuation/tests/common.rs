use crate::catalog::{BrandId, ModelId, PhoneModel};
use crate::valuation::{AnswerSet, DeductionRule, Question, QuestionId, Trigger};

pub(super) fn model(base_price: u64) -> PhoneModel {
    PhoneModel {
        id: ModelId::from("sam-s23"),
        brand_id: BrandId::from("samsung"),
        name: "Galaxy S23".to_string(),
        base_price,
        image: String::new(),
    }
}

pub(super) fn question(id: &str, order: u32, rule: DeductionRule) -> Question {
    Question {
        id: QuestionId::from(id),
        text: format!("{id}?"),
        category: "Body".to_string(),
        order,
        rule,
    }
}

pub(super) fn percentage(id: &str, order: u32, percent: f64, trigger: Trigger) -> Question {
    question(id, order, DeductionRule::Percentage { percent, trigger })
}

pub(super) fn block(id: &str, order: u32, reason: &str, trigger: Trigger) -> Question {
    question(
        id,
        order,
        DeductionRule::Block {
            reason: reason.to_string(),
            trigger,
        },
    )
}

/// Power-on block followed by a 15% cracked-screen deduction.
pub(super) fn power_and_screen() -> Vec<Question> {
    vec![
        Question {
            id: QuestionId::from("powers_on"),
            text: "Does it power on?".to_string(),
            category: "Basic Functionality".to_string(),
            order: 1,
            rule: DeductionRule::Block {
                reason: "Phone does not power on".to_string(),
                trigger: Trigger::OnNo,
            },
        },
        Question {
            id: QuestionId::from("screen_cracked"),
            text: "Screen cracked?".to_string(),
            category: "Display".to_string(),
            order: 2,
            rule: DeductionRule::Percentage {
                percent: 15.0,
                trigger: Trigger::OnYes,
            },
        },
    ]
}

pub(super) fn answers(pairs: &[(&str, bool)]) -> AnswerSet {
    pairs
        .iter()
        .map(|(id, answer)| (QuestionId::from(*id), *answer))
        .collect()
}
