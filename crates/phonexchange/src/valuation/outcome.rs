use serde::{Deserialize, Serialize};

use super::domain::QuestionId;

/// A deduction applied to the base price, in question order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    pub question_id: QuestionId,
    #[serde(rename = "question")]
    pub question_text: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceResult {
    pub base_price: u64,
    pub deductions: Vec<Deduction>,
    pub final_price: u64,
}

impl PriceResult {
    pub fn total_percentage(&self) -> f64 {
        self.deductions.iter().map(|deduction| deduction.percentage).sum()
    }

    /// Amount taken off the base price, after rounding.
    pub fn total_deducted(&self) -> u64 {
        self.base_price.saturating_sub(self.final_price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockResult {
    pub block_reason: String,
}

/// Engine output: an offer or a veto, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ValuationView", try_from = "ValuationView")]
pub enum Valuation {
    Price(PriceResult),
    Blocked(BlockResult),
}

impl Valuation {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Valuation::Blocked(_))
    }

    pub fn final_price(&self) -> Option<u64> {
        match self {
            Valuation::Price(result) => Some(result.final_price),
            Valuation::Blocked(_) => None,
        }
    }

    pub fn block_reason(&self) -> Option<&str> {
        match self {
            Valuation::Price(_) => None,
            Valuation::Blocked(result) => Some(&result.block_reason),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Valuation::Price(result) if result.deductions.is_empty() => {
                format!("offer of ₹{} with no deductions", result.final_price)
            }
            Valuation::Price(result) => format!(
                "offer of ₹{} after {} deduction(s) totalling {}%",
                result.final_price,
                result.deductions.len(),
                result.total_percentage()
            ),
            Valuation::Blocked(result) => format!("no offer: {}", result.block_reason),
        }
    }
}

/// Wire representation of a [`Valuation`].
///
/// Offers carry `base_price`, `deductions` and `final_price` with
/// `is_blocked: false`; vetoes carry only `is_blocked: true` and
/// `block_reason`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductions: Option<Vec<Deduction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<u64>,
    pub is_blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl From<Valuation> for ValuationView {
    fn from(value: Valuation) -> Self {
        match value {
            Valuation::Price(result) => ValuationView {
                base_price: Some(result.base_price),
                deductions: Some(result.deductions),
                final_price: Some(result.final_price),
                is_blocked: false,
                block_reason: None,
            },
            Valuation::Blocked(result) => ValuationView {
                base_price: None,
                deductions: None,
                final_price: None,
                is_blocked: true,
                block_reason: Some(result.block_reason),
            },
        }
    }
}

impl TryFrom<ValuationView> for Valuation {
    type Error = String;

    fn try_from(view: ValuationView) -> Result<Self, Self::Error> {
        if view.is_blocked {
            let block_reason = view
                .block_reason
                .ok_or_else(|| "blocked valuation is missing block_reason".to_string())?;
            return Ok(Valuation::Blocked(BlockResult { block_reason }));
        }

        match (view.base_price, view.final_price) {
            (Some(base_price), Some(final_price)) => Ok(Valuation::Price(PriceResult {
                base_price,
                deductions: view.deductions.unwrap_or_default(),
                final_price,
            })),
            _ => Err("priced valuation requires base_price and final_price".to_string()),
        }
    }
}
