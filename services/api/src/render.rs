use std::fmt::Write as _;

use phonexchange::catalog::PhoneModel;
use phonexchange::valuation::Valuation;
use phonexchange::wizard::Progress;

/// Indian digit grouping: 1234567 -> "12,34,567".
pub(crate) fn rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::new();
    for (index, ch) in head.chars().enumerate() {
        if index > 0 && (head.len() - index) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹{grouped},{tail}")
}

pub(crate) fn progress_line(progress: Progress) -> String {
    format!(
        "[{}/{}] {:.0}% complete",
        progress.current,
        progress.total,
        progress.percent()
    )
}

/// Multi-line result screen for a finished valuation.
pub(crate) fn valuation_report(model: &PhoneModel, valuation: &Valuation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Phone: {}", model.name);

    match valuation {
        Valuation::Blocked(result) => {
            let _ = writeln!(out, "We cannot make an offer for this phone.");
            let _ = writeln!(out, "Reason: {}", result.block_reason);
        }
        Valuation::Price(result) => {
            let _ = writeln!(out, "Base price: {}", rupees(result.base_price));
            if result.deductions.is_empty() {
                let _ = writeln!(out, "Deductions: none");
            } else {
                let _ = writeln!(out, "Deductions:");
                for deduction in &result.deductions {
                    let _ = writeln!(
                        out,
                        "- {} (-{}%)",
                        deduction.question_text, deduction.percentage
                    );
                }
                let _ = writeln!(out, "Total deducted: {}", rupees(result.total_deducted()));
            }
            let _ = writeln!(out, "Final offer: {}", rupees(result.final_price));
        }
    }

    out
}
