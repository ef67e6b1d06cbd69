use super::domain::DeductionRule;

/// What a single answer does to the offer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleEffect<'a> {
    Deduct(f64),
    Block(&'a str),
    None,
}

/// Whether `answer` activates `rule`. `NoEffect` rules never trigger.
pub fn triggers(rule: &DeductionRule, answer: bool) -> bool {
    rule.trigger()
        .map(|trigger| trigger.fires_on(answer))
        .unwrap_or(false)
}

pub fn effect(rule: &DeductionRule, answer: bool) -> RuleEffect<'_> {
    if !triggers(rule, answer) {
        return RuleEffect::None;
    }

    match rule {
        DeductionRule::Percentage { percent, .. } => RuleEffect::Deduct(*percent),
        DeductionRule::Block { reason, .. } => RuleEffect::Block(reason),
        DeductionRule::NoEffect => RuleEffect::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::domain::Trigger;

    #[test]
    fn percentage_rule_respects_configured_polarity() {
        let on_no = DeductionRule::Percentage {
            percent: 15.0,
            trigger: Trigger::OnNo,
        };
        assert!(triggers(&on_no, false));
        assert!(!triggers(&on_no, true));
        assert_eq!(effect(&on_no, false), RuleEffect::Deduct(15.0));
        assert_eq!(effect(&on_no, true), RuleEffect::None);

        let on_yes = DeductionRule::Percentage {
            percent: 20.0,
            trigger: Trigger::OnYes,
        };
        assert!(triggers(&on_yes, true));
        assert_eq!(effect(&on_yes, true), RuleEffect::Deduct(20.0));
    }

    #[test]
    fn block_rule_carries_reason() {
        let rule = DeductionRule::Block {
            reason: "Device is blacklisted".to_string(),
            trigger: Trigger::OnYes,
        };
        assert_eq!(effect(&rule, true), RuleEffect::Block("Device is blacklisted"));
        assert_eq!(effect(&rule, false), RuleEffect::None);
    }

    #[test]
    fn no_effect_rule_never_triggers() {
        assert!(!triggers(&DeductionRule::NoEffect, true));
        assert!(!triggers(&DeductionRule::NoEffect, false));
        assert_eq!(effect(&DeductionRule::NoEffect, true), RuleEffect::None);
    }
}
