use super::common::*;
use crate::valuation::{evaluate, QuestionId, Trigger, Valuation, ValuationError};

#[test]
fn block_wins_regardless_of_other_answers() {
    let outcome = evaluate(
        &model(20_000),
        &answers(&[("powers_on", false), ("screen_cracked", true)]),
        &power_and_screen(),
    )
    .expect("complete answers");

    match outcome {
        Valuation::Blocked(result) => assert_eq!(result.block_reason, "Phone does not power on"),
        other => panic!("expected block, got {other:?}"),
    }
}

#[test]
fn cracked_screen_deducts_fifteen_percent_of_base() {
    let outcome = evaluate(
        &model(20_000),
        &answers(&[("powers_on", true), ("screen_cracked", true)]),
        &power_and_screen(),
    )
    .expect("complete answers");

    match outcome {
        Valuation::Price(result) => {
            assert_eq!(result.base_price, 20_000);
            assert_eq!(result.final_price, 17_000);
            assert_eq!(result.deductions.len(), 1);
            assert_eq!(result.deductions[0].question_id, QuestionId::from("screen_cracked"));
            assert_eq!(result.deductions[0].question_text, "Screen cracked?");
            assert_eq!(result.deductions[0].percentage, 15.0);
        }
        other => panic!("expected price, got {other:?}"),
    }
}

#[test]
fn deductions_are_additive_on_base_not_compounded() {
    let battery = vec![
        percentage("a", 1, 10.0, Trigger::OnYes),
        percentage("b", 2, 20.0, Trigger::OnYes),
    ];
    let outcome = evaluate(
        &model(10_000),
        &answers(&[("a", true), ("b", true)]),
        &battery,
    )
    .expect("complete answers");

    let final_price = outcome.final_price().expect("priced");
    assert_eq!(final_price, 7_000);
    assert_ne!(final_price, 7_200, "compounding would give 7200");
}

#[test]
fn first_block_in_question_order_wins() {
    let battery = vec![
        percentage("dent", 1, 10.0, Trigger::OnYes),
        block("imei", 2, "IMEI could not be validated", Trigger::OnNo),
        block("blacklist", 3, "Device is blacklisted", Trigger::OnYes),
    ];
    let outcome = evaluate(
        &model(30_000),
        &answers(&[("blacklist", true), ("dent", true), ("imei", false)]),
        &battery,
    )
    .expect("complete answers");

    assert_eq!(outcome.block_reason(), Some("IMEI could not be validated"));
}

#[test]
fn untriggered_blocks_and_no_effect_rules_leave_price_alone() {
    let battery = vec![
        block("blacklist", 1, "Device is blacklisted", Trigger::OnYes),
        question("colour", 2, crate::valuation::DeductionRule::NoEffect),
    ];
    let outcome = evaluate(
        &model(12_345),
        &answers(&[("blacklist", false), ("colour", true)]),
        &battery,
    )
    .expect("complete answers");

    match outcome {
        Valuation::Price(result) => {
            assert!(result.deductions.is_empty());
            assert_eq!(result.final_price, 12_345);
        }
        other => panic!("expected price, got {other:?}"),
    }
}

#[test]
fn deductions_over_one_hundred_percent_floor_at_zero() {
    let battery = vec![
        percentage("water", 1, 60.0, Trigger::OnYes),
        percentage("frame", 2, 55.0, Trigger::OnYes),
    ];
    let outcome = evaluate(
        &model(18_000),
        &answers(&[("water", true), ("frame", true)]),
        &battery,
    )
    .expect("complete answers");

    assert_eq!(outcome.final_price(), Some(0));
}

#[test]
fn rounding_happens_once_on_the_final_figure() {
    // Each 2.5% of 990 is 24.75; rounding per deduction would give 940, a
    // single rounding of 940.5 gives 941.
    let battery = vec![
        percentage("a", 1, 2.5, Trigger::OnYes),
        percentage("b", 2, 2.5, Trigger::OnYes),
    ];
    let outcome = evaluate(
        &model(990),
        &answers(&[("a", true), ("b", true)]),
        &battery,
    )
    .expect("complete answers");

    assert_eq!(outcome.final_price(), Some(941));
}

#[test]
fn rounding_is_half_away_from_zero() {
    let battery = vec![percentage("a", 1, 50.0, Trigger::OnYes)];
    let outcome = evaluate(&model(3), &answers(&[("a", true)]), &battery)
        .expect("complete answers");

    assert_eq!(outcome.final_price(), Some(2));
}

#[test]
fn missing_answers_are_reported_in_question_order() {
    let battery = vec![
        percentage("a", 1, 5.0, Trigger::OnYes),
        percentage("b", 2, 5.0, Trigger::OnYes),
        percentage("c", 3, 5.0, Trigger::OnYes),
    ];
    let error = evaluate(&model(1_000), &answers(&[("b", true)]), &battery)
        .expect_err("incomplete answers rejected");

    match error {
        ValuationError::IncompleteAnswerSet { missing } => {
            assert_eq!(missing, vec![QuestionId::from("a"), QuestionId::from("c")]);
        }
        other => panic!("expected incomplete answer set, got {other:?}"),
    }
}

#[test]
fn completeness_is_checked_before_blocks_fire() {
    let error = evaluate(
        &model(20_000),
        &answers(&[("powers_on", false)]),
        &power_and_screen(),
    )
    .expect_err("incomplete answers rejected even when a block would fire");

    assert!(matches!(error, ValuationError::IncompleteAnswerSet { .. }));
}

#[test]
fn answers_for_unknown_questions_are_ignored() {
    let outcome = evaluate(
        &model(20_000),
        &answers(&[("powers_on", true), ("screen_cracked", false), ("legacy", true)]),
        &power_and_screen(),
    )
    .expect("extra answers tolerated");

    assert_eq!(outcome.final_price(), Some(20_000));
}

#[test]
fn wire_format_matches_price_and_block_shapes() {
    let priced = evaluate(
        &model(20_000),
        &answers(&[("powers_on", true), ("screen_cracked", true)]),
        &power_and_screen(),
    )
    .expect("priced");
    let json = serde_json::to_value(&priced).expect("serialize");
    assert_eq!(json["base_price"], 20_000);
    assert_eq!(json["final_price"], 17_000);
    assert_eq!(json["is_blocked"], false);
    assert_eq!(json["deductions"][0]["question"], "Screen cracked?");
    assert_eq!(json["deductions"][0]["percentage"], 15.0);
    assert!(json.get("block_reason").is_none());

    let blocked = evaluate(
        &model(20_000),
        &answers(&[("powers_on", false), ("screen_cracked", false)]),
        &power_and_screen(),
    )
    .expect("blocked");
    let json = serde_json::to_value(&blocked).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({ "is_blocked": true, "block_reason": "Phone does not power on" })
    );

    let parsed: Valuation = serde_json::from_value(json).expect("deserialize");
    assert_eq!(parsed, blocked);
}

#[test]
fn summary_describes_offer_or_veto() {
    let priced = evaluate(
        &model(20_000),
        &answers(&[("powers_on", true), ("screen_cracked", true)]),
        &power_and_screen(),
    )
    .expect("priced");
    assert_eq!(
        priced.summary(),
        "offer of ₹17000 after 1 deduction(s) totalling 15%"
    );

    let blocked = evaluate(
        &model(20_000),
        &answers(&[("powers_on", false), ("screen_cracked", true)]),
        &power_and_screen(),
    )
    .expect("blocked");
    assert_eq!(blocked.summary(), "no offer: Phone does not power on");
}
