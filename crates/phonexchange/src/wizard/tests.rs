use super::*;
use crate::catalog::{Brand, Catalog, CatalogProvider, PhoneModel};
use crate::valuation::{DeductionRule, Question, QuestionId, Trigger, Valuation};

fn small_catalog() -> Catalog {
    Catalog::new(
        vec![Brand {
            id: BrandId::from("samsung"),
            name: "Samsung".to_string(),
            logo: String::new(),
        }],
        vec![PhoneModel {
            id: ModelId::from("sam-s23"),
            brand_id: BrandId::from("samsung"),
            name: "Galaxy S23".to_string(),
            base_price: 20_000,
            image: String::new(),
        }],
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
            Question {
                id: QuestionId::from("has_box"),
                text: "Do you have the box?".to_string(),
                category: "Accessories".to_string(),
                order: 3,
                rule: DeductionRule::Percentage {
                    percent: 5.0,
                    trigger: Trigger::OnNo,
                },
            },
        ],
    )
    .expect("valid catalog")
}

fn answering_session(catalog: &Catalog) -> WizardSession {
    let mut session = WizardSession::start(catalog).expect("session starts");
    session
        .pick_brand(catalog, &BrandId::from("samsung"))
        .expect("brand picked");
    session
        .pick_model(&ModelId::from("sam-s23"))
        .expect("model picked");
    session
}

/// Catalog whose model listing is down, to exercise load failures.
struct ModelsOffline(Catalog);

impl CatalogProvider for ModelsOffline {
    fn list_brands(&self) -> Result<Vec<Brand>, CatalogError> {
        self.0.list_brands()
    }

    fn list_models(&self, _brand_id: &BrandId) -> Result<Vec<PhoneModel>, CatalogError> {
        Err(CatalogError::Unavailable("models service timed out".to_string()))
    }

    fn list_questions(&self) -> Result<Vec<Question>, CatalogError> {
        self.0.list_questions()
    }

    fn find_model(&self, model_id: &ModelId) -> Result<Option<PhoneModel>, CatalogError> {
        self.0.find_model(model_id)
    }
}

/// Provider that serves brands and models but no questions.
struct EmptyBattery(Catalog);

impl CatalogProvider for EmptyBattery {
    fn list_brands(&self) -> Result<Vec<Brand>, CatalogError> {
        self.0.list_brands()
    }

    fn list_models(&self, brand_id: &BrandId) -> Result<Vec<PhoneModel>, CatalogError> {
        self.0.list_models(brand_id)
    }

    fn list_questions(&self) -> Result<Vec<Question>, CatalogError> {
        Ok(Vec::new())
    }

    fn find_model(&self, model_id: &ModelId) -> Result<Option<PhoneModel>, CatalogError> {
        self.0.find_model(model_id)
    }
}

#[test]
fn empty_battery_prevents_a_session() {
    let error = WizardSession::start(&EmptyBattery(small_catalog())).expect_err("no questions");
    assert!(matches!(error, WizardError::DataLoad(CatalogError::Malformed(_))));
}

#[test]
fn walks_brand_model_and_battery_to_a_priced_result() {
    let catalog = small_catalog();
    let mut session = WizardSession::start(&catalog).expect("session starts");
    assert_eq!(session.step(), WizardStep::SelectingBrand);

    assert_eq!(
        session
            .pick_brand(&catalog, &BrandId::from("samsung"))
            .expect("brand"),
        WizardStep::SelectingModel
    );
    assert_eq!(session.models().len(), 1);
    assert_eq!(
        session.pick_model(&ModelId::from("sam-s23")).expect("model"),
        WizardStep::Answering(0)
    );
    assert_eq!(
        session.current_question().map(|q| q.text.as_str()),
        Some("Does it power on?")
    );

    assert_eq!(session.answer(true).expect("q1"), WizardStep::Answering(1));
    assert_eq!(session.answer(true).expect("q2"), WizardStep::Answering(2));
    assert!(session.outcome().is_none(), "no valuation before the last answer");
    assert_eq!(session.answer(true).expect("q3"), WizardStep::Done);

    match session.finish().expect("valuation reached") {
        Valuation::Price(result) => {
            assert_eq!(result.base_price, 20_000);
            assert_eq!(result.final_price, 17_000);
            assert_eq!(result.deductions.len(), 1);
            assert_eq!(result.deductions[0].question_text, "Screen cracked?");
        }
        other => panic!("expected price, got {other:?}"),
    }
}

#[test]
fn last_answer_can_produce_a_block() {
    let catalog = small_catalog();
    let mut session = answering_session(&catalog);

    session.answer(false).expect("q1");
    session.answer(true).expect("q2");
    session.answer(true).expect("q3");

    assert_eq!(
        session.outcome().and_then(Valuation::block_reason),
        Some("Phone does not power on")
    );
}

#[test]
fn progress_counts_brand_model_and_each_question() {
    let catalog = small_catalog();
    let mut session = WizardSession::start(&catalog).expect("session starts");
    assert_eq!(session.progress(), Progress { current: 1, total: 5 });

    session
        .pick_brand(&catalog, &BrandId::from("samsung"))
        .expect("brand");
    assert_eq!(session.progress(), Progress { current: 2, total: 5 });

    session.pick_model(&ModelId::from("sam-s23")).expect("model");
    assert_eq!(session.progress(), Progress { current: 3, total: 5 });

    session.answer(true).expect("q1");
    assert_eq!(session.progress(), Progress { current: 4, total: 5 });
    assert_eq!(session.position().question_index, 1);
    assert!((session.progress().fraction() - 0.8).abs() < f64::EPSILON);

    session.answer(true).expect("q2");
    session.answer(true).expect("q3");
    assert_eq!(session.progress(), Progress { current: 5, total: 5 });
}

#[test]
fn back_within_battery_keeps_answers_and_same_answer_is_idempotent() {
    let catalog = small_catalog();

    let mut straight = answering_session(&catalog);
    straight.answer(true).expect("q1");
    straight.answer(true).expect("q2");
    straight.answer(false).expect("q3");
    let expected = straight.finish().expect("valuation");

    let mut revisited = answering_session(&catalog);
    revisited.answer(true).expect("q1");
    revisited.answer(true).expect("q2");
    assert_eq!(
        revisited.back(),
        BackOutcome::Moved(WizardStep::Answering(1))
    );
    assert_eq!(
        revisited.answers().get(&QuestionId::from("screen_cracked")),
        Some(true),
        "stepping back does not clear the revisited answer"
    );
    assert_eq!(revisited.answer(true).expect("q2 again"), WizardStep::Answering(2));
    assert_eq!(revisited.answers().len(), 2);
    revisited.answer(false).expect("q3");

    assert_eq!(revisited.finish().expect("valuation"), expected);
}

#[test]
fn back_within_battery_then_changed_answer_overwrites_in_place() {
    let catalog = small_catalog();
    let mut session = answering_session(&catalog);
    session.answer(true).expect("q1");
    session.answer(true).expect("q2");
    session.back();
    session.answer(false).expect("q2 revised");
    session.answer(true).expect("q3");

    let order: Vec<&str> = session.answers().iter().map(|(id, _)| id.0.as_str()).collect();
    assert_eq!(order, vec!["powers_on", "screen_cracked", "has_box"]);
    assert_eq!(session.outcome().and_then(Valuation::final_price), Some(20_000));
}

/// Intentional policy: leaving the battery from the first question discards
/// every recorded answer, unlike back-steps inside the battery.
#[test]
fn back_out_of_battery_discards_all_answers() {
    let catalog = small_catalog();
    let mut session = answering_session(&catalog);
    session.answer(false).expect("q1");
    session.answer(true).expect("q2");
    session.back();
    session.back();
    assert_eq!(session.step(), WizardStep::Answering(0));
    assert_eq!(session.answers().len(), 2);

    assert_eq!(
        session.back(),
        BackOutcome::Moved(WizardStep::SelectingModel)
    );
    assert!(session.answers().is_empty());
    assert!(session.selected_model().is_none());

    session
        .pick_model(&ModelId::from("sam-s23"))
        .expect("same model again");
    assert_eq!(session.step(), WizardStep::Answering(0));
    assert!(session.answers().is_empty());
    assert_eq!(session.position().question_index, 0);
}

#[test]
fn back_from_model_clears_selection_and_loaded_models() {
    let catalog = small_catalog();
    let mut session = WizardSession::start(&catalog).expect("session starts");
    session
        .pick_brand(&catalog, &BrandId::from("samsung"))
        .expect("brand");

    assert_eq!(
        session.back(),
        BackOutcome::Moved(WizardStep::SelectingBrand)
    );
    assert!(session.models().is_empty());
    assert!(session.selected_brand().is_none());
    assert!(session.selected_model().is_none());
    assert_eq!(session.back(), BackOutcome::ExitFlow);
    assert_eq!(session.step(), WizardStep::SelectingBrand);
}

#[test]
fn back_from_result_returns_to_last_question() {
    let catalog = small_catalog();
    let mut session = answering_session(&catalog);
    session.answer(true).expect("q1");
    session.answer(false).expect("q2");
    session.answer(true).expect("q3");
    assert_eq!(session.step(), WizardStep::Done);

    assert_eq!(session.back(), BackOutcome::Moved(WizardStep::Answering(2)));
    assert!(session.outcome().is_none());
    assert_eq!(session.answers().len(), 3);

    session.answer(false).expect("q3 revised");
    assert_eq!(session.outcome().and_then(Valuation::final_price), Some(19_000));
}

#[test]
fn failed_model_fetch_leaves_session_on_brand_step() {
    let catalog = ModelsOffline(small_catalog());
    let mut session = WizardSession::start(&catalog).expect("session starts");

    let error = session
        .pick_brand(&catalog, &BrandId::from("samsung"))
        .expect_err("model fetch fails");

    assert!(matches!(error, WizardError::DataLoad(CatalogError::Unavailable(_))));
    assert_eq!(session.step(), WizardStep::SelectingBrand);
    assert!(session.selected_brand().is_none());
}

#[test]
fn unknown_ids_and_out_of_order_inputs_are_rejected() {
    let catalog = small_catalog();
    let mut session = WizardSession::start(&catalog).expect("session starts");

    assert!(matches!(
        session.answer(true),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.pick_model(&ModelId::from("sam-s23")),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        session.pick_brand(&catalog, &BrandId::from("nokia")),
        Err(WizardError::UnknownBrand(_))
    ));

    session
        .pick_brand(&catalog, &BrandId::from("samsung"))
        .expect("brand");
    assert!(matches!(
        session.pick_model(&ModelId::from("xi-12")),
        Err(WizardError::UnknownModel(_))
    ));
    assert_eq!(session.step(), WizardStep::SelectingModel);
}

#[test]
fn invalid_transition_message_names_current_step() {
    let catalog = small_catalog();
    let mut session = WizardSession::start(&catalog).expect("session starts");
    let error = session.answer(true).expect_err("no question yet");
    assert_eq!(
        error.to_string(),
        "cannot answer a question while selecting a brand"
    );
}
