use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use phonexchange::catalog::{BrandId, Catalog, CatalogProvider, ModelId};
use phonexchange::config::AppConfig;
use phonexchange::error::AppError;
use phonexchange::leads::{LeadRecord, LeadRepository, LeadService, LeadSubmission, LeadType};
use phonexchange::valuation::{AnswerSet, Question, QuestionId, Trigger, Valuation, ValuationService};
use phonexchange::wizard::{BackOutcome, WizardSession};

use crate::infra::{load_catalog, CatalogArgs, InMemoryLeadRepository};
use crate::render::{progress_line, valuation_report};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Model identifier, e.g. sam-s23
    #[arg(long)]
    pub(crate) model: String,
    /// JSON file mapping question ids to true/false answers
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Answer "yes" to every question the answers file leaves open
    #[arg(long)]
    pub(crate) all_yes: bool,
    /// Print the valuation as JSON instead of the text breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Demo model identifier (defaults to the Galaxy S23)
    #[arg(long, default_value = "sam-s23")]
    pub(crate) model: String,
}

pub(crate) fn run_quote(args: QuoteArgs, catalog_args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = Arc::new(load_catalog(&catalog_args.merged_with(&config.catalog))?);

    let provided = match &args.answers {
        Some(path) => Some(read_answers(path)?),
        None => None,
    };
    let battery = catalog.questions().to_vec();
    let answers = quote_answers(&battery, provided, args.all_yes);

    let model_id = ModelId(args.model);
    let valuation = ValuationService::new(Arc::clone(&catalog)).compute(&model_id, &answers)?;

    let mut out = io::stdout();
    if args.json {
        let body = serde_json::to_string_pretty(&valuation)
            .map_err(|err| AppError::Input(format!("failed to encode valuation: {err}")))?;
        writeln!(out, "{body}")?;
    } else if let Some(model) = catalog.find_model(&model_id).ok().flatten() {
        write!(out, "{}", valuation_report(&model, &valuation))?;
    }
    Ok(())
}

fn read_answers(path: &Path) -> Result<AnswerSet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        AppError::Input(format!(
            "answers file {} is not a JSON object of booleans: {err}",
            path.display()
        ))
    })
}

/// Completes the answer set for a quote. Without a file or `--all-yes` the
/// quote is best-case: every question is answered on the side that does not
/// deduct. A file given alone is used as-is, so gaps are reported.
pub(crate) fn quote_answers(
    battery: &[Question],
    provided: Option<AnswerSet>,
    all_yes: bool,
) -> AnswerSet {
    let mut answers = match provided {
        Some(answers) if !all_yes => return answers,
        Some(answers) => answers,
        None => AnswerSet::new(),
    };

    for question in battery {
        if !answers.contains(&question.id) {
            let answer = all_yes || clean_answer(question);
            answers.record(question.id.clone(), answer);
        }
    }
    answers
}

fn clean_answer(question: &Question) -> bool {
    !matches!(question.rule.trigger(), Some(Trigger::OnYes))
}

pub(crate) fn run_demo(args: DemoArgs, catalog_args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&catalog_args.merged_with(&config.catalog))?;
    let leads = LeadService::new(Arc::new(InMemoryLeadRepository::default()));

    let mut out = io::stdout();
    run_demo_to(&catalog, &leads, &ModelId(args.model), &mut out)?;
    Ok(())
}

/// Scripted walk: a clean phone with a cracked screen and no original box.
/// The screen question is first answered "no", then revisited via back.
pub(crate) fn run_demo_to<L, W>(
    catalog: &Catalog,
    leads: &LeadService<L>,
    model_id: &ModelId,
    out: &mut W,
) -> Result<(Valuation, Option<LeadRecord>), AppError>
where
    L: LeadRepository + ?Sized,
    W: Write,
{
    let model = catalog
        .find_model(model_id)
        .ok()
        .flatten()
        .ok_or_else(|| AppError::Input(format!("unknown demo model {model_id}")))?;
    let revisited = QuestionId::from("q14");
    let overrides = [(revisited.clone(), true), (QuestionId::from("q44"), false)];

    writeln!(out, "PhoneXchange trade-in demo")?;
    let mut session = WizardSession::start(catalog)?;
    writeln!(out, "{}", progress_line(session.progress()))?;

    let brand_id: BrandId = model.brand_id.clone();
    session.pick_brand(catalog, &brand_id)?;
    writeln!(out, "Picked brand {brand_id}; {}", progress_line(session.progress()))?;
    session.pick_model(model_id)?;
    writeln!(out, "Picked model {}; {}", model.name, progress_line(session.progress()))?;

    let mut revisit_pending = true;
    while let Some(question) = session.current_question().cloned() {
        if question.id == revisited && revisit_pending {
            revisit_pending = false;
            session.answer(false)?;
            writeln!(out, "Answered \"{}\" with no, then stepped back", question.text)?;
            if let BackOutcome::Moved(step) = session.back() {
                writeln!(out, "Back at {}", step.label())?;
            }
            continue;
        }

        let answer = overrides
            .iter()
            .find(|(id, _)| *id == question.id)
            .map_or_else(|| clean_answer(&question), |(_, answer)| *answer);
        session.answer(answer)?;
    }

    writeln!(out, "{}", progress_line(session.progress()))?;
    let valuation = session
        .finish()
        .ok_or_else(|| AppError::Input("demo did not reach a valuation".to_string()))?;
    write!(out, "{}", valuation_report(&model, &valuation))?;

    let Some(price) = valuation.final_price() else {
        return Ok((valuation, None));
    };

    let record = leads.submit(LeadSubmission {
        name: "Demo Customer".to_string(),
        phone: "9876543210".to_string(),
        area: "Boring Road".to_string(),
        preferred_time: "Evening".to_string(),
        phone_model: Some(model.id.clone()),
        offered_price: Some(price),
        remarks: Some("Scripted demo lead".to_string()),
        lead_type: LeadType::Sell,
    })?;
    let receipt = serde_json::to_string(&record.receipt())
        .map_err(|err| AppError::Input(format!("failed to encode receipt: {err}")))?;
    writeln!(out, "Lead captured: {receipt}")?;

    Ok((valuation, Some(record)))
}
