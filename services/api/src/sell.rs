use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use clap::Args;
use phonexchange::catalog::{CatalogProvider, ModelId, PhoneModel};
use phonexchange::config::AppConfig;
use phonexchange::error::AppError;
use phonexchange::leads::{
    LeadRecord, LeadRepository, LeadService, LeadSubmission, LeadSubmissionError, LeadType,
};
use phonexchange::valuation::{PriceReveal, Valuation};
use phonexchange::wizard::{BackOutcome, WizardError, WizardSession, WizardStep};

use crate::infra::{load_catalog, CatalogArgs, InMemoryLeadRepository};
use crate::render::{progress_line, rupees, valuation_report};

#[derive(Args, Debug, Default)]
pub(crate) struct SellArgs {
    /// Count the offer up on screen before showing the breakdown
    #[arg(long)]
    pub(crate) animate: bool,
}

/// How an interactive pass ended.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SellExit {
    Completed {
        model: PhoneModel,
        valuation: Valuation,
    },
    /// Back was pressed on the brand screen.
    LeftFlow,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Pick(usize),
    Yes,
    No,
    Back,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Command::Yes,
        "n" | "no" => Command::No,
        "b" | "back" => Command::Back,
        "q" | "quit" | "exit" => Command::Quit,
        other => other
            .parse::<usize>()
            .ok()
            .filter(|index| *index > 0)
            .map_or(Command::Unknown, Command::Pick),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub(crate) fn run_sell(args: SellArgs, catalog_args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&catalog_args.merged_with(&config.catalog))?;
    let leads = LeadService::new(Arc::new(InMemoryLeadRepository::default()));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match drive(&catalog, &mut input, &mut out, args.animate)? {
        SellExit::Completed { model, valuation } => {
            if let Some(price) = valuation.final_price() {
                if let Some(record) = capture_lead(&mut input, &mut out, &leads, &model.id, price)? {
                    writeln!(
                        out,
                        "Thanks {}! Reference {}. We will call you on {}.",
                        record.name, record.id, record.phone
                    )?;
                }
            }
        }
        SellExit::LeftFlow => writeln!(out, "Back to the home screen.")?,
        SellExit::Quit => writeln!(out, "Goodbye.")?,
    }

    Ok(())
}

/// Runs one wizard pass over line-based input.
pub(crate) fn drive<C, R, W>(
    catalog: &C,
    input: &mut R,
    out: &mut W,
    animate: bool,
) -> Result<SellExit, AppError>
where
    C: CatalogProvider + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut session = WizardSession::start(catalog)?;

    loop {
        let step = session.step();
        if step == WizardStep::Done {
            break;
        }

        writeln!(out, "\n{}", progress_line(session.progress()))?;
        prompt(&session, out)?;

        let Some(line) = read_line(input)? else {
            return Ok(SellExit::Quit);
        };

        let result = match (step, parse_command(&line)) {
            (_, Command::Quit) => return Ok(SellExit::Quit),
            (_, Command::Back) => match session.back() {
                BackOutcome::ExitFlow => return Ok(SellExit::LeftFlow),
                BackOutcome::Moved(_) => Ok(()),
            },
            (WizardStep::SelectingBrand, Command::Pick(index)) => {
                match session.brands().get(index - 1).map(|brand| brand.id.clone()) {
                    Some(brand_id) => session.pick_brand(catalog, &brand_id).map(drop),
                    None => Ok(writeln!(out, "Please choose 1-{}.", session.brands().len())?),
                }
            }
            (WizardStep::SelectingModel, Command::Pick(index)) => {
                match session.models().get(index - 1).map(|model| model.id.clone()) {
                    Some(model_id) => session.pick_model(&model_id).map(drop),
                    None => Ok(writeln!(out, "Please choose 1-{}.", session.models().len())?),
                }
            }
            (WizardStep::Answering(_), Command::Yes) => session.answer(true).map(drop),
            (WizardStep::Answering(_), Command::No) => session.answer(false).map(drop),
            (WizardStep::Answering(_), _) => {
                Ok(writeln!(out, "Answer y or n (b to go back, q to quit).")?)
            }
            _ => Ok(writeln!(out, "Enter a number (b to go back, q to quit).")?),
        };

        match result {
            Ok(()) => {}
            Err(WizardError::DataLoad(err)) => writeln!(out, "Could not load data: {err}. Try again.")?,
            Err(other) => return Err(other.into()),
        }
    }

    let model = session
        .selected_model()
        .cloned()
        .ok_or_else(|| AppError::Input("wizard finished without a model".to_string()))?;
    let valuation = session
        .finish()
        .ok_or_else(|| AppError::Input("wizard finished without a valuation".to_string()))?;

    writeln!(out)?;
    if let (true, Some(price)) = (animate, valuation.final_price()) {
        reveal(out, PriceReveal::new(price))?;
    }
    write!(out, "{}", valuation_report(&model, &valuation))?;

    Ok(SellExit::Completed { model, valuation })
}

fn prompt<W: Write>(session: &WizardSession, out: &mut W) -> Result<(), AppError> {
    match session.step() {
        WizardStep::SelectingBrand => {
            writeln!(out, "Select your phone brand:")?;
            for (index, brand) in session.brands().iter().enumerate() {
                writeln!(out, "  {}. {}", index + 1, brand.name)?;
            }
        }
        WizardStep::SelectingModel => {
            let brand = session
                .selected_brand()
                .map(|brand| brand.name.as_str())
                .unwrap_or("your brand");
            writeln!(out, "Select your {brand} model:")?;
            for (index, model) in session.models().iter().enumerate() {
                writeln!(
                    out,
                    "  {}. {} (up to {})",
                    index + 1,
                    model.name,
                    rupees(model.base_price)
                )?;
            }
        }
        WizardStep::Answering(_) => {
            if let Some(question) = session.current_question() {
                writeln!(out, "{}: {}", question.category, question.text)?;
                writeln!(out, "  (y/n, b back, q quit)")?;
            }
        }
        WizardStep::Done => {}
    }
    Ok(())
}

fn reveal<W: Write>(out: &mut W, animation: PriceReveal) -> Result<(), AppError> {
    let interval = animation.frame_interval();
    for frame in animation.frames() {
        write!(out, "\rYour offer: {}", rupees(frame))?;
        out.flush()?;
        thread::sleep(interval);
    }
    writeln!(out)?;
    Ok(())
}

/// Offers a pickup after a priced result and stores the contact details.
pub(crate) fn capture_lead<R, W, L>(
    input: &mut R,
    out: &mut W,
    leads: &LeadService<L>,
    model_id: &ModelId,
    offered_price: u64,
) -> Result<Option<LeadRecord>, AppError>
where
    R: BufRead,
    W: Write,
    L: LeadRepository + ?Sized,
{
    writeln!(out, "\nSell it for {}? Book a free doorstep pickup (y/n):", rupees(offered_price))?;
    match read_line(input)?.as_deref().map(parse_command) {
        Some(Command::Yes) => {}
        _ => return Ok(None),
    }

    let mut fields = Vec::with_capacity(4);
    for label in ["Name", "Phone", "Area", "Preferred pickup time"] {
        write!(out, "{label}: ")?;
        out.flush()?;
        let Some(value) = read_line(input)? else {
            return Ok(None);
        };
        fields.push(value);
    }
    let [name, phone, area, preferred_time]: [String; 4] = fields
        .try_into()
        .map_err(|_| AppError::Input("incomplete contact details".to_string()))?;

    let submission = LeadSubmission {
        name,
        phone,
        area,
        preferred_time,
        phone_model: Some(model_id.clone()),
        offered_price: Some(offered_price),
        remarks: None,
        lead_type: LeadType::Sell,
    };
    match leads.submit(submission) {
        Ok(record) => Ok(Some(record)),
        Err(LeadSubmissionError::Invalid(message)) => {
            writeln!(out, "Could not book pickup: {message}")?;
            Ok(None)
        }
        Err(other) => {
            writeln!(out, "Could not book pickup: {other}. Please call us instead.")?;
            Ok(None)
        }
    }
}
