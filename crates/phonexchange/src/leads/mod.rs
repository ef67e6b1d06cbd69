//! Contact requests captured after a valuation or from the buy page.

mod domain;
mod repository;
mod service;


pub use domain::{LeadId, LeadReceipt, LeadRecord, LeadSubmission, LeadType};
pub use repository::{LeadRepository, RepositoryError};
pub use service::{LeadService, LeadSubmissionError};
