//! PhoneXchange trade-in core: the phone catalog, the condition battery and
//! its valuation fold, the step-by-step wizard, and lead capture.

pub mod catalog;
pub mod config;
pub mod error;
pub mod leads;
pub mod router;
pub mod telemetry;
pub mod valuation;
pub mod wizard;
