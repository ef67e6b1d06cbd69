use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ModelId;

/// Identifier wrapper for captured leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the customer wants to sell their phone or buy a refurbished one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadType {
    Sell,
    Buy,
}

impl LeadType {
    pub const fn label(self) -> &'static str {
        match self {
            LeadType::Sell => "sell",
            LeadType::Buy => "buy",
        }
    }
}

/// Contact request as posted by the result screen or the buy page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub phone: String,
    pub area: String,
    pub preferred_time: String,
    #[serde(default)]
    pub phone_model: Option<ModelId>,
    #[serde(default)]
    pub offered_price: Option<u64>,
    #[serde(default)]
    pub remarks: Option<String>,
    pub lead_type: LeadType,
}

/// Stored lead, stamped with an id and a UTC creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    pub area: String,
    pub preferred_time: String,
    pub phone_model: Option<ModelId>,
    pub offered_price: Option<u64>,
    pub remarks: Option<String>,
    pub lead_type: LeadType,
    pub created_at: DateTime<Utc>,
}

impl LeadRecord {
    pub fn receipt(&self) -> LeadReceipt {
        LeadReceipt {
            id: self.id.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            area: self.area.clone(),
            lead_type: self.lead_type,
            created_at: self.created_at,
        }
    }
}

/// Acknowledgement returned to the caller once a lead is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadReceipt {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    pub area: String,
    pub lead_type: LeadType,
    pub created_at: DateTime<Utc>,
}
