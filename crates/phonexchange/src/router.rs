//! HTTP surface for the trade-in flow: catalog reads, price calculation, and
//! lead capture.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalog::{Brand, BrandId, CatalogProvider, ModelId, PhoneModel};
use crate::error::AppError;
use crate::leads::{LeadReceipt, LeadRepository, LeadService, LeadSubmission};
use crate::valuation::{AnswerSet, Question, Valuation, ValuationService};

/// Services shared by every handler.
pub struct TradeInServices<C: ?Sized, L: ?Sized> {
    catalog: Arc<C>,
    valuations: ValuationService<C>,
    leads: LeadService<L>,
}

impl<C, L> TradeInServices<C, L>
where
    C: CatalogProvider + ?Sized,
    L: LeadRepository + ?Sized,
{
    pub fn new(catalog: Arc<C>, leads: Arc<L>) -> Self {
        Self {
            valuations: ValuationService::new(Arc::clone(&catalog)),
            leads: LeadService::new(leads),
            catalog,
        }
    }
}

/// Body of `POST /api/calculate-price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCalculationRequest {
    pub model_id: ModelId,
    pub answers: AnswerSet,
}

/// Router builder exposing the `/api` endpoints.
pub fn trade_in_router<C, L>(services: Arc<TradeInServices<C, L>>) -> Router
where
    C: CatalogProvider + ?Sized + 'static,
    L: LeadRepository + ?Sized + 'static,
{
    Router::new()
        .route("/api", get(root_handler))
        .route("/api/brands", get(brands_handler::<C, L>))
        .route("/api/models/{brand_id}", get(models_handler::<C, L>))
        .route("/api/questions", get(questions_handler::<C, L>))
        .route("/api/calculate-price", post(calculate_price_handler::<C, L>))
        .route("/api/submit-lead", post(submit_lead_handler::<C, L>))
        .with_state(services)
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "PhoneXchange Patna API" }))
}

pub(crate) async fn brands_handler<C, L>(
    State(services): State<Arc<TradeInServices<C, L>>>,
) -> Result<Json<Vec<Brand>>, AppError>
where
    C: CatalogProvider + ?Sized + 'static,
    L: LeadRepository + ?Sized + 'static,
{
    Ok(Json(services.catalog.list_brands()?))
}

pub(crate) async fn models_handler<C, L>(
    State(services): State<Arc<TradeInServices<C, L>>>,
    Path(brand_id): Path<String>,
) -> Result<Json<Vec<PhoneModel>>, AppError>
where
    C: CatalogProvider + ?Sized + 'static,
    L: LeadRepository + ?Sized + 'static,
{
    Ok(Json(services.catalog.list_models(&BrandId(brand_id))?))
}

pub(crate) async fn questions_handler<C, L>(
    State(services): State<Arc<TradeInServices<C, L>>>,
) -> Result<Json<Vec<Question>>, AppError>
where
    C: CatalogProvider + ?Sized + 'static,
    L: LeadRepository + ?Sized + 'static,
{
    Ok(Json(services.catalog.list_questions()?))
}

pub(crate) async fn calculate_price_handler<C, L>(
    State(services): State<Arc<TradeInServices<C, L>>>,
    Json(request): Json<PriceCalculationRequest>,
) -> Result<Json<Valuation>, AppError>
where
    C: CatalogProvider + ?Sized + 'static,
    L: LeadRepository + ?Sized + 'static,
{
    let valuation = services
        .valuations
        .compute(&request.model_id, &request.answers)?;
    Ok(Json(valuation))
}

pub(crate) async fn submit_lead_handler<C, L>(
    State(services): State<Arc<TradeInServices<C, L>>>,
    Json(submission): Json<LeadSubmission>,
) -> Result<Json<LeadReceipt>, AppError>
where
    C: CatalogProvider + ?Sized + 'static,
    L: LeadRepository + ?Sized + 'static,
{
    let record = services.leads.submit(submission)?;
    Ok(Json(record.receipt()))
}
