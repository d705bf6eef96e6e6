use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::{DeliveryOrder, NewOrder};
use crate::repo::orders::OrderRepo;
use crate::service::lifecycle::LifecycleService;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/accept", post(accept_order))
        .route("/orders/:id/start", post(start_order))
        .route("/orders/:id/complete", post(complete_order))
        .route("/orders/:id/cancel", post(cancel_order))
}

#[derive(Deserialize)]
pub struct ListOrdersQuery {
    status: Option<String>,
    driver: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptOrderRequest {
    pub driver_email: String,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewOrder>,
) -> Result<Json<DeliveryOrder>, AppError> {
    let order = OrderRepo::new(&state).create(payload)?;
    Ok(Json(order))
}

/// `?driver=<email>` returns that driver's active workload,
/// `?status=pending` the available pool, no filter everything.
async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<DeliveryOrder>>, AppError> {
    let repo = OrderRepo::new(&state);

    let orders = if let Some(driver) = query.driver {
        repo.list_for_driver(driver.trim())
    } else if let Some(status) = query.status {
        if status != "pending" {
            return Err(AppError::Validation(
                "only status=pending is supported as a filter".to_string(),
            ));
        }
        repo.list_available()
    } else {
        repo.list_all()
    };

    Ok(Json(orders))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryOrder>, AppError> {
    let order = OrderRepo::new(&state).get(id)?;
    Ok(Json(order))
}

async fn accept_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AcceptOrderRequest>,
) -> Result<Json<DeliveryOrder>, AppError> {
    let order = LifecycleService::new(&state).accept(id, &payload.driver_email)?;
    Ok(Json(order))
}

async fn start_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryOrder>, AppError> {
    let order = LifecycleService::new(&state).start(id)?;
    Ok(Json(order))
}

async fn complete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryOrder>, AppError> {
    let order = LifecycleService::new(&state).complete(id)?;
    Ok(Json(order))
}

async fn cancel_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryOrder>, AppError> {
    let order = LifecycleService::new(&state).cancel(id)?;
    Ok(Json(order))
}
