use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::OutletFoodError,
    models::{
        menu::MenuDocument,
        outlet::{ReadRequest, UpdateOutletFoodQuery},
    },
    AppState,
};

/// POST /api/getOutletFood: store, then snapshot, then default menu.
pub async fn get_outlet_food(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MenuDocument>, OutletFoodError> {
    let req: ReadRequest =
        serde_json::from_slice(&body).map_err(OutletFoodError::MalformedPayload)?;

    let resolved = state.outlet_food.resolve(&req).await?;
    Ok(Json(resolved.document))
}

/// POST /api/updateOutletFood?outletid=<int> with a full menu document as body.
pub async fn update_outlet_food(
    State(state): State<AppState>,
    Query(params): Query<UpdateOutletFoodQuery>,
    body: Bytes,
) -> Result<Json<Value>, OutletFoodError> {
    let outlet_id = params.outlet_id()?;
    let payload: MenuDocument =
        serde_json::from_slice(&body).map_err(OutletFoodError::MalformedPayload)?;

    state.outlet_food.upsert(payload, outlet_id).await?;
    Ok(Json(json!({ "message": "Data updated successfully" })))
}
