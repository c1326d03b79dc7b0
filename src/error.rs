use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutletFoodError {
    #[error("invalid JSON payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("missing outletid (send as ?outletid=xxx or include output.city.id)")]
    MissingOutletId,

    #[error("failed to serialize menu document: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("db save error: {0}")]
    StoreWrite(anyhow::Error),
}

impl OutletFoodError {
    pub fn status(&self) -> StatusCode {
        match self {
            OutletFoodError::MalformedPayload(_)
            | OutletFoodError::Validation(_)
            | OutletFoodError::MissingOutletId => StatusCode::BAD_REQUEST,
            OutletFoodError::Serialization(_) | OutletFoodError::StoreWrite(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for OutletFoodError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
