use crate::config::ConfigError;
use crate::pricing::{CartImportError, PricingError, PromoCatalogError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    PromoCatalog(PromoCatalogError),
    CartImport(CartImportError),
    Pricing(PricingError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::PromoCatalog(err) => write!(f, "promo catalog error: {}", err),
            AppError::CartImport(err) => write!(f, "cart import error: {}", err),
            AppError::Pricing(err) => write!(f, "pricing error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::PromoCatalog(err) => Some(err),
            AppError::CartImport(err) => Some(err),
            AppError::Pricing(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Pricing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::CartImport(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::PromoCatalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PromoCatalogError> for AppError {
    fn from(value: PromoCatalogError) -> Self {
        Self::PromoCatalog(value)
    }
}

impl From<CartImportError> for AppError {
    fn from(value: CartImportError) -> Self {
        Self::CartImport(value)
    }
}

impl From<PricingError> for AppError {
    fn from(value: PricingError) -> Self {
        Self::Pricing(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::InvalidInput;

    #[test]
    fn pricing_errors_map_to_unprocessable() {
        let error = AppError::from(PricingError::from(InvalidInput::NegativeCredit(-1)));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn import_errors_map_to_bad_request() {
        let error = AppError::from(CartImportError::NegativePrice { row: 3, price: -9 });
        assert_eq!(error.to_string(), "cart import error: cart row 3 has negative price -9");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
