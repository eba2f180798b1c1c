use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::conversion::{ConversionRequest, ConversionResult, ConversionServiceApi},
    error::{AppError, AppResult},
};

pub struct ConvertController {
    conversion_service: Arc<dyn ConversionServiceApi>,
}

impl ConvertController {
    pub fn new(conversion_service: Arc<dyn ConversionServiceApi>) -> Self {
        Self { conversion_service }
    }

    /// POST /api/convert - Convert text to speech and publish it
    ///
    /// An empty body converts the default text with the default voice.
    pub async fn convert(
        State(controller): State<Arc<ConvertController>>,
        body: Bytes,
    ) -> AppResult<Json<ConversionResult>> {
        let request = parse_request(&body)?;

        let result = controller.conversion_service.convert(request).await?;

        Ok(Json(result))
    }
}

fn parse_request(body: &[u8]) -> AppResult<ConversionRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ConversionRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Request body must be a JSON object: {}", e)))
}
