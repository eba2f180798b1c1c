//! Serverless entry point: host arguments in, `{statusCode, headers, body}` out.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::{
    domain::conversion::{ConversionRequest, ConversionResult, ConversionServiceApi},
    error::AppError,
    infrastructure::{bootstrap::build_conversion_service, config::Config},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Response envelope handed back to the serverless host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl FunctionResponse {
    pub fn success(result: &ConversionResult) -> Self {
        Self::new(200, json!({ "url": result.url, "version": result.version }))
    }

    pub fn from_error(err: &AppError) -> Self {
        Self::new(err.status_code().as_u16(), json!({ "error": err.to_string() }))
    }

    fn new(status_code: u16, body: Value) -> Self {
        let headers = BTreeMap::from([("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())]);
        Self {
            status_code,
            headers,
            body,
        }
    }
}

/// Only string `text` / `voice` arguments are honoured; anything else is
/// treated as absent.
pub fn request_from_args(args: &Value) -> ConversionRequest {
    let field = |name: &str| args.get(name).and_then(Value::as_str).map(str::to_string);

    ConversionRequest {
        text: field("text"),
        voice: field("voice"),
    }
}

/// Run one conversion and shape the outcome into the host envelope.
pub async fn invoke(service: &dyn ConversionServiceApi, args: Value) -> FunctionResponse {
    let request = request_from_args(&args);

    match service.convert(request).await {
        Ok(result) => FunctionResponse::success(&result),
        Err(e) => {
            let err = AppError::from(e);
            tracing::error!(error = %err, status = err.status_code().as_u16(), "Invocation failed");
            FunctionResponse::from_error(&err)
        }
    }
}

/// Wire real providers from `config` and invoke once.
pub async fn handle(config: &Config, args: Value) -> FunctionResponse {
    match build_conversion_service(config).await {
        Ok(service) => invoke(service.as_ref(), args).await,
        Err(err) => {
            tracing::error!(error = %err, "Failed to initialise conversion service");
            FunctionResponse::from_error(&err)
        }
    }
}
