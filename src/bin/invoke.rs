//! One-shot invocation: reads the argument object from stdin and prints the
//! `{statusCode, headers, body}` envelope to stdout.

use anyhow::Context;
use serde_json::Value;
use std::io::Read;
use speech_convert::controllers::function::{handle, FunctionResponse};
use speech_convert::error::AppError;
use speech_convert::infrastructure::config::Config;
use speech_convert::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read invocation arguments from stdin")?;

    // Blank or unparseable input behaves like an empty argument object
    let args = if input.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(&input).unwrap_or(Value::Null)
    };

    let response = match Config::from_env() {
        Ok(config) => {
            init_logging(&config);
            handle(&config, args).await
        }
        Err(e) => FunctionResponse::from_error(&AppError::from(e)),
    };

    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
