use pretty_assertions::assert_eq;
use serial_test::serial;
use speech_convert::infrastructure::config::{Config, ConfigError, LogFormat};
use std::env;

const REQUIRED: [(&str, &str); 6] = [
    ("AZURE_SPEECH_KEY", "key"),
    ("AZURE_SPEECH_REGION", "westeurope"),
    ("SPACES_KEY", "spaces-key"),
    ("SPACES_SECRET", "spaces-secret"),
    ("SPACES_REGION", "ams3"),
    ("SPACES_BUCKET", "daily"),
];

fn set_required_env() {
    for (name, value) in REQUIRED {
        env::set_var(name, value);
    }
}

fn clear_env() {
    for (name, _) in REQUIRED {
        env::remove_var(name);
    }
    env::remove_var("LOG_FORMAT");
    env::remove_var("TTS_TIMEOUT_SECS");
}

#[test]
#[serial]
fn it_should_load_configuration_from_environment() {
    set_required_env();
    env::set_var("LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.spaces_bucket, "daily");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.public_base_url(), "https://daily.ams3.digitaloceanspaces.com");
    assert_eq!(config.spaces_endpoint_url(), "https://ams3.digitaloceanspaces.com");
}

#[test]
#[serial]
fn it_should_fail_fast_on_missing_credentials() {
    set_required_env();
    env::remove_var("SPACES_SECRET");

    let err = Config::from_env().unwrap_err();
    clear_env();

    assert_eq!(err, ConfigError::Missing("SPACES_SECRET"));
}

#[test]
#[serial]
fn it_should_reject_out_of_range_timeouts() {
    set_required_env();
    env::set_var("TTS_TIMEOUT_SECS", "0");

    let err = Config::from_env().unwrap_err();
    clear_env();

    assert!(matches!(err, ConfigError::Invalid { name: "TTS_TIMEOUT_SECS", .. }));
}
