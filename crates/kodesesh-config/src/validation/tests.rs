use super::*;
use crate::schema::KodeseshConfig;

#[test]
fn default_config_is_valid() {
    assert!(validate(&KodeseshConfig::default()).is_ok());
}

#[test]
fn http_relay_url_is_rejected() {
    let mut config = KodeseshConfig::default();
    config.relay.url = "http://localhost:5000".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("relay.url"));
}

#[test]
fn timeouts_out_of_range_are_reported() {
    let mut config = KodeseshConfig::default();
    config.execution.run_timeout_ms = 50;
    config.execution.compile_timeout_ms = 120_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("execution.run_timeout_ms = 50"));
    assert!(err.contains("execution.compile_timeout_ms = 120000"));
}

#[test]
fn errors_are_collected_not_short_circuited() {
    let mut config = KodeseshConfig::default();
    config.relay.heartbeat_interval = 0;
    config.session.default_session_id = "   ".into();
    config.identity.default_name = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert_eq!(err.matches("; ").count(), 2);
    assert!(err.contains("session.default_session_id must not be empty"));
    assert!(err.contains("identity.default_name must not be empty"));
}
