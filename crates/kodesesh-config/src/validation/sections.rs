//! Per-section validators.

use crate::schema::KodeseshConfig;

use super::helpers::{validate_not_blank, validate_range, validate_scheme};

pub(crate) fn validate_relay(errors: &mut Vec<String>, config: &KodeseshConfig) {
    validate_scheme(errors, "relay.url", &config.relay.url, &["ws://", "wss://"]);
    validate_range(
        errors,
        "relay.connect_timeout",
        config.relay.connect_timeout,
        1,
        120,
    );
    validate_range(
        errors,
        "relay.heartbeat_interval",
        config.relay.heartbeat_interval,
        5,
        300,
    );
}

pub(crate) fn validate_execution(errors: &mut Vec<String>, config: &KodeseshConfig) {
    validate_scheme(
        errors,
        "execution.url",
        &config.execution.url,
        &["http://", "https://"],
    );
    validate_range(
        errors,
        "execution.compile_timeout_ms",
        config.execution.compile_timeout_ms,
        100,
        60_000,
    );
    validate_range(
        errors,
        "execution.run_timeout_ms",
        config.execution.run_timeout_ms,
        100,
        60_000,
    );
    validate_range(
        errors,
        "execution.request_timeout",
        config.execution.request_timeout,
        1,
        300,
    );
}

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &KodeseshConfig) {
    validate_not_blank(
        errors,
        "session.default_session_id",
        &config.session.default_session_id,
    );
    validate_not_blank(
        errors,
        "session.initial_language",
        &config.session.initial_language,
    );
}

pub(crate) fn validate_identity(errors: &mut Vec<String>, config: &KodeseshConfig) {
    validate_not_blank(
        errors,
        "identity.default_name",
        &config.identity.default_name,
    );
}
