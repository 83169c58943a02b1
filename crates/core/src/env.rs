// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the resident runtime core.
//!
//! Every externally-tunable value named in the configuration surface is read
//! through one small accessor here, `CORVID_`-prefixed, each with a
//! documented default.

use std::time::Duration;

/// `CORVID_BACKEND_SERVICE` — comma-separated `host:port` list of collector endpoints.
pub fn backend_service() -> Vec<String> {
    std::env::var("CORVID_BACKEND_SERVICE")
        .ok()
        .map(|s| s.split(',').map(|e| e.trim().to_string()).filter(|e| !e.is_empty()).collect())
        .unwrap_or_default()
}

/// `CORVID_IS_RESOLVE_DNS_PERIODICALLY` — enable periodic DNS expansion of the
/// first configured endpoint. Default: `false`.
pub fn is_resolve_dns_periodically() -> bool {
    std::env::var("CORVID_IS_RESOLVE_DNS_PERIODICALLY")
        .ok()
        .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
        .unwrap_or(false)
}

/// `CORVID_GRPC_CHANNEL_CHECK_INTERVAL` (seconds). Default: 5s.
pub fn grpc_channel_check_interval() -> Duration {
    seconds_var("CORVID_GRPC_CHANNEL_CHECK_INTERVAL", 5)
}

/// `CORVID_GET_AGENT_DYNAMIC_CONFIG_INTERVAL` (seconds). Default: 5s.
pub fn get_agent_dynamic_config_interval() -> Duration {
    seconds_var("CORVID_GET_AGENT_DYNAMIC_CONFIG_INTERVAL", 5)
}

/// `CORVID_GRPC_UPSTREAM_TIMEOUT` (seconds). Default: 10s.
pub fn grpc_upstream_timeout() -> Duration {
    seconds_var("CORVID_GRPC_UPSTREAM_TIMEOUT", 10)
}

/// `CORVID_FORCE_RECONNECTION_PERIOD` — number of same-index ticks before a
/// forced re-notification. Default: 600 (e.g. ~50 minutes at a 5s interval).
pub fn force_reconnection_period() -> u32 {
    std::env::var("CORVID_FORCE_RECONNECTION_PERIOD")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(600)
}

/// `CORVID_SERVICE_NAME` — logical service identity sent with sync requests.
/// Default: `"unnamed-service"`.
pub fn service_name() -> String {
    std::env::var("CORVID_SERVICE_NAME").unwrap_or_else(|_| "unnamed-service".to_string())
}

/// `CORVID_INSTANCE_NAME` — if absent, the caller must synthesize one via
/// [`crate::instance_name::synthesize_instance_name`].
pub fn instance_name() -> Option<String> {
    std::env::var("CORVID_INSTANCE_NAME").ok().filter(|s| !s.is_empty())
}

/// `CORVID_AUTH_TOKEN` — opaque bearer token sent as the authentication header.
pub fn auth_token() -> Option<String> {
    std::env::var("CORVID_AUTH_TOKEN").ok().filter(|s| !s.is_empty())
}

/// `CORVID_USE_TLS` — select TLS vs plaintext transport at channel-build time.
/// Default: `false`.
pub fn use_tls() -> bool {
    std::env::var("CORVID_USE_TLS")
        .ok()
        .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
        .unwrap_or(false)
}

fn seconds_var(key: &str, default_secs: u64) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn backend_service_parses_comma_separated_list() {
        std::env::set_var("CORVID_BACKEND_SERVICE", "a:1, b:2 ,c:3");
        assert_eq!(
            backend_service(),
            vec!["a:1".to_string(), "b:2".to_string(), "c:3".to_string()]
        );
        std::env::remove_var("CORVID_BACKEND_SERVICE");
    }

    #[test]
    #[serial]
    fn missing_backend_service_is_empty() {
        std::env::remove_var("CORVID_BACKEND_SERVICE");
        assert!(backend_service().is_empty());
    }

    #[test]
    #[serial]
    fn interval_falls_back_to_default_on_bad_value() {
        std::env::set_var("CORVID_GRPC_CHANNEL_CHECK_INTERVAL", "not-a-number");
        assert_eq!(grpc_channel_check_interval(), Duration::from_secs(5));
        std::env::remove_var("CORVID_GRPC_CHANNEL_CHECK_INTERVAL");
    }
}
