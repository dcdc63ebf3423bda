use axum::http::HeaderMap;

use backend_domain::RuntimeConfig;

/// Header Telegram echoes the configured secret in on every webhook delivery.
const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Bearer check for the ops endpoints. With no api_token configured the ops
/// surface stays open.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|value| value == *api_token)
            .unwrap_or(false);
    }
    true
}

pub fn verify_webhook_secret(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    let Some(secret) = &config.webhook_secret else {
        return true;
    };
    headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == secret)
        .unwrap_or(false)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config(api_token: Option<&str>, webhook_secret: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: api_token.map(ToString::to_string),
            bot_token: "test-token".to_string(),
            webhook_secret: webhook_secret.map(ToString::to_string),
            public_base_url: None,
            timezone: chrono_tz::Asia::Kolkata,
            poll_timeout_seconds: 30,
            request_timeout_seconds: 15,
            max_body_bytes: 1024 * 1024,
        }
    }

    #[test]
    fn bearer_token_must_match_when_configured() {
        let config = config(Some("ops-token"), None);
        let mut headers = HeaderMap::new();
        assert!(!authorize(&config, &headers));

        headers.insert("Authorization", HeaderValue::from_static("Bearer ops-token"));
        assert!(authorize(&config, &headers));

        headers.insert("Authorization", HeaderValue::from_static("Bearer wrong"));
        assert!(!authorize(&config, &headers));
    }

    #[test]
    fn ops_stay_open_without_an_api_token() {
        let config = config(None, None);
        assert!(authorize(&config, &HeaderMap::new()));
    }

    #[test]
    fn webhook_secret_is_checked_when_configured() {
        let config = config(None, Some("hook-secret"));
        let mut headers = HeaderMap::new();
        assert!(!verify_webhook_secret(&config, &headers));

        headers.insert(
            "X-Telegram-Bot-Api-Secret-Token",
            HeaderValue::from_static("hook-secret"),
        );
        assert!(verify_webhook_secret(&config, &headers));
    }

    #[test]
    fn webhook_is_open_without_a_secret() {
        let config = config(None, None);
        assert!(verify_webhook_secret(&config, &HeaderMap::new()));
    }
}
