use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use storage::services::Actor;

use crate::error::WebError;

/// Rejects requests without a known bearer key and attaches the key's
/// [`Actor`] for the audit trail.
pub async fn require_auth(
    State(api_keys): State<ApiKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(actor) = token.and_then(|token| api_keys.resolve(token)) else {
        tracing::warn!(path = %req.uri().path(), "Invalid API key attempt");
        return Err(WebError::Unauthorized);
    };

    req.extensions_mut().insert(actor);
    Ok(next.run(req).await)
}

/// Accepted keys. Entries are `key` or `user:key`; the user part becomes the
/// audit identity.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    keys: HashMap<String, Option<String>>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|entry| match entry.split_once(':') {
                Some((user, key)) if !user.trim().is_empty() => {
                    (key.trim().to_string(), Some(user.trim().to_string()))
                }
                Some((_, key)) => (key.trim().to_string(), None),
                None => (entry.to_string(), None),
            })
            .filter(|(key, _)| !key.is_empty())
            .collect();

        Self { keys }
    }

    pub fn resolve(&self, key: &str) -> Option<Actor> {
        self.keys.get(key).map(|user| match user {
            Some(user) => Actor::named(user.clone()),
            None => Actor::anonymous(),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_and_named_keys() {
        let keys = ApiKeys::from_comma_separated(" secret , council:abc123,,");

        assert_eq!(keys.len(), 2);
        assert!(keys.resolve("secret").is_some());
        assert!(keys.resolve("abc123").is_some());
        assert!(keys.resolve("council").is_none());
    }

    #[test]
    fn test_resolves_audit_identity() {
        let keys = ApiKeys::from_comma_separated("secret,SOC_Council:abc123");

        assert_eq!(keys.resolve("secret"), Some(Actor::anonymous()));
        assert_eq!(
            keys.resolve("abc123").and_then(|a| a.username().map(str::to_string)),
            Some("SOC_Council".to_string())
        );
        assert_eq!(keys.resolve("nope"), None);
    }

    #[test]
    fn test_empty_configuration_accepts_nothing() {
        let keys = ApiKeys::from_comma_separated("");
        assert!(keys.is_empty());
        assert!(keys.resolve("").is_none());
    }
}
