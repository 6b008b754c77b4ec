use std::collections::HashMap;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::{WebError, WebResult};

const DEFAULT_ACTOR: &str = "admin";

/// The authenticated user performing an admin request.
///
/// Inserted as a request extension by [`require_auth`]; handlers pass
/// `actor.id` into every create call so records know who made them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
}

/// Bearer API keys, each bound to the actor it authenticates.
#[derive(Clone, Default)]
pub struct ApiKeys {
    keys: HashMap<String, Actor>,
}

impl ApiKeys {
    /// Parses `actor:key` pairs separated by commas. A bare `key` belongs to `admin`.
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|entry| {
                let (actor, key) = match entry.split_once(':') {
                    Some((actor, key)) => (actor.trim(), key.trim()),
                    None => (DEFAULT_ACTOR, entry),
                };
                if key.is_empty() {
                    return None;
                }
                let actor = if actor.is_empty() { DEFAULT_ACTOR } else { actor };
                Some((
                    key.to_string(),
                    Actor {
                        id: actor.to_string(),
                    },
                ))
            })
            .collect();

        Self { keys }
    }

    pub fn actor_for(&self, key: &str) -> Option<&Actor> {
        self.keys.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub async fn require_auth(
    State(api_keys): State<ApiKeys>,
    mut req: Request,
    next: Next,
) -> WebResult<Response> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return Err(WebError::Unauthorized);
    };

    let Some(actor) = api_keys.actor_for(token).cloned() else {
        tracing::warn!("Invalid API key attempt");
        return Err(WebError::Unauthorized);
    };

    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}
