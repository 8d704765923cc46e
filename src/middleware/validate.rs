//! Per-route request validation.
//!
//! Runs a `ValidationRule` over `{params, query, body}` before the guard
//! and the handler. The parsed body is left in request extensions as
//! `ValidatedBody` for `ValidatedJson`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{
        FromRequest, Query, RawPathParams, Request, State,
        rejection::{QueryRejection, RawPathParamsRejection},
    },
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::services::validation::{FieldError, RequestData, ValidationError, ValidationRule};

/// Body as parsed by the validator (`Null` when the request had none).
#[derive(Debug, Clone)]
pub struct ValidatedBody(pub Value);

/// Put `rule` in front of `route`. Apply it outside any guard.
///
/// Only matched methods are validated; others still get 405.
pub fn apply<S>(rule: ValidationRule, route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(Arc::new(rule), validate_request))
}

async fn validate_request(
    State(rule): State<Arc<ValidationRule>>,
    params: Result<RawPathParams, RawPathParamsRejection>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let params: Map<String, Value> = params
        .map(|params| {
            params
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect()
        })
        .unwrap_or_default();

    let query: Map<String, Value> = match query {
        Ok(Query(query)) => query
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect(),
        Err(_) => return Err(shape_error(&rule, "query", "is malformed")),
    };

    let (mut parts, body) = req.into_parts();
    let bytes = match Bytes::from_request(Request::new(body), &()).await {
        Ok(bytes) => bytes,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge);
        }
        Err(_) => return Err(shape_error(&rule, "body", "could not be read")),
    };

    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).map_err(|_| shape_error(&rule, "body", "is not valid JSON"))?
    };

    let data = RequestData::new(params, query, body);
    if let Err(err) = rule.validate(&data) {
        tracing::debug!(rule = rule.name(), error = %err, "request rejected by validator");
        return Err(err.into());
    }

    let body = data.resolve("body").cloned().unwrap_or(Value::Null);
    parts.extensions.insert(ValidatedBody(body));

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

fn shape_error(rule: &ValidationRule, path: &str, message: &str) -> AppError {
    AppError::Validation(ValidationError::FieldShape {
        rule: rule.name().to_string(),
        errors: vec![FieldError {
            path: path.to_string(),
            message: message.to_string(),
        }],
    })
}
