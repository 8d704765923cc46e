//! Route guards: predicates over AuthCtx.
//!
//! A failed guard answers 403 with the bare `Not Authorized` title. The
//! response never says which condition failed.

use axum::{
    extract::{RawPathParams, Request, State, rejection::RawPathParamsRejection},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;

/// Path parameter compared by `OnlyLoggedMe`.
pub const USERNAME_PARAM: &str = "username";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    OnlyAdmin,
    OnlyActiveBuddy,
    OnlyComer,
    OnlyActiveBuddyOrComer,
    OnlyLoggedMe,
    AnyOf(Vec<Guard>),
    AllOf(Vec<Guard>),
}

impl Guard {
    /// `route_username` is the `{username}` path parameter, if the route has one.
    pub fn permits(&self, ctx: &AuthCtx, route_username: Option<&str>) -> bool {
        match self {
            Self::OnlyAdmin => ctx.is_admin(),
            Self::OnlyActiveBuddy => ctx.role().is_some_and(|r| r.is_active_buddy()),
            Self::OnlyComer => ctx.role().is_some_and(|r| r.is_comer()),
            Self::OnlyActiveBuddyOrComer => ctx
                .role()
                .is_some_and(|r| r.is_active_buddy() || r.is_comer()),
            Self::OnlyLoggedMe => match (ctx.username(), route_username) {
                (Some(me), Some(param)) => me == param,
                _ => false,
            },
            Self::AnyOf(guards) => guards.iter().any(|g| g.permits(ctx, route_username)),
            Self::AllOf(guards) => {
                !guards.is_empty() && guards.iter().all(|g| g.permits(ctx, route_username))
            }
        }
    }

    pub fn any_of(guards: impl IntoIterator<Item = Guard>) -> Self {
        Self::AnyOf(guards.into_iter().collect())
    }

    pub fn all_of(guards: impl IntoIterator<Item = Guard>) -> Self {
        Self::AllOf(guards.into_iter().collect())
    }
}

/// Put `guard` in front of `route`.
pub fn apply<S>(guard: Guard, route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(guard, enforce))
}

async fn enforce(
    State(guard): State<Guard>,
    ctx: AuthCtx,
    params: Result<RawPathParams, RawPathParamsRejection>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let route_username = params.ok().and_then(|params| {
        params
            .iter()
            .find(|(key, _)| *key == USERNAME_PARAM)
            .map(|(_, value)| value.to_string())
    });

    if guard.permits(&ctx, route_username.as_deref()) {
        return Ok(next.run(req).await);
    }

    tracing::info!(
        guard = ?guard,
        username = ctx.username().unwrap_or("-"),
        path = %req.uri().path(),
        "guard refused request"
    );
    Err(AppError::Forbidden)
}
