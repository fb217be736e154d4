// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedAdmin, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    Extension,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

use super::error::HttpError;

/// Rejects the request with 401 unless it carries a live admin session.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedAdmin);

/// The caller's admin session, if any. A bad or expired token reads as `None`.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedAdmin>);

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|header| header.token().to_string())
}

async fn app_state<S>(parts: &mut Parts, state: &S) -> Result<HttpState, HttpError>
where
    S: Send + Sync,
{
    let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
        .await
        .map_err(|_| {
            HttpError::from_error(ApplicationError::infrastructure(
                "application state missing",
            ))
        })?;
    Ok(app_state)
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        let token = bearer_token(&parts.headers).ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized(
                "missing Authorization header",
            ))
        })?;

        let admin = app_state
            .services
            .authenticate(&token)
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(admin))
    }
}

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(Self(None));
        };

        match app_state.services.authenticate(&token).await {
            Ok(admin) => Ok(Self(Some(admin))),
            Err(ApplicationError::Unauthorized(_)) => Ok(Self(None)),
            Err(err) => Err(HttpError::from_error(err)),
        }
    }
}
