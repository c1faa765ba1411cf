//! Reply construction and rejection recovery

use pokebox_core::{ApiError, AuthError, ErrorKind};
use serde::Serialize;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

/// Rejection raised by the bearer-token filter
#[derive(Debug)]
pub struct Unauthorized(pub AuthError);

impl warp::reject::Reject for Unauthorized {}

/// JSON reply with an explicit status
pub fn json<T: Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

/// Empty 204 reply
pub fn no_content() -> Response {
    warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT).into_response()
}

/// Reply describing `err`
pub fn error(err: &ApiError) -> Response {
    if err.kind() == ErrorKind::Internal {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, "request rejected");
    }
    json(&err.body(), status_of(err.kind()))
}

/// Reply for a handler outcome
pub fn outcome<T: Serialize>(result: Result<T, ApiError>, status: StatusCode) -> Response {
    match result {
        Ok(value) => json(&value, status),
        Err(err) => error(&err),
    }
}

fn status_of(kind: ErrorKind) -> StatusCode {
    StatusCode::from_u16(kind.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Turn any rejection into an error body
pub async fn recover(rejection: Rejection) -> Result<Response, Infallible> {
    let err = if let Some(Unauthorized(auth)) = rejection.find::<Unauthorized>() {
        ApiError::Unauthorized(auth.clone())
    } else if let Some(e) = rejection.find::<warp::body::BodyDeserializeError>() {
        ApiError::BadInput(format!("invalid JSON body: {e}"))
    } else if let Some(e) = rejection.find::<warp::reject::InvalidQuery>() {
        ApiError::BadInput(e.to_string())
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        ApiError::BadInput("request body too large".to_string())
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        ApiError::BadInput("content-length header required".to_string())
    } else if rejection.find::<warp::reject::UnsupportedMediaType>().is_some() {
        ApiError::BadInput("expected an application/json body".to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::BadInput("method not allowed".to_string())
    } else if rejection.is_not_found() {
        ApiError::NotFound("no such route".to_string())
    } else {
        ApiError::Internal(format!("unhandled rejection: {rejection:?}"))
    };
    Ok(error(&err))
}
