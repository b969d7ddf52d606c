use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use realm_gateway_sdk::{Credential, LoginError, RealmGatewayClient};
use tracing::field::Empty;

use super::dto::{HealthDto, LoginRequest, RealmInfoDto, SubjectDto};
use super::problem::Problem;

pub type ApiResult<T> = Result<T, Problem>;

/// Run the login flow for a username/password pair
///
/// # Errors
///
/// - 401 Problem for any credential or group failure
/// - 500 Problem if the gateway is misconfigured
/// - the extractor's 4xx status if the body is not a login request
#[tracing::instrument(skip_all, fields(outcome = Empty))]
pub async fn login(
    Extension(gateway): Extension<Arc<dyn RealmGatewayClient>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<SubjectDto>> {
    let Json(req) = body.map_err(|rejection| {
        // Rejection text may quote request values
        tracing::debug!(status = %rejection.status(), "Rejected login request body");
        let status = rejection.status();
        Problem::new(
            status,
            status.canonical_reason().unwrap_or("Bad Request"),
            "Malformed login request",
        )
    })?;

    let credential = Credential::from(req);
    match gateway.login(&credential).await {
        Ok(subject) => {
            tracing::Span::current().record("outcome", "committed");
            Ok(Json(SubjectDto::from(subject)))
        }
        Err(err) => {
            tracing::Span::current().record("outcome", "failed");
            Err(login_error_to_problem(&err))
        }
    }
}

/// Convert `LoginError` to an RFC-9457 Problem Details response.
fn login_error_to_problem(err: &LoginError) -> Problem {
    match err {
        LoginError::Failed => Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Login failed",
        ),
        LoginError::Misconfigured(_) => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Login is not available",
        ),
    }
}

/// Names of the realm served by this host
pub async fn realm_info(
    Extension(gateway): Extension<Arc<dyn RealmGatewayClient>>,
) -> Json<RealmInfoDto> {
    Json(RealmInfoDto::from(gateway.realm_info()))
}

pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
    })
}
