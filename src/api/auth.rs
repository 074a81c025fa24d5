// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! Authentication endpoints.

use axum::{extract::State, Json};

use crate::{
    auth::{token::TOKEN_TTL_SECS, AuthError},
    error::ApiError,
    models::{GoogleAuthRequest, SignInRequest, SignUpRequest, TokenResponse},
    state::AppState,
};

/// Register a new password-owned account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    request_body = SignUpRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Account created"),
        (status = 400, description = "Blank field in request"),
        (status = 409, description = "Email or nickname already taken"),
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(), ApiError> {
    require_filled(&[
        ("email", request.email.as_str()),
        ("password", request.password.as_str()),
        ("nickname", request.nickname.as_str()),
    ])?;

    state
        .auth
        .sign_up(&request.email, &request.nickname, &request.password)
        .await
        .map_err(auth_error)
}

/// Exchange a password credential for a session token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Session token issued", body = TokenResponse),
        (status = 401, description = "Sign-in information does not match"),
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .auth
        .sign_in(&request.email, &request.password)
        .await
        .map_err(auth_error)?;

    Ok(Json(TokenResponse {
        token,
        expires_in: TOKEN_TTL_SECS,
    }))
}

/// Exchange a Google ID token for a session token, provisioning an
/// account on first sign-in.
#[utoipa::path(
    post,
    path = "/api/v1/auth/google",
    request_body = GoogleAuthRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Session token issued", body = TokenResponse),
        (status = 401, description = "Identity token rejected"),
        (status = 409, description = "Email owned by a password account"),
    )
)]
pub async fn google_auth(
    State(state): State<AppState>,
    Json(request): Json<GoogleAuthRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .auth
        .google_auth(&request.id_token)
        .await
        .map_err(auth_error)?;

    Ok(Json(TokenResponse {
        token,
        expires_in: TOKEN_TTL_SECS,
    }))
}

/// Map an auth outcome onto the transport error shape.
fn auth_error(err: AuthError) -> ApiError {
    ApiError::new(err.status_code(), err.to_string())
}

fn require_filled(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ApiError::bad_request(format!("{name} must not be blank")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{FederatedClaims, TokenService};
    use crate::state::test_support::{state_with_verifier, test_state, TEST_SECRET};
    use axum::http::StatusCode;

    fn sign_up_request(email: &str, nickname: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "hunter2".to_string(),
            nickname: nickname.to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trip() {
        let state = test_state();

        sign_up(State(state.clone()), Json(sign_up_request("a@b.c", "alice")))
            .await
            .expect("sign-up succeeds");

        let Json(response) = sign_in(
            State(state),
            Json(SignInRequest {
                email: "a@b.c".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await
        .expect("sign-in succeeds");

        assert_eq!(response.expires_in, TOKEN_TTL_SECS);
        let tokens = TokenService::new(TEST_SECRET);
        assert_eq!(tokens.validate(&response.token), Some("a@b.c".to_string()));
    }

    #[tokio::test]
    async fn sign_up_rejects_blank_fields() {
        let state = test_state();
        let err = sign_up(State(state), Json(sign_up_request("  ", "alice")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_sign_up_conflicts() {
        let state = test_state();
        sign_up(State(state.clone()), Json(sign_up_request("a@b.c", "alice")))
            .await
            .unwrap();

        let same_email = sign_up(State(state.clone()), Json(sign_up_request("a@b.c", "bob")))
            .await
            .unwrap_err();
        assert_eq!(same_email.status, StatusCode::CONFLICT);

        let same_nickname = sign_up(State(state), Json(sign_up_request("x@y.z", "alice")))
            .await
            .unwrap_err();
        assert_eq!(same_nickname.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn sign_in_with_bad_credentials_is_unauthorized() {
        let state = test_state();
        let err = sign_in(
            State(state),
            Json(SignInRequest {
                email: "ghost@b.c".to_string(),
                password: "whatever".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn google_auth_issues_token_for_verified_claims() {
        let state = state_with_verifier(Some(FederatedClaims {
            email: "new@gmail.com".to_string(),
            name: Some("Alice".to_string()),
            picture: None,
        }));

        let Json(response) = google_auth(
            State(state),
            Json(GoogleAuthRequest {
                id_token: "provider-token".to_string(),
            }),
        )
        .await
        .expect("federated sign-in succeeds");

        let tokens = TokenService::new(TEST_SECRET);
        assert_eq!(
            tokens.validate(&response.token),
            Some("new@gmail.com".to_string())
        );
    }

    #[tokio::test]
    async fn google_auth_with_rejected_token_is_unauthorized() {
        let state = test_state();
        let err = google_auth(
            State(state),
            Json(GoogleAuthRequest {
                id_token: "rejected".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
