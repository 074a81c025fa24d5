// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

//! User endpoints.

use axum::{extract::State, Json};

use crate::{
    auth::CurrentUser,
    error::ApiError,
    models::UserResponse,
    state::AppState,
    store::AccountStore,
};

/// Get the signed-in user's account.
#[utoipa::path(
    get,
    path = "/api/v1/user",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Signed-in user's account", body = UserResponse),
        (status = 401, description = "No signed-in user"),
        (status = 404, description = "Account no longer exists"),
    )
)]
pub async fn get_sign_in_user(
    CurrentUser(identity): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let account = state
        .accounts
        .find_by_email(&identity.email)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "account lookup failed");
            ApiError::internal("account lookup failed")
        })?
        .ok_or_else(|| ApiError::not_found("account not found"))?;

    Ok(Json(account.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RequestIdentity;
    use crate::models::Account;
    use crate::state::test_support::test_state;
    use axum::http::StatusCode;

    fn identity(email: &str) -> CurrentUser {
        CurrentUser(RequestIdentity::authenticated(email))
    }

    #[tokio::test]
    async fn returns_signed_in_account() {
        let state = test_state();
        state
            .accounts
            .save(Account::federated(
                "a@b.c",
                "alice",
                Some("https://pic".to_string()),
            ))
            .await
            .unwrap();

        let Json(user) = get_sign_in_user(identity("a@b.c"), State(state))
            .await
            .expect("lookup succeeds");

        assert_eq!(user.email, "a@b.c");
        assert_eq!(user.nickname, "alice");
        assert_eq!(user.profile_image.as_deref(), Some("https://pic"));
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let state = test_state();
        let err = get_sign_in_user(identity("ghost@b.c"), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
