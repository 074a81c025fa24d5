// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Openboard Contributors

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::authenticate,
    models::{GoogleAuthRequest, SignInRequest, SignUpRequest, TokenResponse, UserResponse},
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/google", post(auth::google_auth))
        .route("/user", get(users::get_sign_in_user))
        .with_state(state.clone());

    Router::new()
        .nest("/api/v1", v1_routes)
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(state, authenticate))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::sign_up,
        auth::sign_in,
        auth::google_auth,
        users::get_sign_in_user,
        health::health
    ),
    components(
        schemas(
            SignUpRequest,
            SignInRequest,
            GoogleAuthRequest,
            TokenResponse,
            UserResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Sign-up, sign-in, and federated sign-in"),
        (name = "Users", description = "Account lookup"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;
