use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{
        LoginPayload, LoginResponse, LoginUser, MessageResponse, ProfileQuery, ProfileResponse,
        RegisterPayload, RegisterResponse, UpdateProfilePayload,
    },
    error::{Error, Result},
    utils::{
        extract::{AppJson, AppQuery},
        token::Claims,
    },
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Identity",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful".into(),
            user,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Identity",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let role = payload.role()?;
    let outcome = state
        .user_service
        .login(&payload.email, &payload.password, role)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user: LoginUser {
            id: outcome.user.id,
            email: outcome.user.email,
            role,
            profile: outcome.profile,
        },
        token: outcome.token,
    }))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Identity",
    params(("userId" = i64, Query, description = "User ID")),
    responses(
        (status = 200, description = "Merged profile", body = ProfileResponse),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppQuery(query): AppQuery<ProfileQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query
        .user_id
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::BadRequest("User ID required".into()))?;
    claims.ensure_self_or_admin(user_id)?;

    let profile = state.user_service.get_profile(user_id).await?;
    Ok(Json(ProfileResponse {
        success: true,
        profile,
    }))
}

#[utoipa::path(
    post,
    path = "/api/update-profile",
    tag = "Identity",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    let user_id = payload
        .user_id
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::BadRequest("User ID required".into()))?;
    claims.ensure_self_or_admin(user_id)?;

    state.user_service.update_profile(user_id, payload).await?;
    Ok(Json(MessageResponse::ok("Profile updated successfully")))
}
