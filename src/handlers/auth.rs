// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::SESSION_COOKIE,
    models::{
        auth::{AuthResponse, LoginUserPayload, RegisterUserPayload},
        FormDescription, MessageResponse,
    },
    services::auth::present,
};

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

// GET /auth/login
pub async fn login_form() -> Json<FormDescription> {
    Json(FormDescription {
        action: "/auth/login",
        method: "POST",
        fields: vec!["phone", "password"],
    })
}

// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body(content = LoginUserPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logged in; also sets the session cookie", body = AuthResponse),
        (status = 401, description = "Wrong phone or password", body = MessageResponse)
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (user, token) = app_state
        .auth_service
        .login_user(payload.phone.as_deref(), payload.password.as_deref())
        .await?;

    let response = AuthResponse {
        message: format!("Welcome {}!", user.last_name),
        token: token.clone(),
    };
    Ok((jar.add(session_cookie(token)), Json(response)))
}

// GET /auth/register
pub async fn register_form() -> Json<FormDescription> {
    Json(FormDescription {
        action: "/auth/register",
        method: "POST",
        fields: vec!["firstName", "lastName", "phone", "password", "repeatPassword"],
    })
}

// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body(content = RegisterUserPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "User created and logged in", body = AuthResponse),
        (status = 400, description = "Missing parameters or passwords don't match", body = MessageResponse),
        (status = 409, description = "Phone already registered", body = MessageResponse)
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    if [
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
        payload.phone.as_deref(),
        payload.password.as_deref(),
    ]
    .into_iter()
    .any(|field| present(field).is_none())
    {
        return Err(AppError::MissingParameters);
    }

    if payload.password != payload.repeat_password {
        return Err(AppError::PasswordsDontMatch);
    }

    payload.validate()?;

    let user = app_state
        .auth_service
        .add_user(
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
            payload.phone.as_deref(),
            payload.password.as_deref(),
        )
        .await?;

    // Já entra logado, como no cadastro pelo site
    let token = app_state.auth_service.create_token(user.id)?;
    let response = AuthResponse {
        message: "User created successfully".to_string(),
        token: token.clone(),
    };

    Ok((StatusCode::CREATED, jar.add(session_cookie(token)), Json(response)))
}

// GET /auth/logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(MessageResponse::ok("Logged out")))
}
