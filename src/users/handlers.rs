use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    storage::sanitize_filename,
    users::{
        dto::{LoginRequest, LoginResponse, PublicUser},
        password::{hash_password, verify_password},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/:user_id", get(get_user))
        .route("/login", post(login))
}

#[derive(Default)]
struct RegisterForm {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    profile_picture: Option<String>,
}

/// POST /users (multipart): text fields `name`, `email`, `password`,
/// optional file field `profilePicture`. The file is persisted under its
/// original filename before the insert runs, so it can outlive a failed
/// insert.
#[instrument(skip(state, multipart))]
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let mut form = RegisterForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        let part = field.name().map(|s| s.to_string());
        match part.as_deref() {
            Some("name") => {
                form.name = Some(text(field).await?);
            }
            Some("email") => {
                form.email = Some(text(field).await?);
            }
            Some("password") => {
                form.password = Some(text(field).await?);
            }
            Some("profilePicture") => {
                let filename = field.file_name().and_then(sanitize_filename);
                let Some(filename) = filename else {
                    warn!("profilePicture part without a usable filename, skipping");
                    continue;
                };
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Upload(e.to_string()))?;
                state
                    .storage
                    .save(&filename, data)
                    .await
                    .map_err(|e| ApiError::Upload(e.to_string()))?;
                form.profile_picture = Some(filename);
            }
            _ => {}
        }
    }

    // Argon2 is CPU-bound; keep it off the dispatch path. A missing
    // password is bound as NULL and left to the schema, per contract.
    let password_hash = match form.password.take() {
        Some(plain) => Some(
            tokio::task::spawn_blocking(move || hash_password(&plain))
                .await
                .map_err(|e| ApiError::Hash(e.to_string()))?
                .map_err(|e| ApiError::Hash(e.to_string()))?,
        ),
        None => None,
    };

    let id = User::create(
        &state.db,
        form.name.as_deref(),
        form.email.as_deref(),
        password_hash.as_deref(),
        form.profile_picture.as_deref(),
    )
    .await?;

    info!(user_id = id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(PublicUser {
            id,
            name: form.name,
            email: form.email,
            profile_picture: form.profile_picture,
        }),
    ))
}

/// POST /login: 404 for an unknown email, 401 for a bad password. The
/// split leaks account existence; that is this service's contract.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::UserNotFound);
        }
    };

    let stored_hash = user.password.clone();
    let plain = payload.password;
    let ok = tokio::task::spawn_blocking(move || verify_password(&plain, &stored_hash))
        .await
        .map_err(|e| ApiError::Hash(e.to_string()))?
        .map_err(|e| ApiError::Hash(e.to_string()))?;

    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::WrongPassword);
    }

    info!(user_id = user.id, "user logged in");
    Ok(Json(LoginResponse {
        user_id: user.id,
        status: "true",
    }))
}

/// GET /users/:userId: public fields only. Read-only, no side effects.
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> ApiResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(PublicUser {
        id: user.id,
        name: Some(user.name),
        email: Some(user.email),
        profile_picture: user.profile_picture,
    }))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))
}
