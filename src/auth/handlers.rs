use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::Redirect,
    routing::{delete, post},
    Form, Router,
};
use bytes::Bytes;
use tracing::{instrument, warn};

use crate::auth::dto::{LoginForm, NewProfile};
use crate::auth::service::{self, ImageCleanup};
use crate::error::AppError;
use crate::state::AppState;
use crate::uploads::sanitize_filename;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/profile/:email", delete(delete_profile))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// POST /signup (multipart: text fields plus an optional profileImage file).
#[instrument(skip(state, multipart))]
pub async fn signup(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let parts = read_signup_parts(&mut multipart).await?;

    let stored_name = parts.upload.as_ref().map(|(name, _)| name.clone());
    let new = NewProfile {
        first_name: required(parts.first_name, "firstName")?,
        last_name: required(parts.last_name, "lastName")?,
        email: required(parts.email, "email")?,
        password: required(parts.password, "password")?,
        profile_image: stored_name.clone(),
    };

    // the upload area is filled before the registration flow runs; the flow
    // itself only records the stored name
    if let Some((filename, body)) = parts.upload {
        state.uploads.save(&filename, body).await?;
    }

    match service::register(&state, new).await {
        Ok(_) => Ok(Redirect::to("/profile")),
        Err(err) => {
            // a rejected signup must leave no file behind
            if matches!(err, AppError::DuplicateUser) {
                if let Some(name) = stored_name {
                    if let Err(e) = state.uploads.delete(&name).await {
                        warn!(error = %e, filename = %name, "failed to discard upload of rejected signup");
                    }
                }
            }
            Err(err)
        }
    }
}

/// POST /login (urlencoded form). No session is issued; the redirect is the
/// whole success signal.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    service::login(&state, &form.email, &form.password).await?;
    Ok(Redirect::to("/profile"))
}

/// DELETE /profile/:email
#[instrument(skip(state))]
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Redirect, AppError> {
    match service::delete_profile(&state, &email).await? {
        ImageCleanup::Failed(err) => {
            // non-fatal: the record is already gone
            warn!(error = %err, "profile image cleanup failed");
        }
        ImageCleanup::NotNeeded | ImageCleanup::Removed => {}
    }
    Ok(Redirect::to("/profile"))
}

#[derive(Default)]
struct SignupParts {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    upload: Option<(String, Bytes)>,
}

async fn read_signup_parts(multipart: &mut Multipart) -> Result<SignupParts, AppError> {
    let mut parts = SignupParts::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_body)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "firstName" => parts.first_name = Some(field.text().await.map_err(bad_body)?),
            "lastName" => parts.last_name = Some(field.text().await.map_err(bad_body)?),
            "email" => parts.email = Some(field.text().await.map_err(bad_body)?),
            "password" => parts.password = Some(field.text().await.map_err(bad_body)?),
            "profileImage" => {
                // a file input left empty still submits a part, with an empty filename
                let Some(filename) = field.file_name().and_then(sanitize_filename) else {
                    continue;
                };
                let body = field.bytes().await.map_err(bad_body)?;
                if !body.is_empty() {
                    parts.upload = Some((filename, body));
                }
            }
            _ => {}
        }
    }
    Ok(parts)
}

fn required(value: Option<String>, name: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingField(name)),
    }
}

fn bad_body(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Internal(anyhow::anyhow!(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_accepts_non_empty_text() {
        assert_eq!(
            required(Some("Ada".into()), "firstName").expect("accepted"),
            "Ada"
        );
    }

    #[test]
    fn required_rejects_missing_and_blank() {
        assert!(matches!(
            required(None, "email"),
            Err(AppError::MissingField("email"))
        ));
        assert!(matches!(
            required(Some("   ".into()), "password"),
            Err(AppError::MissingField("password"))
        ));
    }
}
