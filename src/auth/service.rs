use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::dto::NewProfile;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::store::{UserRecord, DEFAULT_PROFILE_IMAGE};
use crate::error::AppError;
use crate::state::AppState;

/// What happened to the stored image while deleting a profile. A cleanup
/// failure is reported to the caller but never rolls back the record removal.
#[derive(Debug)]
pub enum ImageCleanup {
    NotNeeded,
    Removed,
    Failed(AppError),
}

pub async fn register(state: &AppState, new: NewProfile) -> Result<UserRecord, AppError> {
    if state.users.exists(&new.email).await {
        warn!(email = %new.email, "signup for existing user");
        return Err(AppError::DuplicateUser);
    }

    let password_hash =
        hash_password(&new.password).map_err(|e| AppError::Hashing(e.to_string()))?;

    let record = UserRecord {
        first_name: new.first_name,
        last_name: new.last_name,
        email: new.email,
        password_hash,
        profile_image: new
            .profile_image
            .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.into()),
        created_at: OffsetDateTime::now_utc(),
    };

    // insert re-checks under the store lock, so a concurrent signup racing
    // past the exists() check above still cannot produce two records
    state.users.insert(record.clone()).await?;

    info!(email = %record.email, "user registered");
    Ok(record)
}

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<UserRecord, AppError> {
    // unknown email and wrong password must stay indistinguishable to the client
    let Some(user) = state.users.find_by_email(email).await else {
        warn!(email = %email, "login for unknown email");
        return Err(AppError::InvalidCredentials);
    };

    let ok = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::Hashing(e.to_string()))?;
    if !ok {
        warn!(email = %email, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    info!(email = %user.email, "user logged in");
    Ok(user)
}

pub async fn delete_profile(state: &AppState, email: &str) -> Result<ImageCleanup, AppError> {
    let Some(removed) = state.users.remove_by_email(email).await else {
        return Err(AppError::UserNotFound);
    };
    info!(email = %removed.email, "user removed");

    if !removed.has_custom_image() {
        return Ok(ImageCleanup::NotNeeded);
    }

    match state.uploads.delete(&removed.profile_image).await {
        Ok(()) => Ok(ImageCleanup::Removed),
        Err(source) => Ok(ImageCleanup::Failed(AppError::ImageCleanup {
            filename: removed.profile_image,
            source,
        })),
    }
}
