use serde::Deserialize;

/// Urlencoded body of POST /login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Validated input to the registration flow. The optional upload has already
/// been persisted to the upload area by the handler; only its stored name
/// travels here.
#[derive(Debug)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub profile_image: Option<String>,
}
