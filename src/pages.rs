use axum::{extract::State, response::Html, routing::get, Router};

use crate::auth::store::UserRecord;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/signup", get(signup))
        .route("/login", get(login))
        .route("/register", get(register))
        .route("/profile", get(profile))
}

async fn index() -> Html<String> {
    Html(render_index(None))
}

async fn signup() -> Html<String> {
    Html(render_signup(None))
}

async fn login() -> Html<String> {
    Html(render_login())
}

async fn register() -> Html<String> {
    Html(render_register())
}

async fn profile(State(state): State<AppState>) -> Html<String> {
    let users = state.users.list().await;
    Html(render_profile(&users))
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape_html(e)))
        .unwrap_or_default()
}

fn login_form() -> &'static str {
    "<form method=\"post\" action=\"/login\">\n\
     <input name=\"email\" type=\"text\" placeholder=\"Email\">\n\
     <input name=\"password\" type=\"password\" placeholder=\"Password\">\n\
     <button type=\"submit\">Log in</button>\n\
     </form>"
}

pub fn render_index(error: Option<&str>) -> String {
    let body = format!(
        "<h1>pinboard</h1>\n{}{}\n<p><a href=\"/signup\">Sign up</a></p>",
        error_banner(error),
        login_form()
    );
    page("pinboard", &body)
}

pub fn render_signup(error: Option<&str>) -> String {
    let body = format!(
        "<h1>Sign up</h1>\n{}\
         <form method=\"post\" action=\"/signup\" enctype=\"multipart/form-data\">\n\
         <input name=\"firstName\" type=\"text\" placeholder=\"First name\">\n\
         <input name=\"lastName\" type=\"text\" placeholder=\"Last name\">\n\
         <input name=\"email\" type=\"text\" placeholder=\"Email\">\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\n\
         <input name=\"profileImage\" type=\"file\" accept=\"image/*\">\n\
         <button type=\"submit\">Create account</button>\n\
         </form>",
        error_banner(error)
    );
    page("Sign up", &body)
}

pub fn render_login() -> String {
    let body = format!("<h1>Log in</h1>\n{}", login_form());
    page("Log in", &body)
}

pub fn render_register() -> String {
    let body = "<h1>Register</h1>\n<p><a href=\"/signup\">Create an account</a></p>";
    page("Register", body)
}

pub fn render_profile(users: &[UserRecord]) -> String {
    let mut items = String::new();
    for user in users {
        items.push_str(&format!(
            "<li><img src=\"/uploads/{image}\" alt=\"profile\" width=\"80\"> {first} {last} &mdash; {email}</li>\n",
            image = escape_html(&user.profile_image),
            first = escape_html(&user.first_name),
            last = escape_html(&user.last_name),
            email = escape_html(&user.email),
        ));
    }
    let body = format!("<h1>Profiles</h1>\n<ul>\n{items}</ul>");
    page("Profiles", &body)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
