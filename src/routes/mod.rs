//! HTTP handlers and the template helpers they share.

use actix_web::http::header;
use actix_web::HttpResponse;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;

pub mod applications;
pub mod dashboard;
pub mod main;
pub mod notes;

/// Issues a SEE OTHER redirect to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Maps a flash message level to the Bootstrap alert class suffix.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

/// Renders a template to an HTML response, logging render failures.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render {template}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Builds the context every page template expects: the signed-in user,
/// pending alerts, the active menu item and the auth service URL.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    active_menu: &str,
    auth_service_url: &str,
) -> Context {
    let alerts: Vec<(String, &str)> = flash_messages
        .iter()
        .map(|message| {
            (
                message.content().to_string(),
                alert_level_to_str(&message.level()),
            )
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("home_url", &auth_service_url);
    context.insert("active_menu", active_menu);
    context
}
