//! Handlers for the submission page, the applicant's listings and the
//! session endpoints.

use actix_identity::Identity;
use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::profile::Role;
use crate::forms::submission::SubmissionForm;
use crate::middleware::SIGNIN_PATH;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{main as main_service, submission as submission_service, ServiceError};
use crate::storage::DocumentStore;

/// Where to send a signed-in user whose role does not fit the page they
/// asked for.
fn role_home(user: &AuthenticatedUser) -> &'static str {
    match user.parsed_role() {
        Some(Role::Expert) | Some(Role::Executive) => "/applications",
        _ => "/na",
    }
}

#[get("/")]
pub async fn show_index(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_index_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "submit", &server_config.auth_service_url);
            context.insert("fields", &data.fields);
            context.insert("municipalities", &data.municipalities);
            context.insert("age_groups", &data.age_groups);

            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(role_home(&user)),
        Err(err) => {
            log::error!("Failed to load the submission page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/applications/add")]
pub async fn add_application(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<DocumentStore>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<SubmissionForm>,
) -> impl Responder {
    match submission_service::submit_application(repo.get_ref(), &user, form, store.get_ref()) {
        Ok(outcome) => {
            let mut context =
                base_context(&flash_messages, &user, "submit", &server_config.auth_service_url);
            context.insert("application", &outcome.summary.application);
            context.insert("history", &outcome.summary.history);
            context.insert("skipped_documents", &outcome.skipped_documents);

            render_template(&tera, "main/summary.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect(role_home(&user))
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to submit the application: {err}");
            FlashMessage::error("Failed to submit the application.").send();
            redirect("/")
        }
    }
}

#[get("/my")]
pub async fn my_applications(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_my_applications(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context =
                base_context(&flash_messages, &user, "my", &server_config.auth_service_url);
            context.insert("applications", &data.applications);

            render_template(&tera, "main/my_applications.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(role_home(&user)),
        Err(err) => {
            log::error!("Failed to load the applicant's submissions: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/na")]
pub async fn not_assigned(flash_messages: IncomingFlashMessages, tera: web::Data<Tera>) -> impl Responder {
    let alerts: Vec<(String, &str)> = flash_messages
        .iter()
        .map(|message| {
            (
                message.content().to_string(),
                crate::routes::alert_level_to_str(&message.level()),
            )
        })
        .collect();

    let mut context = tera::Context::new();
    context.insert("alerts", &alerts);
    render_template(&tera, "main/not_assigned.html", &context)
}

#[get("/auth/signin")]
pub async fn signin(server_config: web::Data<ServerConfig>) -> impl Responder {
    redirect(&server_config.auth_service_url)
}

#[get("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect(SIGNIN_PATH)
}
