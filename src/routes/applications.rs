//! Handlers for the review listing, the detail page, executive actions
//! and document downloads.

use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::applications::{ApplicationsQuery, AssignExpertForm, SetStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::PER_PAGE_OPTIONS;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{applications as applications_service, ServiceError};
use crate::storage::DocumentStore;

#[get("/applications")]
pub async fn show_applications(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query: ApplicationsQuery =
        serde_html_form::from_str(request.query_string()).unwrap_or_default();

    match applications_service::load_applications_page(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "applications",
                &server_config.auth_service_url,
            );
            context.insert("applications", &data.applications);
            context.insert("statuses", &data.statuses);
            context.insert("fields", &data.fields);
            context.insert("municipalities", &data.municipalities);
            context.insert("experts", &data.experts);
            context.insert("query", &query);
            context.insert("per_page_options", &PER_PAGE_OPTIONS);

            render_template(&tera, "applications/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load the applications list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/applications/{application_id}")]
pub async fn show_application(
    application_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match applications_service::load_application_detail(
        repo.get_ref(),
        &user,
        application_id.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "applications",
                &server_config.auth_service_url,
            );
            context.insert("application", &data.application);
            context.insert("notes", &data.notes);
            context.insert("history", &data.history);
            context.insert("statuses", &data.statuses);
            context.insert("experts", &data.experts);
            context.insert("can_edit_status", &data.can_edit_status);
            context.insert("can_suggest", &data.can_suggest);
            context.insert("can_comment", &data.can_comment);

            render_template(&tera, "applications/detail.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Application not found.").send();
            redirect("/applications")
        }
        Err(err) => {
            log::error!("Failed to load the application: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/applications/status")]
pub async fn set_status(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SetStatusForm>,
) -> impl Responder {
    let detail_url = format!("/applications/{}", form.application_id);
    match applications_service::set_status(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Status updated.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Application or status not found.").send();
            redirect("/applications")
        }
        Err(err) => {
            log::error!("Failed to update the status: {err}");
            FlashMessage::error("Failed to update the status.").send();
            redirect(&detail_url)
        }
    }
}

#[post("/applications/assign")]
pub async fn assign_expert(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AssignExpertForm>,
) -> impl Responder {
    let detail_url = format!("/applications/{}", form.application_id);
    match applications_service::assign_expert(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Expert assignment updated.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Application or expert not found.").send();
            redirect("/applications")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&detail_url)
        }
        Err(err) => {
            log::error!("Failed to assign the expert: {err}");
            FlashMessage::error("Failed to assign the expert.").send();
            redirect(&detail_url)
        }
    }
}

#[get("/documents/{application_id}/{index}")]
pub async fn download_document(
    path: web::Path<(i32, usize)>,
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<DocumentStore>,
) -> actix_web::Result<HttpResponse> {
    let (application_id, index) = path.into_inner();

    let descriptor =
        match applications_service::document_for_download(repo.get_ref(), &user, application_id, index)
        {
            Ok(descriptor) => descriptor,
            Err(ServiceError::Unauthorized) => return Ok(HttpResponse::Unauthorized().finish()),
            Err(ServiceError::NotFound) => return Ok(HttpResponse::NotFound().finish()),
            Err(err) => {
                log::error!("Failed to resolve the document: {err}");
                return Ok(HttpResponse::InternalServerError().finish());
            }
        };

    let Some(path) = store.resolve(&descriptor.url) else {
        return Ok(HttpResponse::NotFound().finish());
    };

    let file = NamedFile::open(path)?.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(descriptor.name)],
    });

    Ok(file.into_response(&request))
}
