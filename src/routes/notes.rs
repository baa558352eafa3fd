//! Handlers for comments, status suggestions and suggestion approval.

use actix_web::{post, web, Responder};
use actix_web_flash_messages::FlashMessage;

use crate::forms::notes::{AddCommentForm, EditNoteForm, NoteIdForm, SuggestStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::redirect;
use crate::services::{notes as notes_service, ServiceError};

fn back_to(application_id: i32) -> String {
    format!("/applications/{application_id}")
}

#[post("/notes/add")]
pub async fn add_comment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCommentForm>,
) -> impl Responder {
    let detail_url = back_to(form.application_id);
    match notes_service::add_comment(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Comment added.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Application not found.").send();
            redirect("/applications")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&detail_url)
        }
        Err(err) => {
            log::error!("Failed to add the comment: {err}");
            FlashMessage::error("Failed to add the comment.").send();
            redirect(&detail_url)
        }
    }
}

#[post("/notes/suggest")]
pub async fn suggest_status(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SuggestStatusForm>,
) -> impl Responder {
    let detail_url = back_to(form.application_id);
    match notes_service::suggest_status(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Suggestion recorded.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Application not found.").send();
            redirect("/applications")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&detail_url)
        }
        Err(err) => {
            log::error!("Failed to record the suggestion: {err}");
            FlashMessage::error("Failed to record the suggestion.").send();
            redirect(&detail_url)
        }
    }
}

#[post("/notes/{application_id}/edit")]
pub async fn edit_note(
    application_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditNoteForm>,
) -> impl Responder {
    let detail_url = back_to(application_id.into_inner());
    match notes_service::edit_note(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Comment updated.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Comment not found.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&detail_url)
        }
        Err(err) => {
            log::error!("Failed to update the comment: {err}");
            FlashMessage::error("Failed to update the comment.").send();
            redirect(&detail_url)
        }
    }
}

#[post("/notes/{application_id}/delete")]
pub async fn delete_note(
    application_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<NoteIdForm>,
) -> impl Responder {
    let detail_url = back_to(application_id.into_inner());
    match notes_service::delete_note(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Comment deleted.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Comment not found.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&detail_url)
        }
        Err(err) => {
            log::error!("Failed to delete the comment: {err}");
            FlashMessage::error("Failed to delete the comment.").send();
            redirect(&detail_url)
        }
    }
}

#[post("/notes/{application_id}/approve")]
pub async fn approve_suggestion(
    application_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<NoteIdForm>,
) -> impl Responder {
    let detail_url = back_to(application_id.into_inner());
    match notes_service::approve_suggestion(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Suggestion approved.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Suggestion not found.").send();
            redirect(&detail_url)
        }
        Err(ServiceError::Repository(err)) => {
            log::error!("Failed to approve the suggestion: {err}");
            FlashMessage::error("This note cannot be approved.").send();
            redirect(&detail_url)
        }
        Err(err) => {
            log::error!("Failed to approve the suggestion: {err}");
            FlashMessage::error("Failed to approve the suggestion.").send();
            redirect(&detail_url)
        }
    }
}
