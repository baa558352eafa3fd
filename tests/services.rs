use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use std::io::Write;

use innovation_portal::domain::application::{DocumentDescriptor, NewApplication};
use innovation_portal::domain::note::NewNote;
use innovation_portal::domain::profile::{NewProfile, Role};
use innovation_portal::domain::types::{AgeGroup, Description, NoteBody, Title};
use innovation_portal::forms::applications::{ApplicationsQuery, SetStatusForm};
use innovation_portal::forms::notes::{AddCommentForm, NoteIdForm, SuggestStatusForm};
use innovation_portal::forms::submission::SubmissionForm;
use innovation_portal::models::auth::AuthenticatedUser;
use innovation_portal::repository::{
    ApplicationWriter, DieselRepository, LookupReader, NoteReader, NoteWriter, ProfileWriter,
};
use innovation_portal::services::{
    applications as applications_service, dashboard as dashboard_service, main as main_service,
    notes as notes_service, submission as submission_service, ServiceError,
};
use innovation_portal::storage::DocumentStore;

mod common;

fn user(email: &str, role: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: email.to_string(),
        first_name: "Test".to_string(),
        last_name: role.to_string(),
        role: role.to_string(),
        exp: 10_000_000_000,
    }
}

fn profile(repo: &DieselRepository, email: &str, role: Role) -> i32 {
    repo.create_or_update_profile(&NewProfile::new(
        "Test".into(),
        "User".into(),
        email.into(),
        role,
    ))
    .unwrap()
    .id
}

fn seed_application(repo: &DieselRepository, applicant_id: i32) -> i32 {
    let status_id = repo.get_status_by_label("New").unwrap().unwrap().id;
    repo.create_application(
        &NewApplication {
            title: Title::try_from("Solar-powered irrigation").unwrap(),
            description: Description::try_from(
                "A low-cost solar pump kit for smallholder farms, bundled with a scheduling \
                 controller that waters crops based on soil moisture readings.",
            )
            .unwrap(),
            age_group: AgeGroup::Students,
            prototype_url: None,
            documents: vec![DocumentDescriptor {
                name: "pitch.pdf".into(),
                url: "/uploads/abc_pitch.pdf".into(),
                mime: "application/pdf".into(),
                size: 2048,
            }],
            applicant_id,
            field_id: 1,
            municipality_id: 1,
        },
        status_id,
    )
    .unwrap()
    .id
}

fn submission_form(title: &str, description: &str, documents: Vec<TempFile>) -> SubmissionForm {
    SubmissionForm {
        title: Text(title.to_string()),
        description: Text(description.to_string()),
        age_group: Text(AgeGroup::Students.label().to_string()),
        field_id: Text(1),
        municipality_id: Text(1),
        prototype_url: None,
        documents,
    }
}

const LONG_DESCRIPTION: &str = "A low-cost solar pump kit for smallholder farms, bundled with a \
    scheduling controller that waters crops based on soil moisture readings.";

fn pdf_upload(name: &str) -> TempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"%PDF-1.4").unwrap();
    TempFile {
        file,
        content_type: Some(mime::APPLICATION_PDF),
        file_name: Some(name.to_string()),
        size: 8,
    }
}

#[test]
fn test_submit_application_end_to_end() {
    let test_db = common::TestDb::new("test_submit_application_end_to_end.db");
    let repo = DieselRepository::new(test_db.pool());
    let uploads = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(uploads.path()).unwrap();

    let applicant = user("applicant@example.com", "applicant");
    let form = submission_form(
        "Solar-powered irrigation",
        LONG_DESCRIPTION,
        vec![pdf_upload("pitch.pdf")],
    );

    let outcome =
        submission_service::submit_application(&repo, &applicant, form, &store).unwrap();
    assert!(outcome.skipped_documents.is_empty());
    let summary = outcome.summary;
    assert_eq!(summary.application.status_label, "New");
    assert_eq!(summary.application.documents.len(), 1);
    assert_eq!(summary.application.documents[0].name, "pitch.pdf");
    assert_eq!(summary.history.len(), 1);

    // The applicant profile was created from the token claims.
    let my = main_service::load_my_applications(&repo, &applicant).unwrap();
    assert_eq!(my.applications.len(), 1);
}

#[test]
fn test_submit_application_validates_fields() {
    let test_db = common::TestDb::new("test_submit_application_validates_fields.db");
    let repo = DieselRepository::new(test_db.pool());
    let uploads = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(uploads.path()).unwrap();
    let applicant = user("applicant@example.com", "applicant");

    let short_title = submission_form("Too short", LONG_DESCRIPTION, vec![]);
    assert!(matches!(
        submission_service::submit_application(&repo, &applicant, short_title, &store),
        Err(ServiceError::Form(_))
    ));

    let short_description =
        submission_form("Solar-powered irrigation", "Not enough detail", vec![]);
    assert!(matches!(
        submission_service::submit_application(&repo, &applicant, short_description, &store),
        Err(ServiceError::Form(_))
    ));

    let reviewer = user("expert@example.com", "expert");
    let form = submission_form("Solar-powered irrigation", LONG_DESCRIPTION, vec![]);
    assert!(matches!(
        submission_service::submit_application(&repo, &reviewer, form, &store),
        Err(ServiceError::Unauthorized)
    ));
}

#[test]
fn test_submit_application_skips_rejected_uploads() {
    let test_db = common::TestDb::new("test_submit_application_skips_rejected_uploads.db");
    let repo = DieselRepository::new(test_db.pool());
    let uploads = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(uploads.path()).unwrap();
    let applicant = user("applicant@example.com", "applicant");

    let mut text_file = tempfile::NamedTempFile::new().unwrap();
    text_file.write_all(b"plain text").unwrap();
    let wrong_type = TempFile {
        file: text_file,
        content_type: Some(mime::TEXT_PLAIN),
        file_name: Some("notes.txt".to_string()),
        size: 10,
    };

    // A file over the size cap must only skip itself, never blow up the
    // whole submission.
    let mut oversize = pdf_upload("film.pdf");
    oversize.size = 15 * 1024 * 1024;

    let form = submission_form(
        "Solar-powered irrigation",
        LONG_DESCRIPTION,
        vec![pdf_upload("pitch.pdf"), wrong_type, oversize],
    );
    let outcome =
        submission_service::submit_application(&repo, &applicant, form, &store).unwrap();

    assert_eq!(outcome.summary.application.documents.len(), 1);
    assert_eq!(outcome.summary.application.documents[0].name, "pitch.pdf");
    assert_eq!(outcome.skipped_documents.len(), 2);
    assert!(outcome.skipped_documents[0].contains("notes.txt"));
    assert!(outcome.skipped_documents[1].contains("film.pdf"));
}

#[test]
fn test_status_change_is_executive_only() {
    let test_db = common::TestDb::new("test_status_change_is_executive_only.db");
    let repo = DieselRepository::new(test_db.pool());
    let applicant_id = profile(&repo, "applicant@example.com", Role::Applicant);
    let application_id = seed_application(&repo, applicant_id);
    let in_review = repo.get_status_by_label("In Review").unwrap().unwrap();

    let form = SetStatusForm {
        application_id,
        status_id: in_review.id,
        comment: Some("Review starts".to_string()),
    };

    let expert = user("expert@example.com", "expert");
    assert!(matches!(
        applications_service::set_status(&repo, &expert, &form),
        Err(ServiceError::Unauthorized)
    ));

    let executive = user("executive@example.com", "executive");
    applications_service::set_status(&repo, &executive, &form).unwrap();

    let detail =
        applications_service::load_application_detail(&repo, &executive, application_id).unwrap();
    assert_eq!(detail.application.status_label, "In Review");
    assert!(detail.can_edit_status);
    assert!(detail.can_comment);
    assert!(!detail.can_suggest);
    assert_eq!(detail.history.len(), 2);
}

#[test]
fn test_applicant_sees_only_own_detail() {
    let test_db = common::TestDb::new("test_applicant_sees_only_own_detail.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = user("owner@example.com", "applicant");
    let owner_id = profile(&repo, "owner@example.com", Role::Applicant);
    let other_id = profile(&repo, "other@example.com", Role::Applicant);
    let own_application = seed_application(&repo, owner_id);
    let other_application = seed_application(&repo, other_id);

    let detail =
        applications_service::load_application_detail(&repo, &owner, own_application).unwrap();
    assert!(!detail.can_edit_status);
    assert!(!detail.can_suggest);
    assert!(!detail.can_comment);

    assert!(matches!(
        applications_service::load_application_detail(&repo, &owner, other_application),
        Err(ServiceError::Unauthorized)
    ));
}

#[test]
fn test_expert_detail_requires_assignment() {
    let test_db = common::TestDb::new("test_expert_detail_requires_assignment.db");
    let repo = DieselRepository::new(test_db.pool());
    let applicant_id = profile(&repo, "applicant@example.com", Role::Applicant);
    let expert_id = profile(&repo, "expert@example.com", Role::Expert);
    let application_id = seed_application(&repo, applicant_id);

    let expert = user("expert@example.com", "expert");
    assert!(matches!(
        applications_service::load_application_detail(&repo, &expert, application_id),
        Err(ServiceError::Unauthorized)
    ));
    assert!(matches!(
        applications_service::document_for_download(&repo, &expert, application_id, 0),
        Err(ServiceError::Unauthorized)
    ));

    repo.assign_expert(application_id, Some(expert_id)).unwrap();

    let detail =
        applications_service::load_application_detail(&repo, &expert, application_id).unwrap();
    assert!(detail.can_suggest);
    let document =
        applications_service::document_for_download(&repo, &expert, application_id, 0).unwrap();
    assert_eq!(document.name, "pitch.pdf");
}

#[test]
fn test_expert_suggestion_requires_assignment() {
    let test_db = common::TestDb::new("test_expert_suggestion_requires_assignment.db");
    let repo = DieselRepository::new(test_db.pool());
    let applicant_id = profile(&repo, "applicant@example.com", Role::Applicant);
    let expert_id = profile(&repo, "expert@example.com", Role::Expert);
    let application_id = seed_application(&repo, applicant_id);
    let shortlisted = repo.get_status_by_label("Shortlisted").unwrap().unwrap();

    let expert = user("expert@example.com", "expert");
    let form = SuggestStatusForm {
        application_id,
        body: "Strong prototype, shortlist it".to_string(),
        status_id: shortlisted.id,
    };

    assert!(matches!(
        notes_service::suggest_status(&repo, &expert, &form),
        Err(ServiceError::Unauthorized)
    ));

    repo.assign_expert(application_id, Some(expert_id)).unwrap();

    // The suggested status must exist.
    let bogus = SuggestStatusForm {
        application_id,
        body: "Strong prototype, shortlist it".to_string(),
        status_id: 9999,
    };
    assert!(matches!(
        notes_service::suggest_status(&repo, &expert, &bogus),
        Err(ServiceError::NotFound)
    ));

    notes_service::suggest_status(&repo, &expert, &form).unwrap();

    let notes = repo.list_notes(application_id).unwrap();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].is_suggestion());
    assert_eq!(notes[0].suggested_status_id, Some(shortlisted.id));
}

#[test]
fn test_approve_suggestion_flow() {
    let test_db = common::TestDb::new("test_approve_suggestion_flow.db");
    let repo = DieselRepository::new(test_db.pool());
    let applicant_id = profile(&repo, "applicant@example.com", Role::Applicant);
    let expert_id = profile(&repo, "expert@example.com", Role::Expert);
    let application_id = seed_application(&repo, applicant_id);
    let approved = repo.get_status_by_label("Approved").unwrap().unwrap();

    let suggestion = repo
        .create_note(&NewNote::suggestion(
            application_id,
            NoteBody::try_from("Ready for funding").unwrap(),
            expert_id,
            approved.id,
        ))
        .unwrap();

    let form = NoteIdForm {
        note_id: suggestion.id,
    };

    let expert = user("expert@example.com", "expert");
    assert!(matches!(
        notes_service::approve_suggestion(&repo, &expert, &form),
        Err(ServiceError::Unauthorized)
    ));

    let executive = user("executive@example.com", "executive");
    notes_service::approve_suggestion(&repo, &executive, &form).unwrap();

    let detail =
        applications_service::load_application_detail(&repo, &executive, application_id).unwrap();
    assert_eq!(detail.application.status_label, "Approved");
    assert!(detail.notes[0].accepted);
}

#[test]
fn test_comment_author_rules() {
    let test_db = common::TestDb::new("test_comment_author_rules.db");
    let repo = DieselRepository::new(test_db.pool());
    let applicant_id = profile(&repo, "applicant@example.com", Role::Applicant);
    let expert_id = profile(&repo, "expert@example.com", Role::Expert);
    let application_id = seed_application(&repo, applicant_id);
    repo.assign_expert(application_id, Some(expert_id)).unwrap();

    let expert = user("expert@example.com", "expert");
    let executive = user("executive@example.com", "executive");

    notes_service::add_comment(
        &repo,
        &expert,
        &AddCommentForm {
            application_id,
            body: "My first take".to_string(),
        },
    )
    .unwrap();
    let note_id = repo.list_notes(application_id).unwrap()[0].id;

    // Only the author may edit or delete.
    assert!(matches!(
        notes_service::edit_note(
            &repo,
            &executive,
            &innovation_portal::forms::notes::EditNoteForm {
                note_id,
                body: "Hijacked".to_string(),
            },
        ),
        Err(ServiceError::Unauthorized)
    ));

    notes_service::edit_note(
        &repo,
        &expert,
        &innovation_portal::forms::notes::EditNoteForm {
            note_id,
            body: "My revised take".to_string(),
        },
    )
    .unwrap();

    assert!(matches!(
        notes_service::delete_note(&repo, &executive, &NoteIdForm { note_id }),
        Err(ServiceError::Unauthorized)
    ));
    notes_service::delete_note(&repo, &expert, &NoteIdForm { note_id }).unwrap();
    assert!(repo.list_notes(application_id).unwrap().is_empty());
}

#[test]
fn test_listing_page_role_gate_and_pagination() {
    let test_db = common::TestDb::new("test_listing_page_role_gate_and_pagination.db");
    let repo = DieselRepository::new(test_db.pool());
    let applicant_id = profile(&repo, "applicant@example.com", Role::Applicant);
    let expert_id = profile(&repo, "expert@example.com", Role::Expert);
    let mut application_ids = Vec::new();
    for _ in 0..12 {
        application_ids.push(seed_application(&repo, applicant_id));
    }
    repo.assign_expert(application_ids[0], Some(expert_id)).unwrap();
    repo.assign_expert(application_ids[1], Some(expert_id)).unwrap();

    let applicant = user("applicant@example.com", "applicant");
    assert!(matches!(
        applications_service::load_applications_page(
            &repo,
            &applicant,
            &ApplicationsQuery::default()
        ),
        Err(ServiceError::Unauthorized)
    ));

    let executive = user("executive@example.com", "executive");
    let page = applications_service::load_applications_page(
        &repo,
        &executive,
        &ApplicationsQuery::default(),
    )
    .unwrap();
    assert_eq!(page.applications.total, 12);
    assert_eq!(page.applications.items.len(), 10);
    assert_eq!(page.applications.per_page, 10);
    assert!(!page.statuses.is_empty());

    // Experts see their assignments only.
    let expert = user("expert@example.com", "expert");
    let page = applications_service::load_applications_page(
        &repo,
        &expert,
        &ApplicationsQuery::default(),
    )
    .unwrap();
    assert_eq!(page.applications.total, 2);

    let outsider = user("other-expert@example.com", "expert");
    let page = applications_service::load_applications_page(
        &repo,
        &outsider,
        &ApplicationsQuery::default(),
    )
    .unwrap();
    assert_eq!(page.applications.total, 0);
}

#[test]
fn test_dashboard_counts_follow_role() {
    let test_db = common::TestDb::new("test_dashboard_counts_follow_role.db");
    let repo = DieselRepository::new(test_db.pool());
    let applicant_id = profile(&repo, "applicant@example.com", Role::Applicant);
    let expert_id = profile(&repo, "expert@example.com", Role::Expert);

    let first = seed_application(&repo, applicant_id);
    seed_application(&repo, applicant_id);
    seed_application(&repo, applicant_id);
    repo.assign_expert(first, Some(expert_id)).unwrap();

    let executive = user("executive@example.com", "executive");
    let data = dashboard_service::load_dashboard(&repo, &executive).unwrap();
    assert_eq!(data.total, 3);
    assert_eq!(data.unassigned, 2);
    assert_eq!(data.expert_count, 1);
    let new_count = data
        .by_status
        .iter()
        .find(|entry| entry.label == "New")
        .unwrap();
    assert_eq!(new_count.count, 3);

    let expert = user("expert@example.com", "expert");
    let data = dashboard_service::load_dashboard(&repo, &expert).unwrap();
    assert_eq!(data.total, 1);

    let applicant = user("applicant@example.com", "applicant");
    assert!(matches!(
        dashboard_service::load_dashboard(&repo, &applicant),
        Err(ServiceError::Unauthorized)
    ));
}
