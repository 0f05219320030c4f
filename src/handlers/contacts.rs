use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde_json::{Map, Value};

use crate::models::NewContact;
use crate::store::ContactStore;
use crate::utils::error::AppError;
use crate::utils::response::{json, message};
use crate::validate;

/// `POST /contacts` — all five fields required.
pub async fn create_contact(
    State(store): State<ContactStore>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let fields = as_object(&body)?;

    for key in validate::ALLOWED_FIELDS {
        if !fields.contains_key(key) {
            return Err(AppError::ValidationError(format!(
                "You need to specify the contact's {key}."
            )));
        }
    }

    validate::run_checks(&store, fields).await?;

    let contact = store.create(&NewContact::from_fields(fields)).await?;

    Ok(message(format!(
        "Contact {} added successfully to the {} agenda.",
        contact.full_name, contact.agenda_slug
    )))
}

/// `GET /contacts/agendas` — the distinct agenda slugs.
pub async fn list_agendas(State(store): State<ContactStore>) -> Result<Response, AppError> {
    let slugs = store.list_agenda_slugs().await?;

    if slugs.is_empty() {
        return Err(AppError::NotFound("No agendas found.".to_string()));
    }

    Ok(json(slugs))
}

/// `GET /contacts/agenda/{slug}` — every contact in one agenda.
pub async fn list_agenda_contacts(
    State(store): State<ContactStore>,
    Path(agenda_slug): Path<String>,
) -> Result<Response, AppError> {
    let contacts = store.list_by_agenda(&agenda_slug).await?;

    if contacts.is_empty() {
        return Err(AppError::NotFound(format!(
            "No contacts found in the {agenda_slug} agenda."
        )));
    }

    Ok(json(contacts))
}

/// `GET /contacts/{id}`.
pub async fn get_contact(
    State(store): State<ContactStore>,
    Path(contact_id): Path<i64>,
) -> Result<Response, AppError> {
    match store.get_by_id(contact_id).await? {
        Some(contact) => Ok(json(contact)),
        None => Err(contact_not_found(contact_id)),
    }
}

/// `PUT /contacts/{id}` — partial field map merged into the stored row.
/// Existence is checked before the body, so an unknown id is always 404.
pub async fn update_contact(
    State(store): State<ContactStore>,
    Path(contact_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let mut contact = store
        .get_by_id(contact_id)
        .await?
        .ok_or_else(|| contact_not_found(contact_id))?;

    let fields = as_object(&body)?;
    validate::run_checks(&store, fields).await?;

    contact.apply(fields);
    store.update(&contact).await?;

    Ok(message(format!(
        "The contact with the id {contact_id} modified successfully."
    )))
}

/// `DELETE /contacts/{id}`.
pub async fn delete_contact(
    State(store): State<ContactStore>,
    Path(contact_id): Path<i64>,
) -> Result<Response, AppError> {
    if !store.delete_by_id(contact_id).await? {
        return Err(contact_not_found(contact_id));
    }

    Ok(message(format!(
        "The contact with the id {contact_id} deleted successfully."
    )))
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    body.as_object().ok_or_else(|| {
        AppError::ValidationError("The request body must be a JSON object.".to_string())
    })
}

fn contact_not_found(contact_id: i64) -> AppError {
    AppError::NotFound(format!(
        "The contact with the id {contact_id} was not found."
    ))
}
