//! Business rules guarding contact writes.
//!
//! Every check here is a pure function over the submitted field map except
//! the duplicate-email rule, which needs one read against the store. The
//! checks run in a fixed order and the first failure wins.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::store::ContactStore;
use crate::utils::error::AppError;

/// The only keys a contact body may carry. Everything else, `id`
/// included, is rejected.
pub const ALLOWED_FIELDS: [&str; 5] = ["full_name", "email", "agenda_slug", "address", "phone"];

const PHONE_MIN_LEN: usize = 3;
const PHONE_MAX_LEN: usize = 20;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}$").unwrap());

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Runs every rule against whatever subset of the allowed fields is
/// present in `fields`. Create sends all five, update any subset.
pub async fn run_checks(
    store: &ContactStore,
    fields: &Map<String, Value>,
) -> Result<(), AppError> {
    check_allowed_keys(fields)?;

    let values = string_values(fields)?;
    check_none_empty(&values)?;

    if let (Some(email), Some(agenda_slug)) = (values.get("email"), values.get("agenda_slug")) {
        if store
            .find_by_agenda_and_email(agenda_slug, email)
            .await?
            .is_some()
        {
            return Err(AppError::Forbidden(format!(
                "The contact with the email {email} already exists in the {agenda_slug} agenda."
            )));
        }
    }

    if let Some(email) = values.get("email") {
        check_email(email)?;
    }

    if let Some(phone) = values.get("phone") {
        check_phone(phone)?;
    }

    if let Some(agenda_slug) = values.get("agenda_slug") {
        check_agenda_slug(agenda_slug)?;
    }

    Ok(())
}

fn check_allowed_keys(fields: &Map<String, Value>) -> Result<(), AppError> {
    for key in fields.keys() {
        if !ALLOWED_FIELDS.contains(&key.as_str()) {
            return Err(AppError::ValidationError(format!(
                "The {key} is not a valid key."
            )));
        }
    }
    Ok(())
}

/// Flattens the JSON object into string values. Null counts as empty so
/// it falls through to the emptiness rule; any other non-string is
/// rejected outright.
fn string_values(fields: &Map<String, Value>) -> Result<BTreeMap<&str, &str>, AppError> {
    let mut values = BTreeMap::new();
    for (key, value) in fields {
        let text = match value {
            Value::Null => "",
            Value::String(text) => text.as_str(),
            _ => {
                return Err(AppError::ValidationError(format!(
                    "The contact's {key} must be a string."
                )))
            }
        };
        values.insert(key.as_str(), text);
    }
    Ok(values)
}

fn check_none_empty(values: &BTreeMap<&str, &str>) -> Result<(), AppError> {
    for (key, value) in values {
        if value.is_empty() {
            return Err(AppError::ValidationError(format!(
                "The contact's {key} cannot be empty."
            )));
        }
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), AppError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(AppError::ValidationError(
            "You need to specify a valid email address.".to_string(),
        ))
    }
}

fn check_phone(phone: &str) -> Result<(), AppError> {
    if !PHONE_PATTERN.is_match(phone) {
        return Err(AppError::ValidationError(
            "You need to specify a valid phone number.".to_string(),
        ));
    }
    if phone.len() < PHONE_MIN_LEN {
        return Err(AppError::ValidationError(format!(
            "The minimum length for the contact's phone is {PHONE_MIN_LEN} characters."
        )));
    }
    if phone.len() > PHONE_MAX_LEN {
        return Err(AppError::ValidationError(format!(
            "The maximum length for the contact's phone is {PHONE_MAX_LEN} characters."
        )));
    }
    Ok(())
}

fn check_agenda_slug(agenda_slug: &str) -> Result<(), AppError> {
    if agenda_slug.contains(char::is_whitespace) {
        Err(AppError::ValidationError(
            "The agenda_slug must not contain whitespace.".to_string(),
        ))
    } else {
        Ok(())
    }
}
