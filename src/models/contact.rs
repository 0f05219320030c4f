use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// A single contact record. Contacts are grouped into agendas by
/// `agenda_slug`; within one agenda an email may appear only once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub agenda_slug: String,
    pub address: String,
    pub phone: String,
}

/// Field values for a contact that has not been inserted yet. The id is
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub agenda_slug: String,
    pub address: String,
    pub phone: String,
}

impl NewContact {
    /// Builds a `NewContact` from an already-validated JSON object body.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            full_name: field(fields, "full_name"),
            email: field(fields, "email"),
            agenda_slug: field(fields, "agenda_slug"),
            address: field(fields, "address"),
            phone: field(fields, "phone"),
        }
    }
}

fn field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl Contact {
    /// Merges a partial field map into this contact, field by field.
    /// Only the five writable fields are touched; `id` and anything else
    /// in the map are left alone.
    pub fn apply(&mut self, fields: &Map<String, Value>) {
        for (key, value) in fields {
            let Some(value) = value.as_str() else {
                continue;
            };
            match key.as_str() {
                "full_name" => self.full_name = value.to_string(),
                "email" => self.email = value.to_string(),
                "agenda_slug" => self.agenda_slug = value.to_string(),
                "address" => self.address = value.to_string(),
                "phone" => self.phone = value.to_string(),
                _ => {}
            }
        }
    }
}
