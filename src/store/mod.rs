use std::sync::Once;

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::models::{Contact, NewContact};

const MAX_CONNECTIONS: u32 = 5;

const CONTACT_COLUMNS: &str = "id, full_name, email, agenda_slug, address, phone";

/// Which SQL backend the connection string selects. A `DATABASE_URL`
/// pointing at Postgres picks the networked store; anything `sqlite:`
/// picks the local file store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    fn from_url(database_url: &str) -> Self {
        if database_url.starts_with("sqlite") {
            Backend::Sqlite
        } else {
            Backend::Postgres
        }
    }
}

static INSTALL_DRIVERS: Once = Once::new();

/// Handle to the contacts table. Cheap to clone; handlers receive it as
/// axum state instead of going through any global session.
#[derive(Clone)]
pub struct ContactStore {
    pool: AnyPool,
    backend: Backend,
}

impl ContactStore {
    /// Opens a pool against the given connection string. The backend is
    /// inferred from the URL scheme.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

        let pool = AnyPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;

        Ok(Self {
            pool,
            backend: Backend::from_url(database_url),
        })
    }

    /// Creates the contacts table if it is not there yet. The id column
    /// DDL differs per backend, so this replaces a static migration set.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        let ddl = match self.backend {
            Backend::Postgres => {
                "CREATE TABLE IF NOT EXISTS contacts (
                    id BIGSERIAL PRIMARY KEY,
                    full_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    agenda_slug TEXT NOT NULL,
                    address TEXT NOT NULL,
                    phone TEXT NOT NULL
                )"
            }
            Backend::Sqlite => {
                "CREATE TABLE IF NOT EXISTS contacts (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    full_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    agenda_slug TEXT NOT NULL,
                    address TEXT NOT NULL,
                    phone TEXT NOT NULL
                )"
            }
        };

        sqlx::query(ddl).execute(&self.pool).await?;
        Ok(())
    }

    /// Inserts a contact and returns the stored row with its assigned id.
    pub async fn create(&self, new: &NewContact) -> Result<Contact, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (full_name, email, agenda_slug, address, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, full_name, email, agenda_slug, address, phone",
        )
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.agenda_slug)
        .bind(&new.address)
        .bind(&new.phone)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Distinct agenda slugs across all contacts, in slug order.
    pub async fn list_agenda_slugs(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT agenda_slug FROM contacts ORDER BY agenda_slug",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_by_agenda(&self, agenda_slug: &str) -> Result<Vec<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE agenda_slug = $1 ORDER BY id"
        ))
        .bind(agenda_slug)
        .fetch_all(&self.pool)
        .await
    }

    /// The uniqueness read backing the duplicate-email rule.
    pub async fn find_by_agenda_and_email(
        &self,
        agenda_slug: &str,
        email: &str,
    ) -> Result<Option<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE agenda_slug = $1 AND email = $2"
        ))
        .bind(agenda_slug)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Writes back a contact's five writable fields. The id is the key
    /// and is never updated.
    pub async fn update(&self, contact: &Contact) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE contacts
             SET full_name = $1, email = $2, agenda_slug = $3, address = $4, phone = $5
             WHERE id = $6",
        )
        .bind(&contact.full_name)
        .bind(&contact.email)
        .bind(&contact.agenda_slug)
        .bind(&contact.address)
        .bind(&contact.phone)
        .bind(contact.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes a contact. Returns false when the id matched no row.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_is_inferred_from_the_url_scheme() {
        assert_eq!(
            Backend::from_url("sqlite:///tmp/contacts.db?mode=rwc"),
            Backend::Sqlite
        );
        assert_eq!(
            Backend::from_url("postgres://localhost/agendas"),
            Backend::Postgres
        );
        assert_eq!(
            Backend::from_url("postgresql://localhost/agendas"),
            Backend::Postgres
        );
    }
}
