use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{contacts, health_check};
use crate::store::ContactStore;

/// Builds the full router. The store handle travels through axum state,
/// one clone per handler call.
pub fn create_routes(store: ContactStore) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/contacts", post(contacts::create_contact))
        .route("/contacts/agendas", get(contacts::list_agendas))
        .route("/contacts/agenda/:agenda_slug", get(contacts::list_agenda_contacts))
        .route(
            "/contacts/:contact_id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(store)
}
