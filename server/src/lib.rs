use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod store;

pub use config::ServerConfig;
pub use error::ServerError;
pub use store::ContactStore;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub mobile: String,
    pub contact_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    pub name: String,
    pub mobile: String,
    pub contact_number: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContact {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub contact_number: Option<String>,
}

pub type Db = Arc<RwLock<ContactStore>>;

pub fn app() -> Router {
    app_with_store(Arc::new(RwLock::new(ContactStore::new())), &ServerConfig::default())
}

pub fn app_with_store(db: Db, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/{id}",
            get(get_contact).patch(update_contact).delete(delete_contact),
        )
        .with_state(db)
        .layer(cors(&config.cors_origins))
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    let db = Arc::new(RwLock::new(ContactStore::new()));
    axum::serve(listener, app_with_store(db, &config)).await
}

fn cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Format checks only: a non-blank name and a mobile of `01` plus digits.
fn check_format(name: Option<&str>, mobile: Option<&str>) -> Result<(), ServerError> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(ServerError::Invalid("Name must not be empty."));
    }
    let mobile_ok = |m: &str| {
        m.strip_prefix("01")
            .is_some_and(|rest| rest.bytes().all(|b| b.is_ascii_digit()))
    };
    if mobile.is_some_and(|m| !mobile_ok(m)) {
        return Err(ServerError::Invalid(
            "Mobile must start with 01 and contain digits only.",
        ));
    }
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn list_contacts(State(db): State<Db>) -> Json<Vec<Contact>> {
    Json(db.read().await.list())
}

async fn create_contact(
    State(db): State<Db>,
    Json(input): Json<CreateContact>,
) -> Result<(StatusCode, Json<Contact>), ServerError> {
    check_format(Some(input.name.as_str()), Some(input.mobile.as_str()))?;
    let contact = db.write().await.create(input, Utc::now());
    info!(id = contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn get_contact(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, ServerError> {
    db.read().await.get(id).map(Json).ok_or(ServerError::NotFound(id))
}

async fn update_contact(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateContact>,
) -> Result<Json<Contact>, ServerError> {
    check_format(input.name.as_deref(), input.mobile.as_deref())?;
    let contact = db
        .write()
        .await
        .update(id, input, Utc::now())
        .ok_or(ServerError::NotFound(id))?;
    info!(id, "contact updated");
    Ok(Json(contact))
}

async fn delete_contact(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    db.write().await.delete(id).ok_or(ServerError::NotFound(id))?;
    info!(id, "contact deleted");
    Ok(StatusCode::NO_CONTENT)
}
