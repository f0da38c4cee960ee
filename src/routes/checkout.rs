use std::{error::Error, fmt::Debug};

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use thiserror::Error;
use uuid::Uuid;

use crate::db_interaction::{create_orders, CheckoutError};
use crate::session_state::TypedSession;
use crate::utils::{error_fmt_chain, get_pooled_connection, DbPool};

#[derive(Error)]
pub enum CheckoutRouteError{
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid request body")]
    InvalidRequest,
    #[error("Failed to create orders")]
    CreateOrdersError(#[source] CheckoutError),
    #[error("unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for CheckoutRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for CheckoutRouteError{
    fn status_code(&self) -> StatusCode {
        match self {
            CheckoutRouteError::Unauthorized => StatusCode::UNAUTHORIZED,
            CheckoutRouteError::InvalidRequest => StatusCode::BAD_REQUEST,
            CheckoutRouteError::CreateOrdersError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutRouteError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    // A partial failure reports how far the checkout got; the wrapper's own
    // message would swallow the committed count
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let body = match self {
            CheckoutRouteError::CreateOrdersError(e @ CheckoutError::PartialFailure{..}) => format!("{}", e),
            other => format!("{}", other)
        };

        HttpResponse::build(self.status_code()).body(body)
    }
}

// Pulls the items array out of the raw body by hand: the session check has
// to come before any body validation so an unauthenticated caller always
// gets a 401, and a present-but-wrong-shaped "items" must be a 400 rather
// than a deserializer error
fn parse_items(body: &[u8]) -> Result<Vec<Uuid>, CheckoutRouteError>{
    let body: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| CheckoutRouteError::InvalidRequest)?;

    let items = body
        .get("items")
        .and_then(|items| items.as_array())
        .ok_or(CheckoutRouteError::InvalidRequest)?;

    if items.is_empty(){
        return Err(CheckoutRouteError::InvalidRequest);
    }

    items
        .iter()
        .map(|item| {
            item.as_str()
                .and_then(|raw| Uuid::parse_str(raw).ok())
                .ok_or(CheckoutRouteError::InvalidRequest)
        })
        .collect()
}

/// `POST /api/checkout` — turns a cart's id list into PENDING order rows,
/// one per list element. Duplicate ids are meaningful: each occurrence is
/// one unit. Responds 201 with the created orders (book and buyer joined in)
/// so the client can render a receipt and clear its local cart.
#[tracing::instrument(
    "Checking out cart",
    skip(pool, session, body)
)]
pub async fn checkout(
    pool: web::Data<DbPool>,
    session: TypedSession,
    body: web::Bytes
) -> Result<HttpResponse, CheckoutRouteError>{
    let user_id = session.get_user_id()
        .map_err(|_| CheckoutRouteError::Unauthorized)?
        .ok_or(CheckoutRouteError::Unauthorized)?;

    let book_ids = parse_items(&body)?;

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let receipts = create_orders(conn, book_ids, user_id)
        .await
        .map_err(CheckoutRouteError::CreateOrdersError)?;

    Ok(HttpResponse::Created().json(receipts))
}
