use actix_web::{error::{ErrorForbidden, ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use uuid::Uuid;

use crate::auth::extractors::SessionUser;
use crate::db_interaction::{get_order, get_orders};
use crate::utils::{get_pooled_connection, DbPool};

// "My Orders" for a regular USER, the system-wide list for staff
#[tracing::instrument(
    "Listing orders",
    skip(pool, caller)
)]
pub async fn list_orders(
    pool: web::Data<DbPool>,
    caller: SessionUser
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let orders = get_orders(conn, caller.user_id, caller.role.is_staff())
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(orders))
}

#[tracing::instrument(
    "Getting order by id",
    skip(pool, caller)
)]
pub async fn get_order_by_id(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    caller: SessionUser
) -> Result<HttpResponse, actix_web::Error>{
    let order_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let receipt = get_order(conn, order_id)
        .await
        .map_err(ErrorInternalServerError)?
        .ok_or_else(|| ErrorNotFound("Order not found"))?;

    if !caller.role.is_staff() && receipt.order.user_id != caller.user_id {
        return Err(ErrorForbidden("Not your order"));
    }

    Ok(HttpResponse::Ok().json(receipt))
}
