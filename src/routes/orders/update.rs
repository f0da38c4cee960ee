use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractors::Staff;
use crate::db_interaction::{update_order_status, UpdateOrderStatusError};
use crate::models::OrderStatus;
use crate::utils::{get_pooled_connection, DbPool};

#[derive(Deserialize, Debug)]
pub struct UpdateOrderStatusForm{
    pub status: OrderStatus
}

#[tracing::instrument(
    "Updating order status",
    skip(pool, _staff)
)]
pub async fn put_order_status(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<UpdateOrderStatusForm>,
    _staff: Staff
) -> Result<HttpResponse, actix_web::Error>{
    let order_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let receipt = update_order_status(conn, order_id, form.status)
        .await
        .map_err(|e| match e {
            UpdateOrderStatusError::NoOrderIdError(_) => ErrorNotFound("Order not found"),
            other => ErrorInternalServerError(other)
        })?;

    Ok(HttpResponse::Ok().json(receipt))
}
