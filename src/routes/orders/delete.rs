use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use uuid::Uuid;

use crate::auth::extractors::Staff;
use crate::db_interaction::{delete_order, DeleteOrderError};
use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Deleting order by id",
    skip(pool, _staff)
)]
pub async fn remove_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    _staff: Staff
) -> Result<HttpResponse, actix_web::Error>{
    let order_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    delete_order(conn, order_id)
        .await
        .map_err(|e| match e {
            DeleteOrderError::NoOrderIdError(_) => ErrorNotFound("Order not found"),
            other => ErrorInternalServerError(other)
        })?;

    Ok(HttpResponse::Ok().finish())
}
