use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use uuid::Uuid;

use crate::auth::extractors::Staff;
use crate::db_interaction::{delete_book, BookWriteError};
use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Deleting book",
    skip(pool, _staff)
)]
pub async fn remove_book(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    _staff: Staff
) -> Result<HttpResponse, actix_web::Error>{
    let book_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    delete_book(conn, book_id)
        .await
        .map_err(|e| match e {
            BookWriteError::NoBookIdError(_) => ErrorNotFound("Book not found"),
            other => ErrorInternalServerError(other)
        })?;

    Ok(HttpResponse::Ok().finish())
}
