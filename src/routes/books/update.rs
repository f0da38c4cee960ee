use actix_web::{error::{ErrorBadRequest, ErrorConflict, ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use uuid::Uuid;

use crate::auth::extractors::Staff;
use crate::db_interaction::{update_book, BookWriteError};
use crate::routes::books::BookForm;
use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Updating book",
    skip(pool, form, _staff)
)]
pub async fn put_book(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<BookForm>,
    _staff: Staff
) -> Result<HttpResponse, actix_web::Error>{
    let book_id = path.into_inner();

    if form.price < 0.0 {
        return Err(ErrorBadRequest("price must be non-negative"));
    }

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let book = update_book(conn, form.into_inner().into_book(book_id))
        .await
        .map_err(|e| match e {
            BookWriteError::NoBookIdError(_) => ErrorNotFound("Book not found"),
            BookWriteError::SlugNotUnique(_) => ErrorConflict("a book with this slug already exists"),
            other => ErrorInternalServerError(other)
        })?;

    Ok(HttpResponse::Ok().json(book))
}
