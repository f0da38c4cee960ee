use actix_web::{error::{ErrorConflict, ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use uuid::Uuid;

use crate::auth::extractors::Staff;
use crate::db_interaction::{delete_genre, GenreWriteError};
use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Deleting genre",
    skip(pool, _staff)
)]
pub async fn remove_genre(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    _staff: Staff
) -> Result<HttpResponse, actix_web::Error>{
    let genre_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    delete_genre(conn, genre_id)
        .await
        .map_err(|e| match e {
            GenreWriteError::NoGenreIdError(_) => ErrorNotFound("Genre not found"),
            GenreWriteError::ReferencedByBooks(_) => ErrorConflict("genre is still referenced by books"),
            other => ErrorInternalServerError(other)
        })?;

    Ok(HttpResponse::Ok().finish())
}
