use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use uuid::Uuid;

use crate::auth::extractors::Staff;
use crate::db_interaction::{update_genre, GenreWriteError};
use crate::routes::genres::GenreForm;
use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Renaming genre",
    skip(pool, _staff)
)]
pub async fn put_genre(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<GenreForm>,
    _staff: Staff
) -> Result<HttpResponse, actix_web::Error>{
    let genre_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let genre = update_genre(conn, genre_id, form.into_inner().name)
        .await
        .map_err(|e| match e {
            GenreWriteError::NoGenreIdError(_) => ErrorNotFound("Genre not found"),
            other => ErrorInternalServerError(other)
        })?;

    Ok(HttpResponse::Ok().json(genre))
}
