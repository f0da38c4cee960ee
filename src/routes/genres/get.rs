use actix_web::{error::ErrorInternalServerError, web, HttpResponse};

use crate::db_interaction::get_all_genres;
use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Listing all genres",
    skip(pool)
)]
pub async fn list_genres(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let genres = get_all_genres(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(genres))
}
