use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;

use crate::auth::extractors::Staff;
use crate::db_interaction::insert_genre;
use crate::utils::{get_pooled_connection, DbPool};

#[derive(Deserialize, Debug)]
pub struct GenreForm{
    pub name: String
}

#[tracing::instrument(
    "Creating genre",
    skip(pool, _staff)
)]
pub async fn post_genre(
    pool: web::Data<DbPool>,
    form: web::Json<GenreForm>,
    _staff: Staff
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let genre = insert_genre(conn, form.into_inner().name)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Created().json(genre))
}
