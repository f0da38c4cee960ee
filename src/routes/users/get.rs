use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use uuid::Uuid;

use crate::auth::extractors::AdminOnly;
use crate::db_interaction::{get_all_users, get_user_by_id};
use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Listing all users",
    skip(pool, _admin)
)]
pub async fn list_users(
    pool: web::Data<DbPool>,
    _admin: AdminOnly
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let users = get_all_users(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(
    "Getting user by id",
    skip(pool, _admin)
)]
pub async fn get_user(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    _admin: AdminOnly
) -> Result<HttpResponse, actix_web::Error>{
    let user_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let user = get_user_by_id(conn, user_id)
        .await
        .map_err(ErrorInternalServerError)?
        .ok_or_else(|| ErrorNotFound("User not found"))?;

    Ok(HttpResponse::Ok().json(user))
}
