use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractors::AdminOnly;
use crate::db_interaction::update_user_role;
use crate::models::Role;
use crate::utils::{get_pooled_connection, DbPool};

#[derive(Deserialize, Debug)]
pub struct UpdateRoleForm{
    pub role: Role
}

// Role is the only column this touches; a persistence failure comes back as
// None from the db layer and is surfaced as a generic failure here
#[tracing::instrument(
    "Updating user role",
    skip(pool, _admin)
)]
pub async fn put_user_role(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<UpdateRoleForm>,
    _admin: AdminOnly
) -> Result<HttpResponse, actix_web::Error>{
    let user_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    match update_user_role(conn, user_id, form.role).await {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(ErrorInternalServerError("Failed to update user role"))
    }
}
