use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError, ErrorUnauthorized}, web, HttpResponse};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;

use crate::db_interaction::get_user_by_email;
use crate::domain::user_email::UserEmail;
use crate::models::Role;
use crate::password::verify_password;
use crate::session_state::TypedSession;
use crate::utils::{get_pooled_connection, DbPool};

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub email: String,
    pub password: SecretString
}

#[tracing::instrument(
    "Logging in user",
    skip(pool, form, session)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    form: web::Form<LoginForm>,
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error>{
    let email = UserEmail::parse(form.0.email)
        .map_err(ErrorBadRequest)?;

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    // Unknown email and wrong password get the same response body
    let user = match get_user_by_email(conn, email.inner()).await
        .map_err(ErrorInternalServerError)?{
        Some(user) => user,
        None => return Err(ErrorUnauthorized("Email or password is incorrect"))
    };

    match verify_password(form.0.password, user.password.clone()).await{
        Ok(true) => {
            let role = Role::parse(&user.role)
                .map_err(|_| ErrorInternalServerError("Stored role is not recognized"))?;

            session.renew();
            session.log_in(user.user_id, role, &user.first_name, &user.image)
                .context("Failed to store identity in session")
                .map_err(ErrorInternalServerError)?;

            Ok(HttpResponse::Ok().body("Successfully logged in"))
        },
        Ok(false) => {
            tracing::info!("Passwords did not match");
            Err(ErrorUnauthorized("Email or password is incorrect"))
        },
        Err(e) => {
            tracing::error!("{:?}", e);
            Err(ErrorInternalServerError("Failed to login"))
        }
    }
}
