use std::{error::Error, fmt::Debug};

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::db_interaction::{insert_user, UserInsertError};
use crate::domain::user_email::UserEmail;
use crate::models::Role;
use crate::utils::{error_fmt_chain, get_pooled_connection, DbPool};

#[derive(Deserialize, Debug)]
pub struct RegistrationForm{
    email: String,
    first_name: String,
    last_name: String,
    password: SecretString,
    confirm_password: SecretString
}

#[derive(Error)]
pub enum RegisterError{
    #[error("the password and confirm passwords don't match")]
    PasswordNotMatching,
    #[error("{0}")]
    InvalidEmail(String),
    #[error("User already exists")]
    UserAlreadyExists(#[source] UserInsertError),
    #[error("unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for RegisterError{
    fn status_code(&self) -> StatusCode {
        match self {
            RegisterError::PasswordNotMatching => StatusCode::BAD_REQUEST,
            RegisterError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            RegisterError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            RegisterError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code()).body(format!("{}", self))
    }
}

// New accounts always start as USER; only an admin may promote them later
#[tracing::instrument(
    "Registering new user",
    skip(pool, form)
)]
pub async fn register(
    pool: web::Data<DbPool>,
    form: web::Form<RegistrationForm>
) -> Result<HttpResponse, RegisterError> {

    if form.password.expose_secret() != form.confirm_password.expose_secret(){
        return Err(RegisterError::PasswordNotMatching);
    }

    let email = UserEmail::parse(form.0.email)
        .map_err(RegisterError::InvalidEmail)?;

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    insert_user(
        conn,
        email.inner(),
        form.0.first_name,
        form.0.last_name,
        Role::User,
        form.0.password
    )
    .await
    .map_err(|e| {
        match e {
            UserInsertError::EmailNotUnique(_) => RegisterError::UserAlreadyExists(e),
            UserInsertError::UnexpectedError(_) => RegisterError::UnexpectedError(e.into())
        }
    })?;

    Ok(HttpResponse::Ok().finish())
}
