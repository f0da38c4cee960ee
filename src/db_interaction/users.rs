use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::Utc;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use uuid::Uuid;

use crate::{models::{Role, User, UserView}, password::compute_password_hash, schema::users, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

pub const DEFAULT_AVATAR: &str = "/default-avatar.svg";

type UserViewColumns = (
    users::user_id,
    users::email,
    users::first_name,
    users::last_name,
    users::role,
    users::image
);

const USER_VIEW_COLUMNS: UserViewColumns = (
    users::user_id,
    users::email,
    users::first_name,
    users::last_name,
    users::role,
    users::image
);

// Read helpers on this table fail soft: lookup errors are logged and
// reported as "no user", matching the login path's non-revealing behaviour
#[tracing::instrument(
    "Getting user by email",
    skip(conn)
)]
pub async fn get_user_by_email(
    mut conn: DbConnection,
    email: String
) -> Result<Option<User>, anyhow::Error>{
    let res: QueryResult<User> = spawn_blocking_with_tracing(move || {
        users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut conn)
    })
    .await
    .context("Failed due to threadpool error")?;

    match res {
        Ok(user) => Ok(Some(user)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => {
            tracing::error!("Failed to fetch user: {:?}", e);
            Ok(None)
        }
    }
}

#[tracing::instrument(
    "Getting user by id",
    skip(conn)
)]
pub async fn get_user_by_id(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<Option<UserView>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        users::table
            .select(USER_VIEW_COLUMNS)
            .filter(users::user_id.eq(user_id))
            .first::<UserView>(&mut conn)
            .optional()
    })
    .await
    .context("Failed due to threadpool error")?;

    match res {
        Ok(user) => Ok(user),
        Err(e) => {
            tracing::error!("Failed to fetch user: {:?}", e);
            Ok(None)
        }
    }
}

#[tracing::instrument(
    "Getting all users",
    skip_all
)]
pub async fn get_all_users(
    mut conn: DbConnection
) -> Result<Vec<UserView>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        users::table
            .select(USER_VIEW_COLUMNS)
            .order(users::created_at.asc())
            .load::<UserView>(&mut conn)
            .context("Failed to load users")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Error associated with inserting user to users table
#[derive(Error)]
pub enum UserInsertError{
    #[error("User already exists")]
    EmailNotUnique(#[source] diesel::result::Error),
    #[error("unexpected database / hashing error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UserInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting user into the database",
    skip(conn, password)
)]
pub async fn insert_user(
    mut conn: DbConnection,
    email: String,
    first_name: String,
    last_name: String,
    role: Role,
    password: SecretString
) -> Result<Uuid, UserInsertError> {

    let password_hash = spawn_blocking_with_tracing(move || {
        compute_password_hash(password)
    })
    .await
    .context("Failed due to threadpool error")
    .map_err(UserInsertError::UnexpectedError)?
    .map_err(UserInsertError::UnexpectedError)?;

    let user = User{
        user_id: Uuid::new_v4(),
        email,
        first_name,
        last_name,
        role: role.as_str().to_string(),
        password: password_hash.expose_secret().to_string(),
        image: DEFAULT_AVATAR.to_string(),
        created_at: Utc::now()
    };
    let user_id = user.user_id;

    spawn_blocking_with_tracing(move || {
        diesel::insert_into(users::table)
            .values(user)
            .execute(&mut conn)
            .map_err(|e|{
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        ref _info
                    ) => {
                        UserInsertError::EmailNotUnique(e)
                    },

                    _ => UserInsertError::UnexpectedError(anyhow::anyhow!("Unexpected diesel / database error"))
                }
            })
    })
    .await
    .context("Failed due to threadpool error")
    .map_err(UserInsertError::UnexpectedError)??;

    Ok(user_id)
}

// Touches ONLY the role column. Persistence failure degrades to None
// instead of surfacing the diesel error; the admin table treats that as a
// failed update with nothing mutated
#[tracing::instrument(
    "Updating user role",
    skip(conn)
)]
pub async fn update_user_role(
    mut conn: DbConnection,
    user_id: Uuid,
    role: Role
) -> Option<UserView>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::update(users::table)
            .filter(users::user_id.eq(user_id))
            .set(users::role.eq(role.as_str()))
            .returning(USER_VIEW_COLUMNS)
            .get_result::<UserView>(&mut conn)
    })
    .await;

    match res {
        Ok(Ok(user)) => Some(user),
        Ok(Err(e)) => {
            tracing::error!("Failed to update user role: {:?}", e);
            None
        },
        Err(e) => {
            tracing::error!("Failed due to threadpool error: {:?}", e);
            None
        }
    }
}
