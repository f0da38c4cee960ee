use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use thiserror::Error;
use uuid::Uuid;

use crate::{models::Genre, schema::genres, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[tracing::instrument(
    "Getting all genres",
    skip_all
)]
pub async fn get_all_genres(
    mut conn: DbConnection
) -> Result<Vec<Genre>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        genres::table
            .order(genres::name.asc())
            .load::<Genre>(&mut conn)
            .context("Failed to load genres")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Errors associated with creating / updating / deleting genres
#[derive(Error)]
pub enum GenreWriteError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("genre is still referenced by books")]
    ReferencedByBooks(#[source] diesel::result::Error),
    #[error("genre_id: {0} doesn't exist")]
    NoGenreIdError(Uuid),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for GenreWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting genre into the database",
    skip(conn)
)]
pub async fn insert_genre(
    mut conn: DbConnection,
    name: String
) -> Result<Genre, GenreWriteError>{
    let res = spawn_blocking_with_tracing(move || {
        let genre = Genre{
            genre_id: Uuid::new_v4(),
            name
        };

        diesel::insert_into(genres::table)
            .values(&genre)
            .get_result::<Genre>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Renaming genre",
    skip(conn)
)]
pub async fn update_genre(
    mut conn: DbConnection,
    genre_id: Uuid,
    name: String
) -> Result<Genre, GenreWriteError>{
    let res = spawn_blocking_with_tracing(move || {
        use diesel::OptionalExtension;

        diesel::update(genres::table)
            .filter(genres::genre_id.eq(genre_id))
            .set(genres::name.eq(name))
            .get_result::<Genre>(&mut conn)
            .optional()?
            .ok_or(GenreWriteError::NoGenreIdError(genre_id))
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Deleting genre by id",
    skip(conn)
)]
pub async fn delete_genre(
    mut conn: DbConnection,
    genre_id: Uuid
) -> Result<(), GenreWriteError>{
    spawn_blocking_with_tracing(move || {
        let affected_rows = diesel::delete(genres::table)
            .filter(genres::genre_id.eq(genre_id))
            .execute(&mut conn)
            .map_err(|e| {
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                        ref _info
                    ) => GenreWriteError::ReferencedByBooks(e),
                    _ => GenreWriteError::RunQueryError(e)
                }
            })?;

        if affected_rows == 0 {
            return Err(GenreWriteError::NoGenreIdError(genre_id));
        }

        Ok(())
    })
    .await??;

    Ok(())
}
