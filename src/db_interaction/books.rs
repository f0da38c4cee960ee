use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use thiserror::Error;
use uuid::Uuid;

use crate::{models::Book, schema::books, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[tracing::instrument(
    "Getting book by id",
    skip(conn)
)]
pub async fn get_book_by_id(
    mut conn: DbConnection,
    book_id: Uuid
) -> Result<Option<Book>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        books::table
            .filter(books::book_id.eq(book_id))
            .first::<Book>(&mut conn)
            .optional()
            .context("Failed to get book by id")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Getting book by slug",
    skip(conn)
)]
pub async fn get_book_by_slug(
    mut conn: DbConnection,
    slug: String
) -> Result<Option<Book>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        books::table
            .filter(books::slug.eq(slug))
            .first::<Book>(&mut conn)
            .optional()
            .context("Failed to get book by slug")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Getting all books",
    skip_all
)]
pub async fn get_all_books(
    mut conn: DbConnection
) -> Result<Vec<Book>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        books::table
            .order(books::title.asc())
            .load::<Book>(&mut conn)
            .context("Failed to load books")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Counting books",
    skip_all
)]
pub async fn count_books(
    mut conn: DbConnection
) -> Result<i64, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        books::table
            .count()
            .get_result::<i64>(&mut conn)
            .context("Failed to count books")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Errors associated with creating / updating / deleting books
#[derive(Error)]
pub enum BookWriteError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("slug field is not unique")]
    SlugNotUnique(#[source] diesel::result::Error),
    #[error("book_id: {0} doesn't exist")]
    NoBookIdError(Uuid),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for BookWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

fn map_unique_violation(e: diesel::result::Error) -> BookWriteError{
    match e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            ref _info
        ) => BookWriteError::SlugNotUnique(e),
        _ => BookWriteError::RunQueryError(e)
    }
}

#[tracing::instrument(
    "Inserting book into the database",
    skip(conn, book)
)]
pub async fn insert_book(
    mut conn: DbConnection,
    book: Book
) -> Result<Book, BookWriteError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(books::table)
            .values(&book)
            .get_result::<Book>(&mut conn)
            .map_err(map_unique_violation)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating book",
    skip(conn, book)
)]
pub async fn update_book(
    mut conn: DbConnection,
    book: Book
) -> Result<Book, BookWriteError>{
    let res = spawn_blocking_with_tracing(move || {
        diesel::update(books::table)
            .filter(books::book_id.eq(book.book_id))
            .set((
                books::title.eq(&book.title),
                books::author.eq(&book.author),
                books::description.eq(&book.description),
                books::genre_id.eq(book.genre_id),
                books::book_type.eq(&book.book_type),
                books::price.eq(book.price),
                books::slug.eq(&book.slug),
                books::isbn.eq(&book.isbn),
                books::pages.eq(book.pages),
                books::language.eq(&book.language),
                books::published_at.eq(book.published_at),
                books::image.eq(&book.image),
                books::rating.eq(book.rating)
            ))
            .get_result::<Book>(&mut conn)
            .optional()
            .map_err(map_unique_violation)?
            .ok_or(BookWriteError::NoBookIdError(book.book_id))
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Deleting book by id",
    skip(conn)
)]
pub async fn delete_book(
    mut conn: DbConnection,
    book_id: Uuid
) -> Result<(), BookWriteError>{
    spawn_blocking_with_tracing(move || {
        let affected_rows = diesel::delete(books::table)
            .filter(books::book_id.eq(book_id))
            .execute(&mut conn)?;

        if affected_rows == 0 {
            return Err(BookWriteError::NoBookIdError(book_id));
        }

        Ok(())
    })
    .await??;

    Ok(())
}
