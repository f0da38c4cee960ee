use std::{error::Error, fmt::Debug};

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::extractors::Staff;
use crate::db_interaction::{insert_book, BookWriteError};
use crate::models::{Book, BookType};
use crate::utils::{error_fmt_chain, get_pooled_connection, DbPool};

#[derive(Deserialize, Debug)]
pub struct BookForm{
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre_id: Uuid,
    pub book_type: BookType,
    pub price: f64,
    pub slug: String,
    pub isbn: Option<String>,
    pub pages: Option<i32>,
    pub language: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub rating: Option<f64>
}

impl BookForm {
    pub fn into_book(self, book_id: Uuid) -> Book{
        Book{
            book_id,
            title: self.title,
            author: self.author,
            description: self.description,
            genre_id: self.genre_id,
            book_type: self.book_type.as_str().to_string(),
            price: self.price,
            slug: self.slug,
            isbn: self.isbn,
            pages: self.pages,
            language: self.language,
            published_at: self.published_at,
            image: self.image,
            rating: self.rating
        }
    }
}

#[derive(Error)]
pub enum PostBookError{
    #[error("price must be non-negative")]
    NegativePrice,
    #[error("a book with this slug already exists")]
    SlugTaken(#[source] BookWriteError),
    #[error("Failed to insert book")]
    InsertError(#[source] BookWriteError),
    #[error("unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for PostBookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostBookError{
    fn status_code(&self) -> StatusCode {
        match self {
            PostBookError::NegativePrice => StatusCode::BAD_REQUEST,
            PostBookError::SlugTaken(_) => StatusCode::CONFLICT,
            PostBookError::InsertError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PostBookError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code()).body(format!("{}", self))
    }
}

#[tracing::instrument(
    "Creating book",
    skip(pool, form, _staff)
)]
pub async fn post_book(
    pool: web::Data<DbPool>,
    form: web::Json<BookForm>,
    _staff: Staff
) -> Result<HttpResponse, PostBookError>{
    if form.price < 0.0 {
        return Err(PostBookError::NegativePrice);
    }

    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    let book = insert_book(conn, form.into_inner().into_book(Uuid::new_v4()))
        .await
        .map_err(|e| match e {
            BookWriteError::SlugNotUnique(_) => PostBookError::SlugTaken(e),
            _ => PostBookError::InsertError(e)
        })?;

    Ok(HttpResponse::Created().json(book))
}
