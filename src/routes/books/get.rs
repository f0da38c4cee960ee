use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use uuid::Uuid;

use crate::db_interaction::{count_books, get_all_books, get_book_by_id, get_book_by_slug};
use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Getting book by id",
    skip(pool)
)]
pub async fn get_book(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, actix_web::Error>{
    let book_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let book = get_book_by_id(conn, book_id)
        .await
        .map_err(ErrorInternalServerError)?
        .ok_or_else(|| ErrorNotFound("Book not found"))?;

    Ok(HttpResponse::Ok().json(book))
}

#[tracing::instrument(
    "Listing all books",
    skip(pool)
)]
pub async fn list_books(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let books = get_all_books(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(books))
}

#[tracing::instrument(
    "Getting book by slug",
    skip(pool)
)]
pub async fn get_book_slug(
    pool: web::Data<DbPool>,
    path: web::Path<String>
) -> Result<HttpResponse, actix_web::Error>{
    let slug = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let book = get_book_by_slug(conn, slug)
        .await
        .map_err(ErrorInternalServerError)?
        .ok_or_else(|| ErrorNotFound("Book not found"))?;

    Ok(HttpResponse::Ok().json(book))
}

#[tracing::instrument(
    "Counting books",
    skip(pool)
)]
pub async fn book_count(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let count = count_books(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(count))
}
