use bookstore::models::{Book, Role};
use diesel::QueryDsl;
use diesel::RunQueryDsl;

use crate::helpers::{create_user_and_login, seed_book, seed_genre, TestApp};

#[actix_web::test]
async fn get_book_returns_the_record(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    let book = seed_book(&app.pool, genre.genre_id);

    let response = app.api_client
        .get(format!("{}/api/books/{}", app.get_app_url(), book.book_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let fetched: Book = response.json().await.unwrap();
    assert_eq!(fetched.book_id, book.book_id);
    assert_eq!(fetched.title, book.title);
    assert_eq!(fetched.slug, book.slug);
    assert_eq!(fetched.book_type, "PAPER");
}

#[actix_web::test]
async fn unknown_book_is_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client
        .get(format!("{}/api/books/{}", app.get_app_url(), uuid::Uuid::new_v4()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

fn book_payload(genre_id: uuid::Uuid, slug: &str) -> serde_json::Value{
    serde_json::json!({
        "title": "Systems Novel",
        "author": "N. Author",
        "description": "Created through the api",
        "genre_id": genre_id,
        "book_type": "ELECTRONIC",
        "price": 9.5,
        "slug": slug
    })
}

#[actix_web::test]
async fn manager_can_create_a_book(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    create_user_and_login(&app, Role::Manager).await;

    let response = app.api_client
        .post(format!("{}/api/books", app.get_app_url()))
        .json(&book_payload(genre.genre_id, "systems-novel"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let created: Book = response.json().await.unwrap();
    assert_eq!(created.slug, "systems-novel");

    use bookstore::schema::books;
    let mut conn = app.pool.get().unwrap();
    let stored = books::table
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();
    assert_eq!(stored, 1);
}

#[actix_web::test]
async fn regular_user_cannot_create_a_book(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    create_user_and_login(&app, Role::User).await;

    let response = app.api_client
        .post(format!("{}/api/books", app.get_app_url()))
        .json(&book_payload(genre.genre_id, "forbidden-novel"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
}

#[actix_web::test]
async fn duplicate_slug_is_a_conflict(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    create_user_and_login(&app, Role::Manager).await;

    let first = app.api_client
        .post(format!("{}/api/books", app.get_app_url()))
        .json(&book_payload(genre.genre_id, "same-slug"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    let second = app.api_client
        .post(format!("{}/api/books", app.get_app_url()))
        .json(&book_payload(genre.genre_id, "same-slug"))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
}

#[actix_web::test]
async fn negative_price_is_rejected(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    create_user_and_login(&app, Role::Manager).await;

    let mut payload = book_payload(genre.genre_id, "cheap-novel");
    payload["price"] = serde_json::json!(-1.0);

    let response = app.api_client
        .post(format!("{}/api/books", app.get_app_url()))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn manager_can_update_and_delete_a_book(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    let book = seed_book(&app.pool, genre.genre_id);
    create_user_and_login(&app, Role::Manager).await;

    let mut payload = book_payload(genre.genre_id, &book.slug);
    payload["title"] = serde_json::json!("Renamed Title");

    let response = app.api_client
        .put(format!("{}/api/books/{}", app.get_app_url(), book.book_id))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let updated: Book = response.json().await.unwrap();
    assert_eq!(updated.title, "Renamed Title");

    let response = app.api_client
        .delete(format!("{}/api/books/{}", app.get_app_url(), book.book_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = app.api_client
        .get(format!("{}/api/books/{}", app.get_app_url(), book.book_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn book_is_reachable_by_slug(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    let book = seed_book(&app.pool, genre.genre_id);

    let response = app.api_client
        .get(format!("{}/api/books/slug/{}", app.get_app_url(), book.slug))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let fetched: Book = response.json().await.unwrap();
    assert_eq!(fetched.book_id, book.book_id);

    let response = app.api_client
        .get(format!("{}/api/books/slug/no-such-slug", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn book_count_reflects_the_table(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);

    let response = app.api_client
        .get(format!("{}/api/books/count", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<i64>().await.unwrap(), 0);

    seed_book(&app.pool, genre.genre_id);

    let response = app.api_client
        .get(format!("{}/api/books/count", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.json::<i64>().await.unwrap(), 1);
}
