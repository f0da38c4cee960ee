use bookstore::models::{OrderReceipt, Role};
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

use crate::helpers::{api_client, count_orders, create_user_and_login, seed_book, seed_genre, TestApp, TestUser};

async fn checkout_one(app: &TestApp, client: &reqwest::Client, book_id: uuid::Uuid) -> OrderReceipt{
    let response = client.post(format!("{}/api/checkout", app.get_app_url()))
        .json(&serde_json::json!({ "items": [book_id] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let mut receipts: Vec<OrderReceipt> = response.json().await.unwrap();
    receipts.pop().unwrap()
}

#[actix_web::test]
async fn order_list_is_scoped_to_the_calling_user(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    let book = seed_book(&app.pool, genre.genre_id);

    let first_buyer = create_user_and_login(&app, Role::User).await;
    checkout_one(&app, &app.api_client, book.book_id).await;

    let other_client = api_client();
    let second_buyer = TestUser::generate(Role::User);
    second_buyer.store(&app.pool);
    second_buyer.login_with(&app, &other_client).await;
    checkout_one(&app, &other_client, book.book_id).await;

    let response = app.api_client.get(format!("{}/api/orders", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let orders: Vec<OrderReceipt> = response.json().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order.user_id, first_buyer.user_id);

    // A manager sees the whole system
    let manager_client = api_client();
    let manager = TestUser::generate(Role::Manager);
    manager.store(&app.pool);
    manager.login_with(&app, &manager_client).await;

    let response = manager_client.get(format!("{}/api/orders", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let orders: Vec<OrderReceipt> = response.json().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().any(|receipt| receipt.order.user_id == second_buyer.user_id));
}

#[actix_web::test]
async fn manager_can_overwrite_order_status(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    let book = seed_book(&app.pool, genre.genre_id);

    create_user_and_login(&app, Role::User).await;
    let receipt = checkout_one(&app, &app.api_client, book.book_id).await;

    let manager_client = api_client();
    let manager = TestUser::generate(Role::Manager);
    manager.store(&app.pool);
    manager.login_with(&app, &manager_client).await;

    let response = manager_client
        .put(format!("{}/api/orders/{}", app.get_app_url(), receipt.order.order_id))
        .json(&serde_json::json!({ "status": "SHIPPED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let updated: OrderReceipt = response.json().await.unwrap();
    assert_eq!(updated.order.status, "SHIPPED");

    use bookstore::schema::orders;
    let mut conn = app.pool.get().unwrap();
    let stored_status: String = orders::table
        .select(orders::status)
        .filter(orders::order_id.eq(receipt.order.order_id))
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(stored_status, "SHIPPED");
}

#[actix_web::test]
async fn regular_user_cannot_mutate_orders(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    let book = seed_book(&app.pool, genre.genre_id);

    create_user_and_login(&app, Role::User).await;
    let receipt = checkout_one(&app, &app.api_client, book.book_id).await;

    let response = app.api_client
        .put(format!("{}/api/orders/{}", app.get_app_url(), receipt.order.order_id))
        .json(&serde_json::json!({ "status": "CANCELLED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    let response = app.api_client
        .delete(format!("{}/api/orders/{}", app.get_app_url(), receipt.order.order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    assert_eq!(count_orders(&app.pool), 1);
}

#[actix_web::test]
async fn updating_an_unknown_order_is_not_found(){
    let app = TestApp::spawn_app().await;
    create_user_and_login(&app, Role::Manager).await;

    let response = app.api_client
        .put(format!("{}/api/orders/{}", app.get_app_url(), uuid::Uuid::new_v4()))
        .json(&serde_json::json!({ "status": "CONFIRMED" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn manager_can_delete_an_order(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    let book = seed_book(&app.pool, genre.genre_id);

    create_user_and_login(&app, Role::User).await;
    let receipt = checkout_one(&app, &app.api_client, book.book_id).await;
    assert_eq!(count_orders(&app.pool), 1);

    let manager_client = api_client();
    let manager = TestUser::generate(Role::Manager);
    manager.store(&app.pool);
    manager.login_with(&app, &manager_client).await;

    let response = manager_client
        .delete(format!("{}/api/orders/{}", app.get_app_url(), receipt.order.order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(count_orders(&app.pool), 0);
}

#[actix_web::test]
async fn user_cannot_read_another_users_order(){
    let app = TestApp::spawn_app().await;
    let genre = seed_genre(&app.pool);
    let book = seed_book(&app.pool, genre.genre_id);

    create_user_and_login(&app, Role::User).await;
    let receipt = checkout_one(&app, &app.api_client, book.book_id).await;

    let other_client = api_client();
    let other = TestUser::generate(Role::User);
    other.store(&app.pool);
    other.login_with(&app, &other_client).await;

    let response = other_client
        .get(format!("{}/api/orders/{}", app.get_app_url(), receipt.order.order_id))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
}
