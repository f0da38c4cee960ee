use bookstore::models::Role;

use crate::helpers::{TestApp, TestUser};

#[actix_web::test]
async fn login_with_correct_credentials_opens_a_session(){
    let app = TestApp::spawn_app().await;
    let user = TestUser::generate(Role::User);
    user.store(&app.pool);

    // Authenticated surface is closed before login
    let response = app.api_client
        .get(format!("{}/api/orders", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    user.login(&app).await;

    let response = app.api_client
        .get(format!("{}/api/orders", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized(){
    let app = TestApp::spawn_app().await;
    let user = TestUser::generate(Role::User);
    user.store(&app.pool);

    let response = app.api_client
        .post(format!("{}/login", app.get_app_url()))
        .form(&serde_json::json!({
            "email": user.email,
            "password": "wrong password"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn login_with_unknown_email_is_unauthorized(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client
        .post(format!("{}/login", app.get_app_url()))
        .form(&serde_json::json!({
            "email": "nobody@example.com",
            "password": "whatever"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn logout_closes_the_session(){
    let app = TestApp::spawn_app().await;
    let user = TestUser::generate(Role::User);
    user.store(&app.pool);
    user.login(&app).await;

    let response = app.api_client
        .post(format!("{}/logout", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = app.api_client
        .get(format!("{}/api/orders", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}
