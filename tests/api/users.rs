use bookstore::models::{Role, User, UserView};
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

use crate::helpers::{create_user_and_login, TestApp, TestUser};

fn fetch_user(app: &TestApp, user_id: uuid::Uuid) -> User{
    use bookstore::schema::users;
    let mut conn = app.pool.get().unwrap();
    users::table
        .filter(users::user_id.eq(user_id))
        .first(&mut conn)
        .unwrap()
}

#[actix_web::test]
async fn admin_can_list_users_without_password_leakage(){
    let app = TestApp::spawn_app().await;
    let subject = TestUser::generate(Role::User);
    subject.store(&app.pool);
    create_user_and_login(&app, Role::Admin).await;

    let response = app.api_client
        .get(format!("{}/api/users", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let text = response.text().await.unwrap();
    assert!(!text.contains("password"));

    let users: Vec<UserView> = serde_json::from_str(&text).unwrap();
    assert!(users.iter().any(|user| user.user_id == subject.user_id));
}

#[actix_web::test]
async fn role_update_changes_only_the_role_column(){
    let app = TestApp::spawn_app().await;
    let subject = TestUser::generate(Role::User);
    subject.store(&app.pool);
    let before = fetch_user(&app, subject.user_id);

    create_user_and_login(&app, Role::Admin).await;

    let response = app.api_client
        .put(format!("{}/api/users/{}/role", app.get_app_url(), subject.user_id))
        .json(&serde_json::json!({ "role": "MANAGER" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let updated: UserView = response.json().await.unwrap();
    assert_eq!(updated.role, "MANAGER");

    let after = fetch_user(&app, subject.user_id);
    assert_eq!(after.role, "MANAGER");
    assert_eq!(after.email, before.email);
    assert_eq!(after.first_name, before.first_name);
    assert_eq!(after.last_name, before.last_name);
    assert_eq!(after.password, before.password);
}

#[actix_web::test]
async fn manager_cannot_touch_user_roles(){
    let app = TestApp::spawn_app().await;
    let subject = TestUser::generate(Role::User);
    subject.store(&app.pool);

    create_user_and_login(&app, Role::Manager).await;

    let response = app.api_client
        .put(format!("{}/api/users/{}/role", app.get_app_url(), subject.user_id))
        .json(&serde_json::json!({ "role": "ADMIN" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    let after = fetch_user(&app, subject.user_id);
    assert_eq!(after.role, "USER");
}

#[actix_web::test]
async fn anonymous_caller_cannot_list_users(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client
        .get(format!("{}/api/users", app.get_app_url()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn admin_can_fetch_a_single_user(){
    let app = TestApp::spawn_app().await;
    let subject = TestUser::generate(Role::User);
    subject.store(&app.pool);
    create_user_and_login(&app, Role::Admin).await;

    let response = app.api_client
        .get(format!("{}/api/users/{}", app.get_app_url(), subject.user_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let user: UserView = response.json().await.unwrap();
    assert_eq!(user.user_id, subject.user_id);
    assert_eq!(user.email, subject.email);

    let response = app.api_client
        .get(format!("{}/api/users/{}", app.get_app_url(), uuid::Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

// The admin bootstrap command reduces to insert_user with Role::Admin; the
// account it creates must clear the admin-only surface through a normal login
#[actix_web::test]
async fn bootstrapped_admin_account_passes_the_admin_gate(){
    let app = TestApp::spawn_app().await;

    let conn = app.pool.get().unwrap();
    bookstore::db_interaction::insert_user(
        conn,
        "root@example.com".to_string(),
        "Root".to_string(),
        "Admin".to_string(),
        Role::Admin,
        secrecy::SecretString::from("bootstrap password")
    )
    .await
    .unwrap();

    let response = app.api_client
        .post(format!("{}/login", app.get_app_url()))
        .form(&serde_json::json!({
            "email": "root@example.com",
            "password": "bootstrap password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = app.api_client
        .get(format!("{}/api/users", app.get_app_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}
