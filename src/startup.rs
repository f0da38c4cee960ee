use std::net::TcpListener;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use r2d2::Pool;
use secrecy::{ExposeSecret, SecretString};
use tracing_actix_web::TracingLogger;

use crate::access_control::AccessGuardFactory;
use crate::configuration::{DatabaseSettings, Settings};
use crate::routes::authentication::{login, logout, register};
use crate::routes::books::{book_count, get_book, get_book_slug, list_books, post_book, put_book, remove_book};
use crate::routes::checkout::checkout;
use crate::routes::genres::{list_genres, post_genre, put_genre, remove_genre};
use crate::routes::health_check::health_check;
use crate::routes::orders::{get_order_by_id, list_orders, put_order_status, remove_order};
use crate::routes::users::{get_user, list_users, put_user_role};
use crate::utils::DbPool;

pub struct Application{
    pub server: Server,
    pub host: String,
    pub port: u16
}

impl Application {
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database)?;

        let listener = TcpListener::bind((
            settings.application.host.as_str(),
            settings.application.port
        ))?;
        // Port 0 means "any free port"; report the one actually bound
        let port = listener.local_addr()?.port();

        let server = run(listener, pool, settings.session.hmac_secret)?;

        Ok(Application{
            server,
            host: settings.application.host,
            port
        })
    }
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> Result<DbPool, r2d2::Error>{
    Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
}

fn run(
    listener: TcpListener,
    pool: DbPool,
    hmac_secret: SecretString
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let key = Key::from(hmac_secret.expose_secret().as_bytes());

    let server = HttpServer::new(move || {
        App::new()
            // wrap order: the session layer must run before the access guard
            // so the guard can read the caller's role
            .wrap(AccessGuardFactory)
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key.clone()))
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("/api")
                    .route("/checkout", web::post().to(checkout))
                    .route("/books", web::get().to(list_books))
                    .route("/books", web::post().to(post_book))
                    .route("/books/count", web::get().to(book_count))
                    .route("/books/slug/{slug}", web::get().to(get_book_slug))
                    .route("/books/{id}", web::get().to(get_book))
                    .route("/books/{id}", web::put().to(put_book))
                    .route("/books/{id}", web::delete().to(remove_book))
                    .route("/genres", web::get().to(list_genres))
                    .route("/genres", web::post().to(post_genre))
                    .route("/genres/{id}", web::put().to(put_genre))
                    .route("/genres/{id}", web::delete().to(remove_genre))
                    .route("/orders", web::get().to(list_orders))
                    .route("/orders/{id}", web::get().to(get_order_by_id))
                    .route("/orders/{id}", web::put().to(put_order_status))
                    .route("/orders/{id}", web::delete().to(remove_order))
                    .route("/users", web::get().to(list_users))
                    .route("/users/{id}", web::get().to(get_user))
                    .route("/users/{id}/role", web::put().to(put_user_role))
            )
            .app_data(pool.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
