use actix_web::web;
use anyhow::Context;
use bookstore::configuration::Settings;
use bookstore::db_interaction::insert_user;
use bookstore::domain::user_email::UserEmail;
use bookstore::models::Role;
use bookstore::startup::get_connection_pool;
use bookstore::telemetry::{get_subscriber, init_subscriber};
use bookstore::utils::get_pooled_connection;
use secrecy::SecretString;

const USAGE: &str = "usage: create_admin <email> <first_name> <last_name> <password>";

// Bootstraps the first ADMIN account; registration through the api only ever
// creates USER accounts, so a fresh deployment needs this once
#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("Bookstore".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let mut args = std::env::args().skip(1);
    let email = args.next().context(USAGE)?;
    let first_name = args.next().context(USAGE)?;
    let last_name = args.next().context(USAGE)?;
    let password = args.next().context(USAGE)?;

    let email = UserEmail::parse(email)
        .map_err(|e| anyhow::anyhow!(e))?;

    let config = Settings::get();
    let pool = web::Data::new(get_connection_pool(&config.database)?);
    let conn = get_pooled_connection(&pool).await?;

    let user_id = insert_user(
        conn,
        email.inner(),
        first_name,
        last_name,
        Role::Admin,
        SecretString::from(password)
    )
    .await?;

    tracing::info!("Created ADMIN account {} ({})", email, user_id);
    Ok(())
}
