use bookstore::{configuration::Settings, startup::Application, telemetry::{get_subscriber, init_subscriber}};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("Bookstore".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get();

    let application = Application::new(config).await?;
    application.server.await?;
    Ok(())
}
