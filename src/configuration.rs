use config::{Config, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings
}

#[derive(Deserialize, Debug)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String
}

#[derive(Deserialize, Debug)]
pub struct SessionSettings{
    pub hmac_secret: SecretString
}

impl Settings{
    pub fn get() -> Self{
        let config = Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .build()
            .expect("Failed to get configuration")
            .try_deserialize::<Settings>()
            .expect("Failed to deserialize to Settings struct");

        config
    }
}

impl DatabaseSettings{
    // Url of the postgres instance without a database name, used by the test
    // harness to create throwaway databases
    pub fn get_database_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }

    pub fn get_database_table_url(&self) -> String{
        format!("{}/{}", self.get_database_url(), self.name)
    }
}
