use crate::config::Config;
use log::info;
use mongodb::bson::doc;
use mongodb::{Client, options::ClientOptions};

/// The single MongoDB connection the process works against.
pub struct Database {
    pub client: Client,
    pub database: mongodb::Database,
}

impl Database {
    pub async fn init(config: &Config) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.database_url).await?;
        client_options.app_name = Some("blog-api".to_string());

        let client = Client::with_options(client_options)?;

        // Ping the server so a bad connection string fails at start-up
        client
            .database("admin")
            .run_command(doc! {"ping": 1})
            .await?;

        info!("Connected successfully to MongoDB");

        let database = client.database(&config.database_name);
        Ok(Self { client, database })
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("Disconnected from MongoDB");
    }
}
