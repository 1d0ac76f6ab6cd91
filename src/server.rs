use crate::config::Config;
use crate::database::Database;
use crate::state::AppState;
use crate::utils::error::ServerError;
use actix_web::dev::ServerHandle;
use actix_web::middleware::Logger;
use actix_web::rt::task::JoinHandle;
use actix_web::{App, HttpServer};
use log::{error, info};
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

/// A listening server plus the database connection it serves from, if any.
///
/// Owned by whoever started it; [`RunningServer::close`] consumes it, so a server
/// can only be closed once and only after it was started.
pub struct RunningServer {
    handle: ServerHandle,
    task: JoinHandle<io::Result<()>>,
    addrs: Vec<SocketAddr>,
    database: Option<Database>,
}

impl RunningServer {
    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Stops accepting connections, waits for in-flight requests, then disconnects
    /// from the database. A socket error is returned after the database is released.
    pub async fn close(self) -> Result<(), ServerError> {
        info!("Closing server");
        self.handle.stop(true).await;

        let served = match self.task.await {
            Ok(result) => result,
            Err(err) => Err(io::Error::other(err)),
        };

        if let Some(database) = self.database {
            database.shutdown().await;
        }

        served?;
        Ok(())
    }
}

/// Connects to MongoDB, then binds the socket. The connection is released again if
/// the socket cannot be bound.
pub async fn run_server(config: &Config) -> Result<RunningServer, ServerError> {
    let database = Database::init(config).await?;

    let state = match AppState::from_database(&database).await {
        Ok(state) => state,
        Err(err) => {
            error!("Failed to prepare collections: {}", err);
            database.shutdown().await;
            return Err(err.into());
        }
    };

    match start(state, (config.host.as_str(), config.port)) {
        Ok(server) => Ok(server.with_database(database)),
        Err(err) => {
            error!("Failed to bind {}:{}: {}", config.host, config.port, err);
            database.shutdown().await;
            Err(err.into())
        }
    }
}

/// Binds and spawns the HTTP server on the current actix runtime.
pub fn start<A: ToSocketAddrs>(state: AppState, addr: A) -> io::Result<RunningServer> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .disable_signals()
    .bind(addr)?;

    let addrs = server.addrs();
    let server = server.run();
    let handle = server.handle();
    let task = actix_web::rt::spawn(server);

    for addr in &addrs {
        info!("Listening on http://{}", addr);
    }

    Ok(RunningServer {
        handle,
        task,
        addrs,
        database: None,
    })
}
