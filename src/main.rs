#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};

mod catalog;
mod config;
mod db;
mod error;
mod models;
mod query;
mod routes;
mod schema;

use crate::catalog::{Catalog, PgCatalog};
use crate::config::Config;

fn startup_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    // set up database connection pool
    let pool = db::build_pool(&config.database_url, config.pool_size)
        .map_err(|e| startup_error("failed to create pool", e))?;

    if config.run_migrations {
        let conn = pool
            .get()
            .map_err(|e| startup_error("failed to acquire connection", e))?;
        db::run_migrations(&conn).map_err(|e| startup_error("failed to run migrations", e))?;
        log::info!("database schema is up to date");
    }

    let catalog: Arc<dyn Catalog> = Arc::new(PgCatalog::new(pool));
    let catalog = web::Data::from(catalog);

    log::info!(
        "starting HTTP server at http://{}:{}",
        config.bind_addr,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
