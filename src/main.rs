mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod repositories;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::AppConfig;
use db::{initializer, StartupError};
use dotenv::dotenv;
use log::{error, info};
use repositories::employee::{DbEmployeeRepository, EmployeeRepository};
use services::employee::{DefaultEmployeeService, EmployeeService};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Nothing is served until the backend is configured, migrated and seeded
    let (config, ctx) = match prepare().await {
        Ok(ready) => ready,
        Err(err) => {
            error!("Startup failed: {}", err);
            return Err(std::io::Error::other(err));
        }
    };

    let repository: Arc<dyn EmployeeRepository> = Arc::new(DbEmployeeRepository::new(ctx));
    let service: Arc<dyn EmployeeService> = Arc::new(DefaultEmployeeService::new(repository));
    let service = web::Data::from(service);

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}

async fn prepare() -> Result<(AppConfig, db::DbContext), StartupError> {
    let config = AppConfig::from_env()?;
    info!("Run mode: {:?}", config.run_mode);

    let ctx = db::create_context(&config).await?;
    initializer::initialize(&ctx).await?;
    Ok((config, ctx))
}
