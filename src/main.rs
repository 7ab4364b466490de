use std::{fs::OpenOptions, io};

use actix_web::{web, App, HttpServer};
use sea_orm::Database;
use tracing::{error, info, Level};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{filter, fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::payroll::SalaryRates;

mod config;
mod consts;
mod utils;

mod actor;
mod entity;
mod pages;
mod payroll;
mod timesheet;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("trace.log")?;

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_line_number(true)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(log_file)
                .with_filter(filter::LevelFilter::from_level(Level::TRACE))
        );

    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

    let config::Config {
        host_address,
        database_opt,
    } = config::load().map_err(|e| {
        error!(error = %e, "invalid configuration");
        io::Error::other(e)
    })?;

    let database = Database::connect(database_opt).await.map_err(|e| {
        error!(error = %e, "unable to connect to database");
        io::Error::other(e)
    })?;

    let database = web::Data::new(database);
    let rates = web::Data::new(SalaryRates::default());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(database.clone())
            .app_data(rates.clone())
            .wrap(TracingLogger::default())
            .configure(pages::config)
    });

    let server = server.bind(host_address)?;
    for address in server.addrs() {
        info!(%address, "listening");
    }

    server.run().await
}
