mod args;
mod cache;
mod entity;
mod errors;
mod migrator;
mod render;
mod seed;
mod service;
use actix_cors::Cors;
use args::{Command, RunArgs};
use clap::Parser;
use std::{io, sync::Mutex};

use actix_web::{self, dev::Server, error, middleware::Logger, web, App, HttpResponse, HttpServer};
use chirp_commons::data_structures::ActionResult;
use log::{info, log, Level};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbBackend, DbErr, Statement};
use service::{DbConnection, Viewer};

fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        let response =
            HttpResponse::BadRequest().json(ActionResult::<()>::failure(err.to_string()));
        error::InternalError::from_response(err, response).into()
    }));
    service::posts::configure_service(cfg);
    service::comments::configure_service(cfg);
    service::likes::configure_service(cfg);
    service::feed::configure_service(cfg);
}

async fn setup_database(
    db_url: &str,
    db_name: &str,
    refresh: bool,
) -> Result<DatabaseConnection, DbErr> {
    use sea_orm_migration::prelude::*;

    let mut c_opt = ConnectOptions::new(db_url);
    c_opt.sqlx_logging(false);

    let db = Database::connect(c_opt).await?;

    let db = match db.get_database_backend() {
        DbBackend::MySql => {
            db.execute(Statement::from_string(
                db.get_database_backend(),
                format!("CREATE DATABASE IF NOT EXISTS `{}`;", db_name),
            ))
            .await?;
            let url = format!("{}/{}", db_url.trim_end_matches('/'), db_name);
            let mut c_opt = ConnectOptions::new(url);
            c_opt.sqlx_logging(false);
            Database::connect(c_opt).await?
        }
        _ => db,
    };
    if refresh {
        migrator::Migrator::fresh(&db).await?;
    }
    migrator::Migrator::up(&db, None).await?;

    Ok(db)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = RunArgs::parse();

    let db = setup_database(&args.db, &args.db_name, args.fresh)
        .await
        .map_err(|e| io::Error::other(format!("database setup error: {}", e)))?;

    match args.command.unwrap_or_default() {
        Command::Seed => seed::seed(&db)
            .await
            .map_err(|e| io::Error::other(format!("seeding failed: {}", e))),
        Command::Serve => {
            log!(
                Level::Info,
                "Running chirp server on {}:{} with database url: {}",
                &args.address,
                &args.port,
                &args.db
            );
            create_and_run_server(&args, db)?.await
        }
    }
}

fn create_and_run_server(args: &RunArgs, db: DatabaseConnection) -> io::Result<Server> {
    let renderer = render::Renderer::new()
        .map_err(|e| io::Error::other(format!("template error: {}", e)))?;
    let renderer = web::Data::new(renderer);

    let db = web::Data::new(DbConnection::new(db));
    let cache = web::Data::new(Mutex::new(cache::PageCache::new()));
    let viewer = web::Data::new(Viewer::new(args.viewer_email.clone()));
    info!("rendering pages for {}", args.viewer_email);

    Ok(HttpServer::new(move || {
        let cors = Cors::permissive();
        App::new()
            .configure(configure_services)
            .app_data(db.clone())
            .app_data(cache.clone())
            .app_data(renderer.clone())
            .app_data(viewer.clone())
            .wrap(Logger::default())
            .wrap(cors)
    })
    .bind((args.address.clone(), args.port))?
    .run())
}
