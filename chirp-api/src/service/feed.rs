use std::sync::Mutex;

use actix_web::{
    web::{self, Data, Path},
    HttpResponse,
};
use chrono::Utc;
use log::debug;

use super::{helpers, DbConnection, ServiceResult, Viewer};
use crate::{
    cache::{Lookup, PageCache},
    errors::ServiceError,
    render::Renderer,
};

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    let api_scope = web::scope("/api").service(feed_json).service(post_json);
    cfg.service(api_scope)
        .service(feed_page)
        .service(post_page);
}

#[actix_web::get("/feed")]
async fn feed_json(db: Data<DbConnection>) -> ServiceResult {
    let posts = helpers::load_posts(&db.db_connection, None).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[actix_web::get("/posts/{post_id}")]
async fn post_json(post_id: Path<String>, db: Data<DbConnection>) -> ServiceResult {
    let post = helpers::load_posts(&db.db_connection, Some(post_id.as_str()))
        .await?
        .into_iter()
        .next()
        .ok_or(ServiceError::NotFound)?;
    Ok(HttpResponse::Ok().json(post))
}

#[actix_web::get("/")]
async fn feed_page(
    db: Data<DbConnection>,
    cache: Data<Mutex<PageCache>>,
    renderer: Data<Renderer>,
    viewer: Data<Viewer>,
) -> ServiceResult {
    let generation = match helpers::cached_page(&cache, "/") {
        Lookup::Hit(page) => {
            debug!("serving / from cache");
            return Ok(helpers::html(page));
        }
        Lookup::Miss { generation } => generation,
    };
    let posts = helpers::load_posts(&db.db_connection, None).await?;
    let viewer = helpers::viewer_user(&db.db_connection, &viewer).await?;
    let page = renderer.feed_page(&posts, viewer.as_ref(), Utc::now())?;
    helpers::store_page(&cache, "/", generation, &page);
    Ok(helpers::html(page))
}

#[actix_web::get("/post/{post_id}")]
async fn post_page(
    post_id: Path<String>,
    db: Data<DbConnection>,
    cache: Data<Mutex<PageCache>>,
    renderer: Data<Renderer>,
    viewer: Data<Viewer>,
) -> ServiceResult {
    let path = helpers::post_path(&post_id);
    let generation = match helpers::cached_page(&cache, &path) {
        Lookup::Hit(page) => {
            debug!("serving {} from cache", path);
            return Ok(helpers::html(page));
        }
        Lookup::Miss { generation } => generation,
    };
    let post = helpers::load_posts(&db.db_connection, Some(post_id.as_str()))
        .await?
        .into_iter()
        .next()
        .ok_or(ServiceError::NotFound)?;
    let viewer = helpers::viewer_user(&db.db_connection, &viewer).await?;
    let page = renderer.post_page(&post, viewer.as_ref(), Utc::now())?;
    helpers::store_page(&cache, &path, generation, &page);
    Ok(helpers::html(page))
}
