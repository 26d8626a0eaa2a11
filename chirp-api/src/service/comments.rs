use std::sync::Mutex;

use actix_web::{web, HttpResponse};
use chirp_commons::{
    data_structures::{ActionResult, CommentCreationData},
    validation::CheckForm,
};
use chrono::Utc;
use log::{error, info};
use sea_orm::{ActiveValue, EntityTrait};
use uuid::Uuid;

use super::{helpers, DbConnection, ServiceResult};
use crate::{cache::PageCache, entity::comments, errors::ServiceError};

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    let scope = web::scope("/actions/comments").service(comments_create);
    cfg.service(scope);
}

#[actix_web::post("/create")]
pub async fn comments_create(
    comment: web::Form<CommentCreationData>,
    db: web::Data<DbConnection>,
    cache: web::Data<Mutex<PageCache>>,
) -> ServiceResult {
    let comment = comment.into_inner();
    comment.check().map_err(ServiceError::Validation)?;

    let model = comments::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        content: ActiveValue::Set(comment.content.trim().to_owned()),
        author_id: ActiveValue::Set(comment.author_id.clone()),
        post_id: ActiveValue::Set(comment.post_id.clone()),
        created_at: ActiveValue::Set(Utc::now()),
    };
    comments::Entity::insert(model)
        .exec(&db.db_connection)
        .await
        .map_err(|source| {
            error!(
                "Error creating comment on post '{}' by '{}': {:?}",
                comment.post_id, comment.author_id, source
            );
            ServiceError::CreateComment { source }
        })?;
    info!("comment added to post {}", comment.post_id);

    let post_path = helpers::post_path(&comment.post_id);
    helpers::revalidate(&cache, &[post_path.as_str(), "/"]);
    Ok(HttpResponse::Ok().json(ActionResult::<()>::ok()))
}
