use std::sync::Mutex;

use actix_web::{web, HttpResponse};
use chirp_commons::{
    data_structures::{ActionResult, LikeToggleData},
    validation::CheckForm,
};
use chrono::Utc;
use log::{debug, error};
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use super::{helpers, DbConnection, ServiceResult};
use crate::{cache::PageCache, entity::likes, entity::prelude::*, errors::ServiceError};

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    let scope = web::scope("/actions/likes").service(likes_toggle);
    cfg.service(scope);
}

/// Flips the like of `user_id` on `post_id` and returns whether the post is
/// liked afterwards.
///
/// The existence check and the write are separate statements; two toggles
/// racing for the same pair can make the insert fail on the primary key.
pub async fn toggle_like(
    db: &DatabaseConnection,
    user_id: &str,
    post_id: &str,
) -> Result<bool, DbErr> {
    let key = (user_id.to_owned(), post_id.to_owned());
    match Likes::find_by_id(key.clone()).one(db).await? {
        Some(_) => {
            Likes::delete_by_id(key).exec(db).await?;
            Ok(false)
        }
        None => {
            let like = likes::ActiveModel {
                user_id: ActiveValue::Set(key.0),
                post_id: ActiveValue::Set(key.1),
                created_at: ActiveValue::Set(Utc::now()),
            };
            Likes::insert(like).exec_without_returning(db).await?;
            Ok(true)
        }
    }
}

#[actix_web::post("/toggle")]
pub async fn likes_toggle(
    form: web::Form<LikeToggleData>,
    db: web::Data<DbConnection>,
    cache: web::Data<Mutex<PageCache>>,
) -> ServiceResult {
    let form = form.into_inner();
    form.check().map_err(ServiceError::Validation)?;

    let liked = toggle_like(&db.db_connection, &form.user_id, &form.post_id)
        .await
        .map_err(|source| {
            error!(
                "Error toggling like of '{}' on '{}': {:?}",
                form.user_id, form.post_id, source
            );
            ServiceError::ToggleLike { source }
        })?;
    debug!("{} liked {}: {}", form.user_id, form.post_id, liked);

    let post_path = helpers::post_path(&form.post_id);
    helpers::revalidate(&cache, &[post_path.as_str(), "/"]);
    Ok(HttpResponse::Ok().json(ActionResult::<()>::liked(liked)))
}
