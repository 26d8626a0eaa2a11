use std::sync::Mutex;

use actix_web::{
    http::header,
    web::{self, Data, Form},
    HttpResponse,
};
use chirp_commons::{
    data_structures::{ActionResult, PostCreationData},
    validation::CheckForm,
};
use chrono::Utc;
use log::{error, info};
use sea_orm::{ActiveModelTrait, ActiveValue};
use uuid::Uuid;

use super::{helpers, DbConnection, ServiceResult};
use crate::{cache::PageCache, entity::posts, errors::ServiceError};

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    let posts_scope = web::scope("/actions/posts").service(posts_create);
    cfg.service(posts_scope).service(posts_form_submit);
}

async fn insert_post(
    form: PostCreationData,
    db: &DbConnection,
    cache: &Mutex<PageCache>,
) -> Result<posts::Model, ServiceError> {
    form.check().map_err(ServiceError::Validation)?;

    let model = posts::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        content: ActiveValue::Set(form.content.trim().to_owned()),
        author_id: ActiveValue::Set(form.author_id.clone()),
        created_at: ActiveValue::Set(Utc::now()),
    };
    let post = model.insert(&db.db_connection).await.map_err(|source| {
        error!(
            "Error creating post for author '{}': {:?}",
            form.author_id, source
        );
        ServiceError::CreatePost { source }
    })?;
    info!("post {} created by {}", post.id, post.author_id);

    helpers::revalidate(cache, &["/"]);
    Ok(post)
}

/// Creates a post and answers with the stored post graph.
#[actix_web::post("/create")]
async fn posts_create(
    form: Form<PostCreationData>,
    db: Data<DbConnection>,
    cache: Data<Mutex<PageCache>>,
) -> ServiceResult {
    let post = insert_post(form.into_inner(), &db, &cache).await?;
    let data = helpers::load_posts(&db.db_connection, Some(&post.id))
        .await?
        .into_iter()
        .next()
        .ok_or(ServiceError::NotFound)?;
    Ok(HttpResponse::Ok().json(ActionResult::with_data(data)))
}

/// Plain HTML form variant, sends the browser back to the feed.
#[actix_web::post("/posts")]
async fn posts_form_submit(
    form: Form<PostCreationData>,
    db: Data<DbConnection>,
    cache: Data<Mutex<PageCache>>,
) -> ServiceResult {
    insert_post(form.into_inner(), &db, &cache).await?;
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}
