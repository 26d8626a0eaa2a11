use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use actix_web::HttpResponse;
use chirp_commons::data_structures::{CommentData, LikeData, PostData, UserData};
use log::debug;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use super::objects::Viewer;
use crate::cache::{Lookup, PageCache};
use crate::entity::prelude::*;
use crate::entity::{comments, likes, posts, users};

pub fn post_path(post_id: &str) -> String {
    format!("/post/{post_id}")
}

pub fn revalidate(cache: &Mutex<PageCache>, paths: &[&str]) {
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    for path in paths {
        if cache.revalidate(path).is_some() {
            debug!("revalidated cached page {}", path);
        }
    }
}

pub fn cached_page(cache: &Mutex<PageCache>, path: &str) -> Lookup {
    cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(path)
}

/// Stores `page` unless `path` was revalidated after `generation` was read.
pub fn store_page(cache: &Mutex<PageCache>, path: &str, generation: u64, page: &str) {
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = cache.insert_if_current(path, generation, page.to_owned()) {
        debug!("{}", e);
    }
}

pub fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

fn author_or_placeholder(author: Option<users::Model>, author_id: &str) -> UserData {
    match author {
        Some(m) => m.into(),
        None => UserData {
            id: author_id.to_owned(),
            ..Default::default()
        },
    }
}

/// Loads posts newest first, each with its author, its comments (oldest
/// first, with their authors) and its likes. `only` narrows the result to a
/// single post.
pub async fn load_posts(
    db: &DatabaseConnection,
    only: Option<&str>,
) -> Result<Vec<PostData>, DbErr> {
    let mut query = Posts::find().find_also_related(Users);
    if let Some(id) = only {
        query = query.filter(posts::Column::Id.eq(id));
    }
    let posts = query
        .order_by_desc(posts::Column::CreatedAt)
        .order_by_asc(posts::Column::Id)
        .all(db)
        .await?;
    if posts.is_empty() {
        return Ok(vec![]);
    }
    let ids = posts.iter().map(|(p, _)| p.id.clone()).collect::<Vec<_>>();

    let comments = Comments::find()
        .find_also_related(Users)
        .filter(comments::Column::PostId.is_in(ids.clone()))
        .order_by_asc(comments::Column::CreatedAt)
        .order_by_asc(comments::Column::Id)
        .all(db)
        .await?;
    let likes = Likes::find()
        .filter(likes::Column::PostId.is_in(ids))
        .order_by_asc(likes::Column::CreatedAt)
        .all(db)
        .await?;

    let mut comments_by_post: HashMap<String, Vec<CommentData>> = HashMap::new();
    for (c, author) in comments {
        let author = author_or_placeholder(author, &c.author_id);
        comments_by_post
            .entry(c.post_id.clone())
            .or_default()
            .push(CommentData {
                id: c.id,
                post_id: c.post_id,
                author,
                created_at: c.created_at,
                content: c.content,
            });
    }
    let mut likes_by_post: HashMap<String, Vec<LikeData>> = HashMap::new();
    for l in likes {
        likes_by_post.entry(l.post_id.clone()).or_default().push(l.into());
    }

    Ok(posts
        .into_iter()
        .map(|(p, author)| PostData {
            author: author_or_placeholder(author, &p.author_id),
            comments: comments_by_post.remove(&p.id).unwrap_or_default(),
            likes: likes_by_post.remove(&p.id).unwrap_or_default(),
            id: p.id,
            created_at: p.created_at,
            content: p.content,
        })
        .collect())
}

pub async fn viewer_user(
    db: &DatabaseConnection,
    viewer: &Viewer,
) -> Result<Option<UserData>, DbErr> {
    let user = Users::find()
        .filter(users::Column::Email.eq(viewer.email.as_str()))
        .one(db)
        .await?;
    if user.is_none() {
        debug!("viewer {} has no user row", viewer.email);
    }
    Ok(user.map(Into::into))
}
