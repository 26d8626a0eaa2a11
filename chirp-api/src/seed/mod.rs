//! Sample rows for trying the feed out by hand.
//!
//! Every row is looked up by its fixed id (users by email) first and only
//! inserted when missing, so seeding an already seeded database is a no-op.

use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::entity::prelude::*;
use crate::entity::{comments, likes, posts, users};

pub const ALICE_ID: &str = "alice_id";
pub const BOB_ID: &str = "bob_id";
pub const POST1_ID: &str = "post1_id";
pub const POST2_ID: &str = "post2_id";
pub const POST3_ID: &str = "post3_id";
pub const COMMENT1_ID: &str = "comment1_id";
pub const COMMENT2_ID: &str = "comment2_id";

async fn upsert_user(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    email: &str,
) -> Result<users::Model, DbErr> {
    if let Some(user) = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?
    {
        debug!("user {} already present", email);
        return Ok(user);
    }
    users::ActiveModel {
        id: ActiveValue::Set(id.to_owned()),
        name: ActiveValue::Set(Some(name.to_owned())),
        email: ActiveValue::Set(email.to_owned()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

async fn upsert_post(
    db: &DatabaseConnection,
    id: &str,
    content: &str,
    author: &users::Model,
) -> Result<posts::Model, DbErr> {
    if let Some(post) = Posts::find_by_id(id).one(db).await? {
        return Ok(post);
    }
    posts::ActiveModel {
        id: ActiveValue::Set(id.to_owned()),
        content: ActiveValue::Set(content.to_owned()),
        author_id: ActiveValue::Set(author.id.clone()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

async fn upsert_comment(
    db: &DatabaseConnection,
    id: &str,
    content: &str,
    author: &users::Model,
    post: &posts::Model,
) -> Result<(), DbErr> {
    if Comments::find_by_id(id).one(db).await?.is_some() {
        return Ok(());
    }
    let comment = comments::ActiveModel {
        id: ActiveValue::Set(id.to_owned()),
        content: ActiveValue::Set(content.to_owned()),
        author_id: ActiveValue::Set(author.id.clone()),
        post_id: ActiveValue::Set(post.id.clone()),
        created_at: ActiveValue::Set(Utc::now()),
    };
    Comments::insert(comment).exec_without_returning(db).await?;
    Ok(())
}

async fn upsert_like(
    db: &DatabaseConnection,
    user: &users::Model,
    post: &posts::Model,
) -> Result<(), DbErr> {
    let key = (user.id.clone(), post.id.clone());
    if Likes::find_by_id(key.clone()).one(db).await?.is_some() {
        return Ok(());
    }
    let like = likes::ActiveModel {
        user_id: ActiveValue::Set(key.0),
        post_id: ActiveValue::Set(key.1),
        created_at: ActiveValue::Set(Utc::now()),
    };
    Likes::insert(like).exec_without_returning(db).await?;
    Ok(())
}

pub async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    let alice = upsert_user(db, ALICE_ID, "Alice", "alice@example.com").await?;
    let bob = upsert_user(db, BOB_ID, "Bob", "bob@example.com").await?;

    let post1 = upsert_post(db, POST1_ID, "Hello, this is Alice's first post!", &alice).await?;
    let post2 = upsert_post(db, POST2_ID, "Bob is sharing some thoughts here.", &bob).await?;
    upsert_post(db, POST3_ID, "Alice's second post, feeling good!", &alice).await?;

    upsert_comment(db, COMMENT1_ID, "Great post, Alice!", &bob, &post1).await?;
    upsert_comment(db, COMMENT2_ID, "Thanks, Bob!", &alice, &post1).await?;

    upsert_like(db, &bob, &post1).await?;
    upsert_like(db, &alice, &post2).await?;

    info!("Sample data seeded successfully!");
    Ok(())
}
