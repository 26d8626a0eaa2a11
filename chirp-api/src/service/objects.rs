#[derive(Clone)]
pub struct DbConnection {
    pub(crate) db_connection: sea_orm::DatabaseConnection,
}
impl DbConnection {
    pub fn new(db_connection: sea_orm::prelude::DatabaseConnection) -> Self {
        Self { db_connection }
    }
}

/// The user whose point of view rendered pages take (liked hearts, avatar).
#[derive(Clone, Debug)]
pub struct Viewer {
    pub(crate) email: String,
}
impl Viewer {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
