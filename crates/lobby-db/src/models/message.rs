//! Message database model

use sqlx::FromRow;

/// Database model for messages table
///
/// `from`/`to` are reserved words in SQL, hence `sender`/`recipient`.
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub sender: String,
    pub recipient: String,
    pub text: String,
    pub kind: String,
    pub time: String,
}
