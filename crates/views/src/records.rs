use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use village_richtext::RichText;

pub type UserId = String;
pub type PostId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: UserId,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Absent until the post has been stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    pub author_id: UserId,
    pub title: String,
    pub body: RichText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Ids of posts that mention this one.
    #[serde(default)]
    pub mentions: Vec<PostId>,
}
