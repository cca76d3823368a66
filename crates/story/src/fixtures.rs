use std::collections::HashMap;

use anyhow::Context as _;
use async_trait::async_trait;
use village_richtext::{RichText, RichTextValue};
use village_views::{
    PostDeleter, PostRecord, PostStore, StoreError, UserRecord, UserStore,
};

const SAMPLE_DOCUMENT: &str = r#"[
  { "type": "heading-1", "children": [{ "text": "Village notes" }] },
  { "type": "heading-2", "children": [{ "text": "What changed this week" }] },
  {
    "type": "paragraph",
    "children": [
      { "text": "Rendering now supports " },
      { "text": "bold", "bold": true },
      { "text": ", " },
      { "text": "italic", "italic": true },
      { "text": ", " },
      { "text": "underline", "underline": true },
      { "text": " and " },
      { "text": "inline code", "code": true },
      { "text": ". See " },
      {
        "type": "mention",
        "authorId": "grace",
        "authorUsername": "grace",
        "postId": "compilers",
        "value": "Compilers",
        "children": [{ "text": "" }]
      },
      { "text": " for background." }
    ]
  },
  {
    "type": "block-quote",
    "children": [
      { "text": "Mentions missing an author still render as links: " },
      {
        "type": "mention",
        "authorUsername": "ada",
        "postId": "notes",
        "value": "Note G",
        "children": [{ "text": "" }]
      },
      { "text": "" }
    ]
  },
  {
    "type": "bulleted-list",
    "children": [
      { "type": "list-item", "children": [{ "text": "Headings map per flavor" }] },
      { "type": "list-item", "children": [{ "text": "Unknown tags fall back to paragraphs" }] }
    ]
  },
  {
    "type": "numbered-list",
    "children": [
      { "type": "list-item", "children": [{ "text": "Parse" }] },
      { "type": "list-item", "children": [{ "text": "Render" }] }
    ]
  },
  { "type": "callout", "children": [{ "text": "Callouts render as plain paragraphs." }] }
]"#;

const USERS: &str = r#"[
  { "uid": "ada", "username": "ada", "displayName": "Ada Lovelace", "description": "Notes on engines" },
  { "uid": "grace", "username": "grace", "displayName": "Grace Hopper", "description": "Compilers and ships" }
]"#;

const POSTS: &str = r#"[
  {
    "id": "engines",
    "authorId": "ada",
    "title": "Analytical Engine",
    "updatedAt": "2021-03-04T09:30:00Z",
    "mentions": ["compilers"],
    "body": [
      { "type": "paragraph", "children": [{ "text": "Cards drive the mill." }] }
    ]
  },
  {
    "id": "notes",
    "authorId": "ada",
    "title": "Note G",
    "body": [
      {
        "type": "bulleted-list",
        "children": [
          { "type": "list-item", "children": [{ "text": "Bernoulli numbers" }] },
          { "type": "list-item", "children": [{ "text": "Loops" }] },
          { "type": "list-item", "children": [{ "text": "Variables" }] },
          { "type": "list-item", "children": [{ "text": "Cards" }] }
        ]
      }
    ]
  },
  {
    "id": "compilers",
    "authorId": "grace",
    "title": "A-0",
    "body": [{ "type": "paragraph", "children": [{ "text": "Subroutines on tape." }] }]
  }
]"#;

pub struct Fixtures {
    pub document: RichText,
    pub store: MemoryStore,
}

pub fn load() -> anyhow::Result<Fixtures> {
    let (value, fallback) = RichTextValue::parse_lenient(SAMPLE_DOCUMENT);
    if fallback {
        tracing::warn!("sample document was not valid rich text");
    }

    let users: Vec<UserRecord> = serde_json::from_str(USERS).context("parsing sample users")?;
    let posts: Vec<PostRecord> = serde_json::from_str(POSTS).context("parsing sample posts")?;

    let mut store = MemoryStore::default();
    for user in users {
        store.users.insert(user.uid.clone(), user);
    }
    for post in posts {
        store
            .posts
            .entry(post.author_id.clone())
            .or_default()
            .push(post);
    }

    Ok(Fixtures {
        document: value.into_document(),
        store,
    })
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub users: HashMap<String, UserRecord>,
    pub posts: HashMap<String, Vec<PostRecord>>,
}

impl MemoryStore {
    pub fn user(&self, uid: &str) -> Option<&UserRecord> {
        self.users.get(uid)
    }

    pub fn post(&self, author_id: &str, post_id: &str) -> Option<&PostRecord> {
        self.posts
            .get(author_id)?
            .iter()
            .find(|post| post.id.as_deref() == Some(post_id))
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn get_user_posts(&self, user_id: &str) -> Result<Vec<PostRecord>, StoreError> {
        Ok(self.posts.get(user_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(user_id).cloned())
    }
}

/// Pretends to delete; the story has no backend.
pub struct LoggingDeleter;

#[async_trait]
impl PostDeleter for LoggingDeleter {
    async fn delete_post(&self, author_id: &str, post_id: &str) -> Result<(), StoreError> {
        tracing::info!(author_id, post_id, "delete requested");
        Ok(())
    }
}
