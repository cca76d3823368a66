#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use village_richtext::{ElementKind, Node, from_string};
use village_views::{
    PostDeleter, PostRecord, PostStore, StoreError, UserRecord, UserStore,
};

pub fn user(uid: &str, display_name: &str) -> UserRecord {
    UserRecord {
        uid: uid.to_string(),
        username: format!("{uid}-name"),
        display_name: display_name.to_string(),
        description: format!("About {display_name}"),
    }
}

pub fn post(id: &str, author_id: &str, title: &str, body: &str) -> PostRecord {
    PostRecord {
        id: Some(id.to_string()),
        author_id: author_id.to_string(),
        title: title.to_string(),
        body: from_string(body),
        updated_at: None,
        mentions: Vec::new(),
    }
}

pub fn list_post(id: &str, author_id: &str, items: &[&str]) -> PostRecord {
    let items = items
        .iter()
        .map(|text| Node::element(ElementKind::ListItem, vec![Node::text(*text)]))
        .collect();
    PostRecord {
        body: vec![Node::element(ElementKind::BulletedList, items)],
        ..post(id, author_id, id, "")
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub users: HashMap<String, UserRecord>,
    pub posts: HashMap<String, Vec<PostRecord>>,
    /// Users whose posts are held back until the gate is opened.
    pub gated: Vec<String>,
    pub gate: Arc<Notify>,
    /// Users whose posts fail to load.
    pub failing: Vec<String>,
}

impl MemoryStore {
    pub fn with_user(mut self, user: UserRecord, posts: Vec<PostRecord>) -> Self {
        self.posts.insert(user.uid.clone(), posts);
        self.users.insert(user.uid.clone(), user);
        self
    }

    pub fn gate_posts_of(mut self, uid: &str) -> Self {
        self.gated.push(uid.to_string());
        self
    }

    pub fn fail_posts_of(mut self, uid: &str) -> Self {
        self.failing.push(uid.to_string());
        self
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn get_user_posts(&self, user_id: &str) -> Result<Vec<PostRecord>, StoreError> {
        if self.gated.iter().any(|uid| uid == user_id) {
            self.gate.notified().await;
        }
        if self.failing.iter().any(|uid| uid == user_id) {
            return Err(StoreError::new("timeout"));
        }
        Ok(self.posts.get(user_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(user_id).cloned())
    }
}

pub struct FailingStore;

#[async_trait]
impl PostStore for FailingStore {
    async fn get_user_posts(&self, _user_id: &str) -> Result<Vec<PostRecord>, StoreError> {
        Err(StoreError::new("posts unavailable"))
    }
}

#[derive(Default)]
pub struct RecordingDeleter {
    pub calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl PostDeleter for RecordingDeleter {
    async fn delete_post(&self, author_id: &str, post_id: &str) -> Result<(), StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((author_id.to_string(), post_id.to_string()));
        Ok(())
    }
}
