use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::posts::{NewPost, Post},
    Result,
};

use super::posts_repo::PostsRepository;

/// Process-local post store, kept in insertion order.
#[derive(Default)]
pub struct MemoryRepo {
    posts: RwLock<Vec<Post>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostsRepository for MemoryRepo {
    async fn find_all(&self) -> Result<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_text(&self, text: &str) -> Result<Vec<Post>> {
        let posts = self.posts.read().await;

        Ok(posts
            .iter()
            .filter(|post| post.matches_text(text))
            .cloned()
            .collect())
    }

    async fn save(&self, post: NewPost) -> Result<Post> {
        let saved = Post {
            id: post.id.unwrap_or_else(Uuid::now_v7),
            fields: post.fields,
        };

        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|existing| existing.id == saved.id) {
            Some(existing) => existing.fields = saved.fields.clone(),
            None => posts.push(saved.clone()),
        }

        Ok(saved)
    }
}
