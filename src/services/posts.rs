use std::sync::Arc;

use crate::{
    models::posts::{NewPost, Post},
    repositories::posts_repo::PostsRepository,
    Result,
};

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        let posts = self.repo.find_all().await?;

        Ok(posts)
    }

    pub async fn search_posts(&self, text: &str) -> Result<Vec<Post>> {
        let posts = self.repo.find_by_text(text).await?;

        Ok(posts)
    }

    pub async fn create_post(&self, post: NewPost) -> Result<Post> {
        let post = self.repo.save(post).await?;

        Ok(post)
    }
}
