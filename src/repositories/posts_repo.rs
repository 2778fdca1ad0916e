use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    models::posts::{NewPost, Post},
    Result,
};

use super::PostgresRepo;

#[async_trait]
pub trait PostsRepository: Sync + Send {
    async fn find_all(&self) -> Result<Vec<Post>>;
    async fn find_by_text(&self, text: &str) -> Result<Vec<Post>>;
    async fn save(&self, post: NewPost) -> Result<Post>;
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    doc: Json<Map<String, Value>>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            fields: row.doc.0,
        }
    }
}

#[async_trait]
impl PostsRepository for PostgresRepo {
    async fn find_all(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, doc FROM posts
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_text(&self, text: &str) -> Result<Vec<Post>> {
        // strpos keeps `%` and `_` in the needle literal.
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.doc FROM posts p
            WHERE EXISTS (
                SELECT 1 FROM jsonb_each(p.doc) AS field(key, value)
                WHERE (
                    jsonb_typeof(field.value) = 'string'
                    AND strpos(lower(field.value #>> '{}'), lower($1)) > 0
                ) OR (
                    jsonb_typeof(field.value) = 'array'
                    AND EXISTS (
                        SELECT 1 FROM jsonb_array_elements(field.value) AS item(value)
                        WHERE jsonb_typeof(item.value) = 'string'
                          AND strpos(lower(item.value #>> '{}'), lower($1)) > 0
                    )
                )
            )
            ORDER BY p.created_at, p.id
            "#,
        )
        .bind(text)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn save(&self, post: NewPost) -> Result<Post> {
        let id = post.id.unwrap_or_else(Uuid::now_v7);

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (id, doc)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc
            RETURNING id, doc
            "#,
        )
        .bind(id)
        .bind(Json(post.fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

// These run against a real database: DATABASE_URL=postgres://... cargo test -- --ignored
#[cfg(test)]
mod tests {
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    async fn live_repo() -> PostgresRepo {
        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&database_url)
            .await
            .unwrap();

        let repo = PostgresRepo::new(pool);
        repo.init().await.unwrap();
        repo
    }

    fn new_post(fields: Value) -> NewPost {
        serde_json::from_value(fields).unwrap()
    }

    #[tokio::test]
    #[ignore]
    async fn save_then_find_all_round_trips() {
        let repo = live_repo().await;
        let marker = Uuid::now_v7().to_string();

        let saved = repo
            .save(new_post(json!({ "profile": "Backend Engineer", "ref": marker, "exp": 3 })))
            .await
            .unwrap();

        assert_eq!(saved.fields["profile"], "Backend Engineer");
        assert_eq!(saved.fields["exp"], 3);
        assert!(repo.find_all().await.unwrap().contains(&saved));
    }

    #[tokio::test]
    #[ignore]
    async fn find_by_text_matches_strings_and_string_arrays() {
        let repo = live_repo().await;
        let marker = Uuid::now_v7().simple().to_string();

        let by_title = repo
            .save(new_post(json!({ "profile": format!("Rust {marker} Developer") })))
            .await
            .unwrap();
        let by_tech = repo
            .save(new_post(json!({ "profile": "Data Engineer", "techs": ["Kafka", marker.to_uppercase()] })))
            .await
            .unwrap();
        repo.save(new_post(json!({ "profile": "Designer", "exp": 2 })))
            .await
            .unwrap();

        let found = repo.find_by_text(&marker).await.unwrap();
        assert_eq!(found, vec![by_title, by_tech]);

        let missing = format!("{marker}-absent");
        assert!(repo.find_by_text(&missing).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn find_by_text_treats_like_wildcards_literally() {
        let repo = live_repo().await;
        let marker = Uuid::now_v7().simple().to_string();

        repo.save(new_post(json!({ "profile": format!("{marker} Engineer") })))
            .await
            .unwrap();

        assert!(repo.find_by_text(&format!("{marker}%")).await.unwrap().is_empty());
        assert!(repo.find_by_text(&format!("{marker}_")).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn save_with_existing_id_replaces_the_document() {
        let repo = live_repo().await;

        let first = repo
            .save(new_post(json!({ "profile": "Old title" })))
            .await
            .unwrap();
        let replaced = repo
            .save(new_post(json!({ "id": first.id, "profile": "New title" })))
            .await
            .unwrap();

        assert_eq!(replaced.id, first.id);
        let matching: Vec<Post> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|post| post.id == first.id)
            .collect();
        assert_eq!(matching, vec![replaced]);
    }
}
