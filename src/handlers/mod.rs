pub mod docs;
pub mod posts;
