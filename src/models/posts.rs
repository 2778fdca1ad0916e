use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::openapi::{
    schema::{AdditionalProperties, KnownFormat, ObjectBuilder, SchemaFormat, Type},
    RefOr, Schema,
};
use uuid::Uuid;

/// A job listing. Apart from `id` the field set is open: whatever keys the
/// client submitted are stored and returned unchanged.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body of `POST /post`. The id is only present when the client picks it.
#[derive(Debug, Deserialize, Clone)]
pub struct NewPost {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Post {
    /// True when a top-level string field, or a string inside a top-level
    /// array (e.g. `techs`), contains `needle`, ignoring case.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.fields
            .values()
            .flat_map(|value| match value {
                Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                other => other.as_str().into_iter().collect::<Vec<_>>(),
            })
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

impl utoipa::PartialSchema for Post {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .schema_type(Type::Object)
            .description(Some("A job listing with a store-assigned id and free-form fields"))
            .property(
                "id",
                ObjectBuilder::new()
                    .schema_type(Type::String)
                    .format(Some(SchemaFormat::KnownFormat(KnownFormat::Uuid))),
            )
            .required("id")
            .additional_properties(Some(AdditionalProperties::FreeForm(true)))
            .into()
    }
}

impl utoipa::ToSchema for Post {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Post")
    }
}
