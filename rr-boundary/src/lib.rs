use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Comment {
    pub id           : String,
    pub recipe_id    : String,
    pub author_name  : String,
    pub author_email : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body         : Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating       : Option<f64>,
    /// Unix timestamp in milliseconds
    pub created_at   : i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct RatingSummary {
    /// `0.0` if there are no ratings
    pub avg: f64,
    pub count: usize,
}

/// The stored aggregate rating of a recipe.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct RecipeRating {
    pub recipe_id: String,
    pub rating: f64,
}

/// All comments of a recipe, newest first.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct RecipeComments {
    pub recipe_id: String,
    pub stored_rating: f64,
    pub summary: RatingSummary,
    pub comments: Vec<Comment>,
}

/// Persistent contents of a comment store.
///
/// Comments are kept in store insertion order.
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct StoreSnapshot {
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub recipe_ratings: Vec<RecipeRating>,
}
