// Low-level access traits of the external comment store.
// Comments are keyed documents with a secondary index on the
// recipe id. The aggregate rating lives on the recipe record
// and is only read or overwritten as a whole.

use crate::entities::*;
use std::{io, sync::Arc};
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Full snapshot of all comments of a single recipe.
///
/// Comments are in store insertion order.
pub type CommentSnapshot = Arc<[Comment]>;

/// Receiving end of a subscription.
///
/// The store replaces the current snapshot on every change,
/// there are no partial diffs.
pub type CommentFeed = watch::Receiver<CommentSnapshot>;

pub trait CommentRepo {
    /// Insert a new comment and return the id assigned by the store.
    fn create_comment(&self, draft: CommentDraft, created_at: Timestamp) -> Result<Id>;

    /// Overwrite all fields of an existing comment.
    fn update_comment(&self, comment: &Comment) -> Result<()>;

    fn delete_comment(&self, id: &str) -> Result<()>;

    fn load_comment(&self, id: &str) -> Result<Comment>;

    // In store insertion order
    fn load_comments_of_recipe(&self, recipe_id: &str) -> Result<Vec<Comment>>;

    fn subscribe_comments_of_recipe(&self, recipe_id: &str) -> Result<CommentFeed>;
}

pub trait RecipeRatingRepo {
    /// Returns [`AvgRatingValue::NOT_AVAILABLE`] for unrated recipes.
    fn load_recipe_rating(&self, recipe_id: &str) -> Result<AvgRatingValue>;

    fn store_recipe_rating(&self, recipe_id: &str, rating: AvgRatingValue) -> Result<()>;

    /// Recount the aggregate from all comments of the recipe and store it.
    ///
    /// Reading the comments and writing the result must happen atomically
    /// with respect to all other writes of the store.
    fn recount_recipe_rating(
        &self,
        recipe_id: &str,
        recount: &dyn Fn(&[Comment]) -> AvgRatingValue,
    ) -> Result<AvgRatingValue>;
}
