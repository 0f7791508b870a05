use crate::repositories::*;

/// The complete comment store as seen by the usecases.
pub trait Db: CommentRepo + RecipeRatingRepo {}

impl<T> Db for T where T: CommentRepo + RecipeRatingRepo {}
