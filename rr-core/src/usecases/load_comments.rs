use super::prelude::*;
use crate::{
    authorization::rating::{rating_permission, RatingPermission},
    rating::Rated,
    util::sort::SortByRecency,
};

/// Continuously updated view of all comments of a recipe.
///
/// Every accessor looks at the most recent snapshot delivered
/// by the store. Nothing is cached in between.
#[derive(Debug, Clone)]
pub struct LiveComments {
    recipe_id: Id,
    feed: CommentFeed,
}

impl LiveComments {
    pub fn recipe_id(&self) -> &Id {
        &self.recipe_id
    }

    /// Newest first; comments created at the same time
    /// stay in store insertion order.
    pub fn comments(&self) -> Vec<Comment> {
        let mut comments = self.feed.borrow().to_vec();
        comments.sort_by_recency();
        comments
    }

    pub fn len(&self) -> usize {
        self.feed.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.feed.borrow().is_empty()
    }

    pub fn has_active_rating_from_identity(&self, email: &str, excluding_id: Option<&str>) -> bool {
        self.feed
            .borrow()
            .has_active_rating_from(email, excluding_id)
    }

    pub fn rating_summary(&self) -> RatingSummary {
        self.feed.borrow().rating_summary()
    }

    pub fn find(&self, id: &str) -> Option<Comment> {
        self.feed.borrow().iter().find(|c| c.id == id).cloned()
    }

    /// Whether a rating control should be offered for the given author,
    /// optionally while editing one of the comments.
    pub fn rating_permission(
        &self,
        identity: &Identity,
        author_email: &str,
        editing_id: Option<&str>,
    ) -> RatingPermission {
        let snapshot = self.feed.borrow();
        let editing = editing_id.and_then(|id| snapshot.iter().find(|c| c.id == id));
        let already_rated = snapshot.has_active_rating_from(author_email, editing_id);
        rating_permission(identity, editing, already_rated)
    }

    /// Whether a new snapshot arrived since the last call to [`LiveComments::changed`].
    pub fn has_changed(&self) -> bool {
        self.feed.has_changed().unwrap_or(false)
    }

    /// Wait for the next snapshot.
    ///
    /// Fails if the store dropped the subscription.
    pub async fn changed(&mut self) -> Result<()> {
        self.feed.changed().await.map_err(|err| {
            log::warn!("Subscription of recipe {} closed: {err}", self.recipe_id);
            crate::repositories::Error::Other(err.into())
        })?;
        Ok(())
    }
}

pub fn load_comments_of_recipe<R: CommentRepo>(repo: &R, recipe_id: &str) -> Result<LiveComments> {
    let feed = repo.subscribe_comments_of_recipe(recipe_id)?;
    Ok(LiveComments {
        recipe_id: recipe_id.into(),
        feed,
    })
}
