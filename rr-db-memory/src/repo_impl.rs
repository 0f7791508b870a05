use super::*;
use rr_core::repositories::{CommentFeed, CommentRepo, RecipeRatingRepo, Result};

impl CommentRepo for InMemoryDb {
    fn create_comment(&self, draft: CommentDraft, created_at: Timestamp) -> Result<Id> {
        let mut state = self.exclusive()?;
        let id = Id::new();
        let recipe_id = draft.recipe_id.clone();
        state.comments.push(draft.into_comment(id.clone(), created_at));
        if let Err(err) = self.persist(&state) {
            state.comments.pop();
            return Err(err);
        }
        state.publish(recipe_id.as_str());
        Ok(id)
    }

    fn update_comment(&self, comment: &Comment) -> Result<()> {
        let mut state = self.exclusive()?;
        let pos = state
            .comments
            .iter()
            .position(|c| c.id == comment.id)
            .ok_or(repo::Error::NotFound)?;
        if state.comments[pos].recipe_id != comment.recipe_id {
            log::warn!("Refusing to move comment {} to another recipe", comment.id);
            return Err(anyhow::anyhow!("The recipe of a comment cannot be changed").into());
        }
        let previous = std::mem::replace(&mut state.comments[pos], comment.clone());
        if let Err(err) = self.persist(&state) {
            state.comments[pos] = previous;
            return Err(err);
        }
        state.publish(comment.recipe_id.as_str());
        Ok(())
    }

    fn delete_comment(&self, id: &str) -> Result<()> {
        let mut state = self.exclusive()?;
        let pos = state
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or(repo::Error::NotFound)?;
        let removed = state.comments.remove(pos);
        if let Err(err) = self.persist(&state) {
            state.comments.insert(pos, removed);
            return Err(err);
        }
        state.publish(removed.recipe_id.as_str());
        Ok(())
    }

    fn load_comment(&self, id: &str) -> Result<Comment> {
        self.shared()
            .comments
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(repo::Error::NotFound)
    }

    fn load_comments_of_recipe(&self, recipe_id: &str) -> Result<Vec<Comment>> {
        Ok(self.shared().snapshot_of(recipe_id).to_vec())
    }

    fn subscribe_comments_of_recipe(&self, recipe_id: &str) -> Result<CommentFeed> {
        // Registering a new feed needs write access, but is not
        // a write of the store and must work while offline.
        let mut state = self.state.write();
        if let Some(tx) = state.feeds.get(recipe_id) {
            // A feed whose receivers have all been dropped still
            // holds the latest snapshot
            return Ok(tx.subscribe());
        }
        let (tx, rx) = watch::channel(state.snapshot_of(recipe_id));
        state.feeds.insert(recipe_id.into(), tx);
        Ok(rx)
    }
}

impl RecipeRatingRepo for InMemoryDb {
    fn load_recipe_rating(&self, recipe_id: &str) -> Result<AvgRatingValue> {
        Ok(self
            .shared()
            .recipe_ratings
            .get(recipe_id)
            .copied()
            .unwrap_or(AvgRatingValue::NOT_AVAILABLE))
    }

    fn store_recipe_rating(&self, recipe_id: &str, rating: AvgRatingValue) -> Result<()> {
        let mut state = self.exclusive()?;
        let previous = state.recipe_ratings.insert(recipe_id.into(), rating);
        if let Err(err) = self.persist(&state) {
            restore_rating(&mut state, recipe_id, previous);
            return Err(err);
        }
        Ok(())
    }

    fn recount_recipe_rating(
        &self,
        recipe_id: &str,
        recount: &dyn Fn(&[Comment]) -> AvgRatingValue,
    ) -> Result<AvgRatingValue> {
        // The lock is held from reading the comments until
        // the result has been stored.
        let mut state = self.exclusive()?;
        let rating = recount(&state.snapshot_of(recipe_id));
        let previous = state.recipe_ratings.insert(recipe_id.into(), rating);
        if let Err(err) = self.persist(&state) {
            restore_rating(&mut state, recipe_id, previous);
            return Err(err);
        }
        Ok(rating)
    }
}

fn restore_rating(state: &mut State, recipe_id: &str, previous: Option<AvgRatingValue>) {
    match previous {
        Some(rating) => {
            state.recipe_ratings.insert(recipe_id.into(), rating);
        }
        None => {
            state.recipe_ratings.remove(recipe_id);
        }
    }
}
