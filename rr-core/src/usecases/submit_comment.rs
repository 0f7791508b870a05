use super::prelude::*;
use crate::{
    authorization::{comment::authorize_edit, rating::rating_permission},
    rating::*,
    util::validate::{AutoCorrect, Validate},
};
use strum::{Display, EnumString};

/// How the aggregate rating of a recipe is updated after
/// a rated comment has been written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum AggregationMode {
    /// Load the comments of the recipe, fold in the new rating
    /// and overwrite the aggregate.
    ///
    /// NOTE:
    /// This is not atomic! Two submissions for the same recipe
    /// that overlap may both read the same set of comments and
    /// the later write wins, losing the other rating.
    #[default]
    ReadModifyWrite,
    /// Let the store recount all ratings of the recipe while
    /// holding its exclusive lock.
    Recount,
}

#[derive(Debug, Clone)]
pub struct Storable {
    draft: CommentDraft,
    editing: Option<Comment>,
}

impl Storable {
    pub fn recipe_id(&self) -> &Id {
        &self.draft.recipe_id
    }
    pub fn rating(&self) -> Option<RatingValue> {
        self.draft.rating
    }
    pub fn is_update(&self) -> bool {
        self.editing.is_some()
    }
}

/// Validate the draft and check that it may be stored.
///
/// NOTE:
/// The check for an existing rating of the same identity reads
/// the comments separately from the subsequent write in
/// [`store_comment`]. Two overlapping rated submissions with the
/// same e-mail address may both pass and store two ratings.
pub fn prepare_comment_submission<R: CommentRepo>(
    repo: &R,
    identity: &Identity,
    draft: CommentDraft,
    editing_id: Option<&str>,
) -> Result<Storable> {
    let draft = draft.auto_correct();
    // No I/O until the draft is known to be valid
    draft.validate()?;

    let editing = editing_id.map(|id| repo.load_comment(id)).transpose()?;
    if let Some(comment) = &editing {
        authorize_edit(identity, comment)?;
        if comment.recipe_id != draft.recipe_id {
            return Err(Error::RecipeMismatch);
        }
    }

    if draft.rating.is_some() {
        let comments = repo.load_comments_of_recipe(draft.recipe_id.as_str())?;
        let already_rated = comments.has_active_rating_from(&draft.author_email, editing_id);
        if !rating_permission(identity, editing.as_ref(), already_rated).is_allowed() {
            log::info!(
                "Rejected rating of recipe {} by {}",
                draft.recipe_id,
                draft.author_email
            );
            return Err(Error::RatingNotPermitted);
        }
    }

    Ok(Storable { draft, editing })
}

/// Insert a new comment or overwrite the edited one.
pub fn store_comment<R: CommentRepo>(repo: &R, storable: Storable) -> Result<Comment> {
    let Storable { draft, editing } = storable;
    let comment = match editing {
        Some(existing) => {
            let comment = draft.into_comment(existing.id, existing.created_at);
            repo.update_comment(&comment)?;
            log::debug!("Updated comment {}", comment.id);
            comment
        }
        None => {
            let created_at = Timestamp::now();
            let id = repo.create_comment(draft.clone(), created_at)?;
            log::debug!("Created comment {id}");
            draft.into_comment(id, created_at)
        }
    };
    Ok(comment)
}

/// Update the aggregate rating of the recipe after `comment` has been stored.
///
/// Returns `None` without touching the store if the comment is not rated.
pub fn update_recipe_rating<D: Db>(
    db: &D,
    comment: &Comment,
    mode: AggregationMode,
) -> Result<Option<AvgRatingValue>> {
    let Some(new_rating) = comment.rating else {
        return Ok(None);
    };
    let recipe_id = comment.recipe_id.as_str();
    let avg = match mode {
        AggregationMode::ReadModifyWrite => {
            let comments = db.load_comments_of_recipe(recipe_id)?;
            let existing = comments.ratings_excluding(comment.id.as_str());
            let avg = recompute_aggregate(&existing, new_rating);
            db.store_recipe_rating(recipe_id, avg)?;
            avg
        }
        AggregationMode::Recount => {
            db.recount_recipe_rating(recipe_id, &|comments: &[Comment]| {
                aggregate_of(comments.ratings())
            })?
        }
    };
    log::debug!("Aggregate rating of recipe {recipe_id} is now {avg}");
    Ok(Some(avg))
}
