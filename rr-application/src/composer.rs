use super::*;
use crate::{error::AppError, Result};
use rr_core::{
    authorization::{
        comment::authorize_edit,
        rating::{rating_permission, RatingPermission},
    },
    usecases::{AggregationMode, LiveComments},
};
use strum::Display;

/// Progress of the submission of a single draft.
///
/// ```text
/// Idle -> Validating -> Persisting -> AggregatingIfRated -> Idle
/// Idle -> Validating -> RejectedLocally -> Idle
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Persisting,
    AggregatingIfRated,
    /// The draft has been rejected without any write to the store.
    /// Stays until the draft is touched or submitted again.
    RejectedLocally,
}

/// Composes and submits the comment of a single caller on a recipe.
#[derive(Debug)]
pub struct CommentComposer {
    identity: Identity,
    recipe_id: Id,
    draft: CommentDraft,
    editing_id: Option<Id>,
    state: SubmissionState,
    aggregation: AggregationMode,
    // Stored, but the aggregate rating of the recipe has not been updated
    unaggregated: Option<Comment>,
}

fn fresh_draft(identity: &Identity, recipe_id: &Id) -> CommentDraft {
    let (author_name, author_email) = if identity.is_authenticated {
        (
            identity.name.clone().unwrap_or_default(),
            identity.email.clone().unwrap_or_default(),
        )
    } else {
        Default::default()
    };
    CommentDraft {
        recipe_id: recipe_id.clone(),
        author_name,
        author_email,
        body: None,
        rating: None,
    }
}

impl CommentComposer {
    pub fn new(identity: Identity, recipe_id: impl Into<Id>) -> Self {
        let recipe_id = recipe_id.into();
        let draft = fresh_draft(&identity, &recipe_id);
        Self {
            identity,
            recipe_id,
            draft,
            editing_id: None,
            state: SubmissionState::Idle,
            aggregation: AggregationMode::default(),
            unaggregated: None,
        }
    }

    pub fn with_aggregation_mode(mut self, aggregation: AggregationMode) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn recipe_id(&self) -> &Id {
        &self.recipe_id
    }

    pub fn aggregation_mode(&self) -> AggregationMode {
        self.aggregation
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn draft(&self) -> &CommentDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CommentDraft {
        self.leave_rejected();
        &mut self.draft
    }

    pub fn editing_id(&self) -> Option<&Id> {
        self.editing_id.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Load a stored comment into the draft.
    ///
    /// Only the author and admins may edit a comment.
    pub fn start_editing(&mut self, comment: &Comment) -> Result<()> {
        if comment.recipe_id != self.recipe_id {
            warn!(
                "Comment {} does not belong to recipe {}",
                comment.id, self.recipe_id
            );
            return Err(AppError::Forbidden);
        }
        authorize_edit(&self.identity, comment).map_err(|err| {
            info!("Refused to edit comment {}: {err}", comment.id);
            AppError::Forbidden
        })?;
        self.leave_rejected();
        self.draft = comment.clone().into();
        self.editing_id = Some(comment.id.clone());
        self.unaggregated = None;
        debug!("Editing comment {}", comment.id);
        Ok(())
    }

    pub fn cancel_editing(&mut self) {
        self.leave_rejected();
        self.reset_draft();
    }

    /// Whether the rating control should be offered for the current draft.
    pub fn rating_permission(&self, live: &LiveComments) -> RatingPermission {
        debug_assert_eq!(live.recipe_id(), &self.recipe_id);
        let editing = self
            .editing_id
            .as_ref()
            .and_then(|id| live.find(id.as_str()));
        let already_rated = live.has_active_rating_from_identity(
            &self.draft.author_email,
            self.editing_id.as_ref().map(Id::as_str),
        );
        rating_permission(&self.identity, editing.as_ref(), already_rated)
    }

    /// Validate the draft, write the comment and, if rated,
    /// update the aggregate rating of the recipe.
    ///
    /// The draft is reset after success and left untouched
    /// after any failure. If only the update of the aggregate
    /// failed, the stored comment becomes the edited one and
    /// submitting the unchanged draft again only retries that update.
    pub fn submit<D: Db>(&mut self, db: &D) -> Result<Comment> {
        self.transition(SubmissionState::Validating);
        if let Some(comment) = self.unchanged_unaggregated() {
            debug!("Retrying the aggregate rating of recipe {}", self.recipe_id);
            self.transition(SubmissionState::Persisting);
            // It might have been deleted in the meantime
            let comment = db.load_comment(comment.id.as_str()).map_err(|err| {
                warn!("Failed to reload comment {}: {err}", comment.id);
                self.transition(SubmissionState::Idle);
                AppError::from(err)
            })?;
            return self.aggregate(db, comment);
        }
        let storable = match usecases::prepare_comment_submission(
            db,
            &self.identity,
            self.draft.clone(),
            self.editing_id.as_ref().map(Id::as_str),
        ) {
            Ok(storable) => storable,
            Err(err) => {
                let err = AppError::from(err);
                if err.is_persistence() {
                    warn!("Failed to prepare comment on recipe {}: {err}", self.recipe_id);
                    self.transition(SubmissionState::Idle);
                } else {
                    info!("Rejected comment on recipe {}: {err}", self.recipe_id);
                    self.transition(SubmissionState::RejectedLocally);
                }
                return Err(err);
            }
        };

        self.transition(SubmissionState::Persisting);
        let comment = usecases::store_comment(db, storable).map_err(|err| {
            warn!("Failed to store comment on recipe {}: {err}", self.recipe_id);
            self.transition(SubmissionState::Idle);
            AppError::from(err)
        })?;
        self.aggregate(db, comment)
    }

    fn aggregate<D: Db>(&mut self, db: &D, comment: Comment) -> Result<Comment> {
        if comment.is_rated() {
            self.transition(SubmissionState::AggregatingIfRated);
            if let Err(err) = usecases::update_recipe_rating(db, &comment, self.aggregation) {
                error!(
                    "Stored comment {}, but failed to update the rating of recipe {}: {err}",
                    comment.id, self.recipe_id
                );
                self.transition(SubmissionState::Idle);
                // Any further submit must not insert the comment again
                self.draft = comment.clone().into();
                self.editing_id = Some(comment.id.clone());
                self.unaggregated = Some(comment);
                return Err(err.into());
            }
        }

        info!("Submitted comment {} on recipe {}", comment.id, self.recipe_id);
        self.transition(SubmissionState::Idle);
        self.reset_draft();
        Ok(comment)
    }

    /// Delete a comment and stop editing it.
    pub fn delete<R: CommentRepo>(&mut self, db: &R, comment_id: &str) -> Result<()> {
        crate::prelude::delete_comment(db, comment_id)?;
        if self.editing_id.as_ref().is_some_and(|id| id == comment_id) {
            self.reset_draft();
        }
        Ok(())
    }

    pub fn load_for_recipe<R: CommentRepo>(&self, db: &R) -> Result<LiveComments> {
        crate::prelude::load_comments_of_recipe(db, self.recipe_id.as_str())
    }

    fn reset_draft(&mut self) {
        self.draft = fresh_draft(&self.identity, &self.recipe_id);
        self.editing_id = None;
        self.unaggregated = None;
    }

    fn unchanged_unaggregated(&self) -> Option<Comment> {
        self.unaggregated
            .as_ref()
            .filter(|comment| {
                self.editing_id.as_ref() == Some(&comment.id)
                    && CommentDraft::from((*comment).clone()) == self.draft
            })
            .cloned()
    }

    fn leave_rejected(&mut self) {
        if self.state == SubmissionState::RejectedLocally {
            self.transition(SubmissionState::Idle);
        }
    }

    fn transition(&mut self, next: SubmissionState) {
        use SubmissionState as S;
        debug_assert!(
            matches!(
                (self.state, next),
                (S::Idle | S::RejectedLocally, S::Validating)
                    | (S::Validating, S::Persisting | S::RejectedLocally | S::Idle)
                    | (S::Persisting, S::AggregatingIfRated | S::Idle)
                    | (S::AggregatingIfRated, S::Idle)
                    | (S::RejectedLocally, S::Idle)
            ),
            "invalid transition {} -> {next}",
            self.state
        );
        debug!("Submission state: {} -> {next}", self.state);
        self.state = next;
    }
}
