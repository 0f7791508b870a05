
pub mod prelude {
    pub use rr_core::{
        authorization::rating::RatingPermission,
        entities::*,
        repositories::{
            self as repo, CommentFeed, CommentRepo, Error as RepoError, RecipeRatingRepo,
        },
        usecases::AggregationMode,
        util::validate::DraftField,
    };
    pub use rr_db_memory::InMemoryDb;

    pub use crate::{error::AppError, prelude as flows};

    pub fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    pub fn alice() -> Identity {
        Identity::user("a@x.com", "Alice")
    }

    pub fn bob() -> Identity {
        Identity::user("b@y.com", "Bob")
    }

    pub fn admin() -> Identity {
        Identity::admin("admin@y.com", "Admin")
    }

    pub struct BackendFixture {
        pub db: InMemoryDb,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            init_logging();
            Self {
                db: InMemoryDb::new(),
            }
        }

        pub fn composer(&self, identity: Identity, recipe_id: &str) -> flows::CommentComposer {
            flows::CommentComposer::new(identity, recipe_id)
        }

        /// Submit a comment as the given identity, attributed to that identity.
        pub fn submit(
            &self,
            identity: Identity,
            recipe_id: &str,
            body: Option<&str>,
            rating: Option<f64>,
        ) -> Result<Comment, AppError> {
            let mut composer = self.composer(identity, recipe_id);
            let draft = composer.draft_mut();
            draft.body = body.map(Into::into);
            draft.rating = rating.map(Into::into);
            composer.submit(&self.db)
        }

        pub fn recipe_rating(&self, recipe_id: &str) -> AvgRatingValue {
            self.db.load_recipe_rating(recipe_id).unwrap()
        }

        pub fn try_get_comment(&self, id: &str) -> Option<Comment> {
            match self.db.load_comment(id) {
                Ok(comment) => Some(comment),
                Err(RepoError::NotFound) => None,
                x => x.map(|_| None).unwrap(),
            }
        }

        pub fn comment_count(&self, recipe_id: &str) -> usize {
            self.db.load_comments_of_recipe(recipe_id).unwrap().len()
        }
    }

    /// Lets the next writes of the aggregate rating fail.
    pub struct FailingRatingWrites<'a> {
        pub db: &'a InMemoryDb,
        pub remaining: std::cell::Cell<usize>,
    }

    impl<'a> FailingRatingWrites<'a> {
        pub fn new(db: &'a InMemoryDb, count: usize) -> Self {
            Self {
                db,
                remaining: count.into(),
            }
        }

        fn fail(&self) -> repo::Result<()> {
            let remaining = self.remaining.get();
            if remaining == 0 {
                return Ok(());
            }
            self.remaining.set(remaining - 1);
            Err(anyhow::anyhow!("aggregate write rejected").into())
        }
    }

    impl CommentRepo for FailingRatingWrites<'_> {
        fn create_comment(&self, draft: CommentDraft, created_at: Timestamp) -> repo::Result<Id> {
            self.db.create_comment(draft, created_at)
        }
        fn update_comment(&self, comment: &Comment) -> repo::Result<()> {
            self.db.update_comment(comment)
        }
        fn delete_comment(&self, id: &str) -> repo::Result<()> {
            self.db.delete_comment(id)
        }
        fn load_comment(&self, id: &str) -> repo::Result<Comment> {
            self.db.load_comment(id)
        }
        fn load_comments_of_recipe(&self, recipe_id: &str) -> repo::Result<Vec<Comment>> {
            self.db.load_comments_of_recipe(recipe_id)
        }
        fn subscribe_comments_of_recipe(&self, recipe_id: &str) -> repo::Result<CommentFeed> {
            self.db.subscribe_comments_of_recipe(recipe_id)
        }
    }

    impl RecipeRatingRepo for FailingRatingWrites<'_> {
        fn load_recipe_rating(&self, recipe_id: &str) -> repo::Result<AvgRatingValue> {
            self.db.load_recipe_rating(recipe_id)
        }
        fn store_recipe_rating(&self, recipe_id: &str, rating: AvgRatingValue) -> repo::Result<()> {
            self.fail()?;
            self.db.store_recipe_rating(recipe_id, rating)
        }
        fn recount_recipe_rating(
            &self,
            recipe_id: &str,
            recount: &dyn Fn(&[Comment]) -> AvgRatingValue,
        ) -> repo::Result<AvgRatingValue> {
            self.fail()?;
            self.db.recount_recipe_rating(recipe_id, recount)
        }
    }
}
