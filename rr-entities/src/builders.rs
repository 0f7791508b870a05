pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{comment_builder::*, draft_builder::*};

pub mod comment_builder {

    use super::*;
    use crate::{comment::*, id::*, rating::*, time::*};

    #[derive(Debug)]
    pub struct CommentBuild {
        comment: Comment,
    }

    impl CommentBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.comment.id = id.into();
            self
        }
        pub fn recipe(mut self, recipe_id: &str) -> Self {
            self.comment.recipe_id = recipe_id.into();
            self
        }
        pub fn author(mut self, name: &str, email: &str) -> Self {
            self.comment.author_name = name.into();
            self.comment.author_email = email.into();
            self
        }
        pub fn body(mut self, body: &str) -> Self {
            self.comment.body = Some(body.into());
            self
        }
        pub fn rating(mut self, rating: f64) -> Self {
            self.comment.rating = Some(RatingValue::from(rating));
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.comment.created_at = created_at;
            self
        }
        pub fn finish(self) -> Comment {
            self.comment
        }
    }

    impl Builder for Comment {
        type Build = CommentBuild;
        fn build() -> CommentBuild {
            CommentBuild {
                comment: Comment {
                    id: Id::new(),
                    recipe_id: "".into(),
                    author_name: "".into(),
                    author_email: "".into(),
                    body: None,
                    rating: None,
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}

pub mod draft_builder {

    use super::*;
    use crate::{comment::*, rating::*};

    #[derive(Debug)]
    pub struct CommentDraftBuild {
        draft: CommentDraft,
    }

    impl CommentDraftBuild {
        pub fn recipe(mut self, recipe_id: &str) -> Self {
            self.draft.recipe_id = recipe_id.into();
            self
        }
        pub fn author(mut self, name: &str, email: &str) -> Self {
            self.draft.author_name = name.into();
            self.draft.author_email = email.into();
            self
        }
        pub fn body(mut self, body: &str) -> Self {
            self.draft.body = Some(body.into());
            self
        }
        pub fn rating(mut self, rating: f64) -> Self {
            self.draft.rating = Some(RatingValue::from(rating));
            self
        }
        pub fn finish(self) -> CommentDraft {
            self.draft
        }
    }

    impl Builder for CommentDraft {
        type Build = CommentDraftBuild;
        fn build() -> CommentDraftBuild {
            CommentDraftBuild {
                draft: CommentDraft::default(),
            }
        }
    }
}
