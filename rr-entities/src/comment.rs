use crate::{id::*, rating::*, time::*};

/// A stored comment on a recipe, optionally carrying a rating.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id           : Id,
    pub recipe_id    : Id,
    pub author_name  : String,
    pub author_email : String,
    // `None` means "no text", which is not the same as an empty text.
    pub body         : Option<String>,
    pub rating       : Option<RatingValue>,
    pub created_at   : Timestamp,
}

impl Comment {
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    pub fn is_authored_by(&self, email: &str) -> bool {
        self.author_email == email
    }
}

/// The not yet persisted input of a comment.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommentDraft {
    pub recipe_id    : Id,
    pub author_name  : String,
    pub author_email : String,
    pub body         : Option<String>,
    pub rating       : Option<RatingValue>,
}

impl CommentDraft {
    pub fn into_comment(self, id: Id, created_at: Timestamp) -> Comment {
        let Self {
            recipe_id,
            author_name,
            author_email,
            body,
            rating,
        } = self;
        Comment {
            id,
            recipe_id,
            author_name,
            author_email,
            body,
            rating,
            created_at,
        }
    }
}

impl From<Comment> for CommentDraft {
    fn from(from: Comment) -> Self {
        let Comment {
            recipe_id,
            author_name,
            author_email,
            body,
            rating,
            ..
        } = from;
        Self {
            recipe_id,
            author_name,
            author_email,
            body,
            rating,
        }
    }
}
