use super::*;
use rr_entities as e;

impl From<e::comment::Comment> for Comment {
    fn from(from: e::comment::Comment) -> Self {
        let e::comment::Comment {
            id,
            recipe_id,
            author_name,
            author_email,
            body,
            rating,
            created_at,
        } = from;
        Self {
            id: id.into(),
            recipe_id: recipe_id.into(),
            author_name,
            author_email,
            body,
            rating: rating.map(Into::into),
            created_at: created_at.as_millis(),
        }
    }
}

impl From<Comment> for e::comment::Comment {
    fn from(from: Comment) -> Self {
        let Comment {
            id,
            recipe_id,
            author_name,
            author_email,
            body,
            rating,
            created_at,
        } = from;
        Self {
            id: id.into(),
            recipe_id: recipe_id.into(),
            author_name,
            author_email,
            body,
            rating: rating.map(Into::into),
            created_at: e::time::Timestamp::from_millis(created_at),
        }
    }
}

impl From<e::rating::RatingSummary> for RatingSummary {
    fn from(from: e::rating::RatingSummary) -> Self {
        let e::rating::RatingSummary { avg, count } = from;
        Self {
            avg: avg.into(),
            count,
        }
    }
}
