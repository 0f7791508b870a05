//! Aggregation of the ratings of a recipe.
//!
//! The displayed aggregate is the mean of all ratings rounded to
//! the nearest half unit. An empty set of ratings results in
//! [`AvgRatingValue::NOT_AVAILABLE`].

use crate::entities::*;

/// Fold a newly submitted rating into the ratings of all *other*
/// comments of the recipe.
///
/// The new comment has not necessarily been observed by the caller's
/// snapshot yet, so it is passed separately and must not be part
/// of `existing_ratings`.
pub fn recompute_aggregate(
    existing_ratings: &[RatingValue],
    new_rating: RatingValue,
) -> AvgRatingValue {
    aggregate_of(
        existing_ratings
            .iter()
            .copied()
            .chain(std::iter::once(new_rating)),
    )
}

pub fn aggregate_of(ratings: impl IntoIterator<Item = RatingValue>) -> AvgRatingValue {
    ratings
        .into_iter()
        .collect::<AvgRatingValueBuilder>()
        .build()
        .round_to_half_step()
}

pub trait Rated {
    fn ratings(&self) -> Vec<RatingValue>;

    fn ratings_excluding(&self, comment_id: &str) -> Vec<RatingValue>;

    fn rating_summary(&self) -> RatingSummary;

    /// Whether the identity holds an active rating, i.e. a rated
    /// comment other than the one identified by `excluding_id`.
    fn has_active_rating_from(&self, email: &str, excluding_id: Option<&str>) -> bool;
}

impl Rated for [Comment] {
    fn ratings(&self) -> Vec<RatingValue> {
        self.iter().filter_map(|c| c.rating).collect()
    }

    fn ratings_excluding(&self, comment_id: &str) -> Vec<RatingValue> {
        self.iter()
            .filter(|c| c.id != comment_id)
            .filter_map(|c| c.rating)
            .collect()
    }

    fn rating_summary(&self) -> RatingSummary {
        let ratings = self.ratings();
        RatingSummary {
            count: ratings.len(),
            avg: aggregate_of(ratings),
        }
    }

    fn has_active_rating_from(&self, email: &str, excluding_id: Option<&str>) -> bool {
        self.iter()
            .filter(|c| excluding_id.map(|id| c.id != id).unwrap_or(true))
            .any(|c| c.is_rated() && c.is_authored_by(email))
    }
}
