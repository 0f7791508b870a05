use super::*;
use rr_boundary as json;
use std::fs;

pub(crate) fn load(path: &Path) -> Fallible<State> {
    let contents = fs::read(path)?;
    let json::StoreSnapshot {
        comments,
        recipe_ratings,
    } = serde_json::from_slice(&contents)?;
    let comments = comments.into_iter().map(Comment::from).collect::<Vec<_>>();
    let recipe_ratings = recipe_ratings
        .into_iter()
        .map(|r| (Id::from(r.recipe_id), AvgRatingValue::from(r.rating)))
        .collect();
    log::debug!("Loaded {} comments", comments.len());
    Ok(State {
        comments,
        recipe_ratings,
        feeds: Default::default(),
    })
}

pub(crate) fn save(path: &Path, state: &State) -> Fallible<()> {
    // JSON has no representation for them and would write `null`
    if let Some(comment) = state
        .comments
        .iter()
        .find(|c| c.rating.is_some_and(|r| !f64::from(r).is_finite()))
    {
        anyhow::bail!("Comment {} has a rating that is not a finite number", comment.id);
    }
    if let Some(recipe_id) = state
        .recipe_ratings
        .iter()
        .find_map(|(id, rating)| (!f64::from(*rating).is_finite()).then_some(id))
    {
        anyhow::bail!("Recipe {recipe_id} has a rating that is not a finite number");
    }
    let mut recipe_ratings: Vec<_> = state
        .recipe_ratings
        .iter()
        .map(|(recipe_id, rating)| json::RecipeRating {
            recipe_id: recipe_id.to_string(),
            rating: (*rating).into(),
        })
        .collect();
    // Stable file contents
    recipe_ratings.sort_by(|a, b| a.recipe_id.cmp(&b.recipe_id));
    let snapshot = json::StoreSnapshot {
        comments: state.comments.iter().cloned().map(Into::into).collect(),
        recipe_ratings,
    };
    let contents = serde_json::to_vec_pretty(&snapshot)?;
    // Write to a sibling file first to never leave a truncated file behind
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
