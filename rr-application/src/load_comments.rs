use super::*;
use crate::Result;
use rr_core::usecases::LiveComments;

pub fn load_comments_of_recipe<R: CommentRepo>(db: &R, recipe_id: &str) -> Result<LiveComments> {
    let live = usecases::load_comments_of_recipe(db, recipe_id)?;
    debug!(
        "Subscribed to {} comments of recipe {recipe_id}",
        live.len()
    );
    Ok(live)
}
