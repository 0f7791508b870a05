use super::*;
use crate::Result;

/// Remove a comment without recomputing the rating of its recipe.
pub fn delete_comment<R: CommentRepo>(db: &R, comment_id: &str) -> Result<()> {
    usecases::delete_comment(db, comment_id).map_err(|err| {
        warn!("Failed to delete comment {comment_id}: {err}");
        err
    })?;
    info!("Deleted comment {comment_id}");
    Ok(())
}
