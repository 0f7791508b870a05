use super::*;
use rr_core::repositories::{CommentRepo as _, RecipeRatingRepo as _};
use rr_core::{
    rating::aggregate_of,
    usecases::{self as uc, AggregationMode},
};
use rr_entities::builders::*;
use std::thread;

fn draft(recipe_id: &str, email: &str, rating: Option<f64>) -> CommentDraft {
    let build = CommentDraft::build()
        .recipe(recipe_id)
        .author("someone", email)
        .body("tasty");
    match rating {
        Some(r) => build.rating(r).finish(),
        None => build.finish(),
    }
}

#[test]
fn create_update_and_delete_comments() {
    let db = InMemoryDb::new();
    let id = db
        .create_comment(draft("R1", "a@x.com", None), Timestamp::now())
        .unwrap();
    db.create_comment(draft("R2", "a@x.com", None), Timestamp::now())
        .unwrap();

    let mut comment = db.load_comment(id.as_str()).unwrap();
    assert_eq!(comment.recipe_id, "R1");
    comment.body = Some("even better".into());
    db.update_comment(&comment).unwrap();
    assert_eq!(db.load_comment(id.as_str()).unwrap(), comment);
    assert_eq!(db.load_comments_of_recipe("R1").unwrap().len(), 1);

    db.delete_comment(id.as_str()).unwrap();
    assert!(matches!(
        db.load_comment(id.as_str()),
        Err(repo::Error::NotFound)
    ));
    assert!(matches!(
        db.delete_comment(id.as_str()),
        Err(repo::Error::NotFound)
    ));
    assert_eq!(db.load_comments_of_recipe("R2").unwrap().len(), 1);
}

#[test]
fn comments_keep_their_recipe() {
    let db = InMemoryDb::new();
    let id = db
        .create_comment(draft("R1", "a@x.com", None), Timestamp::now())
        .unwrap();
    let mut comment = db.load_comment(id.as_str()).unwrap();
    comment.recipe_id = "R2".into();
    assert!(db.update_comment(&comment).is_err());
    assert_eq!(db.load_comment(id.as_str()).unwrap().recipe_id, "R1");
}

#[test]
fn unrated_recipes_have_no_rating() {
    let db = InMemoryDb::new();
    assert_eq!(
        db.load_recipe_rating("R1").unwrap(),
        AvgRatingValue::NOT_AVAILABLE
    );
    db.store_recipe_rating("R1", 3.5.into()).unwrap();
    assert_eq!(db.load_recipe_rating("R1").unwrap(), 3.5.into());
}

#[test]
fn subscribers_share_the_latest_snapshot() {
    let db = InMemoryDb::new();
    let first = db.subscribe_comments_of_recipe("R1").unwrap();
    db.create_comment(draft("R1", "a@x.com", None), Timestamp::now())
        .unwrap();
    let second = db.subscribe_comments_of_recipe("R1").unwrap();
    assert!(first.has_changed().unwrap());
    assert!(!second.has_changed().unwrap());
    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().len(), 1);

    // Other recipes are not published
    let other = db.subscribe_comments_of_recipe("R2").unwrap();
    db.create_comment(draft("R1", "b@x.com", None), Timestamp::now())
        .unwrap();
    assert!(!other.has_changed().unwrap());
    assert_eq!(first.borrow().len(), 2);
}

#[test]
fn reject_writes_while_offline() {
    let db = InMemoryDb::new();
    let id = db
        .create_comment(draft("R1", "a@x.com", Some(4.0)), Timestamp::now())
        .unwrap();
    let feed = db.subscribe_comments_of_recipe("R1").unwrap();

    db.set_offline(true);
    assert!(matches!(
        db.create_comment(draft("R1", "b@x.com", None), Timestamp::now()),
        Err(repo::Error::Io(_))
    ));
    assert!(matches!(
        db.delete_comment(id.as_str()),
        Err(repo::Error::Io(_))
    ));
    assert!(matches!(
        db.store_recipe_rating("R1", 4.0.into()),
        Err(repo::Error::Io(_))
    ));
    // Reading and subscribing still works
    assert_eq!(db.load_comments_of_recipe("R1").unwrap().len(), 1);
    assert!(db.subscribe_comments_of_recipe("R1").is_ok());
    assert!(!feed.has_changed().unwrap());

    db.set_offline(false);
    db.delete_comment(id.as_str()).unwrap();
    assert!(feed.has_changed().unwrap());
}

#[test]
fn persist_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments.json");

    let db = InMemoryDb::open(&path).unwrap();
    assert_eq!(db.file(), Some(path.as_path()));
    assert!(!path.exists());
    let created_at = Timestamp::from_millis(1_700_000_000_123);
    let id = db
        .create_comment(draft("R1", "a@x.com", Some(4.0)), created_at)
        .unwrap();
    db.create_comment(draft("R1", "b@x.com", None), created_at)
        .unwrap();
    db.store_recipe_rating("R1", 4.0.into()).unwrap();
    assert!(path.exists());
    let expected = db.load_comments_of_recipe("R1").unwrap();
    drop(db);

    let db = InMemoryDb::open(&path).unwrap();
    assert_eq!(db.load_comments_of_recipe("R1").unwrap(), expected);
    assert_eq!(db.load_comment(id.as_str()).unwrap().created_at, created_at);
    assert_eq!(db.load_recipe_rating("R1").unwrap(), 4.0.into());
}

#[test]
fn fail_on_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments.json");
    std::fs::write(&path, "no json").unwrap();
    assert!(InMemoryDb::open(&path).is_err());
}

#[test]
fn roll_back_writes_that_cannot_be_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments.json");
    let db = InMemoryDb::open(&path).unwrap();
    let id = db
        .create_comment(draft("R1", "a@x.com", Some(4.0)), Timestamp::now())
        .unwrap();
    db.store_recipe_rating("R1", 4.0.into()).unwrap();
    let feed = db.subscribe_comments_of_recipe("R1").unwrap();
    let comments = db.load_comments_of_recipe("R1").unwrap();

    // The sibling file cannot be written if it is a directory
    std::fs::create_dir(path.with_extension("tmp")).unwrap();

    assert!(db
        .create_comment(draft("R1", "b@x.com", None), Timestamp::now())
        .is_err());
    let mut edited = comments[0].clone();
    edited.body = Some("changed".into());
    assert!(db.update_comment(&edited).is_err());
    assert!(db.delete_comment(id.as_str()).is_err());
    assert!(db.store_recipe_rating("R1", 2.0.into()).is_err());
    assert!(db.store_recipe_rating("R2", 2.0.into()).is_err());
    assert!(db
        .recount_recipe_rating("R1", &|_: &[Comment]| AvgRatingValue::from(1.0))
        .is_err());

    assert_eq!(db.load_comments_of_recipe("R1").unwrap(), comments);
    assert_eq!(db.load_recipe_rating("R1").unwrap(), 4.0.into());
    assert_eq!(
        db.load_recipe_rating("R2").unwrap(),
        AvgRatingValue::NOT_AVAILABLE
    );
    assert!(!feed.has_changed().unwrap());

    std::fs::remove_dir(path.with_extension("tmp")).unwrap();
    db.delete_comment(id.as_str()).unwrap();
    assert!(feed.has_changed().unwrap());
}

#[test]
fn keep_the_file_readable_after_non_finite_ratings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments.json");
    let db = InMemoryDb::open(&path).unwrap();
    submit_rating(&db, "a@x.com", 4.0).unwrap();

    assert!(submit_rating(&db, "b@x.com", f64::INFINITY).is_err());
    assert!(submit_rating(&db, "c@x.com", f64::NAN).is_err());
    assert!(db.store_recipe_rating("R2", f64::NAN.into()).is_err());
    assert_eq!(db.load_comments_of_recipe("R1").unwrap().len(), 1);
    drop(db);

    let db = InMemoryDb::open(&path).unwrap();
    assert_eq!(db.load_comments_of_recipe("R1").unwrap().len(), 1);
    assert_eq!(db.load_recipe_rating("R1").unwrap(), 4.0.into());
}

#[test]
fn drop_feeds_without_subscribers() {
    let db = InMemoryDb::new();
    let feed = db.subscribe_comments_of_recipe("R1").unwrap();
    assert_eq!(db.shared().feeds.len(), 1);
    db.create_comment(draft("R1", "a@x.com", None), Timestamp::now())
        .unwrap();
    assert_eq!(db.shared().feeds.len(), 1);

    drop(feed);
    db.create_comment(draft("R1", "b@x.com", None), Timestamp::now())
        .unwrap();
    assert!(db.shared().feeds.is_empty());

    // Subscribing again starts from the latest snapshot
    let feed = db.subscribe_comments_of_recipe("R1").unwrap();
    assert_eq!(feed.borrow().len(), 2);
}

fn submit_rating(db: &InMemoryDb, email: &str, rating: f64) -> Result<(), uc::Error> {
    let identity = Identity::user(email, "someone");
    let storable =
        uc::prepare_comment_submission(db, &identity, draft("R1", email, Some(rating)), None)?;
    let comment = uc::store_comment(db, storable)?;
    uc::update_recipe_rating(db, &comment, AggregationMode::Recount)?;
    Ok(())
}

#[test]
fn concurrent_recounts_keep_every_rating() {
    let db = InMemoryDb::new();
    let ratings: Vec<f64> = (0..32_u8).map(|i| f64::from(i % 5 + 1)).collect();
    let handles: Vec<_> = ratings
        .iter()
        .enumerate()
        .map(|(i, &rating)| {
            let db = db.clone();
            thread::spawn(move || submit_rating(&db, &format!("user{i}@x.com"), rating))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    let expected = aggregate_of(ratings.into_iter().map(RatingValue::from));
    assert_eq!(db.load_recipe_rating("R1").unwrap(), expected);
    assert_eq!(db.load_comments_of_recipe("R1").unwrap().len(), 32);
}
