use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use rr_application::prelude::*;
use rr_boundary as json;
use rr_core::{
    entities::*,
    repositories::{CommentRepo as _, RecipeRatingRepo as _},
    usecases::AggregationMode,
};
use rr_db_memory::InMemoryDb;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipe-reviews", version, about = "Comments and ratings of recipes")]
struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// JSON file of the comment store
    #[arg(long, value_name = "FILE")]
    db_file: Option<PathBuf>,
    /// How to update the aggregate rating: read-modify-write | recount
    #[arg(long, value_name = "MODE")]
    aggregation: Option<AggregationMode>,
    #[command(flatten)]
    caller: Caller,
    #[command(subcommand)]
    command: Command,
}

/// The verified caller, as an identity provider would report it.
#[derive(Args)]
struct Caller {
    /// E-mail address of an authenticated caller
    #[arg(long, global = true)]
    email: Option<String>,
    /// Display name of an authenticated caller
    #[arg(long, global = true)]
    name: Option<String>,
    /// The authenticated caller is an admin
    #[arg(long, global = true, requires = "email")]
    admin: bool,
}

impl From<Caller> for Identity {
    fn from(from: Caller) -> Self {
        let Caller { email, name, admin } = from;
        match email {
            Some(email) => {
                let name = name.unwrap_or_default();
                if admin {
                    Identity::admin(email, name)
                } else {
                    Identity::user(email, name)
                }
            }
            None => Identity::anonymous(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Submit a new comment on a recipe
    Submit {
        recipe: String,
        #[arg(long)]
        body: Option<String>,
        #[arg(long, value_parser = parse_rating)]
        rating: Option<f64>,
        /// Defaults to the name of the caller
        #[arg(long)]
        author_name: Option<String>,
        /// Defaults to the e-mail address of the caller
        #[arg(long)]
        author_email: Option<String>,
    },
    /// Overwrite an existing comment
    Edit {
        comment: String,
        #[arg(long)]
        body: Option<String>,
        #[arg(long, value_parser = parse_rating)]
        rating: Option<f64>,
        #[arg(long, conflicts_with = "body")]
        remove_body: bool,
        #[arg(long, conflicts_with = "rating")]
        remove_rating: bool,
    },
    /// Delete a comment
    Delete { comment: String },
    /// List all comments of a recipe, newest first
    List { recipe: String },
    /// Show the aggregate rating of a recipe
    Rating { recipe: String },
    /// Check whether the caller may submit a rating for a recipe
    MayRate {
        recipe: String,
        /// While editing this comment
        #[arg(long)]
        editing: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let Cli {
        config,
        db_file,
        aggregation,
        caller,
        command,
    } = Cli::parse();

    let cfg = Config::try_load_from_file_or_default(config)?;
    let db = open_db(db_file.or(cfg.db.file))?;
    let aggregation = aggregation.unwrap_or(cfg.ratings.aggregation);
    log::debug!("Updating aggregate ratings with {aggregation}");
    let identity = Identity::from(caller);

    match command {
        Command::Submit {
            recipe,
            body,
            rating,
            author_name,
            author_email,
        } => {
            let mut composer =
                CommentComposer::new(identity, recipe).with_aggregation_mode(aggregation);
            let draft = composer.draft_mut();
            if let Some(name) = author_name {
                draft.author_name = name;
            }
            if let Some(email) = author_email {
                draft.author_email = email;
            }
            draft.body = body;
            draft.rating = rating.map(Into::into);
            let comment = composer.submit(&db)?;
            print_json(&json::Comment::from(comment))
        }
        Command::Edit {
            comment,
            body,
            rating,
            remove_body,
            remove_rating,
        } => {
            let comment = db.load_comment(&comment)?;
            let mut composer = CommentComposer::new(identity, comment.recipe_id.clone())
                .with_aggregation_mode(aggregation);
            composer.start_editing(&comment)?;
            let draft = composer.draft_mut();
            if body.is_some() || remove_body {
                draft.body = body;
            }
            if rating.is_some() || remove_rating {
                draft.rating = rating.map(Into::into);
            }
            let comment = composer.submit(&db)?;
            print_json(&json::Comment::from(comment))
        }
        Command::Delete { comment } => {
            delete_comment(&db, &comment)?;
            Ok(())
        }
        Command::List { recipe } => {
            let live = load_comments_of_recipe(&db, &recipe)?;
            let stored_rating = db.load_recipe_rating(&recipe)?;
            print_json(&json::RecipeComments {
                recipe_id: recipe,
                stored_rating: stored_rating.into(),
                summary: live.rating_summary().into(),
                comments: live.comments().into_iter().map(Into::into).collect(),
            })
        }
        Command::Rating { recipe } => {
            let rating = db.load_recipe_rating(&recipe)?;
            println!("{rating}");
            Ok(())
        }
        Command::MayRate { recipe, editing } => {
            let mut composer = CommentComposer::new(identity, recipe);
            if let Some(id) = editing {
                composer.start_editing(&db.load_comment(&id)?)?;
            }
            let live = composer.load_for_recipe(&db)?;
            let permission = composer.rating_permission(&live);
            match permission.message() {
                Some(message) => Err(anyhow!("{message}")),
                None => {
                    println!("yes");
                    Ok(())
                }
            }
        }
    }
}

fn open_db(file: Option<PathBuf>) -> Result<InMemoryDb> {
    match file {
        Some(file) => InMemoryDb::open(file),
        None => {
            log::warn!("No comment file configured, nothing will be saved");
            Ok(InMemoryDb::new())
        }
    }
}

fn parse_rating(arg: &str) -> Result<f64, String> {
    let rating: f64 = arg.parse().map_err(|err| format!("{err}"))?;
    if !rating.is_finite() {
        return Err(format!("{arg} is not a finite number"));
    }
    Ok(rating)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
