pub mod authorization;
pub mod db;
pub mod rating;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use rr_entities::{comment::*, id::*, identity::*, rating::*, time::*};
}
