//! Validation of records entered by users.
//!
//! Manual novelties, employees and users are checked here before they reach
//! the store. The calculation modules assume their input already passed.

mod employee;
mod novelty;
mod user;

pub use employee::validate_employee;
pub use novelty::{NoveltyInput, NoveltyRequest, prepare_novelty};
pub use user::validate_user;
