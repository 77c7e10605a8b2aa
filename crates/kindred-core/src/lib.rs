//! Domain layer for Kindred.
//!
//! Holds the pure parts of the quiz: the question and analysis models, the
//! wizard state machine that walks a user from the landing screen to their
//! historical match, configuration types, and the traits that the
//! infrastructure layer implements (assessment storage, secret loading).

pub mod analysis;
pub mod assessment;
pub mod config;
pub mod error;
pub mod question;
pub mod secret;
pub mod session;

pub use error::KindredError;
