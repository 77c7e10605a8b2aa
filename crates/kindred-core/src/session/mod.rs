//! Session domain module.
//!
//! # Module Structure
//!
//! - `step`: the five wizard screens (`WizardStep`)
//! - `state`: per-session data owned by the controller (`SessionState`)
//! - `guess`: the "who do you think you are" selection (`GuessSelection`)
//! - `event`: notifications emitted on accepted transitions (`WizardEvent`)
//! - `wizard`: the state machine itself (`WizardController`, `WizardPolicy`)

mod event;
mod guess;
mod state;
mod step;
mod wizard;

pub use event::WizardEvent;
pub use guess::{
    GuessError, GuessSelection, GuessVerdict, HISTORICAL_FIGURES, MAX_GUESSES, guess_verdict,
    normalize_guesses,
};
pub use state::SessionState;
pub use step::WizardStep;
pub use wizard::{TransitionError, WizardController, WizardPolicy};
