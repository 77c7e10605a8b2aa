//! Data Transfer Objects (DTOs) for persistence.
//!
//! Private schema of what goes to disk or over the wire, kept apart from
//! the domain types so either can change independently.
//!
//! ### Assessment file Version History
//! - **1.0.0**: Initial schema

mod assessment;

pub use assessment::{ASSESSMENT_SCHEMA_VERSION, AssessmentRow, AssessmentV1_0_0};
