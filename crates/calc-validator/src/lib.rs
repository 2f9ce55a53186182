//! Calculator Input Validation
//!
//! Shared error type, range checking, and ordered breakpoint tables used by
//! every calculator crate in the workspace.

mod breakpoints;
mod error;
mod validator;

pub use breakpoints::BreakpointTable;
pub use error::ValidationError;
pub use validator::{
    require_count, require_finite, require_non_negative, require_not_exceeding, require_positive,
    require_range,
};
