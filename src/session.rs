//! Interactive session: the current profile plus a memoized calculator.
//!
//! Field edits mutate the profile; the next [`Session::report`] call
//! recomputes only if the resulting snapshot actually changed.

use std::rc::Rc;

use tracing::info;

use crate::calc::{Calculator, CostReport};
use crate::config::{ConfigError, ProfileConfig};
use crate::input::split_assignment;

/// Current inputs and cached derivations.
#[derive(Debug)]
pub struct Session {
    profile: ProfileConfig,
    calculator: Calculator,
}

impl Session {
    /// Starts a session from a profile.
    pub fn new(profile: ProfileConfig) -> Self {
        Self {
            profile,
            calculator: Calculator::new(),
        }
    }

    /// Current profile.
    pub fn profile(&self) -> &ProfileConfig {
        &self.profile
    }

    /// Report for the current inputs.
    pub fn report(&mut self) -> Rc<CostReport> {
        let snapshot = self.profile.snapshot();
        let params = self.profile.params();
        self.calculator.report(&snapshot, &params)
    }

    /// Applies a `section.field=value` assignment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the assignment is malformed or names an
    /// unknown field. The profile is unchanged on error.
    pub fn apply(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (path, raw) = split_assignment(assignment).ok_or_else(|| {
            ConfigError::new(assignment.trim(), "expected <section>.<field>=<value>")
        })?;
        self.profile.set_field(path, raw)?;
        info!(field = path, value = raw, "input updated");
        Ok(())
    }

    /// Number of reports actually derived so far.
    pub fn recomputations(&self) -> usize {
        self.calculator.recomputations()
    }
}
