//! The logout action.

use crate::providers::AuthProvider;
use emberbb_core::{Action, Execution, Request, RunError};
use std::sync::Arc;

/// Handles `logout`: terminates the current session and redirects home.
///
/// Never produces a user-recoverable error; an auth backend failure is a
/// fault.
pub struct Logout {
    auth: Arc<dyn AuthProvider>,
}

impl Logout {
    /// Wrap the auth collaborator.
    #[must_use]
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }
}

impl Action for Logout {
    fn run(&mut self, exec: &mut Execution) -> Result<(), RunError> {
        self.auth.logout()?;
        exec.redirect_to(Request::new("index"), "You have been logged out.");
        Ok(())
    }
}
