//! The login action.

use crate::models::Credentials;
use crate::providers::AuthProvider;
use emberbb_core::{Action, Execution, Request, RunError};
use std::sync::Arc;
use tracing::debug;

/// Handles `handle_login`: authenticates the submitted credentials.
///
/// On success redirects to `index`; on a wrong username/password
/// combination accumulates a single error routed back to the `login`
/// page.
pub struct Login {
    auth: Arc<dyn AuthProvider>,
}

impl Login {
    /// Wrap the auth collaborator.
    #[must_use]
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }
}

impl Action for Login {
    fn run(&mut self, exec: &mut Execution) -> Result<(), RunError> {
        exec.on_error_redirect_to(Request::new("login"));

        let credentials = Credentials {
            username: exec
                .request()
                .get_str("req_username")
                .unwrap_or_default()
                .to_owned(),
            password: exec
                .request()
                .get_str("req_password")
                .unwrap_or_default()
                .to_owned(),
        };
        let remember = exec.request().get_bool("remember").unwrap_or(false);

        if self.auth.attempt(&credentials, remember)? {
            debug!(username = %credentials.username, "login succeeded");
            exec.redirect_to(Request::new("index"), "You are now logged in.");
        } else {
            debug!(username = %credentials.username, "login rejected");
            exec.add_error("Invalid username / password combination");
        }

        Ok(())
    }
}
