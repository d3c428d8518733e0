//! # emberbb Server
//!
//! The dispatch registry: maps request names to action factories and
//! validators, and performs the full dispatch of a [`Request`]
//! end-to-end.
//!
//! # Dispatch Order
//!
//! ```text
//! Request
//!    │
//!    ▼
//! validator for name?  ──fail──► Response::Error (action never built)
//!    │ pass / none
//!    ▼
//! factory for name?    ──none──► Err(DispatchError::UnknownAction)
//!    │
//!    ▼
//! Pipeline::handle     ──fault─► Err (surfaced unmodified)
//!    │
//!    ▼
//! success/error hooks fired against the observed variant
//!    │
//!    ▼
//! Response
//! ```
//!
//! # Concurrency
//!
//! Registration takes `&mut self`; dispatch takes `&self`. Wrap the
//! server in an `Arc` once registration is complete and dispatch from as
//! many threads as the transport layer likes — every dispatch confines
//! its mutable state to one freshly built pipeline, and the registry
//! maps are never mutated while serving.
//!
//! # Example
//!
//! ```
//! use emberbb_core::{Action, Execution, Pipeline, Request, RunError};
//! use emberbb_server::Server;
//!
//! struct Hello;
//! impl Action for Hello {
//!     fn run(&mut self, exec: &mut Execution) -> Result<(), RunError> {
//!         exec.set("greeting", "hello");
//!         Ok(())
//!     }
//! }
//!
//! let mut server = Server::new();
//! server.register_action("hello", || Pipeline::new(Hello));
//!
//! let response = server.dispatch(Request::new("hello")).unwrap();
//! assert!(response.is_data());
//! ```

use emberbb_core::{DispatchError, Pipeline, Request, Response, ValidationOutcome, Validator};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, debug_span, error};
use uuid::Uuid;

/// Produces a fresh, fully wired pipeline for one dispatch.
///
/// A factory constructs the action with all of its collaborators already
/// injected; failure to wire a collaborator is a startup concern, never a
/// per-request one. Resolution happens at dispatch time, not at
/// registration time, so per-request state stays isolated.
pub type PipelineFactory = Box<dyn Fn() -> Pipeline + Send + Sync>;

/// The name-keyed dispatch registry.
///
/// Holds the action-factory and validator tables and exposes
/// [`dispatch`](Self::dispatch) as the sole entry point for the
/// transport layer.
#[derive(Default)]
pub struct Server {
    actions: HashMap<String, PipelineFactory>,
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl Server {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a request name with a pipeline factory.
    ///
    /// Re-registering a name overwrites the previous mapping;
    /// registration order across different names is irrelevant.
    pub fn register_action(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Pipeline + Send + Sync + 'static,
    ) {
        self.actions.insert(name.into(), Box::new(factory));
    }

    /// Associate a request name with a validator.
    ///
    /// Absence of an entry means "no validation required". Last write
    /// wins per name.
    pub fn register_validator(
        &mut self,
        name: impl Into<String>,
        validator: impl Validator + 'static,
    ) {
        self.validators.insert(name.into(), Arc::new(validator));
    }

    /// Whether an action is registered under the given name.
    #[must_use]
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Dispatch a request end-to-end.
    ///
    /// Runs the validator chain, resolves and executes the action
    /// pipeline, fires the success/error hooks against the observed
    /// response variant, and returns the response.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::UnknownAction`] if no factory is registered for
    ///   the request's name.
    /// - [`DispatchError::MissingErrorTarget`] /
    ///   [`DispatchError::ActionFault`] surfaced from the pipeline.
    ///
    /// A failing validator is *not* an error: it short-circuits into a
    /// normal [`Response::Error`] without ever constructing the action.
    pub fn dispatch(&self, request: Request) -> Result<Response, DispatchError> {
        let correlation_id = Uuid::new_v4();
        let span = debug_span!("dispatch", action = %request.name(), %correlation_id);
        let _guard = span.enter();

        if let Some(validator) = self.validators.get(request.name()) {
            if let ValidationOutcome::Fail { target, errors } = validator.validate(&request) {
                debug!(count = errors.len(), "request rejected by validator");
                return Ok(Response::Error { target, errors });
            }
        }

        let Some(factory) = self.actions.get(request.name()) else {
            error!("no action registered for request name");
            return Err(DispatchError::UnknownAction {
                name: request.name().to_owned(),
            });
        };

        let handled = factory().handle(request)?;
        handled.notify();

        debug!(variant = handled.response().kind(), "dispatch complete");
        Ok(handled.into_response())
    }
}
