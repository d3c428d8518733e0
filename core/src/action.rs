//! The action trait and the pipeline that executes it.
//!
//! An [`Action`] is a single-use unit of business logic bound to one
//! request name. The [`Pipeline`] wraps one action instance plus its
//! lifecycle hooks and turns one [`Request`] into one
//! [`Response`] through a fixed sequence, uniform across all actions:
//!
//! 1. `before` hooks, in registration order
//! 2. [`Action::run`]
//! 3. response construction from the accumulated [`Execution`] state
//! 4. `after` hooks (also on the validation-recovery path)
//!
//! Validation failures ([`RunError::Validation`]) are the only failure
//! kind intercepted at this boundary; any other fault propagates as
//! [`DispatchError::ActionFault`] and skips the `after` hooks.

use crate::error::DispatchError;
use crate::execution::Execution;
use crate::request::Request;
use crate::response::Response;
use smallvec::SmallVec;
use thiserror::Error;

/// A unit of business logic, executed once per request instance.
///
/// Implementations read from the request via the [`Execution`], perform
/// side effects through their injected collaborators, and report their
/// outcome by mutating the execution state — never by constructing a
/// [`Response`] themselves.
pub trait Action: Send {
    /// Run the action's business logic against fresh per-run state.
    ///
    /// # Errors
    ///
    /// - [`RunError::Validation`] for a batch of user-recoverable
    ///   messages; the pipeline merges them into the execution's error
    ///   state and continues with normal response construction.
    /// - [`RunError::Fault`] for everything else; the pipeline performs
    ///   no recovery and surfaces it unmodified.
    fn run(&mut self, exec: &mut Execution) -> Result<(), RunError>;
}

/// The distinguished failure channel out of [`Action::run`].
#[derive(Debug, Error)]
pub enum RunError {
    /// A user-recoverable validation failure carrying its messages.
    ///
    /// This is the only failure kind the pipeline intercepts.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<String>),

    /// Any other failure; propagates out of the pipeline unconverted.
    ///
    /// The `From<anyhow::Error>` impl lets `run()` use `?` directly on
    /// collaborator failures.
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

impl RunError {
    /// Build a validation failure from a batch of messages.
    pub fn validation<I>(errors: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::Validation(errors.into_iter().map(Into::into).collect())
    }
}

/// Hook invoked before and after `run()`, observing the per-run state.
///
/// Extra per-registration context is captured by the closure itself.
pub type LifecycleHook = Box<dyn Fn(&mut Execution) + Send>;

/// Hook invoked by the dispatch layer once the final response variant is
/// known. Must not retain either reference beyond the call.
pub type CompletionHook = Box<dyn Fn(&Execution, &Response) + Send>;

#[derive(Default)]
struct Hooks {
    before: SmallVec<[LifecycleHook; 2]>,
    after: SmallVec<[LifecycleHook; 2]>,
    success: SmallVec<[CompletionHook; 2]>,
    error: SmallVec<[CompletionHook; 2]>,
}

/// A single-use executor for one action instance.
///
/// Hooks are registered before dispatch; [`Pipeline::handle`] consumes
/// the pipeline, so neither the action nor its per-run state can ever be
/// reused across requests.
///
/// # Examples
///
/// ```
/// use emberbb_core::action::{Action, Pipeline, RunError};
/// use emberbb_core::execution::Execution;
/// use emberbb_core::request::Request;
///
/// struct Noop;
/// impl Action for Noop {
///     fn run(&mut self, _exec: &mut Execution) -> Result<(), RunError> {
///         Ok(())
///     }
/// }
///
/// let handled = Pipeline::new(Noop).handle(Request::new("noop")).unwrap();
/// assert!(handled.response().is_data());
/// ```
pub struct Pipeline {
    action: Box<dyn Action>,
    hooks: Hooks,
}

impl Pipeline {
    /// Wrap an action in a fresh pipeline with no hooks.
    #[must_use]
    pub fn new(action: impl Action + 'static) -> Self {
        Self {
            action: Box::new(action),
            hooks: Hooks::default(),
        }
    }

    /// Register a hook to run before the action's `run()`.
    #[must_use]
    pub fn before(mut self, hook: impl Fn(&mut Execution) + Send + 'static) -> Self {
        self.hooks.before.push(Box::new(hook));
        self
    }

    /// Register a hook to run after response construction.
    ///
    /// `after` hooks run on the success, redirect, and validation-error
    /// paths alike; they are skipped only when an unhandled fault
    /// propagates out of `run()`.
    #[must_use]
    pub fn after(mut self, hook: impl Fn(&mut Execution) + Send + 'static) -> Self {
        self.hooks.after.push(Box::new(hook));
        self
    }

    /// Register a hook fired by the dispatch layer on a non-error response.
    #[must_use]
    pub fn on_success(mut self, hook: impl Fn(&Execution, &Response) + Send + 'static) -> Self {
        self.hooks.success.push(Box::new(hook));
        self
    }

    /// Register a hook fired by the dispatch layer on an error response.
    #[must_use]
    pub fn on_error(mut self, hook: impl Fn(&Execution, &Response) + Send + 'static) -> Self {
        self.hooks.error.push(Box::new(hook));
        self
    }

    /// Turn a request into a response.
    ///
    /// Runs the fixed lifecycle described in the module docs and returns
    /// the final state together with the response, so the dispatch layer
    /// can fire the success/error hooks after observing the variant.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::ActionFault`] if `run()` fails with anything
    ///   other than a validation failure (`after` hooks are skipped).
    /// - [`DispatchError::MissingErrorTarget`] if errors were accumulated
    ///   but no error target was declared.
    pub fn handle(mut self, request: Request) -> Result<Handled, DispatchError> {
        let name = request.name().to_owned();
        let mut exec = Execution::new(request);

        for hook in &self.hooks.before {
            hook(&mut exec);
        }

        match self.action.run(&mut exec) {
            Ok(()) => {}
            Err(RunError::Validation(errors)) => {
                exec.merge_errors(errors);
            }
            Err(RunError::Fault(source)) => {
                return Err(DispatchError::ActionFault { name, source });
            }
        }

        let response = build_response(&name, &exec)?;

        for hook in &self.hooks.after {
            hook(&mut exec);
        }

        Ok(Handled {
            execution: exec,
            response,
            success: self.hooks.success,
            error: self.hooks.error,
        })
    }
}

/// The outcome of one pipeline run: the response plus the final per-run
/// state, with the success/error hooks still pending.
pub struct Handled {
    execution: Execution,
    response: Response,
    success: SmallVec<[CompletionHook; 2]>,
    error: SmallVec<[CompletionHook; 2]>,
}

impl core::fmt::Debug for Handled {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Handled")
            .field("execution", &self.execution)
            .field("response", &self.response)
            .field("success", &format_args!("<{} hooks>", self.success.len()))
            .field("error", &format_args!("<{} hooks>", self.error.len()))
            .finish()
    }
}

impl Handled {
    /// The response the run produced.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }

    /// The final per-run state used to build the response.
    #[must_use]
    pub const fn execution(&self) -> &Execution {
        &self.execution
    }

    /// Fire the success or error hooks, matching the response variant.
    ///
    /// Owned by the dispatch layer so transport-level code can react to
    /// the final variant without the pipeline depending on it.
    pub fn notify(&self) {
        let hooks = if self.response.is_error() {
            &self.error
        } else {
            &self.success
        };
        for hook in hooks {
            hook(&self.execution, &self.response);
        }
    }

    /// Extract the response, discarding the per-run state.
    #[must_use]
    pub fn into_response(self) -> Response {
        self.response
    }
}

fn build_response(name: &str, exec: &Execution) -> Result<Response, DispatchError> {
    if exec.has_errors() {
        let target = exec
            .error_request()
            .cloned()
            .ok_or_else(|| DispatchError::MissingErrorTarget {
                name: name.to_owned(),
            })?;
        return Ok(Response::Error {
            target,
            errors: exec.errors().to_vec(),
        });
    }

    if let Some(next) = exec.next_request() {
        return Ok(Response::Redirect {
            next: next.clone(),
            message: exec.redirect_message().to_owned(),
        });
    }

    Ok(Response::Data {
        payload: exec.data().clone(),
    })
}
