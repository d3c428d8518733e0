//! # emberbb Core
//!
//! Request/response vocabulary and the action pipeline for emberbb.
//!
//! This crate defines the in-process dispatch contract every piece of
//! business logic runs through:
//!
//! - **Request**: an immutable named invocation with a parameter bag
//! - **Response**: the closed result of one dispatch (Data, Redirect, or Error)
//! - **Action**: a single-use unit of business logic bound to one request name
//! - **Pipeline**: the fixed lifecycle that turns one Request into one Response
//! - **Validator**: a pre-execution check that can short-circuit dispatch
//!
//! # Request Flow
//!
//! ```text
//! ┌─────────────┐
//! │   Request   │
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────────┐
//! │ before hooks    │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Action::run    │◄─── collaborators (auth, repositories, …)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      errors?   ──► Response::Error
//! │ build Response  │      redirect? ──► Response::Redirect
//! └────────┬────────┘      otherwise ──► Response::Data
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  after hooks    │
//! └─────────────────┘
//! ```
//!
//! # Key Principles
//!
//! - All mutable state lives in one [`Execution`](execution::Execution),
//!   created fresh per dispatch and discarded afterwards
//! - Validation failures are the only failure kind the pipeline recovers
//!   from; every other fault propagates as an `Err`
//! - The pipeline performs no I/O of its own; all side effects belong to
//!   `run()` via injected collaborators
//!
//! # Example
//!
//! ```
//! use emberbb_core::action::{Action, Pipeline, RunError};
//! use emberbb_core::execution::Execution;
//! use emberbb_core::request::Request;
//!
//! struct Hello;
//!
//! impl Action for Hello {
//!     fn run(&mut self, exec: &mut Execution) -> Result<(), RunError> {
//!         let name = exec.request().get_str("name").unwrap_or("world").to_owned();
//!         exec.set("greeting", format!("hello, {name}"));
//!         Ok(())
//!     }
//! }
//!
//! let handled = Pipeline::new(Hello)
//!     .handle(Request::new("hello").param("name", "bob"))
//!     .unwrap();
//! assert!(handled.response().is_data());
//! ```

pub mod action;
pub mod environment;
pub mod error;
pub mod execution;
pub mod request;
pub mod response;
pub mod validation;

pub use action::{Action, Handled, Pipeline, RunError};
pub use error::DispatchError;
pub use execution::Execution;
pub use request::Request;
pub use response::Response;
pub use validation::{ValidationOutcome, Validator};
