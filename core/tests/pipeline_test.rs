//! Integration tests for the action pipeline lifecycle.
//!
//! Exercises hook ordering, response construction, validation-failure
//! interception, and the fatal paths (missing error target, unhandled
//! faults).

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use emberbb_core::action::{Action, Pipeline, RunError};
use emberbb_core::error::DispatchError;
use emberbb_core::execution::Execution;
use emberbb_core::request::Request;
use emberbb_core::response::Response;
use proptest::prelude::*;
use serde_json::Value;
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Fixtures
// ============================================================================

/// What the scripted action should do in `run()`.
enum Script {
    /// Write these payload entries and finish cleanly.
    WriteData(Vec<(String, Value)>),
    /// Redirect to the given request.
    Redirect { next: Request, message: String },
    /// Accumulate these errors, optionally declaring a target first.
    Errors { messages: Vec<String>, declare_target: bool },
    /// Fail with the distinguished validation error kind.
    FailValidation { messages: Vec<String>, declare_target: bool },
    /// Fail with an unhandled fault.
    Fault(String),
}

struct Scripted {
    script: Script,
    trace: Arc<Mutex<Vec<String>>>,
}

impl Scripted {
    fn new(script: Script) -> Self {
        Self {
            script,
            trace: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn traced(script: Script, trace: Arc<Mutex<Vec<String>>>) -> Self {
        Self { script, trace }
    }
}

impl Action for Scripted {
    fn run(&mut self, exec: &mut Execution) -> Result<(), RunError> {
        self.trace.lock().unwrap().push("run".to_owned());
        match &self.script {
            Script::WriteData(entries) => {
                for (key, value) in entries {
                    exec.set(key.clone(), value.clone());
                }
                Ok(())
            }
            Script::Redirect { next, message } => {
                exec.redirect_to(next.clone(), message.clone());
                Ok(())
            }
            Script::Errors { messages, declare_target } => {
                if *declare_target {
                    exec.on_error_redirect_to(Request::new("fallback"));
                }
                for message in messages {
                    exec.add_error(message.clone());
                }
                Ok(())
            }
            Script::FailValidation { messages, declare_target } => {
                if *declare_target {
                    exec.on_error_redirect_to(Request::new("fallback"));
                }
                Err(RunError::validation(messages.clone()))
            }
            Script::Fault(message) => Err(anyhow::anyhow!("{message}").into()),
        }
    }
}

fn trace() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

// ============================================================================
// Response Construction
// ============================================================================

#[test]
fn empty_errors_and_no_redirect_produce_data() {
    let action = Scripted::new(Script::WriteData(vec![
        ("title".to_owned(), Value::from("welcome")),
        ("count".to_owned(), Value::from(3)),
    ]));

    let response = Pipeline::new(action)
        .handle(Request::new("index"))
        .unwrap()
        .into_response();

    match response {
        Response::Data { payload } => {
            assert_eq!(payload.get("title"), Some(&Value::from("welcome")));
            assert_eq!(payload.get("count"), Some(&Value::from(3)));
            assert_eq!(payload.len(), 2);
        }
        other => panic!("expected Data, got {other:?}"),
    }
}

#[test]
fn pending_redirect_produces_redirect() {
    let action = Scripted::new(Script::Redirect {
        next: Request::new("viewpost").param("id", 9),
        message: "Your reply has been posted.".to_owned(),
    });

    let response = Pipeline::new(action)
        .handle(Request::new("reply_handler"))
        .unwrap()
        .into_response();

    assert_eq!(
        response,
        Response::Redirect {
            next: Request::new("viewpost").param("id", 9),
            message: "Your reply has been posted.".to_owned(),
        }
    );
}

#[test]
fn accumulated_errors_produce_error_in_call_order() {
    let action = Scripted::new(Script::Errors {
        messages: vec!["first".to_owned(), "second".to_owned()],
        declare_target: true,
    });

    let response = Pipeline::new(action)
        .handle(Request::new("handle_login"))
        .unwrap()
        .into_response();

    assert_eq!(
        response,
        Response::Error {
            target: Request::new("fallback"),
            errors: vec!["first".to_owned(), "second".to_owned()],
        }
    );
}

#[test]
fn errors_without_declared_target_fault() {
    let action = Scripted::new(Script::Errors {
        messages: vec!["boom".to_owned()],
        declare_target: false,
    });

    let result = Pipeline::new(action).handle(Request::new("handle_login"));

    match result {
        Err(DispatchError::MissingErrorTarget { name }) => assert_eq!(name, "handle_login"),
        other => panic!("expected MissingErrorTarget, got {other:?}"),
    }
}

#[test]
fn errors_take_precedence_over_a_pending_redirect() {
    struct Both;
    impl Action for Both {
        fn run(&mut self, exec: &mut Execution) -> Result<(), RunError> {
            exec.on_error_redirect_to(Request::new("fallback"));
            exec.redirect_to(Request::new("index"), "done");
            exec.add_error("went wrong");
            Ok(())
        }
    }

    let response = Pipeline::new(Both)
        .handle(Request::new("x"))
        .unwrap()
        .into_response();

    assert!(response.is_error());
}

// ============================================================================
// Validation-Failure Interception
// ============================================================================

#[test]
fn validation_failure_is_merged_into_an_error_response() {
    let action = Scripted::new(Script::FailValidation {
        messages: vec!["too short".to_owned(), "too vague".to_owned()],
        declare_target: true,
    });

    let response = Pipeline::new(action)
        .handle(Request::new("reply_handler"))
        .unwrap()
        .into_response();

    assert_eq!(
        response,
        Response::Error {
            target: Request::new("fallback"),
            errors: vec!["too short".to_owned(), "too vague".to_owned()],
        }
    );
}

#[test]
fn after_hooks_still_run_on_the_validation_recovery_path() {
    let log = trace();
    let action = Scripted::traced(
        Script::FailValidation {
            messages: vec!["bad input".to_owned()],
            declare_target: true,
        },
        Arc::clone(&log),
    );

    let after_log = Arc::clone(&log);
    let handled = Pipeline::new(action)
        .after(move |_exec| after_log.lock().unwrap().push("after".to_owned()))
        .handle(Request::new("x"))
        .unwrap();

    assert!(handled.response().is_error());
    assert_eq!(*log.lock().unwrap(), ["run", "after"]);
}

// ============================================================================
// Fault Propagation
// ============================================================================

#[test]
fn unhandled_faults_propagate_and_skip_after_hooks() {
    let log = trace();
    let action = Scripted::traced(Script::Fault("db down".to_owned()), Arc::clone(&log));

    let after_log = Arc::clone(&log);
    let result = Pipeline::new(action)
        .after(move |_exec| after_log.lock().unwrap().push("after".to_owned()))
        .handle(Request::new("reply_handler"));

    match result {
        Err(DispatchError::ActionFault { name, source }) => {
            assert_eq!(name, "reply_handler");
            assert_eq!(source.to_string(), "db down");
        }
        other => panic!("expected ActionFault, got {other:?}"),
    }
    assert_eq!(*log.lock().unwrap(), ["run"]);
}

// ============================================================================
// Hook Ordering
// ============================================================================

#[test]
fn hooks_run_in_registration_order_around_run() {
    let log = trace();
    let action = Scripted::traced(Script::WriteData(vec![]), Arc::clone(&log));

    let (b1, b2, a1, a2) = (
        Arc::clone(&log),
        Arc::clone(&log),
        Arc::clone(&log),
        Arc::clone(&log),
    );

    Pipeline::new(action)
        .before(move |_| b1.lock().unwrap().push("before-1".to_owned()))
        .before(move |_| b2.lock().unwrap().push("before-2".to_owned()))
        .after(move |_| a1.lock().unwrap().push("after-1".to_owned()))
        .after(move |_| a2.lock().unwrap().push("after-2".to_owned()))
        .handle(Request::new("x"))
        .unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        ["before-1", "before-2", "run", "after-1", "after-2"]
    );
}

#[test]
fn before_hooks_observe_pristine_state_and_after_hooks_the_final_state() {
    let action = Scripted::new(Script::WriteData(vec![(
        "key".to_owned(),
        Value::from("value"),
    )]));

    let observed_before = Arc::new(Mutex::new(None));
    let observed_after = Arc::new(Mutex::new(None));
    let (ob, oa) = (Arc::clone(&observed_before), Arc::clone(&observed_after));

    Pipeline::new(action)
        .before(move |exec| {
            *ob.lock().unwrap() = Some((exec.has_data(), exec.has_errors()));
        })
        .after(move |exec| {
            *oa.lock().unwrap() = Some(exec.data().clone());
        })
        .handle(Request::new("x"))
        .unwrap();

    assert_eq!(*observed_before.lock().unwrap(), Some((false, false)));
    let after = observed_after.lock().unwrap().clone().unwrap();
    assert_eq!(after.get("key"), Some(&Value::from("value")));
}

// ============================================================================
// Success / Error Notification
// ============================================================================

#[test]
fn notify_fires_success_hooks_on_non_error_responses() {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let (s, e) = (Arc::clone(&fired), Arc::clone(&fired));

    let handled = Pipeline::new(Scripted::new(Script::WriteData(vec![])))
        .on_success(move |_exec, response| s.lock().unwrap().push(response.kind()))
        .on_error(move |_exec, response| e.lock().unwrap().push(response.kind()))
        .handle(Request::new("x"))
        .unwrap();

    handled.notify();
    assert_eq!(*fired.lock().unwrap(), ["data"]);
}

#[test]
fn notify_fires_error_hooks_on_error_responses() {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let (s, e) = (Arc::clone(&fired), Arc::clone(&fired));

    let handled = Pipeline::new(Scripted::new(Script::Errors {
        messages: vec!["bad".to_owned()],
        declare_target: true,
    }))
    .on_success(move |_exec, response| s.lock().unwrap().push(response.kind()))
    .on_error(move |_exec, response| e.lock().unwrap().push(response.kind()))
    .handle(Request::new("x"))
    .unwrap();

    handled.notify();
    assert_eq!(*fired.lock().unwrap(), ["error"]);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Error messages come back in exactly the order `run()` added them.
    #[test]
    fn error_order_is_preserved(messages in proptest::collection::vec(".{1,20}", 1..8)) {
        let action = Scripted::new(Script::Errors {
            messages: messages.clone(),
            declare_target: true,
        });

        let response = Pipeline::new(action)
            .handle(Request::new("x"))
            .unwrap()
            .into_response();

        prop_assert_eq!(
            response,
            Response::Error {
                target: Request::new("fallback"),
                errors: messages,
            }
        );
    }

    /// The Data payload equals exactly what `run()` wrote.
    #[test]
    fn payload_is_returned_verbatim(entries in proptest::collection::btree_map("[a-z]{1,8}", 0i64..1000, 0..6)) {
        let written: Vec<(String, Value)> = entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(*value)))
            .collect();
        let action = Scripted::new(Script::WriteData(written));

        let response = Pipeline::new(action)
            .handle(Request::new("x"))
            .unwrap()
            .into_response();

        match response {
            Response::Data { payload } => {
                prop_assert_eq!(payload.len(), entries.len());
                for (key, value) in &entries {
                    prop_assert_eq!(payload.get(key), Some(&Value::from(*value)));
                }
            }
            other => prop_assert!(false, "expected Data, got {:?}", other),
        }
    }
}
