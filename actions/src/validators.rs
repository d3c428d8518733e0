//! Request validators for the posting actions.

use emberbb_core::{Request, ValidationOutcome, Validator};

/// Guards the posting handlers: the `message` parameter must be present
/// and non-blank.
///
/// Fails back to the conversation the post was aimed at, carrying the
/// `id` parameter through when the request has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostValidator;

impl Validator for PostValidator {
    fn validate(&self, request: &Request) -> ValidationOutcome {
        let blank = request
            .get_str("message")
            .map(str::trim)
            .unwrap_or_default()
            .is_empty();

        if blank {
            let mut target = Request::new("conversation");
            if let Some(id) = request.get("id") {
                target = target.param("id", id.clone());
            }
            return ValidationOutcome::fail(target, ["You must enter a message."]);
        }

        ValidationOutcome::Pass
    }
}
