//! Response classification.
//!
//! Maps the outcome of one HTTP request onto a [`Verdict`] using the
//! platform's detection strategy. Pure and total: every outcome yields
//! exactly one verdict.

use crate::models::{ErrorType, PlatformDefinition, ProbeOutcome, Verdict};

/// Statuses treated as "no such profile" for every platform, whatever its
/// detection strategy.
pub const BLOCKED_OR_MISSING: [u16; 2] = [403, 404];

pub fn classify(definition: &PlatformDefinition, url: &str, outcome: &ProbeOutcome) -> Verdict {
    let (status, body) = match outcome {
        ProbeOutcome::Response { status, body } => (*status, body.as_str()),
        ProbeOutcome::TransportFailure(_) => return Verdict::Error,
    };

    if BLOCKED_OR_MISSING.contains(&status) {
        return Verdict::NotFound;
    }

    match definition.error_type {
        ErrorType::StatusCode if status == 200 => Verdict::Found(url.to_string()),
        ErrorType::StatusCode => Verdict::NotFound,
        // Any status other than 403/404 counts here, as long as the body is clean.
        ErrorType::Message => {
            if body_signals_missing(definition, body) {
                Verdict::NotFound
            } else {
                Verdict::Found(url.to_string())
            }
        }
    }
}

fn body_signals_missing(definition: &PlatformDefinition, body: &str) -> bool {
    definition
        .error_patterns()
        .iter()
        .any(|pattern| body.contains(pattern.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorMsg;

    const URL: &str = "https://example.test/bob";

    fn response(status: u16, body: &str) -> ProbeOutcome {
        ProbeOutcome::Response {
            status,
            body: body.to_string(),
        }
    }

    fn message_platform(patterns: &[&str]) -> PlatformDefinition {
        PlatformDefinition::message(
            "https://example.test/{}",
            ErrorMsg::Many(patterns.iter().map(|p| p.to_string()).collect()),
        )
    }

    #[test]
    fn test_status_code_strategy() {
        let def = PlatformDefinition::status_code("https://example.test/{}");
        assert_eq!(classify(&def, URL, &response(200, "")), Verdict::Found(URL.into()));
        for status in [201, 301, 302, 400, 403, 404, 429, 500, 503] {
            assert_eq!(
                classify(&def, URL, &response(status, "")),
                Verdict::NotFound,
                "status {status}"
            );
        }
    }

    #[test]
    fn test_message_strategy_clean_body_is_found_for_any_status() {
        let def = message_platform(&["not found"]);
        for status in [200, 202, 302, 410, 500] {
            assert_eq!(
                classify(&def, URL, &response(status, "<h1>bob</h1>")),
                Verdict::Found(URL.into()),
                "status {status}"
            );
        }
    }

    #[test]
    fn test_message_strategy_matching_body_is_not_found() {
        let def = message_platform(&["no such user", "not found"]);
        assert_eq!(classify(&def, URL, &response(200, "user not found")), Verdict::NotFound);
        assert_eq!(classify(&def, URL, &response(500, "no such user here")), Verdict::NotFound);
    }

    #[test]
    fn test_message_match_is_case_sensitive() {
        let def = message_platform(&["Not Found"]);
        assert_eq!(
            classify(&def, URL, &response(200, "not found")),
            Verdict::Found(URL.into())
        );
    }

    #[test]
    fn test_single_string_error_msg() {
        let def = PlatformDefinition::message(
            "https://example.test/{}",
            ErrorMsg::Single("Sorry, nobody here".into()),
        );
        assert_eq!(
            classify(&def, URL, &response(200, "<p>Sorry, nobody here</p>")),
            Verdict::NotFound
        );
    }

    #[test]
    fn test_blocked_statuses_short_circuit_message_strategy() {
        let def = message_platform(&["not found"]);
        assert_eq!(classify(&def, URL, &response(403, "welcome")), Verdict::NotFound);
        assert_eq!(classify(&def, URL, &response(404, "welcome")), Verdict::NotFound);
    }

    #[test]
    fn test_transport_failure_is_error() {
        let failure = ProbeOutcome::TransportFailure("operation timed out".into());
        assert_eq!(
            classify(&PlatformDefinition::status_code("https://x/{}"), URL, &failure),
            Verdict::Error
        );
        assert_eq!(classify(&message_platform(&["x"]), URL, &failure), Verdict::Error);
    }
}
