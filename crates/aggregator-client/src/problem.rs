//! Problem details carried in failure response bodies
//!
//! The customer service answers failed calls with an RFC 9457
//! `application/problem+json` document. Its `detail` member is the
//! human-readable explanation surfaced to callers.

use serde::Deserialize;

use crate::error::RemoteFailure;

/// Used only when the transport produced no message of its own
const UNKNOWN_FAILURE: &str = "customer service call failed";

/// Machine-readable explanation of a failed call
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProblemDescription {
    /// URI identifying the problem type
    #[serde(default, rename = "type")]
    pub problem_type: Option<String>,
    /// Short summary of the problem type
    #[serde(default)]
    pub title: Option<String>,
    /// HTTP status echoed by the service
    #[serde(default)]
    pub status: Option<u16>,
    /// Explanation specific to this occurrence
    #[serde(default)]
    pub detail: Option<String>,
    /// URI of the request that failed
    #[serde(default)]
    pub instance: Option<String>,
    /// Extension members added by the service
    #[serde(flatten)]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

/// Decode the failure body as a problem description
///
/// Returns `None` when there is no body or it is not a problem document.
pub fn decode(failure: &RemoteFailure) -> Option<ProblemDescription> {
    let body = failure.body()?;
    serde_json::from_slice(body).ok()
}

/// Message describing why the call failed
///
/// Prefers the problem `detail`, falling back to the raw transport message.
/// The decoded problem (or its absence) is logged at error level.
pub fn extract(failure: &RemoteFailure) -> String {
    let problem = decode(failure);
    let status = failure.status().map(|s| s.as_u16());

    match &problem {
        Some(problem) => tracing::error!(status, problem = ?problem, "service problem detail"),
        None => tracing::error!(status, message = failure.message(), "service returned no problem detail"),
    }

    problem
        .and_then(|problem| problem.detail)
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| raw_message(failure))
}

fn raw_message(failure: &RemoteFailure) -> String {
    let message = failure.message();

    if message.is_empty() {
        UNKNOWN_FAILURE.to_owned()
    } else {
        message.to_owned()
    }
}
