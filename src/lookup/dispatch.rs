//! Validate, look up, and shape the response.

use std::sync::Arc;
use std::time::Instant;

use crate::lookup::envelope::LookupResponse;
use crate::lookup::request::LookupRequest;
use crate::observability::metrics;
use crate::words::{Multiplexer, WordSource};

/// The lookups the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Anagram,
    Match,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Anagram => "anagram",
            Operation::Match => "match",
        }
    }

    fn run(&self, words: &Multiplexer, input: &str) -> Vec<String> {
        match self {
            Operation::Anagram => words.anagrams(input),
            Operation::Match => words.matches(input),
        }
    }
}

/// Run one lookup synchronously.
///
/// Invalid input returns before `source` is touched.
pub fn resolve(operation: Operation, input: String, source: &dyn WordSource) -> LookupResponse {
    let Some(request) = LookupRequest::parse(input) else {
        return LookupResponse::invalid_input();
    };

    match source.load() {
        Ok(words) => LookupResponse::found(operation.run(&words, request.as_str())),
        Err(e) => {
            tracing::error!(operation = operation.as_str(), error = %e, "Unable to load words");
            LookupResponse::wordlist_unavailable()
        }
    }
}

/// Run one lookup off the async executor, recording metrics.
pub async fn dispatch(
    operation: Operation,
    input: String,
    source: Arc<dyn WordSource>,
) -> LookupResponse {
    let start = Instant::now();

    let response = if LookupRequest::parse(input.clone()).is_none() {
        LookupResponse::invalid_input()
    } else {
        match tokio::task::spawn_blocking(move || resolve(operation, input, source.as_ref())).await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(operation = operation.as_str(), error = %e, "Lookup task failed");
                LookupResponse::wordlist_unavailable()
            }
        }
    };

    metrics::record_lookup(operation.as_str(), response.status.as_u16(), start);
    response
}
