//! Lookup input extraction and validation.

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{header, Method},
};
use url::form_urlencoded;

/// Form field carrying the lookup input.
pub const INPUT_FIELD: &str = "input";

/// Longest accepted input, counted in characters rather than bytes.
pub const MAX_INPUT_CHARS: usize = 13;

/// The `input` form value of a lookup request.
///
/// A value in a urlencoded or multipart body wins over one in the query
/// string, and a repeated key yields its first value. Anything missing or
/// unreadable is the empty string, which validation then rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupInput(pub String);

impl<S> FromRequest<S> for LookupInput
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = request
            .uri()
            .query()
            .and_then(|q| first_value(q.as_bytes(), INPUT_FIELD));

        let body = if carries_form_body(request.method()) {
            body_value(request, state).await
        } else {
            None
        };

        Ok(Self(body.or(query).unwrap_or_default()))
    }
}

fn carries_form_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

async fn body_value<S>(request: Request, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)?
        .to_str()
        .ok()?
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let body = Bytes::from_request(request, state).await.ok()?;
        first_value(&body, INPUT_FIELD)
    } else if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, state).await.ok()?;
        multipart_value(&mut multipart, INPUT_FIELD).await
    } else {
        None
    }
}

async fn multipart_value(multipart: &mut Multipart, name: &str) -> Option<String> {
    while let Ok(Some(field)) = multipart.next_field().await {
        // File parts are never form values.
        if field.name() == Some(name) && field.file_name().is_none() {
            return field.text().await.ok();
        }
    }
    None
}

/// First value of `name` in a urlencoded string.
pub fn first_value(encoded: &[u8], name: &str) -> Option<String> {
    form_urlencoded::parse(encoded)
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// An input that passed the length check. Only these reach the word lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest(String);

impl LookupRequest {
    /// Accept `input` as-is if it is 1 to 13 characters long.
    ///
    /// No trimming or case folding happens here.
    pub fn parse(input: String) -> Option<Self> {
        let len = input.chars().count();
        (1..=MAX_INPUT_CHARS).contains(&len).then_some(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
