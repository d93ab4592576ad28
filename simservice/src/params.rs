//! Multi-valued request parameters merged from the body and query string.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{FromRequest, Multipart, Request};
use http::{HeaderMap, Method as Verb, header};
use http_body_util::LengthLimitError;
use url::form_urlencoded;

use crate::error::{Result, ServiceError};

/// Parameter set where each key may carry zero, one or many values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, Vec<String>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `application/x-www-form-urlencoded` text.
    pub fn from_query(query: &str) -> Self {
        Self::from_form(query.as_bytes())
    }

    fn from_form(input: &[u8]) -> Self {
        form_urlencoded::parse(input).collect()
    }

    /// Append a value under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Mark `key` present without adding a value.
    #[cfg(test)]
    pub(crate) fn touch(&mut self, key: impl Into<String>) {
        self.values.entry(key.into()).or_default();
    }

    /// Append every value of `other` after the existing ones.
    pub fn extend(&mut self, other: Params) {
        for (key, vals) in other.values {
            self.values.entry(key).or_default().extend(vals);
        }
    }

    /// Key presence, regardless of how many values it has.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All values for `key`, in arrival order. Empty if absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.append(k, v);
        }
        params
    }
}

/// Collect parameters from `req`. Body values come before query values.
///
/// Only POST, PUT and PATCH bodies are read.
pub(crate) async fn from_request(req: Request, limit: usize) -> Result<Params> {
    let query = req.uri().query().map(Params::from_query).unwrap_or_default();

    let verb = req.method();
    let mut params = if *verb == Verb::POST || *verb == Verb::PUT || *verb == Verb::PATCH {
        from_body(req, limit).await?
    } else {
        Params::new()
    };
    params.extend(query);
    Ok(params)
}

async fn from_body(req: Request, limit: usize) -> Result<Params> {
    let content_type = content_type(req.headers());
    if let Some(len) = content_length(req.headers()) {
        if len > limit {
            return Err(ServiceError::BodyTooLarge(limit));
        }
    }

    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|err| body_error(err, limit))?;

    if content_type.starts_with("application/x-www-form-urlencoded") {
        Ok(Params::from_form(&bytes))
    } else if content_type.starts_with("multipart/form-data") {
        from_multipart(Request::from_parts(parts, Body::from(bytes))).await
    } else {
        Ok(Params::new())
    }
}

async fn from_multipart(req: Request) -> Result<Params> {
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|err| ServiceError::InvalidBody(err.to_string()))?;

    let mut params = Params::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServiceError::InvalidBody(err.to_string()))?
    {
        // File parts are not parameters.
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|err| ServiceError::InvalidBody(err.to_string()))?;
        params.append(name, value);
    }
    Ok(params)
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn body_error(err: axum::Error, limit: usize) -> ServiceError {
    let inner = err.into_inner();
    if inner.is::<LengthLimitError>() {
        ServiceError::BodyTooLarge(limit)
    } else {
        ServiceError::InvalidBody(inner.to_string())
    }
}
