//! Minimal blocking HTTP helpers

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Request method accepted by [`ajax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Decoded body of an [`ajax`] response.
#[derive(Debug, Clone, PartialEq)]
pub enum AjaxResponse {
    Json(Value),
    /// Body that is not valid JSON
    Text(String),
}

impl fmt::Display for AjaxResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AjaxResponse::Json(v) => write!(f, "{}", v),
            AjaxResponse::Text(t) => write!(f, "{}", t),
        }
    }
}

/// GET `url` and return the response body.
pub fn read_url(url: &str) -> Result<Vec<u8>> {
    debug!("GET {}", url);
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Send `params` to `url` and decode the answer.
///
/// GET puts the parameters in the query string, POST sends them as a JSON
/// object. An empty body gives `None`.
pub fn ajax(
    url: &str,
    params: &[(String, String)],
    method: Method,
) -> Result<Option<AjaxResponse>> {
    let client = reqwest::blocking::Client::new();
    let request = match method {
        Method::Get if params.is_empty() => client.get(url),
        Method::Get => client.get(url).query(params),
        Method::Post => client.post(url).json(&params_to_json(params)),
    };
    debug!("{} {}", method, url);

    let body = request.send()?.error_for_status()?.bytes()?;
    Ok(decode_response(&body))
}

fn params_to_json(params: &[(String, String)]) -> Value {
    let map: Map<String, Value> = params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Value::Object(map)
}

/// JSON when the body parses, raw text otherwise.
pub fn decode_response(body: &[u8]) -> Option<AjaxResponse> {
    if body.is_empty() {
        return None;
    }
    let text = String::from_utf8_lossy(body).to_string();
    match serde_json::from_str(&text) {
        Ok(value) => Some(AjaxResponse::Json(value)),
        Err(_) => Some(AjaxResponse::Text(text)),
    }
}

/// Replace `path` with the content at `url` when they differ.
///
/// `confirm` receives the size difference in bytes (remote minus local) and
/// decides whether to overwrite. Returns whether the file was updated.
pub fn update_file(
    path: &Path,
    url: &str,
    confirm: impl FnOnce(i64) -> bool,
) -> Result<bool> {
    let remote = read_url(url)?;
    if remote.is_empty() {
        warn!("failed to get remote file content");
        return Ok(false);
    }
    let current: Vec<u8> = std::fs::read(path)?
        .into_iter()
        .filter(|&b| b != b'\r')
        .collect();

    match content_delta(&current, &remote) {
        None => {
            info!("{} is already up-to-date", path.display());
            Ok(false)
        }
        Some(delta) if confirm(delta) => {
            std::fs::write(path, &remote)?;
            info!("update success");
            Ok(true)
        }
        Some(_) => {
            warn!("update canceled");
            Ok(false)
        }
    }
}

/// `None` when equal, otherwise the length difference `new - old`.
fn content_delta(old: &[u8], new: &[u8]) -> Option<i64> {
    if old == new {
        None
    } else {
        Some(new.len() as i64 - old.len() as i64)
    }
}
