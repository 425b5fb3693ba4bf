//! Query parameter extraction from result locations
//!
//! Locations look like `https://api.svfcloud.com/v1/artifacts/<id>?action=<actionId>`.
//! Parsing is deliberately literal: values are returned as they appear in the URL,
//! without percent-decoding.

use crate::error::{Error, Result};
use crate::types::ActionId;
use std::collections::HashMap;

/// Name of the query parameter holding the action identifier
pub const ACTION_PARAM: &str = "action";

/// Split the query string of `location` into a key/value map
///
/// The query starts after the first `?` and ends at a `#` fragment, if any.
/// Parameters are separated by `&` and split on their first `=`. When a key
/// repeats, the last value wins. Empty segments (`a=1&&b=2`, trailing `&`) are
/// skipped.
///
/// # Errors
///
/// [`Error::MalformedUrl`] if the location has no `?` or a parameter has no `=`.
pub fn query_params(location: &str) -> Result<HashMap<String, String>> {
    let (_, query) = location
        .split_once('?')
        .ok_or_else(|| Error::malformed(location, "no query string ('?' missing)"))?;
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    let mut params = HashMap::new();
    for param in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = param.split_once('=').ok_or_else(|| {
            Error::malformed(location, format!("parameter '{}' has no '='", param))
        })?;
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}

/// Extract the action identifier from a result location
///
/// # Errors
///
/// [`Error::MalformedUrl`] if the query cannot be parsed (see [`query_params`]),
/// or if `action` is missing or empty.
///
/// # Examples
///
/// ```
/// use svf_print::location::action_id;
///
/// let id = action_id("https://x/y?key1=v1&action=A123&key2=v2").unwrap();
/// assert_eq!(id.as_str(), "A123");
/// ```
pub fn action_id(location: &str) -> Result<ActionId> {
    let mut params = query_params(location)?;
    match params.remove(ACTION_PARAM) {
        Some(value) if !value.is_empty() => Ok(ActionId(value)),
        Some(_) => Err(Error::malformed(location, "'action' parameter is empty")),
        None => Err(Error::malformed(location, "no 'action' parameter")),
    }
}
