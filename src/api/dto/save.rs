//! DTOs for the alias creation endpoint.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for caller-supplied aliases.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Request to bind a URL to an alias.
///
/// ```json
/// { "url": "https://example.com", "alias": "my-link" }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// Target URL (required).
    #[serde(default)]
    #[validate(length(min = 1, code = "required"), url(code = "url"))]
    pub url: String,

    /// Optional alias; a random one is generated when omitted or empty.
    #[validate(length(min = 1, max = 64), regex(path = *ALIAS_REGEX))]
    pub alias: Option<String>,
}

impl SaveRequest {
    /// Maps an empty alias to `None` so it takes the generated-alias path.
    pub fn normalized(mut self) -> Self {
        if self.alias.as_deref().is_some_and(str::is_empty) {
            self.alias = None;
        }
        self
    }
}
