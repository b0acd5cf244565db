//! Authenticated session state: cookies and browser header profile.
//!
//! Cookies come either from a `cookie.json` file (a flat name→value map or
//! the browser-export list of `{name, value}` objects) or from a
//! base64-encoded blob carried in an environment variable. The `ct0` cookie
//! doubles as the `x-csrf-token` header the API requires.

use std::collections::BTreeMap;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use crate::error::ClientError;

/// Public bearer token of the platform's web app.
pub const BEARER_TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";

/// Browser-like header profile attached to every request.
#[derive(Debug, Clone)]
pub struct HeaderProfile {
    pub user_agent: String,
    pub accept_language: String,
    pub sec_ch_ua: String,
    pub sec_ch_ua_platform: String,
}

impl Default for HeaderProfile {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36"
                .to_owned(),
            accept_language: "en-US,en;q=0.9".to_owned(),
            sec_ch_ua: r#""Chromium";v="133", "Not(A:Brand";v="99""#.to_owned(),
            sec_ch_ua_platform: r#""Windows""#.to_owned(),
        }
    }
}

impl HeaderProfile {
    /// Refresh the profile from a published header dump (a JSON object with
    /// a `chrome-fetch` section). Fields missing from the dump keep their
    /// baked-in defaults; `host`/`connection` style hop headers are ignored
    /// by construction since only known fields are read.
    ///
    /// # Errors
    ///
    /// [`ClientError`] if the fetch fails or the dump is not JSON.
    pub async fn fetch(http: &reqwest::Client, url: &str) -> Result<Self, ClientError> {
        let dump: Value = http.get(url).send().await?.json().await?;
        let section = &dump["chrome-fetch"];
        let mut profile = Self::default();
        if let Some(ua) = section["user-agent"].as_str() {
            profile.user_agent = ua.to_owned();
        }
        if let Some(lang) = section["accept-language"].as_str() {
            profile.accept_language = lang.to_owned();
        }
        if let Some(ua_hint) = section["sec-ch-ua"].as_str() {
            profile.sec_ch_ua = ua_hint.to_owned();
        }
        Ok(profile)
    }
}

/// Cookies plus header profile for one authenticated identity.
#[derive(Debug, Clone, Default)]
pub struct Session {
    cookies: BTreeMap<String, String>,
    profile: HeaderProfile,
}

impl Session {
    /// A session with no cookies; enough for endpoints that accept guest
    /// traffic and for tests.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Load cookies from a `cookie.json` file.
    ///
    /// # Errors
    ///
    /// [`ClientError::Session`] if the file is unreadable or neither a
    /// name→value map nor a `[{name, value}]` list.
    pub fn from_cookie_file(path: &Path) -> Result<Self, ClientError> {
        let body = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Session(format!("reading {}: {e}", path.display())))?;
        Self::from_cookie_json(&body)
    }

    /// Load cookies from a base64-encoded JSON blob (the shape carried in
    /// the session environment variable).
    ///
    /// # Errors
    ///
    /// [`ClientError::Session`] on invalid base64, UTF-8, or cookie JSON.
    pub fn from_base64(blob: &str) -> Result<Self, ClientError> {
        let bytes = BASE64
            .decode(blob.trim())
            .map_err(|e| ClientError::Session(format!("invalid base64 session blob: {e}")))?;
        let body = String::from_utf8(bytes)
            .map_err(|e| ClientError::Session(format!("session blob is not UTF-8: {e}")))?;
        Self::from_cookie_json(&body)
    }

    fn from_cookie_json(body: &str) -> Result<Self, ClientError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ClientError::Session(format!("cookie JSON does not parse: {e}")))?;

        let mut cookies = BTreeMap::new();
        match value {
            Value::Object(map) => {
                for (name, value) in map {
                    if let Value::String(value) = value {
                        cookies.insert(name, value);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    let (Some(name), Some(value)) =
                        (item["name"].as_str(), item["value"].as_str())
                    else {
                        return Err(ClientError::Session(
                            "cookie list entries need string `name` and `value`".to_owned(),
                        ));
                    };
                    cookies.insert(name.to_owned(), value.to_owned());
                }
            }
            _ => {
                return Err(ClientError::Session(
                    "cookie JSON must be an object or a list".to_owned(),
                ));
            }
        }

        Ok(Self {
            cookies,
            profile: HeaderProfile::default(),
        })
    }

    pub fn set_profile(&mut self, profile: HeaderProfile) {
        self.profile = profile;
    }

    #[must_use]
    pub fn profile(&self) -> &HeaderProfile {
        &self.profile
    }

    /// The `Cookie` header value: `name=value; name=value`.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The `ct0` cookie, which the API expects echoed as `x-csrf-token`.
    #[must_use]
    pub fn csrf_token(&self) -> Option<&str> {
        self.cookies.get("ct0").map(String::as_str)
    }

    #[must_use]
    pub fn has_cookies(&self) -> bool {
        !self.cookies.is_empty()
    }
}
