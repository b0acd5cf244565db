//! Session bootstrap: cookies from disk or environment, plus the browser
//! header profile.

use std::path::Path;

use anyhow::Context;

use vb_client::{HeaderProfile, Session};
use vb_config::SessionConfig;

/// Build the authenticated session from the configured sources: the cookie
/// file when present, else the base64 blob. Having neither is an error —
/// live traffic without cookies only produces authorization failures.
pub async fn load(config: &SessionConfig) -> anyhow::Result<Session> {
    let path = Path::new(&config.cookie_file);
    let mut session = if path.exists() {
        Session::from_cookie_file(path)
            .with_context(|| format!("loading cookies from {}", path.display()))?
    } else if let Some(blob) = &config.blob {
        Session::from_base64(blob).context("decoding session blob")?
    } else {
        anyhow::bail!(
            "no session: export cookies to {} or set VERBATIM_SESSION__BLOB",
            config.cookie_file
        );
    };

    if let Some(url) = &config.header_profile_url {
        let http = reqwest::Client::new();
        match HeaderProfile::fetch(&http, url).await {
            Ok(profile) => session.set_profile(profile),
            Err(error) => {
                tracing::warn!(%error, url, "header profile refresh failed; using baked-in profile");
            }
        }
    }

    Ok(session)
}
