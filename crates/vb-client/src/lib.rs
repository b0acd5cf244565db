//! # vb-client
//!
//! Typed GraphQL client for the social-platform API.
//!
//! The pieces line up with how a call is made:
//! - [`catalog`] maps a logical endpoint key to its query identifier and
//!   request templates;
//! - [`session`] carries cookies and the browser header profile;
//! - [`signer`] is the seam for the signed transaction header;
//! - [`models`] is the closed registry of typed response models — every
//!   decode goes through it, and the reserialized tree it produces is what
//!   the fidelity engine compares against the raw body.
//!
//! [`XClient::call`] returns both the exact raw body text and the decoded
//! model so callers can score one against the other.

pub mod catalog;
pub mod models;
pub mod session;
pub mod signer;

mod error;
mod http;

pub use catalog::{EndpointCatalog, EndpointTemplate};
pub use error::ClientError;
pub use models::{DecodedModel, ModelKind, decode_tagged};
pub use session::{BEARER_TOKEN, HeaderProfile, Session};
pub use signer::{DisabledSigner, TransactionSigner};

use serde_json::{Map, Value};

use crate::http::check_response;

const DEFAULT_BASE_URL: &str = "https://x.com/i/api";

/// A live call's result: the exact body text plus its decoded model.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub raw: String,
    pub model: DecodedModel,
}

/// HTTP client bound to one session, catalog, and signer.
pub struct XClient<S = DisabledSigner> {
    http: reqwest::Client,
    base_url: String,
    catalog: EndpointCatalog,
    session: Session,
    signer: S,
}

impl XClient<DisabledSigner> {
    /// Client with the built-in catalog and no transaction signing.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self::with_signer(session, DisabledSigner)
    }
}

impl<S: TransactionSigner> XClient<S> {
    /// Client with an injected transaction signer.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn with_signer(session: Session, signer: S) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("reqwest client should build"),
            base_url: DEFAULT_BASE_URL.to_owned(),
            catalog: EndpointCatalog::builtin(),
            session,
            signer,
        }
    }

    /// Point the client at a different API front (tests, mirrors).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the built-in endpoint catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: EndpointCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    /// Call one endpoint with call-specific variable overrides (cursor,
    /// target identifiers) merged over the catalog template.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure, non-success status, unknown
    /// endpoint or model tag, or a body that does not decode.
    pub async fn call(
        &self,
        operation: &str,
        overrides: &Map<String, Value>,
    ) -> Result<CallOutcome, ClientError> {
        let template = self.catalog.get(operation)?;
        let url = self.build_url(operation, template, overrides);

        let mut request = self
            .http
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {BEARER_TOKEN}"),
            )
            .header(reqwest::header::USER_AGENT, self.session.profile().user_agent.as_str())
            .header(
                reqwest::header::ACCEPT_LANGUAGE,
                self.session.profile().accept_language.as_str(),
            )
            .header("sec-ch-ua", self.session.profile().sec_ch_ua.as_str())
            .header("sec-ch-ua-platform", self.session.profile().sec_ch_ua_platform.as_str())
            .header("x-twitter-active-user", "yes")
            .header("x-twitter-client-language", "en");

        if self.session.has_cookies() {
            request = request
                .header(reqwest::header::COOKIE, self.session.cookie_header())
                .header("x-twitter-auth-type", "OAuth2Session");
            if let Some(csrf) = self.session.csrf_token() {
                request = request.header("x-csrf-token", csrf);
            }
        }

        if let Some((method, path)) = template.signing_target() {
            if let Some(transaction_id) = self.signer.sign(method, path) {
                request = request.header("x-client-transaction-id", transaction_id);
            }
        }

        let resp = check_response(request.send().await?).await?;
        let raw = resp.text().await?;
        let model = template.model_kind()?.decode(&raw)?;
        tracing::debug!(operation, bytes = raw.len(), "decoded live response");

        Ok(CallOutcome { raw, model })
    }

    fn build_url(
        &self,
        operation: &str,
        template: &EndpointTemplate,
        overrides: &Map<String, Value>,
    ) -> String {
        let variables = Value::Object(template.variables_with(overrides)).to_string();
        let mut url = format!(
            "{}/graphql/{}/{}?variables={}",
            self.base_url,
            template.query_id,
            operation,
            urlencoding::encode(&variables)
        );
        if let Some(features) = &template.features {
            let features = Value::Object(features.clone()).to_string();
            url.push_str(&format!("&features={}", urlencoding::encode(&features)));
        }
        if let Some(toggles) = &template.field_toggles {
            let toggles = Value::Object(toggles.clone()).to_string();
            url.push_str(&format!("&fieldToggles={}", urlencoding::encode(&toggles)));
        }
        url
    }
}
