// Signed client for the Inkpress runtime API.
//
// Every JSON operation POSTs to `{base}/{endpoint}` with the auth fields
// flattened into the request body. The raster endpoint lives on a separate
// binary-serving host and takes a form-encoded body instead.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::{CategoriesPayload, Category, Design, DesignsEnvelope};
use crate::signing::{Credentials, SignedRequest};
use crate::transport::{self, RASTER_TIMEOUT, TransportConfig};

/// Default JSON runtime endpoint.
pub const DEFAULT_API_URL: &str = "https://api.inkpress.io/runtime/";

/// Default raster archive endpoint.
pub const DEFAULT_RASTER_URL: &str = "https://inkpress.net/api/runtime/fetch-raster";

/// Request body wrapper: auth fields flattened alongside the operation
/// parameters, exactly as the provider expects them.
#[derive(Serialize)]
struct SignedBody<'a, P: Serialize> {
    #[serde(flatten)]
    auth: SignedRequest,
    #[serde(flatten)]
    params: &'a P,
}

#[derive(Serialize)]
struct NoParams {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryScope<'a> {
    category_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectScope<'a> {
    project_id: &'a str,
}

#[derive(Serialize)]
struct ProjectSpec<'a> {
    width: f64,
    height: f64,
    unit: &'a str,
}

/// Signed HTTP client for the Inkpress runtime API.
///
/// One instance per tenant credential set; construction validates the
/// credentials and endpoint URLs but performs no network I/O.
#[derive(Debug, Clone)]
pub struct RuntimeClient {
    http: reqwest::Client,
    base_url: Url,
    raster_url: Url,
    credentials: Credentials,
}

impl RuntimeClient {
    /// Create a client against the default Inkpress endpoints.
    pub fn new(credentials: Credentials, config: &TransportConfig) -> Result<Self, Error> {
        Self::with_urls(credentials, config, DEFAULT_API_URL, DEFAULT_RASTER_URL)
    }

    /// Create a client against custom endpoints (regional hosts, test
    /// servers).
    pub fn with_urls(
        credentials: Credentials,
        config: &TransportConfig,
        base_url: &str,
        raster_url: &str,
    ) -> Result<Self, Error> {
        let http = transport::build_client(config)?;
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
            raster_url: Url::parse(raster_url)?,
            credentials,
        })
    }

    /// The tenant credentials this client signs with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The JSON runtime base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The raster endpoint URL.
    pub fn raster_url(&self) -> &Url {
        &self.raster_url
    }

    fn endpoint(&self, name: &str) -> Url {
        // Base is validated at construction; joining a bare segment onto it
        // cannot fail.
        self.base_url.join(name).expect("invalid API URL")
    }

    /// POST `params` to a runtime endpoint with fresh auth fields and
    /// classify the reply.
    async fn call<P: Serialize>(&self, endpoint: &str, params: &P) -> Result<Value, Error> {
        let url = self.endpoint(endpoint);
        debug!("POST {}", url);
        let body = SignedBody {
            auth: self.credentials.sign_now(),
            params,
        };
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        let text = response.text().await.map_err(Error::Transport)?;
        classify_body(&text)
    }

    // ── Discovery ────────────────────────────────────────────────

    /// Enumerate the tenant's categories.
    ///
    /// The payload shape varies by account; anything unrecognized is an
    /// empty set, not an error.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, Error> {
        let value = self.call("fetch-categories", &NoParams {}).await?;
        let payload = CategoriesPayload::parse(value);
        if payload.is_unrecognized() {
            warn!("unrecognized categories payload shape; treating as empty");
        }
        Ok(payload.into_categories())
    }

    /// Fetch the designs in one category. A missing `data.items` level in
    /// the reply means zero designs.
    pub async fn fetch_designs(&self, category_id: &str) -> Result<Vec<Design>, Error> {
        let value = self.call("fetch-designs", &CategoryScope { category_id }).await?;
        match serde_json::from_value::<DesignsEnvelope>(value) {
            Ok(envelope) => Ok(envelope.into_designs()),
            Err(err) => {
                warn!("unrecognized designs payload ({err}); treating as empty");
                Ok(Vec::new())
            }
        }
    }

    // ── Project lifecycle ────────────────────────────────────────

    /// Fetch a saved project's raw state.
    pub async fn fetch_project(&self, project_id: &str) -> Result<Value, Error> {
        self.call("fetch-project", &ProjectScope { project_id }).await
    }

    /// Ask the provider to render a project as a PDF.
    pub async fn render_pdf(&self, project_id: &str) -> Result<Value, Error> {
        self.call("render-pdf", &ProjectScope { project_id }).await
    }

    /// Clone an existing project.
    pub async fn clone_project(&self, project_id: &str) -> Result<Value, Error> {
        self.call("clone-project", &ProjectScope { project_id }).await
    }

    /// Create a blank project with the given canvas dimensions.
    pub async fn create_project(
        &self,
        width: f64,
        height: f64,
        unit: &str,
    ) -> Result<Value, Error> {
        self.call("create-project", &ProjectSpec { width, height, unit })
            .await
    }

    // ── Raster archive ───────────────────────────────────────────

    /// Fetch the rendered raster archive for a project.
    ///
    /// Form-encoded POST to the raster host. Only an `application/zip`
    /// reply is accepted; anything else is a bad response, never treated
    /// as archive bytes.
    pub async fn fetch_raster(&self, project_id: &str) -> Result<Vec<u8>, Error> {
        let url = self.raster_url.clone();
        debug!("POST {} (raster)", url);
        let auth = self.credentials.sign_now();
        let form = [
            ("projectId", project_id.to_owned()),
            ("timestamp", auth.timestamp.to_string()),
            ("apiKey", auth.api_key),
            ("signature", auth.signature),
        ];
        let response = self
            .http
            .post(url)
            .timeout(RASTER_TIMEOUT)
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_owned();
        if !content_type.contains("application/zip") {
            return Err(Error::BadResponse {
                message: format!("expected application/zip, got {content_type}"),
            });
        }
        let bytes = response.bytes().await.map_err(Error::Transport)?;
        Ok(bytes.to_vec())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, Error> {
    // A trailing slash keeps Url::join from eating the last path segment.
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Ok(Url::parse(&normalized)?)
}

/// Classify a raw reply body.
///
/// The provider signals failure in the body, not the status line, so
/// classification is purely body-driven: unparseable text is a bad
/// response, a truthy `error` flag is a provider failure, everything else
/// passes through.
fn classify_body(text: &str) -> Result<Value, Error> {
    let value: Value = serde_json::from_str(text).map_err(|_| Error::BadResponse {
        message: "invalid response from API".into(),
    })?;

    if let Some(message) = provider_error(&value) {
        return Err(Error::Provider { message });
    }

    Ok(value)
}

/// Extract a provider-reported failure from a parsed payload: a truthy
/// top-level `error` flag, with an optional `message` beside it.
fn provider_error(value: &Value) -> Option<String> {
    let error = value.get("error")?;
    let truthy = match error {
        Value::Bool(flag) => *flag,
        Value::Null => false,
        Value::Number(n) => n.as_i64() != Some(0),
        _ => true,
    };
    if !truthy {
        return None;
    }
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map_or_else(|| "API error".to_owned(), str::to_owned);
    Some(message)
}
