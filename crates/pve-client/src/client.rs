//! Asynchronous Proxmox VE client implementation.
//!
//! Construction performs the one-time `access/ticket` login exchange and
//! records its outcome in the ticket store; every later call flows through
//! the same dispatch pipeline, which attaches the session cookie and CSRF
//! token and unwraps the `data` envelope the API puts around every payload.

use crate::models::TicketResponse;
use crate::Result;
use pve_core::client::ClientConfig;
use pve_core::config::PveClientConfig;
use pve_core::ticket::{AuthTicket, ConnectionStatus, TicketStore, CSRF_TOKEN_HEADER};
use pve_core::Error;
use reqwest::header::COOKIE;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("pve-client/", env!("CARGO_PKG_VERSION"));
const TICKET_PATH: &str = "access/ticket";

/// Builder for [`PveClient`].
#[derive(Debug, Clone)]
pub struct PveClientBuilder {
    config: PveClientConfig,
    http_config: ClientConfig,
}

impl PveClientBuilder {
    /// Create a new builder from a [`PveClientConfig`].
    #[must_use]
    pub fn new(config: PveClientConfig) -> Self {
        let http_config = ClientConfig::new().with_timeout(config.timeout());
        Self {
            config,
            http_config,
        }
    }

    /// Override the HTTP client configuration used when building the client.
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Finalise the builder, create the client, and run the login exchange.
    ///
    /// A rejected login does not fail construction: the returned client is in
    /// the [`ConnectionStatus::Error`] state and later calls go out without
    /// auth artifacts, to be rejected by the server. A transport failure
    /// during login does error.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built, the base URL is
    /// invalid, or the login request fails at the transport level.
    pub async fn connect(self) -> Result<PveClient> {
        let base_url = self.config.parse_api_url()?;

        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host);

        if !self.config.tls_verify {
            warn!("TLS verification disabled for Proxmox VE client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &self.config.tls_ca_cert {
            debug!("loading CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        let auth = login(&http, &base_url, &self.config).await?;

        Ok(PveClient {
            http,
            base_url,
            node: self.config.node,
            auth,
        })
    }
}

/// Exchange the configured credentials for a ticket and CSRF token.
///
/// Runs exactly once. A non-200 answer leaves the store in the error state
/// without failing; transport and parse failures propagate.
async fn login(http: &Client, base_url: &Url, config: &PveClientConfig) -> Result<TicketStore> {
    let url = base_url
        .join(TICKET_PATH)
        .map_err(|err| Error::InvalidEndpoint(format!("Invalid ticket path: {err}")))?;

    let form = [
        ("username", config.username.as_str()),
        ("realm", config.realm.as_str()),
        ("password", config.password.expose_secret()),
    ];

    debug!(username = %config.username, realm = %config.realm, "requesting ticket");

    let mut store = TicketStore::new();

    let response = match http.post(url).form(&form).send().await {
        Ok(response) => response,
        Err(err) => {
            store.fail();
            return Err(err.into());
        }
    };

    if response.status() != StatusCode::OK {
        warn!(status = %response.status(), "ticket request rejected");
        store.fail();
        return Ok(store);
    }

    let body: TicketResponse = response.json().await.map_err(|err| {
        Error::MalformedResponse(format!("Invalid ticket response: {err}"))
    })?;

    let ticket = body.data.and_then(|data| {
        data.ticket
            .map(|raw| AuthTicket::new(&raw, data.csrf_prevention_token.unwrap_or_default()))
    });

    // Status flips to connected on any 200, ticket or not; callers that care
    // inspect the store's ticket separately.
    store.connect(ticket);
    Ok(store)
}

/// Asynchronous Proxmox VE client, scoped to one cluster node.
#[derive(Clone, Debug)]
pub struct PveClient {
    http: Client,
    base_url: Url,
    node: String,
    auth: TicketStore,
}

impl PveClient {
    /// Construct a client directly from the configuration and log in.
    ///
    /// # Errors
    ///
    /// See [`PveClientBuilder::connect`].
    pub async fn connect(config: PveClientConfig) -> Result<Self> {
        PveClientBuilder::new(config).connect().await
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: PveClientConfig) -> PveClientBuilder {
        PveClientBuilder::new(config)
    }

    /// Return the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the node this client is scoped to.
    #[must_use]
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Outcome of the login exchange performed at construction.
    #[must_use]
    pub const fn connection_status(&self) -> ConnectionStatus {
        self.auth.status()
    }

    /// Build the relative path for a resource below this client's node.
    pub(crate) fn node_path(&self, rest: &str) -> String {
        format!("nodes/{}/{rest}", self.node)
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid resource path `{path}`: {err}")))
    }

    /// Attach the auth artifacts to an outbound request.
    ///
    /// The cookie and CSRF token ride as headers, so caller-supplied query
    /// parameters can never displace them. When the login failed there is
    /// nothing to attach and the request goes out bare.
    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth.ticket() {
            Some(ticket) => request
                .header(COOKIE, ticket.cookie.as_str())
                .header(CSRF_TOKEN_HEADER, ticket.csrf_token.as_str()),
            None => request,
        }
    }

    pub(crate) async fn get<Q>(&self, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        debug!(%path, "GET");
        let request = self.apply_auth(self.http.get(url).query(query));
        self.execute(request, path).await
    }

    pub(crate) async fn post<F>(&self, path: &str, form: &F) -> Result<Value>
    where
        F: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        debug!(%path, "POST");
        let request = self.apply_auth(self.http.post(url).form(form));
        self.execute(request, path).await
    }

    pub(crate) async fn put<F>(&self, path: &str, form: &F) -> Result<Value>
    where
        F: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        debug!(%path, "PUT");
        let request = self.apply_auth(self.http.put(url).form(form));
        self.execute(request, path).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        let url = self.build_url(path)?;
        debug!(%path, "DELETE");
        let request = self.apply_auth(self.http.delete(url));
        self.execute(request, path).await
    }

    /// Send the request and normalize the response.
    ///
    /// A 200 answer is parsed as JSON and unwrapped to its `data` field;
    /// anything else maps to [`Error::Api`] with the numeric status code.
    async fn execute(&self, request: RequestBuilder, path: &str) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(Error::api(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|err| {
            Error::MalformedResponse(format!("Invalid JSON for `{path}`: {err}"))
        })?;

        body.get("data").cloned().ok_or_else(|| {
            Error::MalformedResponse(format!("Response for `{path}` is missing the `data` field"))
        })
    }
}
