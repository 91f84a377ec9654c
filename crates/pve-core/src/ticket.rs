//! Authentication ticket state and cookie encoding.
//!
//! The login exchange yields two artifacts: a session ticket (sent back as a
//! cookie) and a CSRF prevention token (sent back as a header). This module
//! holds both, together with the connection status the authenticator records
//! at construction time. The store is written exactly once, during login, and
//! only read afterwards.

use std::fmt;

/// Cookie name carrying the encoded session ticket.
pub const AUTH_COOKIE_NAME: &str = "PVEAuthCookie";

/// Header name carrying the CSRF prevention token.
pub const CSRF_TOKEN_HEADER: &str = "CSRFPreventionToken";

/// Outcome of the one-time login exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Login has not run yet
    Uninitialized,
    /// The ticket endpoint answered 200
    Connected,
    /// The ticket endpoint answered with a non-200 status
    Error,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Connected => "connected",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// Percent-encode the characters Proxmox tickets carry that are not
/// cookie-safe (`:` and `=`).
#[must_use]
pub fn encode_ticket(raw: &str) -> String {
    raw.replace(':', "%3A").replace('=', "%3D")
}

/// Authentication artifacts attached to every request after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTicket {
    /// Full cookie value, `PVEAuthCookie=<encoded ticket>`
    pub cookie: String,

    /// CSRF prevention token, sent verbatim
    pub csrf_token: String,
}

impl AuthTicket {
    /// Build the artifacts from a raw ticket string and CSRF token.
    #[must_use]
    pub fn new(ticket: &str, csrf_token: impl Into<String>) -> Self {
        Self {
            cookie: format!("{AUTH_COOKIE_NAME}={}", encode_ticket(ticket)),
            csrf_token: csrf_token.into(),
        }
    }
}

/// Holds the authentication artifacts and connection status for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketStore {
    status: ConnectionStatus,
    ticket: Option<AuthTicket>,
}

impl TicketStore {
    /// Create an empty store in the uninitialized state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: ConnectionStatus::Uninitialized,
            ticket: None,
        }
    }

    /// Record a successful login exchange.
    ///
    /// The status flips to `Connected` whenever the server answered 200, even
    /// when the response carried no ticket; the original client behaved this
    /// way and callers check `ticket()` separately.
    pub fn connect(&mut self, ticket: Option<AuthTicket>) {
        self.status = ConnectionStatus::Connected;
        self.ticket = ticket;
    }

    /// Record a rejected login exchange. Artifacts stay unset.
    pub fn fail(&mut self) {
        self.status = ConnectionStatus::Error;
        self.ticket = None;
    }

    /// Current connection status.
    #[must_use]
    pub const fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Authentication artifacts, if the login produced any.
    #[must_use]
    pub const fn ticket(&self) -> Option<&AuthTicket> {
        self.ticket.as_ref()
    }

    /// Whether the login exchange succeeded.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self.status, ConnectionStatus::Connected)
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}
