//! Port for request-scoped client origin signals.
//!
//! Writers consult this to backfill the client address of an entry that
//! was logged while serving a request. Nothing here is ambient: callers pass
//! the context explicitly, or pass nothing.

/// Read-only view of the client origin signals of the current request.
///
/// Every signal is optional; implementations return `None` for signals the
/// transport did not provide.
pub trait RequestContext {
    /// Address of the peer on the direct connection
    fn remote_addr(&self) -> Option<&str>;

    /// Value of the `X-Forwarded-For` header
    fn forwarded_for(&self) -> Option<&str>;

    /// Value of the `Client-IP` header
    fn client_ip(&self) -> Option<&str>;

    /// The client address, preferring the direct connection, then the
    /// forwarded-for header, then the client-IP header.
    fn client_address(&self) -> Option<&str> {
        self.remote_addr()
            .or_else(|| self.forwarded_for())
            .or_else(|| self.client_ip())
    }
}

/// Plain set of request signals, filled in by whatever serves the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSignals {
    pub remote_addr: Option<String>,
    pub forwarded_for: Option<String>,
    pub client_ip: Option<String>,
}

impl RequestSignals {
    /// Signals carrying only a direct connection address
    pub fn from_remote_addr(addr: impl Into<String>) -> Self {
        Self {
            remote_addr: Some(addr.into()),
            ..Default::default()
        }
    }
}

impl RequestContext for RequestSignals {
    fn remote_addr(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }

    fn forwarded_for(&self) -> Option<&str> {
        self.forwarded_for.as_deref()
    }

    fn client_ip(&self) -> Option<&str> {
        self.client_ip.as_deref()
    }
}

/// Context for entries logged outside of any request.
pub struct NoRequestContext;

impl RequestContext for NoRequestContext {
    fn remote_addr(&self) -> Option<&str> {
        None
    }

    fn forwarded_for(&self) -> Option<&str> {
        None
    }

    fn client_ip(&self) -> Option<&str> {
        None
    }
}
