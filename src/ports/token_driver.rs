//! TokenDriver trait - capability to reach a token and bind its catalog

use super::TokenCatalog;
use crate::error::{TokenError, TokenResult};

/// A connection handed back by a failed catalog binding
#[derive(Debug)]
pub struct Unbound<C> {
    pub connection: C,
    pub error: TokenError,
}

/// Transport-level access to tokens
///
/// Each acquiring method produces a handle that the matching release method
/// consumes. Handles are only valid while the handles they were derived from
/// are alive: a connection depends on its context, a catalog owns its
/// connection until it is unbound.
pub trait TokenDriver {
    type Context;
    type Connection;
    type Catalog: TokenCatalog;

    /// Establish the execution context (reader subsystem)
    fn establish_context(&mut self) -> TokenResult<Self::Context>;

    /// Number of devices (readers) known to the context
    fn device_count(&mut self, context: &mut Self::Context) -> usize;

    /// Human-readable device name, used for narration only
    fn device_name(&mut self, context: &mut Self::Context, index: usize) -> Option<String>;

    /// Whether a token is present in the device
    fn detect_token(&mut self, context: &mut Self::Context, index: usize) -> TokenResult<bool>;

    fn connect(&mut self, context: &mut Self::Context, index: usize)
        -> TokenResult<Self::Connection>;

    /// Bind the on-card object catalog
    ///
    /// The catalog takes ownership of the connection. On failure the
    /// connection is handed back so it can still be disconnected.
    fn bind_catalog(
        &mut self,
        connection: Self::Connection,
    ) -> Result<Self::Catalog, Unbound<Self::Connection>>;

    /// Release the catalog and hand back its connection
    fn unbind_catalog(&mut self, catalog: Self::Catalog) -> Self::Connection;

    fn disconnect(&mut self, connection: Self::Connection);

    fn destroy_context(&mut self, context: Self::Context);
}
