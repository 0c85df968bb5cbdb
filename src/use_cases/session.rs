//! Session manager
//!
//! Acquires the handle chain context -> connection -> catalog and releases
//! whatever was acquired, in reverse order, exactly once.

use tracing::{debug, info, warn};

use crate::error::{YkcryptError, YkcryptResult};
use crate::ports::{KeyDirectory, TokenDriver, Unbound};

/// Live hardware session
///
/// Holds the context and the connection while a catalog is not bound to
/// it. [`Session::close`] releases them from the last to the first and runs
/// on drop, so teardown happens on every exit path. The bound catalog itself
/// only exists inside [`Session::run`].
pub struct Session<'d, D: TokenDriver> {
    driver: &'d mut D,
    context: Option<D::Context>,
    connection: Option<D::Connection>,
}

impl<'d, D: TokenDriver> Session<'d, D> {
    /// Open a session on the token in device `selector`, run `work` against
    /// its catalog and release everything
    ///
    /// # Errors
    ///
    /// - `ContextFailed` if the context cannot be established
    /// - `DeviceSelectorInvalid` if `selector` is not below the device count
    /// - `DeviceAbsent` if no token is present (connect is not attempted)
    /// - `ConnectFailed` / `CatalogBindFailed` for the later stages
    /// - whatever `work` returns
    ///
    /// The catalog is unbound after `work` returns, whatever its outcome.
    /// Stages acquired before an opening failure are released before
    /// returning.
    pub fn run<T, F>(driver: &'d mut D, selector: usize, work: F) -> YkcryptResult<T>
    where
        F: FnOnce(&mut D::Catalog) -> YkcryptResult<T>,
    {
        let mut session = Session {
            driver,
            context: None,
            connection: None,
        };
        let mut catalog = session.open(selector)?;

        let outcome = work(&mut catalog);

        session.unbind(catalog);
        session.close();
        outcome
    }

    fn open(&mut self, selector: usize) -> YkcryptResult<D::Catalog> {
        let context = self
            .driver
            .establish_context()
            .map_err(|source| YkcryptError::ContextFailed { source })?;
        let context = self.context.insert(context);

        let count = self.driver.device_count(context);
        if selector >= count {
            return Err(YkcryptError::DeviceSelectorInvalid { selector, count });
        }

        match self.driver.detect_token(context, selector) {
            Ok(true) => {}
            Ok(false) => {
                return Err(YkcryptError::DeviceAbsent {
                    selector,
                    source: None,
                })
            }
            Err(source) => {
                warn!("Token detection failed: {}", source);
                return Err(YkcryptError::DeviceAbsent {
                    selector,
                    source: Some(source),
                });
            }
        }

        let name = self
            .driver
            .device_name(context, selector)
            .unwrap_or_else(|| format!("#{}", selector));
        info!("Connecting to card in reader {}...", name);

        let connection = self
            .driver
            .connect(context, selector)
            .map_err(|source| YkcryptError::ConnectFailed { source })?;

        info!("Trying to find an object catalog on the card...");
        match self.driver.bind_catalog(connection) {
            Ok(catalog) => {
                info!("Found {}!", catalog.label());
                Ok(catalog)
            }
            Err(Unbound { connection, error }) => {
                self.connection = Some(connection);
                Err(YkcryptError::CatalogBindFailed { source: error })
            }
        }
    }

    fn unbind(&mut self, catalog: D::Catalog) {
        debug!("Releasing object catalog");
        let connection = self.driver.unbind_catalog(catalog);
        self.connection = Some(connection);
    }

    /// Release the connection and the context; a no-op once released
    pub fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            debug!("Disconnecting card");
            self.driver.disconnect(connection);
        }
        if let Some(context) = self.context.take() {
            debug!("Destroying context");
            self.driver.destroy_context(context);
        }
    }
}

impl<D: TokenDriver> Drop for Session<'_, D> {
    fn drop(&mut self) {
        self.close();
    }
}
