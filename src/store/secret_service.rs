//! freedesktop Secret Service backend over the session D-Bus
//!
//! Uses a `plain` transfer session, so secret bytes arrive unencrypted over the
//! (local, per-user) session bus.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use dbus::Path;
use dbus::arg::{RefArg, Variant};
use dbus::blocking::stdintf::org_freedesktop_dbus::Properties;
use dbus::blocking::{Connection, Proxy};
use indexmap::IndexMap;

use crate::error::{KeyviewError, Result};
use crate::store::{SecretStore, StoreItem, StoreOptions};

const SERVICE_NAME: &str = "org.freedesktop.secrets";
const SERVICE_PATH: &str = "/org/freedesktop/secrets";
const SERVICE_IFACE: &str = "org.freedesktop.Secret.Service";
const COLLECTION_IFACE: &str = "org.freedesktop.Secret.Collection";
const ITEM_IFACE: &str = "org.freedesktop.Secret.Item";
const SESSION_IFACE: &str = "org.freedesktop.Secret.Session";

/// An open transfer session, shared by the store and every item it returns
struct Session {
    conn: Connection,
    path: Path<'static>,
    timeout: Duration,
}

impl Session {
    fn proxy(&self, path: Path<'static>) -> Proxy<'static, &Connection> {
        self.conn.with_proxy(SERVICE_NAME, path, self.timeout)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let session = self.proxy(self.path.clone());
        let _: std::result::Result<(), dbus::Error> =
            session.method_call(SESSION_IFACE, "Close", ());
    }
}

pub struct SecretServiceStore {
    session: Rc<Session>,
    alias: String,
    collection: Path<'static>,
}

impl SecretServiceStore {
    /// Resolve the collection alias and open a `plain` session
    pub fn connect(options: &StoreOptions) -> Result<Self> {
        let conn = Connection::new_session().map_err(|e| {
            KeyviewError::backend_unavailable(format!("cannot connect to the session bus: {}", e))
        })?;

        let (collection, session_path) = {
            let service = conn.with_proxy(SERVICE_NAME, SERVICE_PATH, options.timeout);

            let (collection,): (Path<'static>,) = service
                .method_call(SERVICE_IFACE, "ReadAlias", (options.collection.as_str(),))
                .map_err(|e| {
                    KeyviewError::backend_unavailable(format!(
                        "cannot resolve collection '{}': {}",
                        options.collection, e
                    ))
                })?;

            // The service answers "/" for an alias nobody has claimed
            if &*collection == "/" {
                return Err(KeyviewError::backend_unavailable(format!(
                    "no collection is registered under the alias '{}'",
                    options.collection
                )));
            }

            let (_output, session_path): (Variant<Box<dyn RefArg>>, Path<'static>) = service
                .method_call(SERVICE_IFACE, "OpenSession", ("plain", Variant("")))
                .map_err(|e| {
                    KeyviewError::backend_unavailable(format!("cannot open a session: {}", e))
                })?;

            (collection, session_path)
        };

        tracing::debug!(
            "Opened Secret Service session {} for collection {} (alias '{}')",
            session_path,
            collection,
            options.collection
        );

        Ok(Self {
            session: Rc::new(Session {
                conn,
                path: session_path,
                timeout: options.timeout,
            }),
            alias: options.collection.clone(),
            collection,
        })
    }

    fn read_item(&self, path: Path<'static>) -> Result<SecretServiceItem> {
        let proxy = self.session.proxy(path.clone());
        let unavailable = |e: dbus::Error| {
            KeyviewError::backend_unavailable(format!("cannot read item {}: {}", path, e))
        };

        let label: String = proxy.get(ITEM_IFACE, "Label").map_err(unavailable)?;
        let attributes: HashMap<String, String> =
            proxy.get(ITEM_IFACE, "Attributes").map_err(unavailable)?;

        // a{ss} carries no order; sort so attribute lines are stable between opens
        let mut attributes: IndexMap<String, String> = attributes.into_iter().collect();
        attributes.sort_keys();

        Ok(SecretServiceItem {
            session: Rc::clone(&self.session),
            path,
            label,
            attributes,
        })
    }
}

impl SecretStore for SecretServiceStore {
    fn enumerate(&self) -> Result<Vec<Box<dyn StoreItem>>> {
        let collection = self.session.proxy(self.collection.clone());
        let paths: Vec<Path<'static>> = collection
            .get(COLLECTION_IFACE, "Items")
            .map_err(|e| {
                KeyviewError::backend_unavailable(format!(
                    "cannot list items of collection '{}': {}",
                    self.alias, e
                ))
            })?;

        tracing::debug!("Collection '{}' holds {} items", self.alias, paths.len());

        paths
            .into_iter()
            .map(|path| {
                self.read_item(path)
                    .map(|item| Box::new(item) as Box<dyn StoreItem>)
            })
            .collect()
    }
}

pub struct SecretServiceItem {
    session: Rc<Session>,
    path: Path<'static>,
    label: String,
    attributes: IndexMap<String, String>,
}

impl StoreItem for SecretServiceItem {
    fn label(&self) -> &str {
        &self.label
    }

    fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    fn secret(&self) -> Result<Vec<u8>> {
        tracing::debug!("Fetching secret for item {}", self.path);

        let proxy = self.session.proxy(self.path.clone());
        // Secret struct: (session, parameters, value, content_type)
        let ((_session, _parameters, value, _content_type),): (
            (Path<'static>, Vec<u8>, Vec<u8>, String),
        ) = proxy
            .method_call(ITEM_IFACE, "GetSecret", (self.session.path.clone(),))
            .map_err(|e| KeyviewError::SecretFetchFailed {
                label: self.label.clone(),
                details: e.to_string(),
            })?;

        Ok(value)
    }
}
