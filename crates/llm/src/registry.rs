//! Named adapter constructors.
//!
//! Identifiers are trimmed and lowercased on both registration and lookup.
//! Registering an existing identifier replaces it, so tests can swap in
//! doubles. Constructors are cloned out of the lock before they run.

use crate::{Adapter, AdapterOptions, Client, Environment, Error, ProcessEnv, Result};
use compact_str::CompactString;
use parking_lot::RwLock;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

/// Builds an adapter from the shared client, the environment and explicit options.
pub type Constructor =
    Arc<dyn Fn(&Client, &dyn Environment, &AdapterOptions) -> Result<Box<dyn Adapter>> + Send + Sync>;

/// Maps provider identifiers to adapter constructors.
pub struct Registry {
    constructors: RwLock<BTreeMap<CompactString, Constructor>>,
    client: Client,
    env: Arc<dyn Environment>,
}

impl Registry {
    /// An empty registry reading the process environment.
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }

    /// An empty registry reading credentials from `env`.
    pub fn with_env(env: impl Environment + 'static) -> Self {
        Self {
            constructors: RwLock::new(BTreeMap::new()),
            client: Client::new(),
            env: Arc::new(env),
        }
    }

    /// Use `client` for every adapter built from now on.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Register `constructor` under `name`. Last registration wins.
    pub fn register<F>(&self, name: &str, constructor: F)
    where
        F: Fn(&Client, &dyn Environment, &AdapterOptions) -> Result<Box<dyn Adapter>>
            + Send
            + Sync
            + 'static,
    {
        let key = normalize(name);
        tracing::debug!("registering provider {key}");
        self.constructors.write().insert(key, Arc::new(constructor));
    }

    /// Build the adapter registered under `name`.
    pub fn create(&self, name: &str, options: &AdapterOptions) -> Result<Box<dyn Adapter>> {
        let key = normalize(name);
        let constructor = self.constructors.read().get(&key).cloned();
        match constructor {
            Some(constructor) => constructor(&self.client, self.env.as_ref(), options),
            None => Err(self.unsupported(name)),
        }
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.read().contains_key(&normalize(name))
    }

    /// Fail with [`Error::UnsupportedProvider`] unless `name` is registered.
    pub fn check(&self, name: &str) -> Result<()> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(self.unsupported(name))
        }
    }

    /// Registered identifiers.
    pub fn list(&self) -> BTreeSet<CompactString> {
        self.constructors.read().keys().cloned().collect()
    }

    fn unsupported(&self, name: &str) -> Error {
        Error::UnsupportedProvider {
            name: name.to_owned(),
            supported: self.list().into_iter().map(String::from).collect(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("providers", &self.list())
            .finish()
    }
}

fn normalize(name: &str) -> CompactString {
    CompactString::from(name.trim().to_lowercase())
}
