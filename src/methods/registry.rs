use crate::errors::TokenError;
use crate::methods::SigningMethod;

use once_cell::sync::Lazy;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

static DEFAULT_REGISTRY: Lazy<SigningMethodRegistry> = Lazy::new(SigningMethodRegistry::with_defaults);

/// A closed mapping from algorithm name to signing method.
///
/// Registration is meant to happen at startup; lookups afterwards only take a read lock.
#[derive(Default)]
pub struct SigningMethodRegistry {
  methods: RwLock<HashMap<String, Arc<dyn SigningMethod>>>,
}

impl SigningMethodRegistry {
  /// Creates an empty registry.
  pub fn new() -> SigningMethodRegistry {
    SigningMethodRegistry::default()
  }

  /// Creates a registry holding every method enabled through cargo features.
  pub fn with_defaults() -> SigningMethodRegistry {
    let registry = SigningMethodRegistry::new();

    #[cfg(feature = "hmac")]
    {
      use crate::methods::hmac::*;
      registry.register("HS256", Arc::new(SigningMethodHmac::hs256()));
      registry.register("HS384", Arc::new(SigningMethodHmac::hs384()));
      registry.register("HS512", Arc::new(SigningMethodHmac::hs512()));
    }

    #[cfg(feature = "rsa")]
    {
      use crate::methods::rsa::*;
      registry.register("RS256", Arc::new(SigningMethodRsa::rs256()));
      registry.register("RS384", Arc::new(SigningMethodRsa::rs384()));
      registry.register("RS512", Arc::new(SigningMethodRsa::rs512()));
      registry.register("PS256", Arc::new(SigningMethodRsa::ps256()));
      registry.register("PS384", Arc::new(SigningMethodRsa::ps384()));
      registry.register("PS512", Arc::new(SigningMethodRsa::ps512()));
    }

    #[cfg(feature = "ecdsa")]
    {
      use crate::methods::ecdsa::*;
      registry.register("ES256", Arc::new(SigningMethodEcdsa::es256()));
      registry.register("ES384", Arc::new(SigningMethodEcdsa::es384()));
    }

    registry
  }

  /// Binds `name` to `method`. A second registration under the same name replaces the first.
  pub fn register(&self, name: &str, method: Arc<dyn SigningMethod>) {
    let mut methods = self.methods.write().unwrap_or_else(PoisonError::into_inner);
    if methods.insert(name.to_owned(), method).is_some() {
      tracing::warn!(alg = name, "replaced an already registered signing method");
    }
  }

  /// Resolves `name`, failing with [`TokenError::UnrecognizedAlgorithm`] when nothing was registered
  /// under it.
  pub fn lookup(&self, name: &str) -> Result<Arc<dyn SigningMethod>, TokenError> {
    let methods = self.methods.read().unwrap_or_else(PoisonError::into_inner);
    methods
      .get(name)
      .cloned()
      .ok_or_else(|| TokenError::UnrecognizedAlgorithm(name.to_owned()))
  }

  /// Registered algorithm names, sorted.
  pub fn algorithms(&self) -> Vec<String> {
    let methods = self.methods.read().unwrap_or_else(PoisonError::into_inner);
    let mut names = methods.keys().cloned().collect::<Vec<_>>();
    names.sort();
    names
  }
}

/// The process-wide registry, built with every enabled method on first use.
pub fn default_registry() -> &'static SigningMethodRegistry {
  &DEFAULT_REGISTRY
}

/// Registers `method` under `name` in the process-wide registry.
pub fn register_signing_method(name: &str, method: Arc<dyn SigningMethod>) {
  default_registry().register(name, method)
}

/// Looks `name` up in the process-wide registry.
pub fn lookup_signing_method(name: &str) -> Result<Arc<dyn SigningMethod>, TokenError> {
  default_registry().lookup(name)
}
