//! Lookup of type providers by kind name.

use indexmap::IndexMap;
use packrig_bundler::Configuration;
use packrig_config::{BuildContext, Options, PackageMetadata};
use serde_json::{Map, Value};

use crate::provider::{
    ConfigContext, Contribution, DefaultOptionsContext, Error, ProcessOptionsContext, Result,
    TypeProvider,
};
use crate::targets::{CliProvider, HtmlProvider, LibraryProvider, NodeProvider, WebappProvider};

/// Builds a fresh provider for one invocation
pub type ProviderFactory = fn() -> Box<dyn TypeProvider>;

/// Kind used when neither the caller nor the package names one
pub const DEFAULT_KIND: &str = "lib";

/// How the caller picks a provider
pub enum ProviderSelector {
    /// Look up a registered kind
    Named(String),
    /// Use an already constructed provider
    Instance(Box<dyn TypeProvider>),
}

impl From<&str> for ProviderSelector {
    fn from(name: &str) -> Self {
        ProviderSelector::Named(name.to_string())
    }
}

impl From<String> for ProviderSelector {
    fn from(name: String) -> Self {
        ProviderSelector::Named(name)
    }
}

impl From<Box<dyn TypeProvider>> for ProviderSelector {
    fn from(provider: Box<dyn TypeProvider>) -> Self {
        ProviderSelector::Instance(provider)
    }
}

impl std::fmt::Debug for ProviderSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderSelector::Named(name) => f.debug_tuple("Named").field(name).finish(),
            ProviderSelector::Instance(provider) => {
                f.debug_tuple("Instance").field(&provider.name()).finish()
            }
        }
    }
}

/// Name to factory table, in registration order
#[derive(Clone)]
pub struct Registry {
    factories: IndexMap<String, ProviderFactory>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Registry with `lib`, `node`, `cli`, `html` and `webapp`
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry
            .register("lib", || Box::new(LibraryProvider))
            .register("node", || Box::new(NodeProvider))
            .register("cli", || Box::new(CliProvider::default()))
            .register("html", || Box::new(HtmlProvider))
            .register("webapp", || Box::new(WebappProvider::default()));
        registry
    }

    /// Add a kind; an existing kind of the same name is replaced.
    pub fn register(&mut self, name: impl Into<String>, factory: ProviderFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    /// Registered kind names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate the provider registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownType` listing every registered name.
    pub fn create(&self, name: &str) -> Result<Box<dyn TypeProvider>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(Error::UnknownType {
                name: name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            }),
        }
    }

    /// Resolve `selector` and bind the result to the package metadata.
    pub fn resolve<'a>(
        &self,
        selector: ProviderSelector,
        pkg: &'a PackageMetadata,
    ) -> Result<BoundProvider<'a>> {
        let provider = match selector {
            ProviderSelector::Named(name) => self.create(&name)?,
            ProviderSelector::Instance(provider) => provider,
        };
        tracing::debug!("Using type provider {}", provider.name());
        Ok(BoundProvider { provider, pkg })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

/// A provider bound to the package metadata of one invocation.
///
/// Every hook called through it receives the bound metadata.
#[derive(Debug)]
pub struct BoundProvider<'a> {
    provider: Box<dyn TypeProvider>,
    pkg: &'a PackageMetadata,
}

impl<'a> BoundProvider<'a> {
    pub fn name(&self) -> &str {
        self.provider.name()
    }

    pub fn pkg(&self) -> &'a PackageMetadata {
        self.pkg
    }

    pub fn is_executable(&self) -> bool {
        self.provider.is_executable()
    }

    pub fn default_options(&self, ctx: &BuildContext) -> Map<String, Value> {
        let defaults = self.provider.default_options(&DefaultOptionsContext {
            environment: &ctx.environment,
            ci: ctx.ci,
        });
        if !defaults.is_empty() {
            tracing::debug!(
                "Including default options from {}: {:?}",
                self.name(),
                defaults
            );
        }
        defaults
    }

    pub fn process_options(&self, options: &mut Options, ctx: &BuildContext) {
        let package_root = options.package_root.clone();
        self.provider.process_options(
            options,
            &ProcessOptionsContext {
                environment: &ctx.environment,
                package_root: &package_root,
                pkg: self.pkg,
            },
        );
    }

    /// Run `contribute_config` and `defines` against the base configuration.
    pub fn contribute(
        &self,
        options: &Options,
        ctx: &BuildContext,
        base: &Configuration,
    ) -> Result<Contribution> {
        let entry_folder = options.entry_folder();
        let config_ctx = ConfigContext {
            pkg: self.pkg,
            environment: &ctx.environment,
            options,
            entry_folder: &entry_folder,
            base,
            ci: ctx.ci,
        };
        Ok(Contribution {
            fragment: self.provider.contribute_config(&config_ctx)?,
            defines: self.provider.defines(&config_ctx),
        })
    }
}
