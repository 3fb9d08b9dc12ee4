//! Configuration generation pipeline.

use std::path::PathBuf;

use packrig_bundler::diagnostics::DiagnosticFiles;
use packrig_bundler::{
    Assembler, Configuration, Devtool, Merge, Result, TypeProvider, apply_extras, define_plugin,
};
use packrig_config::{
    BuildContext, DeclaredOptions, OptionLayers, Options, PackageMetadata, find_package_root,
};
use packrig_target::{Contribution, DEFAULT_KIND, ProviderSelector, Registry};
use serde_json::{Map, Value};

/// Input of [`generate`].
///
/// ```
/// use packrig::{BuildContext, Environment, Request};
///
/// let request = Request::new(BuildContext::new(Environment::production()))
///     .with_option("type", "node")
///     .with_option("publishimo", true);
/// assert_eq!(request.overrides()["type"], "node");
/// ```
pub struct Request {
    overrides: Map<String, Value>,
    provider: Option<Box<dyn TypeProvider>>,
    registry: Option<Registry>,
    context: BuildContext,
    package_root: Option<PathBuf>,
}

impl Request {
    pub fn new(context: BuildContext) -> Self {
        Self {
            overrides: Map::new(),
            provider: None,
            registry: None,
            context,
            package_root: None,
        }
    }

    /// Request using the process environment and working directory
    pub fn from_env() -> Self {
        Self::new(BuildContext::from_env())
    }

    /// Set one caller option, e.g. `("type", "node")`
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Merge caller options; later keys replace earlier ones
    pub fn with_overrides(mut self, overrides: Map<String, Value>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Use this provider instead of looking the kind up by name
    pub fn with_provider(mut self, provider: Box<dyn TypeProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Project root; defaults to the nearest ancestor of the working
    /// directory containing a `package.json`
    pub fn with_package_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.package_root = Some(root.into());
        self
    }

    pub fn overrides(&self) -> &Map<String, Value> {
        &self.overrides
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    fn package_root(&self) -> PathBuf {
        let ctx = &self.context;
        if let Some(root) = self.overrides.get("packageRoot").and_then(Value::as_str) {
            return ctx.cwd.join(root);
        }
        match &self.package_root {
            Some(root) => ctx.cwd.join(root),
            None => find_package_root(&ctx.cwd),
        }
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("overrides", &self.overrides)
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("registry", &self.registry)
            .field("context", &self.context)
            .field("package_root", &self.package_root)
            .finish()
    }
}

/// Output of [`generate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// Final bundler configuration
    pub config: Configuration,
    /// Finalized options the configuration was built from
    pub options: Options,
    /// Where diagnostics were written, if enabled
    pub diagnostics: Option<DiagnosticFiles>,
}

/// Generate a bundler configuration.
///
/// # Errors
///
/// - `Error::UnknownType` when the selected kind is not registered
/// - `Error::Config` when an option has an unknown key or a bad value
/// - `Error::MissingAsset` when the kind requires a missing file
/// - `Error::InvalidFragment` when an extra fragment is malformed
/// - `Error::InvalidConfig` when the result lacks an entry or an absolute
///   output path
pub fn generate(request: Request) -> Result<Generated> {
    let root = request.package_root();
    let Request {
        overrides,
        provider,
        registry,
        context: ctx,
        ..
    } = request;

    tracing::debug!("Environment: {}", ctx.environment);
    tracing::debug!("Passed options: {:?}", overrides);

    let pkg = PackageMetadata::read_or_default(&root);
    let declared = pkg
        .declared
        .as_ref()
        .map(DeclaredOptions::to_layer)
        .unwrap_or_default();
    if !declared.is_empty() {
        tracing::debug!("Found declared options in package: {:?}", declared);
    }

    let selector = match provider {
        Some(provider) => ProviderSelector::Instance(provider),
        None => {
            let kind = overrides
                .get("type")
                .and_then(Value::as_str)
                .or_else(|| pkg.declared.as_ref().and_then(DeclaredOptions::kind))
                .unwrap_or(DEFAULT_KIND);
            ProviderSelector::Named(kind.to_string())
        }
    };
    let registry = registry.unwrap_or_default();
    let provider = registry.resolve(selector, &pkg)?;

    let baseline = Options::baseline(&ctx, &pkg, root);
    let mut options = OptionLayers::default()
        .with_provider_defaults(provider.default_options(&ctx))
        .with_declared(declared)
        .with_overrides(overrides)
        .resolve(&baseline)?;
    options.finalize(&ctx);
    provider.process_options(&mut options, &ctx);

    let mut config = Assembler::new(&options, &pkg, &ctx.environment)
        .executable(provider.is_executable())
        .build();

    let Contribution { fragment, defines } = provider.contribute(&options, &ctx, &config)?;
    if !defines.is_empty() {
        config.plugins.push(define_plugin(defines));
    }
    config.merge(fragment);
    apply_extras(&mut config, &options)?;

    if let Some(devtool) = &ctx.forced_devtool {
        tracing::debug!("Forced devtool from environment: {}", devtool);
        config.devtool = Some(Devtool::Named(devtool.clone()));
    }

    config.validate()?;

    let diagnostics = DiagnosticFiles::for_options(&options).filter(|files| {
        match files.write(&config, &options) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    "Could not write diagnostics to {}: {}",
                    files.config.display(),
                    err
                );
                false
            }
        }
    });

    tracing::debug!("Final config: {:?}", config);

    Ok(Generated {
        config,
        options,
        diagnostics,
    })
}

/// Generate a configuration for `kind` from the process environment.
pub fn configure(kind: &str, overrides: Map<String, Value>) -> Result<Configuration> {
    let request = Request::from_env()
        .with_overrides(overrides)
        .with_option("type", kind);
    Ok(generate(request)?.config)
}
