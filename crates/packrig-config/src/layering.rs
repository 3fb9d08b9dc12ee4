//! Option layering.
//!
//! Layers are merged with figment in precedence order:
//! baseline < provider defaults < declared options < caller overrides.
//! Objects merge key by key, so a layer that sets
//! `terserOptions.compress.passes` leaves the other minifier settings in
//! place. Scalars and arrays are replaced whole.

use figment::Figment;
use figment::providers::Serialized;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::options::Options;

type Layer = Map<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct OptionLayers {
    provider_defaults: Layer,
    declared: Layer,
    overrides: Layer,
}

impl OptionLayers {
    /// Defaults contributed by the type provider
    pub fn with_provider_defaults(mut self, layer: Layer) -> Self {
        self.provider_defaults = layer;
        self
    }

    /// Options declared by the package descriptor
    pub fn with_declared(mut self, layer: Layer) -> Self {
        self.declared = layer;
        self
    }

    /// Options passed by the caller; these win every conflict
    pub fn with_overrides(mut self, layer: Layer) -> Self {
        self.overrides = layer;
        self
    }

    /// Merge all layers on top of `baseline` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when a layer contains an unknown
    /// key or a value of the wrong type.
    pub fn resolve(self, baseline: &Options) -> Result<Options> {
        let mut figment = Figment::from(Serialized::defaults(baseline));

        for (name, layer) in [
            ("provider defaults", self.provider_defaults),
            ("declared options", self.declared),
            ("overrides", self.overrides),
        ] {
            if layer.is_empty() {
                continue;
            }
            tracing::trace!("Merging {}: {:?}", name, layer);
            figment = figment.merge(Serialized::defaults(Value::Object(layer)));
        }

        figment.extract().map_err(option_error)
    }
}

/// Name the offending option by its key path, without figment's profile prefix.
fn option_error(error: figment::Error) -> ConfigError {
    let path = error.path.join(".");
    let path = path
        .strip_prefix("default.")
        .or_else(|| path.strip_prefix("default"))
        .unwrap_or(&path);

    let field = match (&error.kind, path) {
        (figment::error::Kind::UnknownField(name, _), "") => name.clone(),
        (_, "") => "options".to_string(),
        (_, path) => path.to_string(),
    };
    ConfigError::invalid(field, &error.kind)
}
