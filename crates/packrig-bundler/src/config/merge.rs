//! Field-by-field configuration merging.
//!
//! Strategies:
//! - scalars and `Option` fields: a later `Some` replaces the earlier value
//! - lists (`plugins`, `module.rules`, `resolve.extensions`,
//!   `optimization.minimizer`): concatenated
//! - `watchOptions.ignored`: concatenated without duplicates
//! - keyed maps (`externals`, `resolve.alias`): shallow merge, later keys win
//! - opaque records (`node`, `devServer`, `stats`, unrecognized keys):
//!   deep merge, arrays inside them are concatenated

use serde_json::{Map, Value};

use super::{Configuration, ModuleConfig, Optimization, Output, Resolve, WatchOptions};

/// Merge a later fragment into `self`.
pub trait Merge {
    fn merge(&mut self, later: Self);
}

impl Merge for Configuration {
    fn merge(&mut self, later: Self) {
        let Configuration {
            entry,
            context,
            target,
            mode,
            devtool,
            resolve,
            module,
            plugins,
            output,
            optimization,
            externals,
            stats,
            performance,
            node,
            dev_server,
            watch,
            watch_options,
            extra,
        } = later;

        override_with(&mut self.entry, entry);
        override_with(&mut self.context, context);
        override_with(&mut self.target, target);
        override_with(&mut self.mode, mode);
        override_with(&mut self.devtool, devtool);
        self.resolve.merge(resolve);
        self.module.merge(module);
        self.plugins.extend(plugins);
        self.output.merge(output);
        self.optimization.merge(optimization);
        self.externals.extend(externals);
        merge_opaque(&mut self.stats, stats);
        override_with(&mut self.performance, performance);
        merge_opaque(&mut self.node, node);
        merge_opaque(&mut self.dev_server, dev_server);
        override_with(&mut self.watch, watch);
        self.watch_options.merge(watch_options);
        merge_maps(&mut self.extra, extra);
    }
}

impl Merge for Resolve {
    fn merge(&mut self, later: Self) {
        self.extensions.extend(later.extensions);
        self.alias.extend(later.alias);
        merge_maps(&mut self.extra, later.extra);
    }
}

impl Merge for ModuleConfig {
    fn merge(&mut self, later: Self) {
        self.rules.extend(later.rules);
        merge_maps(&mut self.extra, later.extra);
    }
}

impl Merge for Output {
    fn merge(&mut self, later: Self) {
        override_with(&mut self.path, later.path);
        override_with(&mut self.filename, later.filename);
        override_with(&mut self.public_path, later.public_path);
        override_with(&mut self.library, later.library);
        override_with(&mut self.library_target, later.library_target);
        override_with(&mut self.global_object, later.global_object);
        override_with(&mut self.auxiliary_comment, later.auxiliary_comment);
        merge_maps(&mut self.extra, later.extra);
    }
}

impl Merge for Optimization {
    fn merge(&mut self, later: Self) {
        override_with(&mut self.minimize, later.minimize);
        self.minimizer.extend(later.minimizer);
        override_with(&mut self.node_env, later.node_env);
        merge_maps(&mut self.extra, later.extra);
    }
}

impl Merge for WatchOptions {
    fn merge(&mut self, later: Self) {
        for path in later.ignored {
            if !self.ignored.contains(&path) {
                self.ignored.push(path);
            }
        }
        merge_maps(&mut self.extra, later.extra);
    }
}

fn override_with<T>(slot: &mut Option<T>, later: Option<T>) {
    if later.is_some() {
        *slot = later;
    }
}

fn merge_opaque(slot: &mut Option<Value>, later: Option<Value>) {
    let Some(update) = later else {
        return;
    };
    match slot {
        Some(current) => merge_values(current, update),
        None => *slot = Some(update),
    }
}

fn merge_maps(target: &mut Map<String, Value>, update: Map<String, Value>) {
    for (key, value) in update {
        match target.get_mut(&key) {
            Some(current) => merge_values(current, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

/// Deep merge `update` into `target`.
///
/// Objects merge key by key and arrays are concatenated. Any other
/// combination replaces the target value.
pub fn merge_values(target: &mut Value, update: Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            merge_maps(target_map, update_map);
        }
        (Value::Array(target_items), Value::Array(update_items)) => {
            target_items.extend(update_items);
        }
        (target_slot, update) => {
            *target_slot = update;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Entry, ModuleRule, PluginSpec};
    use serde_json::json;

    #[test]
    fn lists_concatenate_and_scalars_override() {
        let mut base = Configuration {
            mode: Some("production".into()),
            plugins: vec![PluginSpec::new("LoaderOptionsPlugin")],
            ..Default::default()
        };
        base.module.rules.push(ModuleRule::test(r"\.txt$"));
        base.resolve.extensions = vec![".js".into()];

        let mut later = Configuration {
            target: Some("node".into()),
            plugins: vec![PluginSpec::new("DefinePlugin")],
            ..Default::default()
        };
        later.module.rules.push(ModuleRule::test(r"\.png$"));
        later.resolve.extensions = vec![".mjs".into()];

        base.merge(later);

        assert_eq!(base.mode.as_deref(), Some("production"));
        assert_eq!(base.target.as_deref(), Some("node"));
        let names: Vec<_> = base.plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["LoaderOptionsPlugin", "DefinePlugin"]);
        assert_eq!(base.module.rules.len(), 2);
        assert_eq!(base.resolve.extensions, [".js", ".mjs"]);
    }

    #[test]
    fn later_entry_replaces_earlier() {
        let mut base = Configuration {
            entry: Some(Entry::Single("/p/src".into())),
            ..Default::default()
        };
        base.merge(Configuration {
            entry: Some(Entry::Many(vec!["hot".into(), "/p/src".into()])),
            ..Default::default()
        });
        assert_eq!(base.entry.unwrap().modules(), ["hot", "/p/src"]);

        let mut base = Configuration {
            entry: Some(Entry::Single("/p/src".into())),
            ..Default::default()
        };
        base.merge(Configuration::default());
        assert!(base.entry.is_some());
    }

    #[test]
    fn opaque_records_deep_merge() {
        let mut base = Configuration {
            stats: Some(json!({ "all": false, "assets": true })),
            ..Default::default()
        };
        base.extra
            .insert("experiments".into(), json!({ "layers": ["a"] }));

        let mut later = Configuration {
            stats: Some(json!({ "assets": false, "modules": true })),
            node: Some(json!({ "__dirname": false })),
            ..Default::default()
        };
        later
            .extra
            .insert("experiments".into(), json!({ "layers": ["b"], "css": true }));

        base.merge(later);

        assert_eq!(
            base.stats,
            Some(json!({ "all": false, "assets": false, "modules": true }))
        );
        assert_eq!(base.node, Some(json!({ "__dirname": false })));
        assert_eq!(
            base.extra["experiments"],
            json!({ "layers": ["a", "b"], "css": true })
        );
    }

    #[test]
    fn keyed_maps_merge_shallowly() {
        let mut base = Configuration::default();
        base.externals.insert("react".into(), "commonjs2 react".into());
        base.resolve.alias.insert("@".into(), "/p/src".into());

        let mut later = Configuration::default();
        later.externals.insert("react".into(), "React".into());
        later.externals.insert("vue".into(), "Vue".into());

        base.merge(later);
        assert_eq!(base.externals["react"], "React");
        assert_eq!(base.externals["vue"], "Vue");
        assert_eq!(base.resolve.alias["@"], "/p/src");
    }

    #[test]
    fn ignored_paths_concatenate_without_duplicates() {
        let mut base = Configuration::default();
        base.watch_options.ignored = vec!["/p/dist".into(), "/p/.git".into()];

        let mut later = Configuration::default();
        later.watch_options.ignored = vec!["/p/.git".into(), "/p/tmp".into()];

        base.merge(later);
        assert_eq!(base.watch_options.ignored, ["/p/dist", "/p/.git", "/p/tmp"]);
    }

    #[test]
    fn merge_values_replaces_mismatched_kinds() {
        let mut target = json!({ "a": [1], "b": { "c": 1 } });
        merge_values(&mut target, json!({ "a": [2], "b": false }));
        assert_eq!(target, json!({ "a": [1, 2], "b": false }));
    }
}
