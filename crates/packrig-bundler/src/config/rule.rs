use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A module rule. String conditions in `test`, `resourceQuery` and
/// `exclude` are regular expression sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_query: Option<Condition>,

    /// `pre` or `post`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,

    #[serde(rename = "use", default, skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<RuleUse>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<ModuleRule>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Rule condition: a single pattern, or any other shape the bundler
/// understands (lists, `{ and, or, not }` objects) kept as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Pattern(String),
    Other(Value),
}

impl Condition {
    /// String patterns of this condition, including those inside lists
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Condition::Pattern(pattern) => vec![pattern.as_str()],
            Condition::Other(Value::Array(items)) => {
                items.iter().filter_map(Value::as_str).collect()
            }
            Condition::Other(_) => Vec::new(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Condition::Pattern(pattern) => Some(pattern.as_str()),
            Condition::Other(_) => None,
        }
    }
}

impl From<String> for Condition {
    fn from(pattern: String) -> Self {
        Condition::Pattern(pattern)
    }
}

impl From<&str> for Condition {
    fn from(pattern: &str) -> Self {
        Condition::Pattern(pattern.to_string())
    }
}

/// Loader reference inside a rule's `use` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleUse {
    Loader(String),
    Detailed {
        loader: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<Value>,
    },
}

impl From<&str> for RuleUse {
    fn from(loader: &str) -> Self {
        RuleUse::Loader(loader.to_string())
    }
}

impl ModuleRule {
    /// Rule matching file names against `pattern`
    pub fn test(pattern: impl Into<String>) -> Self {
        Self {
            test: Some(Condition::Pattern(pattern.into())),
            ..Default::default()
        }
    }

    /// Rule without a file name pattern, for use inside `oneOf`
    pub fn any() -> Self {
        Self::default()
    }

    pub fn loader(mut self, loader: impl Into<String>) -> Self {
        self.loader = Some(loader.into());
        self
    }

    pub fn options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    pub fn resource_query(mut self, pattern: impl Into<String>) -> Self {
        self.resource_query = Some(Condition::Pattern(pattern.into()));
        self
    }

    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.include = Some(Condition::Pattern(path.into()));
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(Condition::Pattern(pattern.into()));
        self
    }

    pub fn enforce(mut self, stage: impl Into<String>) -> Self {
        self.enforce = Some(stage.into());
        self
    }

    pub fn uses<I, U>(mut self, loaders: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<RuleUse>,
    {
        self.uses.extend(loaders.into_iter().map(Into::into));
        self
    }

    pub fn one_of(mut self, rules: Vec<ModuleRule>) -> Self {
        self.one_of = rules;
        self
    }

    /// Every regular expression source in this rule and its `oneOf` branches
    pub fn patterns(&self) -> Vec<&str> {
        let own = [&self.test, &self.resource_query, &self.exclude]
            .into_iter()
            .flatten()
            .flat_map(Condition::patterns);
        own.chain(self.one_of.iter().flat_map(ModuleRule::patterns))
            .collect()
    }

    /// Loaders referenced by this rule and its `oneOf` branches
    pub fn loaders(&self) -> Vec<&str> {
        let own = self.loader.as_deref().into_iter().chain(self.uses.iter().map(
            |entry| match entry {
                RuleUse::Loader(loader) => loader.as_str(),
                RuleUse::Detailed { loader, .. } => loader.as_str(),
            },
        ));
        own.chain(self.one_of.iter().flat_map(ModuleRule::loaders))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_webpack_keys() {
        let rule = ModuleRule::test(r"\.txt$")
            .resource_query(r"\?raw")
            .uses(["raw-loader"]);
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({ "test": r"\.txt$", "resourceQuery": r"\?raw", "use": ["raw-loader"] })
        );
    }

    #[test]
    fn conditions_keep_lists_and_objects() {
        let rule: ModuleRule = serde_json::from_value(json!({
            "test": r"\.js$",
            "include": ["/a", "/b"],
            "exclude": { "or": [r"node_modules", r"\.spec\.js$"] },
            "loader": "babel-loader"
        }))
        .unwrap();

        assert_eq!(rule.include.as_ref().unwrap().patterns(), ["/a", "/b"]);
        assert_eq!(rule.patterns(), [r"\.js$"]);
        assert_eq!(
            serde_json::to_value(&rule).unwrap()["exclude"],
            json!({ "or": [r"node_modules", r"\.spec\.js$"] })
        );
    }

    #[test]
    fn collects_nested_loaders() {
        let rule = ModuleRule::test(r"\.js$").one_of(vec![
            ModuleRule::any().uses(["aot-loader", "babel-loader"]),
            ModuleRule::any().loader("babel-loader"),
        ]);
        assert_eq!(
            rule.loaders(),
            vec!["aot-loader", "babel-loader", "babel-loader"]
        );
    }
}
