use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::ConfigError;

pub const DEV_ENVIRONMENT_TAG: &str = "dev-call-lambda";
pub const DEV_TARGET_FUNCTION: &str = "dev-make-file-lambda";
pub const PRD_TARGET_FUNCTION: &str = "prd-make-file-lambda";

/// Maps the dispatcher's environment tag to the function it should invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRoutes {
    routes: BTreeMap<String, String>,
    default_target: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteTable {
    #[serde(default)]
    routes: Option<BTreeMap<String, String>>,
    #[serde(default)]
    default: Option<String>,
}

impl Default for TargetRoutes {
    fn default() -> Self {
        Self {
            routes: BTreeMap::from([(
                DEV_ENVIRONMENT_TAG.to_string(),
                DEV_TARGET_FUNCTION.to_string(),
            )]),
            default_target: PRD_TARGET_FUNCTION.to_string(),
        }
    }
}

impl TargetRoutes {
    /// Every tag resolves to `target`.
    pub fn fixed(target: impl Into<String>) -> Self {
        Self {
            routes: BTreeMap::new(),
            default_target: target.into(),
        }
    }

    /// Parses `{"routes": {tag: target}, "default": target}`. Missing fields
    /// keep the built-in values.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let table: RouteTable = serde_json::from_str(text).map_err(|error| {
            ConfigError::InvalidRoutes(format!("malformed route table: {error}"))
        })?;

        let mut resolved = Self::default();
        if let Some(routes) = table.routes {
            resolved.routes = trimmed_routes(routes)?;
        }
        if let Some(default_target) = table.default {
            resolved.default_target = default_target.trim().to_string();
        }

        resolved.validate()?;
        Ok(resolved)
    }

    pub fn resolve(&self, tag: Option<&str>) -> &str {
        tag.map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| self.routes.get(value))
            .map(String::as_str)
            .unwrap_or(self.default_target.as_str())
    }

    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_target.is_empty() {
            return Err(ConfigError::InvalidRoutes(
                "default target cannot be empty".to_string(),
            ));
        }
        if let Some((tag, _)) = self
            .routes
            .iter()
            .find(|(_, target)| target.is_empty())
        {
            return Err(ConfigError::InvalidRoutes(format!(
                "target for tag {tag} cannot be empty"
            )));
        }
        Ok(())
    }
}

/// Tags are matched after trimming, so keys and targets are stored trimmed.
fn trimmed_routes(
    routes: BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut trimmed = BTreeMap::new();
    for (tag, target) in routes {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ConfigError::InvalidRoutes(
                "route tag cannot be empty".to_string(),
            ));
        }
        if trimmed
            .insert(tag.to_string(), target.trim().to_string())
            .is_some()
        {
            return Err(ConfigError::InvalidRoutes(format!(
                "tag {tag} is listed more than once"
            )));
        }
    }
    Ok(trimmed)
}
