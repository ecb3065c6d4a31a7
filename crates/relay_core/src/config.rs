use thiserror::Error;

use crate::contract::InvocationKind;
use crate::object_keys::DEFAULT_KEY_PREFIX;
use crate::routing::TargetRoutes;

pub const FUNCTION_NAME_VAR: &str = "AWS_LAMBDA_FUNCTION_NAME";
pub const TARGET_ROUTES_VAR: &str = "DISPATCH_TARGET_ROUTES";
pub const TARGET_FUNCTION_VAR: &str = "DISPATCH_TARGET_FUNCTION";
pub const INVOCATION_TYPE_VAR: &str = "DISPATCH_INVOCATION_TYPE";
pub const ACK_STATUS_CODE_VAR: &str = "DISPATCH_ACK_STATUS_CODE";
pub const BUCKET_VAR: &str = "WRITER_BUCKET";
pub const KEY_PREFIX_VAR: &str = "WRITER_KEY_PREFIX";

pub const DEFAULT_BUCKET: &str = "stourage-ultimately-smoothly-helping-dove";
pub const DEFAULT_ACK_STATUS_CODE: u16 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("DISPATCH_TARGET_ROUTES: {0}")]
    InvalidRoutes(String),
    #[error("DISPATCH_INVOCATION_TYPE: {0}")]
    InvalidInvocationType(String),
    #[error("DISPATCH_ACK_STATUS_CODE must be an HTTP status code, got {0:?}")]
    InvalidStatusCode(String),
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("WRITER_KEY_PREFIX cannot contain ':', got {0:?}")]
    InvalidKeyPrefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// The dispatcher's own deployed name, used as the routing tag.
    pub function_name: Option<String>,
    pub routes: TargetRoutes,
    pub invocation_type: InvocationKind,
    pub ack_status_code: u16,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            function_name: None,
            routes: TargetRoutes::default(),
            invocation_type: InvocationKind::default(),
            ack_status_code: DEFAULT_ACK_STATUS_CODE,
        }
    }
}

impl DispatcherConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// A fixed target in `DISPATCH_TARGET_FUNCTION` wins over the route table.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let routes = match non_empty(&lookup, TARGET_FUNCTION_VAR) {
            Some(target) => TargetRoutes::fixed(target),
            None => match non_empty(&lookup, TARGET_ROUTES_VAR) {
                Some(table) => TargetRoutes::from_json(&table)?,
                None => TargetRoutes::default(),
            },
        };

        let invocation_type = match non_empty(&lookup, INVOCATION_TYPE_VAR) {
            Some(value) => value
                .parse::<InvocationKind>()
                .map_err(ConfigError::InvalidInvocationType)?,
            None => InvocationKind::default(),
        };

        let ack_status_code = match non_empty(&lookup, ACK_STATUS_CODE_VAR) {
            Some(value) => parse_status_code(&value)?,
            None => DEFAULT_ACK_STATUS_CODE,
        };

        Ok(Self {
            function_name: non_empty(&lookup, FUNCTION_NAME_VAR),
            routes,
            invocation_type,
            ack_status_code,
        })
    }

    pub fn target_function(&self) -> &str {
        self.routes.resolve(self.function_name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    pub bucket: String,
    pub key_prefix: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl WriterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bucket = match lookup(BUCKET_VAR) {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::Empty(BUCKET_VAR)),
            Some(value) => value.trim().to_string(),
            None => DEFAULT_BUCKET.to_string(),
        };

        // An empty prefix is allowed; the key is then just the timestamp.
        let key_prefix = lookup(KEY_PREFIX_VAR).unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string());
        if key_prefix.contains(':') {
            return Err(ConfigError::InvalidKeyPrefix(key_prefix));
        }

        Ok(Self { bucket, key_prefix })
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_status_code(value: &str) -> Result<u16, ConfigError> {
    value
        .parse::<u16>()
        .ok()
        .filter(|code| (100..=599).contains(code))
        .ok_or_else(|| ConfigError::InvalidStatusCode(value.to_string()))
}
