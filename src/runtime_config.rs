//! # Runtime Configuration Module
//!
//! Environment-variable configuration for body binding.
//!
//! ## Environment Variables
//!
//! ### `MULTIBODY_FAILURE_POLICY`
//!
//! How resolution failures reach the caller:
//! - `strict` (default): every failure is returned as a typed [`crate::BindError`]
//! - `lenient`: failures resolve to "no value", matching frameworks that treat
//!   any binding problem as "parameter not supplied". Each swallowed failure
//!   is logged at `warn`.
//!
//! ### `MULTIBODY_MAX_BODY_BYTES`
//!
//! Upper bound on the request body read from the transport. Accepts decimal
//! (`1048576`) or hexadecimal (`0x100000`). Default: 1 MiB.
//!
//! ### `MULTIBODY_RELAXED_JSON`
//!
//! Accept unquoted object keys (`{id: 7}`). Default: `true`.
//!
//! ## Usage
//!
//! ```rust
//! use multibody::runtime_config::BindConfig;
//!
//! let config = BindConfig::from_env();
//! println!("max body: {} bytes", config.max_body_bytes);
//! ```

use crate::body::BodyLimits;
use std::env;

/// Default body limit: 1 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 0x10_0000;

/// What the resolver does with a failed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Strict,
    Lenient,
}

impl FailurePolicy {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lenient" => FailurePolicy::Lenient,
            _ => FailurePolicy::Strict,
        }
    }
}

/// Binding configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindConfig {
    pub failure_policy: FailurePolicy,
    pub max_body_bytes: usize,
    pub relaxed_json: bool,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Strict,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            relaxed_json: true,
        }
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}

impl BindConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            failure_policy: lookup("MULTIBODY_FAILURE_POLICY")
                .map(|s| FailurePolicy::parse(&s))
                .unwrap_or(defaults.failure_policy),
            max_body_bytes: lookup("MULTIBODY_MAX_BODY_BYTES")
                .and_then(|s| parse_size(&s))
                .unwrap_or(defaults.max_body_bytes),
            relaxed_json: lookup("MULTIBODY_RELAXED_JSON")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.relaxed_json),
        }
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Limits for a new [`crate::body::RequestContext`].
    pub fn body_limits(&self) -> BodyLimits {
        BodyLimits {
            max_body_bytes: self.max_body_bytes,
            relaxed_json: self.relaxed_json,
        }
    }
}
