//! Engine configuration.
//!
//! Loaded from a YAML file. Resolution order: an explicit path, then the
//! `LCX_CONFIG` environment variable, then built-in defaults. Every field is
//! optional in the file.
//!
//! No proof backend is configured by default. Until `verifiers` names one,
//! every gated `complete` fails with `UnsupportedProofKind`.

use std::path::{Path, PathBuf};

use lcx_zkp::{mock_verifier_config, ProofKind, VerifierConfig};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "LCX_CONFIG";

/// Settlement engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Decimal exponent every LC amount must use.
    pub amount_exponent: u32,
    /// Proof kinds every LC's gate must carry a commitment for.
    pub default_required_proofs: Vec<ProofKind>,
    /// Whether a named confirming party may accept or reject.
    pub allow_confirming_party: bool,
    /// Backend per proof kind. Empty by default.
    pub verifiers: VerifierConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            amount_exponent: 6,
            default_required_proofs: vec![ProofKind::WaybillAuthenticity],
            allow_confirming_party: true,
            verifiers: VerifierConfig::new(),
        }
    }
}

impl EngineConfig {
    /// Defaults plus the mock backend for every proof kind. For local runs
    /// and tests; mock proofs can be built from public LC data.
    pub fn development() -> Self {
        Self {
            verifiers: mock_verifier_config(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(s).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })
    }

    /// Resolve and load the configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("invalid config {path:?}: {message}")]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}
