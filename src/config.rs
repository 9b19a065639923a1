use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Planner configuration, mirroring the YAML input file
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub network: NetworkConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nat: Option<NatConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing: Option<SharingConfig>,
}

impl Config {
    /// Validate the configuration
    ///
    /// Only shape-level checks live here; the planner itself validates
    /// addressing semantics (prefix length, octet ranges) at first use.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.environment.is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "environment cannot be empty".to_string(),
            ));
        }
        if !self
            .general
            .environment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError::InvalidGeneral(format!(
                "environment '{}' must be lowercase alphanumeric with dashes",
                self.general.environment
            )));
        }

        if self.network.cidr.is_empty() {
            return Err(ValidationError::InvalidNetwork(
                "cidr cannot be empty".to_string(),
            ));
        }
        if self.network.region.is_empty() {
            return Err(ValidationError::InvalidNetwork(
                "region cannot be empty".to_string(),
            ));
        }

        if let Some(sharing) = &self.sharing {
            for principal in &sharing.principals {
                if principal.len() != 12 || !principal.chars().all(|c| c.is_ascii_digit()) {
                    return Err(ValidationError::InvalidSharing(format!(
                        "principal '{}' is not a 12-digit account identifier",
                        principal
                    )));
                }
            }
        }

        Ok(())
    }

    /// Sharing principals, empty when the section is absent.
    pub fn sharing_principals(&self) -> &[String] {
        self.sharing
            .as_ref()
            .map(|s| s.principals.as_slice())
            .unwrap_or(&[])
    }

    /// NAT instance type, defaulted when the section omits it.
    pub fn nat_instance_type(&self) -> &str {
        self.nat
            .as_ref()
            .and_then(|n| n.instance_type.as_deref())
            .unwrap_or(DEFAULT_NAT_INSTANCE_TYPE)
    }
}

/// Instance size used when the configuration does not name one.
pub const DEFAULT_NAT_INSTANCE_TYPE: &str = "t3.micro";

/// Shared general configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    /// Environment name, used as the prefix of every logical resource id
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Network addressing configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NetworkConfig {
    /// Top-level address block; the planner requires a /16
    pub cidr: String,
    /// Region component of endpoint service names
    pub region: String,
}

/// NAT egress instance configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NatConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    /// Path to the bootstrap script attached verbatim to the instance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_script: Option<PathBuf>,
}

/// Cross-boundary sharing configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SharingConfig {
    /// Target boundary account identifiers; empty means no sharing plan
    #[serde(default)]
    pub principals: Vec<String>,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
    #[error("Invalid sharing configuration: {0}")]
    InvalidSharing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse(
            r#"
general:
  environment: staging
network:
  cidr: "10.10.0.0/16"
  region: us-east-1
"#,
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.general.environment, "staging");
        assert_eq!(config.nat_instance_type(), DEFAULT_NAT_INSTANCE_TYPE);
        assert!(config.sharing_principals().is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
general:
  environment: prod
  log_level: debug
network:
  cidr: "10.10.0.0/16"
  region: eu-west-1
nat:
  instance_type: t3.small
  bootstrap_script: nat_bootstrap.sh
sharing:
  principals:
    - "111111111111"
    - "222222222222"
"#,
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.nat_instance_type(), "t3.small");
        assert_eq!(config.sharing_principals().len(), 2);
    }

    #[test]
    fn test_validation_rejects_empty_environment() {
        let config = parse(
            r#"
general:
  environment: ""
network:
  cidr: "10.10.0.0/16"
  region: us-east-1
"#,
        );
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidGeneral(_))
        ));
    }

    #[test]
    fn test_validation_rejects_uppercase_environment() {
        let config = parse(
            r#"
general:
  environment: Prod
network:
  cidr: "10.10.0.0/16"
  region: us-east-1
"#,
        );
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidGeneral(_))
        ));
    }

    #[test]
    fn test_validation_rejects_malformed_principal() {
        let config = parse(
            r#"
general:
  environment: prod
network:
  cidr: "10.10.0.0/16"
  region: us-east-1
sharing:
  principals:
    - "not-an-account"
"#,
        );
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSharing(_))
        ));
    }

    #[test]
    fn test_empty_principal_list_is_valid() {
        let config = parse(
            r#"
general:
  environment: prod
network:
  cidr: "10.10.0.0/16"
  region: us-east-1
sharing:
  principals: []
"#,
        );
        assert!(config.validate().is_ok());
        assert!(config.sharing_principals().is_empty());
    }
}
