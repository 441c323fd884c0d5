//! Configuration for UTF-8 structure validation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the validator treats input elements outside `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValuePolicy {
    /// Keep only the low 8 bits (two's complement), so `256` reads as `0x00`
    /// and `-1` as `0xFF`.
    #[default]
    Mask,
    /// Fail with [`ValueOutOfRange`](crate::Utf8ErrorKind::ValueOutOfRange).
    Reject,
}

/// Configuration for UTF-8 structure validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidatorConfig {
    /// Treatment of elements outside the byte range (default: mask)
    pub value_policy: ValuePolicy,
}

impl ValidatorConfig {
    /// Mask every element to its low 8 bits.
    pub fn masking() -> Self {
        Self::default()
    }

    /// Reject elements outside `0..=255`.
    pub fn rejecting() -> Self {
        Self {
            value_policy: ValuePolicy::Reject,
        }
    }

    /// Set the out-of-range value policy.
    pub fn with_value_policy(mut self, value_policy: ValuePolicy) -> Self {
        self.value_policy = value_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_masks() {
        assert_eq!(ValidatorConfig::default().value_policy, ValuePolicy::Mask);
        assert_eq!(ValidatorConfig::masking(), ValidatorConfig::default());
    }

    #[test]
    fn builder_overrides_policy() {
        let config = ValidatorConfig::masking().with_value_policy(ValuePolicy::Reject);
        assert_eq!(config, ValidatorConfig::rejecting());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_lowercase_policy_names() {
        let json = serde_json::to_string(&ValidatorConfig::rejecting()).unwrap();
        assert_eq!(json, r#"{"value_policy":"reject"}"#);

        let parsed: ValidatorConfig = serde_json::from_str(r#"{"value_policy":"mask"}"#).unwrap();
        assert_eq!(parsed, ValidatorConfig::masking());
    }
}
