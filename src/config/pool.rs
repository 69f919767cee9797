//! Pool configuration structures.

use serde::{Deserialize, Serialize};

/// Sizing configuration for a pool and its channel-backed producer.
///
/// The producer and consumer themselves are live values wired in through
/// [`PoolBuilder`](crate::builders::PoolBuilder); only the sizing knobs are
/// serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of concurrent worker executions. Zero is accepted and yields a
    /// pool that dispatches nothing.
    pub workers: usize,
    /// Capacity of the channel-backed producer's bounded buffer.
    pub queue_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_capacity: 64,
        }
    }
}

impl PoolConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.queue_capacity == 0 {
            return Err("queue_capacity must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse pool configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error description.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PoolConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let cfg = PoolConfig {
            workers: 4,
            queue_capacity: 0,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_workers_allowed() {
        let cfg = PoolConfig {
            workers: 0,
            queue_capacity: 8,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parses_from_json() {
        let cfg = PoolConfig::from_json_str(r#"{"workers": 2, "queue_capacity": 16}"#).unwrap();
        assert_eq!(cfg.workers, 2);
        assert_eq!(cfg.queue_capacity, 16);

        assert!(PoolConfig::from_json_str(r#"{"workers": 2, "queue_capacity": 0}"#).is_err());
        assert!(PoolConfig::from_json_str("not json").is_err());
    }
}
