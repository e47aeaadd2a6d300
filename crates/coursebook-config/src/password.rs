use crate::{ConfigError, env_lookup, parse_or};

/// Bounds accepted by bcrypt for its work factor.
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub hash_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { hash_cost: 10 }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hash_cost = parse_or(lookup, "BCRYPT_COST", Self::default().hash_cost)?;
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&hash_cost) {
            return Err(ConfigError::OutOfRange {
                key: "BCRYPT_COST",
                value: hash_cost,
                min: MIN_HASH_COST,
                max: MAX_HASH_COST,
            });
        }
        Ok(Self { hash_cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn accepts_bounds() {
        for cost in ["4", "31"] {
            assert!(PasswordConfig::from_lookup(&lookup_from(&[("BCRYPT_COST", cost)])).is_ok());
        }
    }

    #[test]
    fn rejects_out_of_range_cost() {
        let err = PasswordConfig::from_lookup(&lookup_from(&[("BCRYPT_COST", "3")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: 3, .. }));
    }
}
