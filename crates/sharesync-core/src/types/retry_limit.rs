//! Retry limit resolution types.

use serde::{Deserialize, Serialize};

/// How many failed transfers a share record tolerates before it is
/// demoted to the error state.
///
/// Accounts store the limit as a signed integer where any negative value
/// disables demotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryLimit {
    /// Demote once the error count exceeds this value.
    Max(u32),
    /// Never demote; retry forever.
    Unbounded,
}

impl RetryLimit {
    /// Check whether a record with `errors` failures has exhausted this limit.
    pub fn is_exceeded_by(&self, errors: u32) -> bool {
        match self {
            Self::Max(max) => errors > *max,
            Self::Unbounded => false,
        }
    }
}

impl From<i32> for RetryLimit {
    /// Convert a stored `i32`. Negative values mean unbounded.
    fn from(value: i32) -> Self {
        u32::try_from(value).map_or(Self::Unbounded, Self::Max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_limit() {
        let limit = RetryLimit::Max(2);
        assert!(!limit.is_exceeded_by(0));
        assert!(!limit.is_exceeded_by(2));
        assert!(limit.is_exceeded_by(3));
    }

    #[test]
    fn test_zero_limit_fails_on_first_error() {
        let limit = RetryLimit::Max(0);
        assert!(!limit.is_exceeded_by(0));
        assert!(limit.is_exceeded_by(1));
    }

    #[test]
    fn test_unbounded() {
        let limit = RetryLimit::Unbounded;
        assert!(!limit.is_exceeded_by(0));
        assert!(!limit.is_exceeded_by(u32::MAX));
    }

    #[test]
    fn test_from_i32() {
        assert_eq!(RetryLimit::from(-1), RetryLimit::Unbounded);
        assert_eq!(RetryLimit::from(i32::MIN), RetryLimit::Unbounded);
        assert_eq!(RetryLimit::from(0), RetryLimit::Max(0));
        assert_eq!(RetryLimit::from(5), RetryLimit::Max(5));
    }
}
