use thiserror::Error;

/// Every way a trajectory run can fail.
///
/// Construction-time problems surface as [`SimError::InvalidParameter`]
/// before any step runs. The remaining variants end a run that already
/// started and are reported through [`crate::sim::RunStatus::Aborted`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("non-physical {quantity} = {value} at altitude {altitude:.1} m")]
    Domain {
        quantity: &'static str,
        value: f64,
        altitude: f64,
    },

    #[error("state overflowed to a non-finite value at step {step}")]
    NonFiniteState { step: usize },

    #[error("step limit of {max_steps} exceeded before termination")]
    StepLimitExceeded { max_steps: usize },

    #[error("termination condition unreachable (receding after {max_steps} steps)")]
    UnreachableTermination { max_steps: usize },

    #[error("run cancelled at step {step}")]
    Cancelled { step: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter { name, reason: reason.into() }
    }

    /// True for non-physical values met during a run, overflow included.
    pub fn is_domain(&self) -> bool {
        matches!(self, SimError::Domain { .. } | SimError::NonFiniteState { .. })
    }

    /// True for both flavours of step-limit abort.
    pub fn is_step_limit(&self) -> bool {
        matches!(
            self,
            SimError::StepLimitExceeded { .. } | SimError::UnreachableTermination { .. }
        )
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Config(e.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject NaN/inf and values that fail `ok`.
pub(crate) fn check(name: &'static str, value: f64, ok: bool, reason: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, format!("must be finite, got {value}")));
    }
    if !ok {
        return Err(SimError::invalid(name, format!("{reason}, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_rejects_nan_and_predicate() {
        assert!(check("mass", f64::NAN, true, "").is_err());
        let err = check("mass", -1.0, false, "must be positive").unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter `mass`: must be positive, got -1");
        assert!(check("mass", 1.0, true, "must be positive").is_ok());
    }

    #[test]
    fn step_limit_family() {
        assert!(SimError::StepLimitExceeded { max_steps: 3 }.is_step_limit());
        assert!(SimError::UnreachableTermination { max_steps: 3 }.is_step_limit());
        assert!(!SimError::Cancelled { step: 1 }.is_step_limit());
    }

    #[test]
    fn overflow_is_a_comparable_domain_error() {
        let err = SimError::NonFiniteState { step: 4 };
        assert!(err.is_domain());
        assert_eq!(err, err.clone());
        assert!(!SimError::StepLimitExceeded { max_steps: 3 }.is_domain());
    }
}
