use std::fmt;

use crate::error::Result;

/// Outcome of a builder step that may have substituted a simpler shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Built<T> {
    /// The requested construction succeeded.
    Exact(T),
    /// The requested construction failed and `value` is the documented
    /// substitute.
    Fallback { value: T, reason: String },
}

impl<T> Built<T> {
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Exact(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Exact(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Why the fallback was used, if it was.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Exact(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// The single place where a failed construction is replaced.
///
/// Returns the primary result when it succeeded. Otherwise logs a warning
/// and builds the fallback, whose own failure is returned as an error.
///
/// # Errors
///
/// Returns the fallback's error when both constructions fail.
pub fn or_fallback<T>(
    what: &str,
    primary: Result<T>,
    fallback: impl FnOnce() -> Result<T>,
) -> Result<Built<T>> {
    match primary {
        Ok(value) => Ok(Built::Exact(value)),
        Err(err) => {
            tracing::warn!(builder = what, error = %err, "construction failed, using fallback");
            let value = fallback()?;
            Ok(Built::Fallback {
                value,
                reason: err.to_string(),
            })
        }
    }
}

/// A fallback or skipped step recorded during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildNote {
    pub step: String,
    pub reason: String,
}

impl fmt::Display for BuildNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.reason)
    }
}

/// Collects the simplifications a build made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildLog {
    pub fallbacks: Vec<BuildNote>,
    pub skipped: Vec<BuildNote>,
}

impl BuildLog {
    /// Unwraps a builder result, recording it if it fell back.
    pub fn take<T>(&mut self, step: &str, built: Built<T>) -> T {
        if let Some(reason) = built.reason() {
            self.fallbacks.push(BuildNote {
                step: step.to_owned(),
                reason: reason.to_owned(),
            });
        }
        built.into_value()
    }

    /// Records a boolean step that was skipped.
    pub fn skip(&mut self, step: impl Into<String>, reason: &impl fmt::Display) {
        let step = step.into();
        tracing::warn!(%step, %reason, "skipping failed operation");
        self.skipped.push(BuildNote {
            step,
            reason: reason.to_string(),
        });
    }

    /// Whether the build ran without any simplification.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty() && self.skipped.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ForgeError, OperationError};

    fn failed() -> Result<u32> {
        Err(OperationError::Failed("kernel said no".into()).into())
    }

    #[test]
    fn success_is_exact() {
        let built = or_fallback("step", Ok(3), || Ok(0)).unwrap();
        assert_eq!(built, Built::Exact(3));
        assert!(built.reason().is_none());
    }

    #[test]
    fn failure_uses_fallback_and_keeps_reason() {
        let built = or_fallback("step", failed(), || Ok(7)).unwrap();
        assert!(built.is_fallback());
        assert_eq!(*built.value(), 7);
        assert!(built.reason().unwrap().contains("kernel said no"));
    }

    #[test]
    fn failing_fallback_propagates() {
        let err = or_fallback("step", failed(), failed).unwrap_err();
        assert!(matches!(err, ForgeError::Operation(OperationError::Failed(_))));
    }

    #[test]
    fn log_records_only_fallbacks() {
        let mut log = BuildLog::default();
        assert_eq!(log.take("exact", Built::Exact(1)), 1);
        assert!(log.is_clean());
        let value = log.take(
            "fell back",
            Built::Fallback {
                value: 2,
                reason: "why".into(),
            },
        );
        assert_eq!(value, 2);
        assert_eq!(log.fallbacks.len(), 1);
        assert_eq!(log.fallbacks[0].to_string(), "fell back: why");
    }
}
