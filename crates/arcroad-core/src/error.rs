use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoadError {
    /// A straight segment collapsed below the linear tolerance, usually
    /// because two consecutive control points coincide.
    #[error("Degenerate segment {index}: length {length} is below tolerance")]
    DegenerateSegment { index: usize, length: f64 },

    #[error("Too few control points: need at least {required}, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Geometry error: {0}")]
    Geometry(String),
}

impl RoadError {
    /// Whether this error comes from unusable input geometry rather than
    /// from a bad argument.
    pub fn is_degenerate_input(&self) -> bool {
        matches!(
            self,
            RoadError::DegenerateSegment { .. } | RoadError::TooFewPoints { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_classification() {
        let err = RoadError::DegenerateSegment {
            index: 2,
            length: 0.0,
        };
        assert!(err.is_degenerate_input());
        assert!(!RoadError::InvalidParameter("blend".into()).is_degenerate_input());
    }

    #[test]
    fn test_display() {
        let err = RoadError::TooFewPoints {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Too few control points: need at least 2, got 1"
        );
    }
}
