use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value '{value}' for parameter '{parameter}' (expected one of: {expected})")]
    InvalidValue {
        parameter: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Order in which candidate patterns are tried by the covering search.
///
/// Pattern size is the total atom count, anchors included. Ties keep library order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CandidateOrder {
    #[default]
    SmallestFirst,
    LargestFirst,
}

impl CandidateOrder {
    const EXPECTED: &'static str = "smallest-first, largest-first";
}

impl FromStr for CandidateOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smallest-first" => Ok(Self::SmallestFirst),
            "largest-first" => Ok(Self::LargestFirst),
            _ => Err(ConfigError::InvalidValue {
                parameter: "candidate-order",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl fmt::Display for CandidateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SmallestFirst => "smallest-first",
            Self::LargestFirst => "largest-first",
        })
    }
}

/// What happens to already-canonicalized residue groups when a later group fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// All groups are applied, or none are.
    #[default]
    Atomic,
    /// Groups processed before the failure keep their changes.
    GroupGranular,
}

impl FailurePolicy {
    const EXPECTED: &'static str = "atomic, group-granular";
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "group-granular" => Ok(Self::GroupGranular),
            _ => Err(ConfigError::InvalidValue {
                parameter: "failure-policy",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Atomic => "atomic",
            Self::GroupGranular => "group-granular",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalizationConfig {
    pub candidate_order: CandidateOrder,
    pub failure_policy: FailurePolicy,
}

#[derive(Default)]
pub struct CanonicalizationConfigBuilder {
    candidate_order: Option<CandidateOrder>,
    failure_policy: Option<FailurePolicy>,
}

impl CanonicalizationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate_order(mut self, order: CandidateOrder) -> Self {
        self.candidate_order = Some(order);
        self
    }
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<CanonicalizationConfig, ConfigError> {
        Ok(CanonicalizationConfig {
            candidate_order: self
                .candidate_order
                .ok_or(ConfigError::MissingParameter("candidate_order"))?,
            failure_policy: self
                .failure_policy
                .ok_or(ConfigError::MissingParameter("failure_policy"))?,
        })
    }
}
