use ptmcanon::engine::config::{CandidateOrder, FailurePolicy};

pub struct DefaultsConfig {
    pub candidate_order: CandidateOrder,
    pub failure_policy: FailurePolicy,
    pub include_builtin: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            candidate_order: CandidateOrder::SmallestFirst,
            failure_policy: FailurePolicy::Atomic,
            include_builtin: true,
        }
    }
}
