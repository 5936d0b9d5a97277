//! Pipeline states
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a verification currently is.
///
/// `Querying → Extracting → Publishing → Done`. Only `Publishing` may be
/// skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Querying,
    Extracting,
    Publishing,
    Done,
}

impl PipelineState {
    pub fn id(self) -> &'static str {
        match self {
            PipelineState::Querying => "query.model.v1",
            PipelineState::Extracting => "extract.verdict.v1",
            PipelineState::Publishing => "publish.ledger.v1",
            PipelineState::Done => "done",
        }
    }

    /// Next state; `skip_publish` jumps Extracting straight to Done.
    pub fn next(self, skip_publish: bool) -> Self {
        match self {
            PipelineState::Querying => PipelineState::Extracting,
            PipelineState::Extracting if skip_publish => PipelineState::Done,
            PipelineState::Extracting => PipelineState::Publishing,
            PipelineState::Publishing | PipelineState::Done => PipelineState::Done,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_publishing_is_skippable() {
        assert_eq!(PipelineState::Querying.next(true), PipelineState::Extracting);
        assert_eq!(PipelineState::Extracting.next(true), PipelineState::Done);
        assert_eq!(PipelineState::Extracting.next(false), PipelineState::Publishing);
        assert_eq!(PipelineState::Publishing.next(false), PipelineState::Done);
    }
}
