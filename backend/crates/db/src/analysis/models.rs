use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Paging over one agent's history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisFilter {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl AnalysisFilter {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(0)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_negative_values() {
        let filter = AnalysisFilter::default();
        assert_eq!(filter.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(filter.offset(), 0);

        let filter = AnalysisFilter {
            limit: Some(-5),
            offset: Some(-1),
        };
        assert_eq!(filter.limit(), 0);
        assert_eq!(filter.offset(), 0);
    }
}
