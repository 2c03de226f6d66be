use std::fmt;

const BUDGET_KEYWORDS: &[&str] = &["budget", "limit"];

/// Coarse intent of a user message, used to pick the control instructions.
///
/// A plain substring heuristic: "speed limit" counts as a budget query and
/// "how much can I spend on food" does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIntent {
    BudgetQuery,
    General,
}

impl MessageIntent {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if BUDGET_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Self::BudgetQuery
        } else {
            Self::General
        }
    }

    pub fn is_budget_query(&self) -> bool {
        matches!(self, Self::BudgetQuery)
    }
}

impl fmt::Display for MessageIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetQuery => write!(f, "budget_query"),
            Self::General => write!(f, "general"),
        }
    }
}
