use super::MessageIntent;

const LEADING_RULES: &[&str] = &[
    "CRITICAL RULES:",
    "• NEVER generate lines like 'Your X budget is ...' or 'Your expenses are ...'.",
    "• NEVER show 'Current Expenses' or 'Total Expenses'.",
    "• ONLY use SmartPlan values as the single source of truth.",
    "• Phrase as: 'Your budget limit for <category> this month is Rs. XXXX'.",
    "• If user asks for one category → show only that category.",
    "• If user asks for all budgets → show clean bullet list, each category once, no duplicates.",
    "• DO NOT invent expenses, totals, or extra budget lines.",
    "• DO NOT mix budget limits with spending or expenses.",
];

pub const SUPPRESS_COMMENTARY_RULE: &str = "• IMPORTANT: If the user asks for budget limits, \
DO NOT add savings suggestions, surplus analysis, or commentary. \
Reply with ONLY the requested budget limit(s).";

pub const ALLOW_COMMENTARY_RULE: &str = "• If the user asks for financial advice (not budgets), \
you may include savings or investment suggestions.";

const TRAILING_RULES: &[&str] = &["• Respond clearly and concisely in the user’s requested language."];

/// Fixed policy sent next to every user message so the generative backend
/// sticks to SmartPlan figures and a predictable answer format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlInstructions {
    intent: MessageIntent,
}

impl ControlInstructions {
    pub fn for_intent(intent: MessageIntent) -> Self {
        Self { intent }
    }

    pub fn intent(&self) -> MessageIntent {
        self.intent
    }

    /// Directives in the order they are sent.
    pub fn directives(&self) -> Vec<&'static str> {
        let commentary = match self.intent {
            MessageIntent::BudgetQuery => SUPPRESS_COMMENTARY_RULE,
            MessageIntent::General => ALLOW_COMMENTARY_RULE,
        };

        LEADING_RULES
            .iter()
            .copied()
            .chain(std::iter::once(commentary))
            .chain(TRAILING_RULES.iter().copied())
            .collect()
    }

    pub fn render(&self) -> String {
        self.directives().join(" ")
    }
}
