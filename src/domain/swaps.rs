use std::fmt;

/// Swap status after a cancel action
pub const STATUS_CANCELLED: &str = "cancelled";
/// Swap status once the exchange went through
pub const STATUS_COMPLETED: &str = "completed";

/// Statuses no action may move a swap out of
pub const TERMINAL_STATUSES: &[&str] = &[STATUS_CANCELLED, STATUS_COMPLETED];

/// Transition verbs that can be applied to a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    Cancel,
}

impl SwapAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
        }
    }

    /// Status a swap ends up in once the action succeeds
    pub fn target_status(&self) -> &'static str {
        match self {
            Self::Cancel => STATUS_CANCELLED,
        }
    }
}

impl fmt::Display for SwapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_terminal(status: &str) -> bool {
    TERMINAL_STATUSES.contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_tag_and_target() {
        assert_eq!(SwapAction::Cancel.to_string(), "cancel");
        assert_eq!(SwapAction::Cancel.target_status(), STATUS_CANCELLED);
        assert!(is_terminal(SwapAction::Cancel.target_status()));
    }

    #[test]
    fn terminal_statuses() {
        assert!(is_terminal("cancelled"));
        assert!(is_terminal("completed"));
        assert!(!is_terminal("pending"));
    }
}
