//! Quote flow: search existing proposals, fill in the client, then price

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Screen the salesperson is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStep {
    Search,
    ClientForm,
    Calculator,
}

/// Navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteAction {
    StartNew,
    Continue,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {action:?} from {from:?}")]
pub struct InvalidTransition {
    pub from: QuoteStep,
    pub action: QuoteAction,
}

impl QuoteStep {
    /// Step reached by applying `action`
    pub fn next(self, action: QuoteAction) -> Result<QuoteStep, InvalidTransition> {
        use QuoteAction::*;
        use QuoteStep::*;

        match (self, action) {
            (Search, StartNew) => Ok(ClientForm),
            (ClientForm, Continue) => Ok(Calculator),
            (Calculator, Back) => Ok(ClientForm),
            (ClientForm, Back) => Ok(Search),
            (from, action) => Err(InvalidTransition { from, action }),
        }
    }
}

/// Current position in the quote flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteFlow {
    step: QuoteStep,
}

impl Default for QuoteFlow {
    fn default() -> Self {
        Self {
            step: QuoteStep::Search,
        }
    }
}

impl QuoteFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> QuoteStep {
        self.step
    }

    /// Apply an action; on error the step is unchanged
    pub fn apply(&mut self, action: QuoteAction) -> Result<QuoteStep, InvalidTransition> {
        let next = self.step.next(action)?;
        debug!(from = ?self.step, to = ?next, ?action, "Quote step changed");
        self.step = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_and_back() {
        let mut flow = QuoteFlow::new();
        assert_eq!(flow.step(), QuoteStep::Search);

        assert_eq!(flow.apply(QuoteAction::StartNew), Ok(QuoteStep::ClientForm));
        assert_eq!(flow.apply(QuoteAction::Continue), Ok(QuoteStep::Calculator));
        assert_eq!(flow.apply(QuoteAction::Back), Ok(QuoteStep::ClientForm));
        assert_eq!(flow.apply(QuoteAction::Back), Ok(QuoteStep::Search));
    }

    #[test]
    fn test_invalid_pairs() {
        let invalid = [
            (QuoteStep::Search, QuoteAction::Continue),
            (QuoteStep::Search, QuoteAction::Back),
            (QuoteStep::ClientForm, QuoteAction::StartNew),
            (QuoteStep::Calculator, QuoteAction::StartNew),
            (QuoteStep::Calculator, QuoteAction::Continue),
        ];

        for (from, action) in invalid {
            assert_eq!(from.next(action), Err(InvalidTransition { from, action }));
        }
    }

    #[test]
    fn test_failed_action_keeps_step() {
        let mut flow = QuoteFlow::new();
        assert!(flow.apply(QuoteAction::Back).is_err());
        assert_eq!(flow.step(), QuoteStep::Search);
    }
}
