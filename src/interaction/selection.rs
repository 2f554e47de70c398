use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::CanonicalDate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(CanonicalDate),
}

impl SelectionState {
    #[must_use]
    pub fn date(&self) -> Option<&CanonicalDate> {
        match self {
            Self::Unselected => None,
            Self::Selected(date) => Some(date),
        }
    }
}

/// What requested a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionCause {
    Api,
    MarkerClick,
    DataPointClick,
    CoinSwitch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    pub previous: SelectionState,
    pub current: SelectionState,
    pub cause: SelectionCause,
}

/// Single-date selection: `Unselected` or `Selected(date)`.
///
/// `select` is valid from any state and `clear` always lands in
/// `Unselected`. Every call is a transition, including re-selecting the
/// current date, so dependent views always re-derive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMachine {
    state: SelectionState,
}

impl SelectionMachine {
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn selected_date(&self) -> Option<&CanonicalDate> {
        self.state.date()
    }

    pub fn select(&mut self, date: CanonicalDate, cause: SelectionCause) -> SelectionChange {
        debug!(date = %date, ?cause, "select date");
        self.transition(SelectionState::Selected(date), cause)
    }

    pub fn clear(&mut self, cause: SelectionCause) -> SelectionChange {
        debug!(?cause, "clear selection");
        self.transition(SelectionState::Unselected, cause)
    }

    fn transition(&mut self, next: SelectionState, cause: SelectionCause) -> SelectionChange {
        let previous = std::mem::replace(&mut self.state, next);
        SelectionChange {
            previous,
            current: self.state.clone(),
            cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionCause, SelectionMachine, SelectionState};
    use crate::core::CanonicalDate;

    #[test]
    fn select_then_clear_round_trips_to_unselected() {
        let mut machine = SelectionMachine::default();
        let change = machine.select(CanonicalDate::normalize("2021-04-15"), SelectionCause::Api);
        assert_eq!(change.previous, SelectionState::Unselected);
        assert_eq!(machine.selected_date().map(CanonicalDate::as_str), Some("2021-04-15"));

        let change = machine.clear(SelectionCause::CoinSwitch);
        assert_eq!(change.current, SelectionState::Unselected);
        assert_eq!(change.cause, SelectionCause::CoinSwitch);
    }
}
