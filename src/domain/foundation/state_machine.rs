//! Lifecycle statuses with declared legal moves.

use super::ValidationError;

/// A status enum whose legal moves are listed by `valid_transitions`.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn valid_transitions(&self) -> Vec<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Returns `target` if the move is legal.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "status",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    /// A status with no outgoing moves.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
