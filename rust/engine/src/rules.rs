use crate::errors::GameError;
use crate::player::PlayerAction as A;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips moved from the stack to match the table bet
    Call(u32),
    /// New table bet and the chips moved to reach it
    Raise { to: u32, chips: u32 },
}

/// Turns a policy's [`crate::player::PlayerAction`] into the action the
/// table will actually apply.
///
/// # Arguments
///
/// * `stack` - Player's remaining chip stack
/// * `current_bet` - Chips the player already has in on this street
/// * `table_bet` - Highest bet on this street
/// * `min_raise` - Smallest legal raise increment (last raise size, at least the big blind)
/// * `raise_allowed` - `false` once the street's raise cap is reached
/// * `action` - The action the policy chose
///
/// # Rules
///
/// - A call costing more than the stack is a forced fold, not an error.
/// - A call or raise with nothing to call is a check.
/// - A raise that is capped, or that does not exceed the table bet, is a call.
/// - A raise above the stack becomes all-in; an undersized raise is lifted
///   to the minimum raise when the stack allows it, otherwise all-in.
///
/// # Errors
///
/// [`GameError::CannotCheck`] when checking while facing a bet.
///
/// # Examples
///
/// ```
/// use pokersim_engine::rules::{validate_action, ValidatedAction};
/// use pokersim_engine::player::PlayerAction;
///
/// // Call more than the stack: forced fold
/// let v = validate_action(40, 0, 50, 10, true, PlayerAction::Call(50));
/// assert_eq!(v, Ok(ValidatedAction::Fold));
///
/// // Undersized raise is lifted to the minimum raise
/// let v = validate_action(1000, 0, 50, 50, true, PlayerAction::Raise(60));
/// assert_eq!(v, Ok(ValidatedAction::Raise { to: 100, chips: 100 }));
/// ```
pub fn validate_action(
    stack: u32,
    current_bet: u32,
    table_bet: u32,
    min_raise: u32,
    raise_allowed: bool,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let to_call = table_bet.saturating_sub(current_bet);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call(_) => Ok(call_or_fold(stack, to_call)),
        A::Raise(to) => {
            let all_in = current_bet + stack;
            if !raise_allowed || to <= table_bet || all_in <= table_bet {
                return Ok(call_or_fold(stack, to_call));
            }
            let floor = table_bet + min_raise;
            let to = if to > all_in {
                all_in
            } else if to >= floor {
                to
            } else {
                floor.min(all_in)
            };
            Ok(ValidatedAction::Raise {
                to,
                chips: to - current_bet,
            })
        }
    }
}

fn call_or_fold(stack: u32, to_call: u32) -> ValidatedAction {
    if to_call == 0 {
        ValidatedAction::Check
    } else if to_call > stack {
        ValidatedAction::Fold
    } else {
        ValidatedAction::Call(to_call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_facing_bet_is_rejected() {
        assert_eq!(
            validate_action(100, 0, 20, 10, true, A::Check),
            Err(GameError::CannotCheck { to_call: 20 })
        );
    }

    #[test]
    fn call_amount_comes_from_the_table() {
        assert_eq!(
            validate_action(100, 10, 30, 10, true, A::Call(999)),
            Ok(ValidatedAction::Call(20))
        );
        assert_eq!(
            validate_action(100, 30, 30, 10, true, A::Call(0)),
            Ok(ValidatedAction::Check)
        );
    }

    #[test]
    fn capped_raise_becomes_call() {
        assert_eq!(
            validate_action(100, 0, 30, 10, false, A::Raise(90)),
            Ok(ValidatedAction::Call(30))
        );
    }

    #[test]
    fn oversized_raise_is_all_in() {
        assert_eq!(
            validate_action(100, 10, 30, 10, true, A::Raise(500)),
            Ok(ValidatedAction::Raise { to: 110, chips: 100 })
        );
    }

    #[test]
    fn short_stack_min_raise_goes_all_in() {
        assert_eq!(
            validate_action(45, 0, 30, 30, true, A::Raise(40)),
            Ok(ValidatedAction::Raise { to: 45, chips: 45 })
        );
    }

    #[test]
    fn stack_that_cannot_exceed_table_bet_just_calls() {
        assert_eq!(
            validate_action(20, 10, 30, 10, true, A::Raise(60)),
            Ok(ValidatedAction::Call(20))
        );
    }
}
