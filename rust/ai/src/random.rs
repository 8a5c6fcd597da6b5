//! Seeded random policy. Useful as a noisy opponent and for shaking out
//! betting-round edge cases.

use pokersim_engine::player::PlayerAction;
use pokersim_engine::policy::{DecisionContext, DecisionPolicy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Picks uniformly weighted legal-looking actions.
///
/// Unopposed it checks or raises; facing a bet it folds, calls or raises.
/// Raise sizes are a random share of the pot, at least one big blind.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
    raise_prob: f64,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            raise_prob: 0.2,
        }
    }

    /// Probability of raising on any given turn, clamped to `0.0..=1.0`.
    pub fn with_raise_prob(mut self, p: f64) -> Self {
        self.raise_prob = p.clamp(0.0, 1.0);
        self
    }

    fn raise(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction {
        let top = ctx.pot.max(ctx.big_blind).max(1);
        let chips = self.rng.random_range(ctx.big_blind.min(top)..=top);
        ctx.raise_by(chips)
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction {
        if ctx.to_call > ctx.stack {
            return PlayerAction::Fold;
        }
        if self.rng.random_bool(self.raise_prob) {
            return self.raise(ctx);
        }
        if ctx.to_call == 0 || self.rng.random_bool(0.6) {
            ctx.check_or_call()
        } else {
            PlayerAction::Fold
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}
