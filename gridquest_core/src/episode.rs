use crate::environment::Environment;
use crate::map::TileGrid;
use crate::{Action, Position};

/// Provides a read-only view of the environment for one turn of decision
/// making.
#[derive(Debug)]
pub struct StateView<'a> {
    pub map: &'a TileGrid,
    pub player: Position,
    pub score: i64,
    pub finished: bool,
}

/// Trait defining a decision function for scripted play.
///
/// `&mut self` allows the policy to maintain internal state between turns.
/// A policy always produces one of the four typed actions, so nothing it
/// returns can be rejected; textual input is validated separately at the
/// parsing boundary.
pub trait Policy {
    /// Chooses the action to take for the current turn.
    fn decide(&mut self, view: &StateView<'_>) -> Action;
}

/// Any closure over a state view works as a policy.
impl<F> Policy for F
where
    F: FnMut(&StateView<'_>) -> Action,
{
    fn decide(&mut self, view: &StateView<'_>) -> Action {
        self(view)
    }
}

impl Environment {
    /// The view handed to a policy each turn.
    pub fn view(&self) -> StateView<'_> {
        StateView {
            map: self.map(),
            player: self.player(),
            score: self.score(),
            finished: self.finished(),
        }
    }
}

/// Drives the environment with the given policy until the episode finishes
/// or no useful move remains, and returns the final score.
///
/// One decision is made per turn and must return before the next turn
/// proceeds; there is no concurrency and no timeout.
pub fn run_episode(env: &mut Environment, policy: &mut dyn Policy) -> i64 {
    while !env.finished() {
        let action = policy.decide(&env.view());
        env.execute(action);
        if env.available_actions().is_empty() {
            break;
        }
    }
    env.score()
}
