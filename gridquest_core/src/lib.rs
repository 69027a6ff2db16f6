use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod environment;
pub mod episode;
pub mod map;
pub mod policy;

/// Represents a 2D coordinate. Origin (0, 0) is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

/// Error returned when a textual action token is not one of the four
/// movement directions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a valid action!")]
pub struct ParseActionError(pub String);

/// One of the four moves a player can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions, in the order the action enumerator checks them.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Movement vector for this action; +y points down.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Action::Up),
            "down" => Ok(Action::Down),
            "left" => Ok(Action::Left),
            "right" => Ok(Action::Right),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        };
        f.write_str(token)
    }
}

/// What happens when the player lands on a trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardPolicy {
    /// A trap ends the episode.
    Terminal,
    /// A trap costs points and sends the player back to the spawn tile.
    Respawn,
}

/// Selects which special tiles are active and how hazards resolve.
///
/// The two rule sets differ in more than the hazard policy: under
/// [`HazardPolicy::Terminal`] every turn costs one point up front, while
/// under [`HazardPolicy::Respawn`] the step cost applies only to turns that
/// end on a plain tile. Both behaviors are intentional and must not be
/// unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub hazard_policy: HazardPolicy,
    pub coins_enabled: bool,
    pub traps_enabled: bool,
}

impl Ruleset {
    /// Single-life rules at the given difficulty level.
    ///
    /// Level 0 suppresses coins and traps, level 1 enables coins only, and
    /// level 2 (or anything higher) enables both.
    pub fn single_life(level: u8) -> Self {
        Ruleset {
            hazard_policy: HazardPolicy::Terminal,
            coins_enabled: level >= 1,
            traps_enabled: level >= 2,
        }
    }

    /// Respawn rules: traps are active but send the player back to spawn;
    /// coins do not exist in this rule set.
    pub fn respawn() -> Self {
        Ruleset {
            hazard_policy: HazardPolicy::Respawn,
            coins_enabled: false,
            traps_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tokens_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "jump".parse::<Action>().unwrap_err();
        assert_eq!(err, ParseActionError("jump".to_string()));
    }

    #[test]
    fn difficulty_levels_gate_special_tiles() {
        let level0 = Ruleset::single_life(0);
        assert!(!level0.coins_enabled);
        assert!(!level0.traps_enabled);

        let level1 = Ruleset::single_life(1);
        assert!(level1.coins_enabled);
        assert!(!level1.traps_enabled);

        let level2 = Ruleset::single_life(2);
        assert!(level2.coins_enabled);
        assert!(level2.traps_enabled);
    }

    #[test]
    fn respawn_rules_have_no_coins() {
        let rules = Ruleset::respawn();
        assert_eq!(rules.hazard_policy, HazardPolicy::Respawn);
        assert!(!rules.coins_enabled);
        assert!(rules.traps_enabled);
    }
}
