use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::Action;
use crate::episode::{Policy, StateView};

/// A policy that picks one of the four directions uniformly at random.
///
/// Seeded so that scripted runs are reproducible.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, _view: &StateView<'_>) -> Action {
        let index = self.rng.random_range(0..Action::ALL.len());
        Action::ALL[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ruleset;
    use crate::environment::Environment;
    use crate::episode::run_episode;

    const OPEN_ROOM: &str = "\
5 5
#####
#...#
#.P.#
#..G#
#####
";

    #[test]
    fn same_seed_gives_the_same_episode() {
        let run = |seed| {
            let mut env =
                Environment::from_map_str(OPEN_ROOM, Ruleset::single_life(2)).unwrap();
            let mut policy = RandomPolicy::new(seed);
            run_episode(&mut env, &mut policy)
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn random_play_keeps_the_player_on_legal_tiles() {
        let mut env = Environment::from_map_str(OPEN_ROOM, Ruleset::single_life(2)).unwrap();
        let mut policy = RandomPolicy::new(42);
        for _ in 0..200 {
            if env.finished() {
                break;
            }
            let action = policy.decide(&env.view());
            env.execute(action);
            let pos = env.player();
            assert!(env.map().in_bounds(pos.x, pos.y));
        }
    }
}
