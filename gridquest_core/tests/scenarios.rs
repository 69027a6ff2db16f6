use gridquest_core::environment::{Environment, REWARD_GOAL, REWARD_TRAP};
use gridquest_core::{Action, Position, Ruleset};

#[test]
fn goal_in_one_step_under_single_life_rules() {
    let text = "\
3 3
###
#P#
#G#
";
    let mut env = Environment::from_map_str(text, Ruleset::single_life(2)).unwrap();
    let reward = env.execute(Action::Down);
    assert_eq!(reward, REWARD_GOAL);
    assert!(env.finished());
    // One step cost plus the goal bonus.
    assert_eq!(env.score(), -1 + 10_000);
}

#[test]
fn wall_bump_costs_a_point_and_moves_nothing() {
    let text = "\
3 3
###
#P#
###
";
    let mut env = Environment::from_map_str(text, Ruleset::single_life(2)).unwrap();
    let before = env.player();
    let reward = env.execute(Action::Left);
    assert_eq!(reward, 0);
    assert_eq!(env.player(), before);
    assert_eq!(env.score(), -1);
}

#[test]
fn trap_respawns_without_ending_the_episode() {
    let text = "\
5 3
#####
#PX.#
#####
";
    let mut env = Environment::from_map_str(text, Ruleset::respawn()).unwrap();
    let reward = env.execute(Action::Right);
    assert_eq!(reward, REWARD_TRAP);
    assert_eq!(env.score(), -100);
    assert_eq!(env.player(), Position { x: 1, y: 1 });
    assert_eq!(env.player(), env.spawn());
    assert!(!env.finished());
}

#[test]
fn unparseable_token_never_reaches_the_engine() {
    let text = "\
3 3
###
#P#
#G#
";
    let mut env = Environment::from_map_str(text, Ruleset::single_life(2)).unwrap();
    let before_pos = env.player();
    let before_score = env.score();

    // The caller validates tokens; a bad one is an error before execute.
    let parsed = "jump".parse::<Action>();
    assert!(parsed.is_err());
    if let Ok(action) = parsed {
        env.execute(action);
    }

    assert_eq!(env.player(), before_pos);
    assert_eq!(env.score(), before_score);
}

#[test]
fn full_episode_collects_coins_then_finishes() {
    let text = "\
7 5
#######
#.....#
#.###.#
#P.C.G#
#######
";
    let mut env = Environment::from_map_str(text, Ruleset::single_life(2)).unwrap();
    let route = [
        Action::Right,
        Action::Right, // coin at (3, 3)
        Action::Right,
        Action::Right, // goal at (5, 3)
    ];
    let mut rewards = Vec::new();
    for action in route {
        rewards.push(env.execute(action));
    }
    assert!(env.finished());
    assert_eq!(rewards, vec![0, 10, 0, 100]);
    // Four turns, one coin, one goal.
    assert_eq!(env.score(), -4 + 1000 + 10_000);
}
