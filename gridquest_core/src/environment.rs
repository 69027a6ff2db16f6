use std::path::Path;

use crate::map::{MapError, Tile, TileGrid};
use crate::{Action, HazardPolicy, Position, Ruleset};

/// Reward signal when a coin is collected.
pub const REWARD_COIN: i32 = 10;
/// Reward signal when a trap is hit, under either hazard policy.
pub const REWARD_TRAP: i32 = -100;
/// Reward signal when the goal is reached under single-life rules.
pub const REWARD_GOAL: i32 = 100;

const SCORE_COIN: i64 = 1000;
const SCORE_GOAL: i64 = 10_000;
const SCORE_TRAP_RESPAWN: i64 = -100;

/// Manages one episode of the grid game.
///
/// The map, player position, score, and finished flag are mutated only by
/// [`Environment::execute`]; everything else is read access.
#[derive(Debug, Clone)]
pub struct Environment {
    map: TileGrid,
    player: Position,
    spawn: Position,
    score: i64,
    finished: bool,
    rules: Ruleset,
}

impl Environment {
    /// Loads an environment from map text.
    ///
    /// The expected format is a header line `"<width> <height>"` followed by
    /// `height` rows of at least `width` tile characters; characters beyond
    /// `width` and rows beyond `height` are ignored. The `P` tile marks the
    /// player start and is stored in the grid as open space. Special tiles
    /// that the rule set disables load as open space.
    pub fn from_map_str(text: &str, rules: Ruleset) -> Result<Self, MapError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or(MapError::Empty)?;

        let mut fields = header.split_whitespace();
        let parse_field = |field: Option<&str>| {
            field
                .and_then(|f| f.parse::<usize>().ok())
                .ok_or_else(|| MapError::BadHeader {
                    line: header.to_string(),
                })
        };
        let width = parse_field(fields.next())?;
        let height = parse_field(fields.next())?;

        let mut cells = Vec::with_capacity(width * height);
        let mut spawn: Option<Position> = None;
        let mut rows = 0;

        for (y, line) in lines.take(height).enumerate() {
            let row: Vec<char> = line.chars().take(width).collect();
            if row.len() < width {
                return Err(MapError::RowTooShort {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, ch) in row.into_iter().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Space,
                    'C' if rules.coins_enabled => Tile::Coin,
                    'X' if rules.traps_enabled => Tile::Trap,
                    'C' | 'X' => Tile::Space,
                    'G' => Tile::Goal,
                    'P' => {
                        spawn = Some(Position { x, y });
                        Tile::Space
                    }
                    other => {
                        return Err(MapError::UnknownTile { ch: other, x, y });
                    }
                };
                cells.push(tile);
            }
            rows += 1;
        }

        if rows < height {
            return Err(MapError::TooFewRows {
                expected: height,
                found: rows,
            });
        }
        let spawn = spawn.ok_or(MapError::MissingPlayer)?;

        Ok(Environment {
            map: TileGrid::from_rows(width, height, cells),
            player: spawn,
            spawn,
            score: 0,
            finished: false,
            rules,
        })
    }

    /// Loads an environment from a map file on disk.
    pub fn from_map_file(path: impl AsRef<Path>, rules: Ruleset) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_map_str(&text, rules)
    }

    pub fn map(&self) -> &TileGrid {
        &self.map
    }
    pub fn player(&self) -> Position {
        self.player
    }
    pub fn spawn(&self) -> Position {
        self.spawn
    }
    pub fn score(&self) -> i64 {
        self.score
    }
    pub fn finished(&self) -> bool {
        self.finished
    }
    pub fn rules(&self) -> Ruleset {
        self.rules
    }

    /// Executes one action and returns the reward signal for this step.
    ///
    /// A move that would leave the grid or enter a wall leaves the position
    /// unchanged but still consumes the turn. Once the episode is finished,
    /// further calls are no-ops returning 0, so the score can never drop
    /// below its value at the moment of termination.
    pub fn execute(&mut self, action: Action) -> i32 {
        if self.finished {
            return 0;
        }

        if let Some(target) = self.target_of(self.player, action) {
            self.player = target;
        }

        match self.rules.hazard_policy {
            HazardPolicy::Terminal => self.resolve_terminal(),
            HazardPolicy::Respawn => self.resolve_respawn(),
        }
    }

    /// Single-life resolution: every turn costs a point up front, a trap
    /// ends the episode, the goal ends it with a bonus.
    fn resolve_terminal(&mut self) -> i32 {
        self.score -= 1;
        match self.map[self.player] {
            Tile::Coin => {
                self.score += SCORE_COIN;
                // Clear the same cell that produced the reward.
                self.map[self.player] = Tile::Space;
                REWARD_COIN
            }
            Tile::Trap => {
                self.finished = true;
                REWARD_TRAP
            }
            Tile::Goal => {
                self.score += SCORE_GOAL;
                self.finished = true;
                REWARD_GOAL
            }
            Tile::Space | Tile::Wall => 0,
        }
    }

    /// Respawn resolution: a trap costs points and resets the player to the
    /// spawn tile without ending the episode; the goal ends the episode at
    /// no extra cost. The one-point step cost applies only to plain moves.
    fn resolve_respawn(&mut self) -> i32 {
        match self.map[self.player] {
            Tile::Trap => {
                self.score += SCORE_TRAP_RESPAWN;
                self.player = self.spawn;
                REWARD_TRAP
            }
            Tile::Goal => {
                self.finished = true;
                0
            }
            Tile::Space | Tile::Coin | Tile::Wall => {
                self.score -= 1;
                -1
            }
        }
    }

    /// Returns the position `action` would move `from` to, or `None` when
    /// the move is blocked by the grid edge or a wall.
    fn target_of(&self, from: Position, action: Action) -> Option<Position> {
        let (dx, dy) = action.delta();
        let x = from.x.checked_add_signed(dx)?;
        let y = from.y.checked_add_signed(dy)?;
        if !self.map.in_bounds(x, y) {
            return None;
        }
        let target = Position { x, y };
        if self.map[target] == Tile::Wall {
            return None;
        }
        Some(target)
    }

    /// Returns every action that would actually move the player, checked in
    /// the order up, down, left, right.
    ///
    /// Used to detect a stalled episode: an empty result means no useful
    /// move exists. Callers may still submit any action they like.
    pub fn available_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.target_of(self.player, action).is_some())
            .collect()
    }

    /// The character shown at `(x, y)`: the player marker on the player's
    /// cell, otherwise the underlying tile.
    pub fn render_char(&self, x: usize, y: usize) -> char {
        if self.player.x == x && self.player.y == y {
            'P'
        } else {
            self.map
                .get(x, y)
                .map(Tile::to_char)
                .unwrap_or(' ')
        }
    }

    /// Renders the full map with the player overlaid, rows joined by
    /// newlines.
    pub fn render_to_string(&self) -> String {
        let mut out = String::with_capacity((self.map.width() + 1) * self.map.height());
        for y in 0..self.map.height() {
            for x in 0..self.map.width() {
                out.push(self.render_char(x, y));
            }
            out.push('\n');
        }
        out
    }
}
