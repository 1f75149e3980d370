//! Keyboard input aggregation for the dock scene.
//!
//! Raw key down/up events feed two views over the same keys: the held set
//! (continuous movement) and the edge set (discrete actions, one per press).

use std::collections::HashSet;

/// Physical key identity. Letters are compared case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Esc,
    Space,
    Char(char),
}

impl Key {
    /// Case-normalized identity.
    pub fn normalized(self) -> Key {
        match self {
            Key::Char(' ') => Key::Space,
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// Discrete player actions. Keyboard edges and scene hotspots both map here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Cast when idle, reel in when the line is out
    Fish,
    ToggleSit,
    OpenCollection,
    OpenAchievements,
    /// Close the active overlay, else the catch notice
    Dismiss,
}

/// Horizontal walking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Left,
    Right,
}

impl Walk {
    pub fn sign(self) -> i32 {
        match self {
            Walk::Left => -1,
            Walk::Right => 1,
        }
    }
}

/// Action bound to a key, if any. Movement keys have no action.
///
/// Space fishes, Down sits, `c` and `a` open the collection and the
/// achievements, Esc and Enter dismiss.
pub fn action_for(key: Key) -> Option<GameAction> {
    match key.normalized() {
        Key::Down => Some(GameAction::ToggleSit),
        Key::Space => Some(GameAction::Fish),
        Key::Char('c') => Some(GameAction::OpenCollection),
        Key::Char('a') => Some(GameAction::OpenAchievements),
        Key::Esc | Key::Enter => Some(GameAction::Dismiss),
        _ => None,
    }
}

/// Walking direction bound to a key, if any.
pub fn walk_for(key: Key) -> Option<Walk> {
    match key.normalized() {
        Key::Left | Key::Char('h') => Some(Walk::Left),
        Key::Right | Key::Char('l') => Some(Walk::Right),
        _ => None,
    }
}

/// Fixed order in which pending actions are handed to the consumer.
const ACTION_ORDER: [GameAction; 5] = [
    GameAction::Dismiss,
    GameAction::OpenCollection,
    GameAction::OpenAchievements,
    GameAction::ToggleSit,
    GameAction::Fish,
];

/// Held keys plus one-shot edges for action keys.
#[derive(Debug, Default)]
pub struct InputAggregator {
    held: HashSet<Key>,
    edges: HashSet<Key>,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key going down. Auto-repeat while held sets no new edge.
    pub fn key_down(&mut self, key: Key) {
        let key = key.normalized();
        let newly_down = self.held.insert(key);
        if newly_down && action_for(key).is_some() {
            self.edges.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key.normalized());
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key.normalized())
    }

    /// True if `key` went down and has not been cleared yet.
    pub fn just_pressed(&self, key: Key) -> bool {
        self.edges.contains(&key.normalized())
    }

    /// Consumer acknowledgement for a handled edge.
    pub fn clear(&mut self, key: Key) {
        self.edges.remove(&key.normalized());
    }

    /// Net walking direction from held keys; opposite keys cancel out.
    pub fn walk_direction(&self) -> Option<Walk> {
        let sum: i32 = self
            .held
            .iter()
            .filter_map(|k| walk_for(*k))
            .map(Walk::sign)
            .sum::<i32>()
            .signum();
        match sum {
            -1 => Some(Walk::Left),
            1 => Some(Walk::Right),
            _ => None,
        }
    }

    /// Drains all pending edges as actions, each action at most once.
    pub fn take_actions(&mut self) -> Vec<GameAction> {
        let pending: HashSet<GameAction> = self.edges.drain().filter_map(action_for).collect();
        ACTION_ORDER
            .iter()
            .copied()
            .filter(|a| pending.contains(a))
            .collect()
    }

    /// Forgets every held key and edge (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.held.clear();
        self.edges.clear();
    }
}
