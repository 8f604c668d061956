//! Runtime configuration for the engine, resolved from the environment
//! with sensible defaults.

use std::time::Duration;

/// Settings that apply to every game hosted by one engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Match target; first team to reach it at a round boundary wins.
    pub target_score: u32,
    /// How long a seat may hold the turn before a default action is
    /// injected. `None` disables the deadline (useful in tests).
    pub turn_timeout: Option<Duration>,
    /// Capacity of each game's broadcast channel.
    pub broadcast_capacity: usize,
    /// Capacity of each game actor's mailbox.
    pub mailbox_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_score: 1001,
            turn_timeout: Some(Duration::from_secs(30)),
            broadcast_capacity: 64,
            mailbox_capacity: 64,
        }
    }
}

impl EngineConfig {
    /// Read overrides from the environment. Unset or malformed variables
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("ENGINE_TARGET_SCORE") {
            if let Ok(n) = v.parse::<u32>() {
                cfg.target_score = n;
            }
        }
        if let Ok(v) = std::env::var("ENGINE_TURN_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(0) => cfg.turn_timeout = None,
                Ok(n) => cfg.turn_timeout = Some(Duration::from_secs(n)),
                Err(_) => {}
            }
        }
        cfg
    }

    /// Test preset: no turn deadline, small channels.
    pub fn for_tests() -> Self {
        Self {
            turn_timeout: None,
            ..Self::default()
        }
    }
}
