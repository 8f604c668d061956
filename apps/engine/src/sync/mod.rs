//! Concurrency layer: one actor task per game, a mailbox for actions, a
//! broadcast stream for snapshots, and the registry that tracks them.

pub mod actor;
pub mod protocol;
pub mod registry;

pub use actor::{spawn_game, GameHandle};
pub use protocol::{ClientAction, ErrorCode, ServerMsg};
pub use registry::GameRegistry;
