//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use neon_descent::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime entry point
pub use crate::runtime::{Runtime, RuntimeBuilder, RuntimeHandles};

// Game core
pub use crate::game::{GameLoop, GameSystems};

// State and scoring
pub use crate::game::score::ScoreBoard;
pub use crate::game::state::{GamePhase, GameState};
pub use crate::game::transition::{FlightDirection, FlightProgress, FlightTransition};

// Collaborator contracts
pub use crate::game::clock::{GameClock, StdClock};
pub use crate::game::interface::{
    AudioOut, EnemyDirector, FrameSink, GameUi, PlayerRig, PointerPort,
};

// Events
pub use crate::game::event::GameEvent;
