//=========================================================================
// Game State
//=========================================================================
//
// The single state record owned by the game loop: current phase, the
// flight transition, and the session score. Created once at startup,
// reset at the start of every session, never destroyed.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::score::ScoreBoard;
use super::transition::FlightTransition;

//=== GamePhase ===========================================================

/// Where the runtime currently is in the title ↔ play cycle.
///
/// The player is enabled exactly while the phase is
/// [`Playing`](GamePhase::Playing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Parked at the title screen, waiting for a start request.
    AtTitle,

    /// Flying down from the title altitude toward play.
    DescendingToPlay,

    /// A session is running.
    Playing,

    /// Flying back up to the title screen after game over.
    AscendingToTitle,
}

//=== GameState ===========================================================

/// Mutable state of the game loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    /// Current phase of the title ↔ play cycle.
    pub phase: GamePhase,

    /// Title ↔ play camera flight.
    pub transition: FlightTransition,

    /// Session score.
    pub score: ScoreBoard,
}

impl GameState {
    /// Initial state: at the title, no flight active, zero scores.
    pub fn new() -> Self {
        Self {
            phase: GamePhase::AtTitle,
            transition: FlightTransition::new(),
            score: ScoreBoard::new(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
