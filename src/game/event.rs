//=========================================================================
// Game Events
//=========================================================================
//
// External entry points of the game loop, expressed as messages.
//
// Everything that can poke the game from outside a tick (the user's
// start input, the player being destroyed, an enemy kill) arrives on
// the game thread as one of these events and is dispatched between
// ticks by [`GameLoop::handle_event`](crate::game::GameLoop::handle_event).
//
//=========================================================================

//=== GameEvent ===========================================================

/// Events delivered to the game thread.
///
/// The platform layer produces [`StartRequested`](GameEvent::StartRequested)
/// and [`WindowClosed`](GameEvent::WindowClosed); gameplay systems post
/// the rest through a cloned sender obtained at runtime initialization.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The user pressed the start control on the title screen.
    StartRequested,

    /// The player was destroyed; the session is over.
    PlayerDestroyed,

    /// An enemy was destroyed, worth `points` before level scaling.
    EnemyKilled { points: f64 },

    /// Window close requested by user or OS.
    ///
    /// The runtime terminates the game thread on receipt; this variant
    /// never reaches the game loop's dispatcher during normal shutdown.
    WindowClosed,
}

//=========================================================================
// Unit Tests
//=========================================================================
