//=========================================================================
// Collaborator Contracts
//=========================================================================
//
// Trait seams between the game loop and the services it drives.
//
// The loop owns no rendering, audio, or simulation code of its own; it
// calls these contracts and the application supplies implementations.
// All contracts are object safe and `Send` so a boxed set can migrate
// onto the game thread.
//
// Dependency injection is deliberate: the loop never reaches for
// ambient globals, every service is handed in at construction.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== PlayerRig ===========================================================

/// The player's body in the world: control state plus world position.
///
/// The game loop moves the rig vertically during title transitions and
/// toggles control when a session starts or ends. Movement, aiming, and
/// combat are the implementation's own business.
pub trait PlayerRig: Send {
    /// Hands control to the user (session start).
    fn enable(&mut self);

    /// Takes control away from the user (session end).
    fn disable(&mut self);

    /// Current world-space position. Altitude is the `y` component.
    fn position(&self) -> Vec3;

    /// Moves the rig to a new world-space position.
    fn set_position(&mut self, position: Vec3);
}

//=== EnemyDirector =======================================================

/// Enemy spawning and difficulty.
///
/// `level` is read every frame by the score accumulator; it is the
/// director's current difficulty tier, starting at 0.
pub trait EnemyDirector: Send {
    /// Begins spawning enemies.
    fn start(&mut self);

    /// Stops spawning and clears the field.
    fn stop(&mut self);

    /// Current difficulty level.
    fn level(&self) -> u32;
}

//=== GameUi ==============================================================

/// Score display and screen-level visibility toggles.
pub trait GameUi: Send {
    /// Shows the in-play HUD.
    fn show_hud(&mut self);

    /// Hides the in-play HUD.
    fn hide_hud(&mut self);

    /// Shows the title screen.
    fn show_title(&mut self);

    /// Freezes the final score shown on the title screen.
    fn set_title_score(&mut self, score: f64);

    /// Updates the live in-play score readout.
    fn update_game_score(&mut self, score: f64);
}

//=== FrameSink ===========================================================

/// Receives one frame submission per tick.
pub trait FrameSink: Send {
    /// Renders a frame. `delta_secs` is the time since the previous
    /// submission.
    fn render(&mut self, delta_secs: f32);
}

//=== AudioOut ============================================================

/// One-shot audio cues around session boundaries.
pub trait AudioOut: Send {
    /// Played when the descent toward play begins.
    fn play_start_cue(&mut self);

    /// Played when the session ends.
    fn play_end_cue(&mut self);
}

//=== PointerPort =========================================================

/// Pointer capture for mouse-look.
///
/// The runtime's implementation forwards these over a channel to the
/// platform thread; capture failure is the platform's concern and is
/// not reported back.
pub trait PointerPort: Send {
    /// Requests pointer capture.
    fn capture(&mut self);

    /// Releases pointer capture.
    fn release(&mut self);
}

//=========================================================================
// Unit Tests
//=========================================================================
