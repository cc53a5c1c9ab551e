//=========================================================================
// Game Loop
//=========================================================================
//
// The logical core of the runtime: phase machine, scoring, and the
// per-tick update order.
//
// Architecture:
// ```text
//   GameLoop
//     ├─ state: GameState        (phase, flight, score)
//     └─ systems it drives:
//          PlayerRig     - enable/disable, world position
//          EnemyDirector - start/stop, difficulty level
//          GameUi        - HUD/title visibility, score readouts
//          FrameSink     - one frame submission per tick
//          AudioOut      - session start/end cues
//          PointerPort   - pointer capture/release
//          GameClock     - elapsed/delta time
//
//   Tick order (fixed):
//     1. update_time_score()
//     2. update_transition()
//     3. frames.render(delta)
// ```
//
// All mutation happens synchronously inside `tick` or inside the
// event-dispatched entry points between ticks; the runtime guarantees
// ticks are strictly sequential, so no locking is needed here.
//
//=========================================================================

//=== External Crates =====================================================

use log::{debug, info};

//=== Module Declarations =================================================

pub mod clock;
pub mod event;
pub mod interface;
pub mod score;
pub mod state;
pub mod transition;

//=== Public API ==========================================================

pub use clock::{GameClock, StdClock};
pub use event::GameEvent;
pub use interface::{AudioOut, EnemyDirector, FrameSink, GameUi, PlayerRig, PointerPort};
pub use score::ScoreBoard;
pub use state::{GamePhase, GameState};
pub use transition::{FlightDirection, FlightProgress, FlightTransition};

//=== GameSystems =========================================================

/// The full set of services a [`GameLoop`] drives.
///
/// Assembled by the application (real platform-backed implementations
/// in production, mocks in tests) and handed to [`GameLoop::new`].
pub struct GameSystems {
    /// Monotonic time source.
    pub clock: Box<dyn GameClock>,

    /// The player's body and control state.
    pub player: Box<dyn PlayerRig>,

    /// Enemy spawning and difficulty.
    pub enemies: Box<dyn EnemyDirector>,

    /// Score displays and screen toggles.
    pub ui: Box<dyn GameUi>,

    /// Frame submission.
    pub frames: Box<dyn FrameSink>,

    /// Session boundary cues.
    pub audio: Box<dyn AudioOut>,

    /// Pointer capture for mouse-look.
    pub pointer: Box<dyn PointerPort>,
}

//=== GameLoop ============================================================

/// Owns the game state and drives it one tick at a time.
///
/// The loop has four phases. From `AtTitle`, a start request begins an
/// accelerating descent; when the player drops below the play altitude
/// a session starts (scores zeroed, player enabled, enemies spawning,
/// HUD shown). Game over reverses the flight, freezing the final score
/// into the title display on the way out; passing the title altitude
/// parks the loop back at `AtTitle` with the pointer released.
///
/// Entry points (`start_game_transition`, `game_over`,
/// `add_objective_score`) execute synchronously relative to `tick`;
/// the runtime dispatches queued [`GameEvent`]s between ticks.
pub struct GameLoop {
    state: GameState,
    clock: Box<dyn GameClock>,
    player: Box<dyn PlayerRig>,
    enemies: Box<dyn EnemyDirector>,
    ui: Box<dyn GameUi>,
    frames: Box<dyn FrameSink>,
    audio: Box<dyn AudioOut>,
    pointer: Box<dyn PointerPort>,
}

impl GameLoop {
    //--- Construction -----------------------------------------------------

    /// Creates a loop parked at the title screen.
    pub fn new(systems: GameSystems) -> Self {
        Self {
            state: GameState::new(),
            clock: systems.clock,
            player: systems.player,
            enemies: systems.enemies,
            ui: systems.ui,
            frames: systems.frames,
            audio: systems.audio,
            pointer: systems.pointer,
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one tick: score update, then transition update, then frame
    /// submission. No step is skipped beyond each step's own rules.
    pub fn tick(&mut self) {
        self.update_time_score();
        self.update_transition();

        let delta = self.clock.delta_secs();
        self.frames.render(delta);
    }

    //--- Entry Points -----------------------------------------------------

    /// Begins the descent from the title screen into play.
    ///
    /// Resets the flight to base speed heading down, captures the
    /// pointer, and plays the start cue. Re-triggering while a flight
    /// is active overwrites its speed and direction.
    pub fn start_game_transition(&mut self) {
        info!("Start requested, descending to play");

        self.state.transition.begin(FlightDirection::Descending);
        self.state.phase = GamePhase::DescendingToPlay;

        self.pointer.capture();
        self.audio.play_start_cue();
    }

    /// Ends the running session.
    ///
    /// Freezes the displayed title score to the sum of both score
    /// components at this moment, disables the player, stops enemy
    /// spawning, hides the HUD, and begins the ascent back to the
    /// title screen.
    pub fn game_over(&mut self) {
        let final_score = self.state.score.total();
        info!("Game over, final score {:.0}", final_score);

        self.state.transition.begin(FlightDirection::Ascending);
        self.state.phase = GamePhase::AscendingToTitle;

        self.player.disable();
        self.enemies.stop();
        self.ui.hide_hud();
        self.ui.set_title_score(final_score);
        self.audio.play_end_cue();
    }

    /// Awards a level-scaled achievement score.
    ///
    /// Callable at any time; `amount` is non-negative by the callers'
    /// contract.
    pub fn add_objective_score(&mut self, amount: f64) {
        self.state.score.add_objective(amount, self.enemies.level());
    }

    //--- Event Dispatch ---------------------------------------------------

    /// Dispatches an externally-queued event to the matching entry
    /// point.
    ///
    /// Requests that make no sense in the current phase are dropped:
    /// the start control only exists on the title screen, and only an
    /// enabled player can be destroyed. `WindowClosed` is the
    /// runtime's shutdown signal and is not handled here.
    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::StartRequested => {
                if self.state.phase == GamePhase::AtTitle {
                    self.start_game_transition();
                } else {
                    debug!("Ignoring start request in phase {:?}", self.state.phase);
                }
            }
            GameEvent::PlayerDestroyed => {
                if self.state.phase == GamePhase::Playing {
                    self.game_over();
                } else {
                    debug!("Ignoring player destruction in phase {:?}", self.state.phase);
                }
            }
            GameEvent::EnemyKilled { points } => self.add_objective_score(points),
            GameEvent::WindowClosed => {}
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Current phase of the title ↔ play cycle.
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Current session score.
    pub fn score(&self) -> &ScoreBoard {
        &self.state.score
    }

    /// Full state record.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    //--- Internal Steps ---------------------------------------------------

    // Recomputes the time score and publishes the total to the in-play
    // readout. A complete no-op unless the player is enabled, so the
    // frozen title score survives the ascent untouched.
    fn update_time_score(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        let level = self.enemies.level();
        self.state
            .score
            .update_time_score(self.clock.elapsed_secs(), level);
        self.ui.update_game_score(self.state.score.total());
    }

    // Advances an active flight and applies the completion side
    // effects.
    fn update_transition(&mut self) {
        if !self.state.transition.is_active() {
            return;
        }

        let mut position = self.player.position();
        let progress = self.state.transition.advance(&mut position);
        self.player.set_position(position);

        match progress {
            FlightProgress::InFlight => {}
            FlightProgress::ReachedPlay => self.begin_play(),
            FlightProgress::ReachedTitle => self.arrive_at_title(),
        }
    }

    // Descent finished: the session starts now.
    fn begin_play(&mut self) {
        info!("Reached play altitude, session starting");

        self.state.phase = GamePhase::Playing;
        self.state.score.begin_session(self.clock.elapsed_secs());

        self.player.enable();
        self.enemies.start();
        self.ui.show_hud();
    }

    // Ascent finished: park at the title screen.
    fn arrive_at_title(&mut self) {
        info!("Reached title altitude");

        self.state.phase = GamePhase::AtTitle;

        self.ui.show_title();
        self.pointer.release();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
