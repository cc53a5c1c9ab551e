//=========================================================================
// Runtime
//
// Main entry point and coordinator for the game runtime.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──run(init)──>  [Running]
//         │                           │
//         ├─ with_tps()               ├─ spawns game thread @ TPS
//         └─ with_channel_capacity()  └─ runs platform event loop
//                                        blocks until window close
// ```
//
// The game thread owns the [`GameLoop`]; the platform stays on the
// calling thread (a Winit requirement). They communicate only over
// channels: game events one way, pointer commands the other. Ticks on
// the game thread are strictly sequential - queued events are drained
// and dispatched between ticks, never during one.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::game::interface::PointerPort;
use crate::game::{GameEvent, GameLoop};
use crate::platform::{Platform, PointerCommand};

//=== TickControl =========================================================
//
// Defines control flow for the game update loop. Each tick can signal
// either to continue or terminate the loop.
//
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// Provides a fluent API for setting runtime parameters before
/// construction.
///
/// # Default Values
///
/// - **TPS**: 60.0 (game ticks per second)
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use neon_descent::RuntimeBuilder;
///
/// let runtime = RuntimeBuilder::new()
///     .with_tps(120.0)              // High refresh rate
///     .with_channel_capacity(256)   // Extra buffering
///     .build();
/// ```
pub struct RuntimeBuilder {
    tps: f64,
    channel_capacity: usize,
}

impl RuntimeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }

    /// Sets the target ticks per second for the game thread.
    ///
    /// The game thread will attempt to maintain this update rate using
    /// a fixed timestep loop. Higher values provide more responsive
    /// transitions, but increase CPU usage.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → game communication.
    ///
    /// Larger values provide more buffering during frame spikes but
    /// increase memory usage.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the runtime instance.
    pub fn build(self) -> Runtime {
        info!(
            "Building runtime (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );

        Runtime {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== RuntimeHandles ======================================================

/// Wiring handed to the application's init closure.
///
/// `pointer` goes into the [`GameSystems`](crate::game::GameSystems)
/// set; `events` can be cloned into any system that needs to post
/// [`GameEvent`]s (enemy kills, player destruction) to the game thread.
pub struct RuntimeHandles {
    /// Pointer capture port, forwarding to the platform window.
    pub pointer: Box<dyn PointerPort>,

    /// Producer side of the game event channel.
    pub events: Sender<GameEvent>,
}

//=== ChannelPointer ======================================================

// Runtime-provided [`PointerPort`] that forwards over the command
// channel to the platform thread.
struct ChannelPointer {
    commands: Sender<PointerCommand>,
}

impl PointerPort for ChannelPointer {
    fn capture(&mut self) {
        if self.commands.send(PointerCommand::Capture).is_err() {
            warn!("Platform gone, dropping pointer capture");
        }
    }

    fn release(&mut self) {
        if self.commands.send(PointerCommand::Release).is_err() {
            warn!("Platform gone, dropping pointer release");
        }
    }
}

//=== Runtime =============================================================

/// Game runtime: a fixed-TPS game thread plus the platform event loop.
///
/// Create via [`RuntimeBuilder`]. [`Runtime::run`] takes an init
/// closure that assembles the [`GameLoop`] from the application's
/// systems; the closure executes on the game thread, so the loop never
/// crosses threads after construction.
pub struct Runtime {
    tps: f64,
    channel_capacity: usize,
}

impl Runtime {
    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → game event channel and the game →
    ///    platform pointer command channel
    /// 2. Spawns the game thread, which builds the [`GameLoop`] via
    ///    `init` and ticks it at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → game thread terminates →
    ///    both joined
    ///
    /// # Thread Panic Handling
    ///
    /// If the game thread panics, the error is logged and the runtime
    /// still shuts down cleanly.
    pub fn run<F>(self, init: F)
    where
        F: FnOnce(RuntimeHandles) -> GameLoop + Send + 'static,
    {
        info!("Starting runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels -----------------------------
        let (event_tx, event_rx): (Sender<GameEvent>, Receiver<GameEvent>) =
            bounded(self.channel_capacity);
        let (command_tx, command_rx) = unbounded();

        let handles = RuntimeHandles {
            pointer: Box::new(ChannelPointer {
                commands: command_tx,
            }),
            events: event_tx.clone(),
        };

        //--- 2. Spawn the game thread -------------------------------------
        let game_handle = spawn_game_thread(init, handles, event_rx, self.tps);
        info!("Game thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(event_tx, command_rx);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {:?}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the game thread to terminate ------------
        match game_handle.join() {
            Ok(()) => {
                info!("Game thread terminated cleanly");
            }
            Err(e) => {
                error!("Game thread panicked: {:?}", e);
            }
        }

        info!("Runtime shutdown complete");
    }
}

//=== Game Thread =========================================================
//
// Spawns the thread responsible for ticking the game loop at a fixed
// update frequency (TPS - ticks per second).
//
// Each tick:
//  1. Drains and dispatches queued game events
//  2. Runs one game tick (score → transition → render)
//  3. Sleeps to maintain fixed pacing
//  4. Exits cleanly when the window closes or the channel disconnects
//
fn spawn_game_thread<F>(
    init: F,
    handles: RuntimeHandles,
    receiver: Receiver<GameEvent>,
    tps: f64,
) -> thread::JoinHandle<()>
where
    F: FnOnce(RuntimeHandles) -> GameLoop + Send + 'static,
{
    let tick_duration = Duration::from_secs_f64(1.0 / tps);

    thread::spawn(move || {
        let mut game = init(handles);

        loop {
            let tick_start = Instant::now();

            //--- Step 1: Dispatch queued events ---------------------------
            if let TickControl::Exit = collect_events(&receiver, &mut game, tick_duration) {
                info!("Game thread exiting.");
                break;
            }

            //--- Step 2: Run one tick -------------------------------------
            game.tick();

            //--- Step 3: Maintain deterministic pacing --------------------
            let elapsed = tick_start.elapsed();
            if elapsed < tick_duration {
                thread::sleep(tick_duration - elapsed);
            }
        }
    })
}

//--- collect_events() ----------------------------------------------------
//
// Drains all game events queued since the previous tick and dispatches
// them to the loop's entry points. Returns a TickControl indicating
// whether to continue or exit.
//
pub(crate) fn collect_events(
    receiver: &Receiver<GameEvent>,
    game: &mut GameLoop,
    tick_duration: Duration,
) -> TickControl {
    // Wait for at least one event this tick
    match receiver.recv_timeout(tick_duration) {
        Ok(GameEvent::WindowClosed) => return TickControl::Exit,
        Ok(event) => game.handle_event(event),
        Err(RecvTimeoutError::Disconnected) => return TickControl::Exit,
        Err(RecvTimeoutError::Timeout) => {}
    }

    // Drain additional events queued during this tick
    while let Ok(event) = receiver.try_recv() {
        match event {
            GameEvent::WindowClosed => return TickControl::Exit,
            event => game.handle_event(event),
        }
    }

    TickControl::Continue
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::interface::{AudioOut, EnemyDirector, FrameSink, GameUi, PlayerRig};
    use crate::game::{GameClock, GamePhase, GameSystems};
    use glam::Vec3;

    //--- Null Systems -----------------------------------------------------
    //
    // Inert implementations, enough to build a GameLoop for dispatch
    // tests. Behavior-level coverage lives in the game module.
    //
    struct Null;

    impl PlayerRig for Null {
        fn enable(&mut self) {}
        fn disable(&mut self) {}
        fn position(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn set_position(&mut self, _position: Vec3) {}
    }

    struct NullEnemies(u32);

    impl EnemyDirector for NullEnemies {
        fn start(&mut self) {}
        fn stop(&mut self) {}
        fn level(&self) -> u32 {
            self.0
        }
    }

    impl GameUi for Null {
        fn show_hud(&mut self) {}
        fn hide_hud(&mut self) {}
        fn show_title(&mut self) {}
        fn set_title_score(&mut self, _score: f64) {}
        fn update_game_score(&mut self, _score: f64) {}
    }

    impl FrameSink for Null {
        fn render(&mut self, _delta_secs: f32) {}
    }

    impl AudioOut for Null {
        fn play_start_cue(&mut self) {}
        fn play_end_cue(&mut self) {}
    }

    impl PointerPort for Null {
        fn capture(&mut self) {}
        fn release(&mut self) {}
    }

    impl GameClock for Null {
        fn elapsed_secs(&self) -> f64 {
            0.0
        }
        fn delta_secs(&mut self) -> f32 {
            0.0
        }
    }

    fn null_loop(level: u32) -> GameLoop {
        GameLoop::new(GameSystems {
            clock: Box::new(Null),
            player: Box::new(Null),
            enemies: Box::new(NullEnemies(level)),
            ui: Box::new(Null),
            frames: Box::new(Null),
            audio: Box::new(Null),
            pointer: Box::new(Null),
        })
    }

    const NO_WAIT: Duration = Duration::from_millis(0);

    //=====================================================================
    // RuntimeBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = RuntimeBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_tps() {
        let builder = RuntimeBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        RuntimeBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        RuntimeBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        RuntimeBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let runtime = RuntimeBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .build();

        assert_eq!(runtime.tps, 120.0);
        assert_eq!(runtime.channel_capacity, 256);
    }

    //=====================================================================
    // ChannelPointer Tests
    //=====================================================================

    #[test]
    fn channel_pointer_forwards_commands() {
        let (tx, rx) = unbounded();
        let mut pointer = ChannelPointer { commands: tx };

        pointer.capture();
        pointer.release();

        assert_eq!(rx.try_recv(), Ok(PointerCommand::Capture));
        assert_eq!(rx.try_recv(), Ok(PointerCommand::Release));
    }

    #[test]
    fn channel_pointer_survives_disconnect() {
        let (tx, rx) = unbounded();
        let mut pointer = ChannelPointer { commands: tx };
        drop(rx);

        // Should not panic, just log a warning
        pointer.capture();
        pointer.release();
    }

    //=====================================================================
    // collect_events Tests
    //=====================================================================

    #[test]
    fn collect_exits_on_window_close() {
        let (tx, rx) = unbounded();
        let mut game = null_loop(0);

        tx.send(GameEvent::WindowClosed).unwrap();

        assert!(matches!(
            collect_events(&rx, &mut game, NO_WAIT),
            TickControl::Exit
        ));
    }

    #[test]
    fn collect_exits_on_disconnect() {
        let (tx, rx) = unbounded::<GameEvent>();
        let mut game = null_loop(0);
        drop(tx);

        assert!(matches!(
            collect_events(&rx, &mut game, NO_WAIT),
            TickControl::Exit
        ));
    }

    #[test]
    fn collect_continues_on_timeout() {
        let (_tx, rx) = unbounded::<GameEvent>();
        let mut game = null_loop(0);

        assert!(matches!(
            collect_events(&rx, &mut game, NO_WAIT),
            TickControl::Continue
        ));
    }

    #[test]
    fn collect_dispatches_queued_events() {
        let (tx, rx) = unbounded();
        let mut game = null_loop(2);

        tx.send(GameEvent::EnemyKilled { points: 5.0 }).unwrap();
        tx.send(GameEvent::StartRequested).unwrap();

        assert!(matches!(
            collect_events(&rx, &mut game, NO_WAIT),
            TickControl::Continue
        ));
        assert_eq!(game.score().objective_score(), 15.0);
        assert_eq!(game.phase(), GamePhase::DescendingToPlay);
    }

    #[test]
    fn close_event_stops_dispatch_mid_drain() {
        let (tx, rx) = unbounded();
        let mut game = null_loop(0);

        tx.send(GameEvent::EnemyKilled { points: 1.0 }).unwrap();
        tx.send(GameEvent::WindowClosed).unwrap();
        tx.send(GameEvent::StartRequested).unwrap();

        assert!(matches!(
            collect_events(&rx, &mut game, NO_WAIT),
            TickControl::Exit
        ));
        // The kill before the close was applied, the start after it
        // was not.
        assert_eq!(game.score().objective_score(), 1.0);
        assert_eq!(game.phase(), GamePhase::AtTitle);
    }
}
