//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the game thread via channels.
//
// Architecture:
// ```text
//  Main Thread:                     Game Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  GameLoop        │
//  │   ├─ click → Start       │    │   ├─ handle_event│
//  │   ├─ close → WindowClosed│    │   └─ tick @ TPS  │
//  │   ↓                      │    └──────────────────┘
//  │  GameEvent channel ──────┼──────────▲   │
//  │                          │              │ PointerCommand
//  │  pointer lock/release ◄──┼──────────────┘ (frame boundary)
//  └──────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Direct input mapping**: the start control is a left click; there
//   is no input-mapping subsystem between Winit and the game. Gameplay
//   input (aiming, shooting) belongs to the application's own systems.
// - **Pointer commands at the frame boundary**: the game thread cannot
//   touch the window, so capture/release requests cross back over a
//   channel and are applied on `RedrawRequested`.
// - **Graceful channel disconnect**: if the game thread dies, the
//   platform logs and keeps running so the user can close the window.
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Runtime::run()`.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::game::GameEvent;

//=== PointerCommand ======================================================

/// Pointer-capture requests sent from the game thread to the platform.
///
/// Applied at the next frame boundary. Capture failure (e.g. the
/// window manager refusing the grab) is logged and dropped; the game
/// carries on either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointerCommand {
    /// Lock the pointer to the window and hide the cursor.
    Capture,

    /// Release the pointer and show the cursor.
    Release,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal - if the event loop can't be created,
/// the runtime cannot run.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Platform ============================================================

/// Window manager and event bridge.
///
/// Runs on the main thread (Winit requirement on macOS/iOS), forwards
/// the start input and shutdown to the game thread, and executes
/// pointer commands coming back the other way.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(events, commands)`
/// 2. **Execution**: `platform.run()` - starts event loop (never
///    returns normally)
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: user closes window → sends `WindowClosed` → exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Channel to send events to the game thread.
    event_sender: Sender<GameEvent>,

    /// Pointer commands queued by the game thread.
    command_receiver: Receiver<PointerCommand>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance over the given channels.
    ///
    /// Does not create the window yet - that happens lazily in
    /// `resumed()`.
    pub fn new(event_sender: Sender<GameEvent>, command_receiver: Receiver<PointerCommand>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            event_sender,
            command_receiver,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop (never returns normally).
    ///
    /// Blocks until the window closes. Only returns early if event
    /// loop creation fails.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created
    /// or aborts.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit
    /// requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Forwards a game event, logging instead of panicking if the game
    /// thread is gone.
    fn send_event(&self, event: GameEvent) {
        if self.event_sender.send(event.clone()).is_err() {
            warn!(target: "platform", "Channel disconnected, dropping {:?}", event);
        }
    }

    /// Executes all queued pointer commands against the window.
    ///
    /// Capture tries `Locked` first and falls back to `Confined` for
    /// window managers without true pointer lock. Failure of either is
    /// a collaborator concern: logged and otherwise ignored.
    fn apply_pointer_commands(&mut self) {
        while let Ok(command) = self.command_receiver.try_recv() {
            let Some(window) = &self.window else {
                warn!(target: "platform", "Pointer command {:?} before window creation", command);
                continue;
            };

            match command {
                PointerCommand::Capture => {
                    let grabbed = window
                        .set_cursor_grab(CursorGrabMode::Locked)
                        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
                    match grabbed {
                        Ok(()) => {
                            trace!(target: "platform", "Pointer captured");
                            window.set_cursor_visible(false);
                        }
                        Err(e) => warn!(target: "platform", "Pointer capture refused: {}", e),
                    }
                }
                PointerCommand::Release => {
                    if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                        warn!(target: "platform", "Pointer release failed: {}", e);
                    }
                    window.set_cursor_visible(true);
                }
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Neon Descent")
            .with_inner_size(LogicalSize::new(1280, 720));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                // Notify the game thread of the fatal error
                let _ = self.event_sender.send(GameEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send_event(GameEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                trace!(target: "platform", "Start input pressed");
                self.send_event(GameEvent::StartRequested);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: apply pointer state requested by the
                // game thread, then keep the redraw cycle alive.
                self.apply_pointer_commands();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Resized, Focused, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn test_platform() -> (
        Platform,
        Receiver<GameEvent>,
        Sender<PointerCommand>,
    ) {
        let (event_tx, event_rx) = unbounded();
        let (command_tx, command_rx) = unbounded();
        (Platform::new(event_tx, command_rx), event_rx, command_tx)
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (platform, _events, _commands) = test_platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn send_event_forwards_to_game_thread() {
        let (platform, events, _commands) = test_platform();

        platform.send_event(GameEvent::StartRequested);

        assert_eq!(events.try_recv(), Ok(GameEvent::StartRequested));
    }

    #[test]
    fn send_event_handles_disconnected_channel() {
        let (platform, events, _commands) = test_platform();
        drop(events);

        // Should not panic, just log a warning
        platform.send_event(GameEvent::WindowClosed);
    }

    #[test]
    fn pointer_commands_before_window_are_dropped() {
        let (mut platform, _events, commands) = test_platform();

        commands.send(PointerCommand::Capture).unwrap();
        commands.send(PointerCommand::Release).unwrap();

        // No window exists yet; commands must drain without panicking.
        platform.apply_pointer_commands();
        assert!(platform.command_receiver.try_recv().is_err());
    }

    //=====================================================================
    // PointerCommand / PlatformError Tests
    //=====================================================================

    #[test]
    fn pointer_command_is_copy_and_eq() {
        let command = PointerCommand::Capture;
        let copy = command;
        assert_eq!(command, copy);
        assert_ne!(PointerCommand::Capture, PointerCommand::Release);
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn platform_error_display_format() {
        // Note: Hard to construct real EventLoopError without running
        // an event loop. This test validates the trait bounds exist.
        fn assert_display<T: std::fmt::Display>() {}
        assert_display::<PlatformError>();
    }
}
