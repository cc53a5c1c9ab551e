//=========================================================================
// Neon Descent — Library Root
//
// This crate defines the public API surface of the Neon Descent
// runtime: the game loop of a first-person arena game, from title
// screen to play and back.
//
// Responsibilities:
// - Expose the game core (`GameLoop`, its state, and the collaborator
//   contracts the application implements)
// - Expose the runtime entry point (`Runtime`) that hosts the loop on
//   a fixed-TPS thread behind a window
// - Keep internal modules (like `platform`) hidden from end users
//
// Typical usage:
// ```text
// RuntimeBuilder::new().build().run(|handles| {
//     GameLoop::new(GameSystems { pointer: handles.pointer, /* … */ })
// });
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `game` contains the logical core: the phase machine, the flight
// transition, scoring, and the contracts for every service the loop
// drives. It is the crate's testable heart and carries no OS or
// windowing dependencies.
//
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration,
// pointer capture) and is kept private, as it is not part of the
// public API surface.
//
// `runtime` defines the main entry point and thread wiring; its types
// are re-exported below.
//
mod platform;
mod runtime;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the runtime types as the main entry point for
// applications, so users can simply `use neon_descent::Runtime;`
// without having to know the internal module structure.
//
pub use runtime::{Runtime, RuntimeBuilder, RuntimeHandles};
