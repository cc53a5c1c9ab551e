//=========================================================================
// Flight Transition
//=========================================================================
//
// Scripted vertical camera flight between the title-screen altitude and
// the play altitude.
//
// The motion is an accelerating ease-in: every frame the position moves
// `speed` units along the flight direction, then `speed` grows by a
// fixed per-frame acceleration. Completion is detected with a strict
// threshold check against the sign-appropriate altitude only (a
// descent never tests the title threshold and vice versa), and the
// altitude snaps exactly onto the threshold when crossed.
//
// The machine is pure data plus a step function. It reports what
// happened via [`FlightProgress`] and leaves all side effects (player
// enablement, HUD, enemy spawning) to the owner.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Tuning Constants ====================================================

/// Flight speed at the moment a transition starts, in units per frame.
pub const BASE_FLIGHT_SPEED: f32 = 1.0;

/// Per-frame speed increase while a transition is active.
pub const FLIGHT_ACCELERATION: f32 = 0.1;

/// Altitude of the player while in play.
pub const PLAY_ALTITUDE: f32 = 15.0;

/// Altitude of the camera while on the title screen.
pub const TITLE_ALTITUDE: f32 = 1000.0;

//=== FlightDirection =====================================================

/// Which way an active flight is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightDirection {
    /// Title altitude down to play altitude.
    Descending,

    /// Play altitude up to title altitude.
    Ascending,
}

impl FlightDirection {
    /// Unit world-space vector for this direction.
    pub fn vector(self) -> Vec3 {
        match self {
            Self::Descending => Vec3::NEG_Y,
            Self::Ascending => Vec3::Y,
        }
    }
}

//=== FlightProgress ======================================================

/// Outcome of advancing the flight by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightProgress {
    /// Still between thresholds; keep flying next frame.
    InFlight,

    /// Crossed below the play altitude; position snapped onto it.
    ReachedPlay,

    /// Crossed above the title altitude; position snapped onto it.
    ReachedTitle,
}

//=== FlightTransition ====================================================

/// State of the title ↔ play camera flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTransition {
    active: bool,
    speed: f32,
    direction: FlightDirection,
}

impl FlightTransition {
    //--- Construction -----------------------------------------------------

    /// Creates an inactive transition, parked at the title screen.
    pub fn new() -> Self {
        Self {
            active: false,
            speed: BASE_FLIGHT_SPEED,
            direction: FlightDirection::Descending,
        }
    }

    //--- Control ----------------------------------------------------------

    /// Starts (or restarts) a flight in the given direction.
    ///
    /// Speed always resets to [`BASE_FLIGHT_SPEED`]; re-triggering while
    /// a flight is active simply overwrites its speed and direction.
    pub fn begin(&mut self, direction: FlightDirection) {
        self.active = true;
        self.speed = BASE_FLIGHT_SPEED;
        self.direction = direction;
    }

    //--- Per-Frame Step ---------------------------------------------------

    /// Advances the flight by one frame, moving `position` in place.
    ///
    /// Does nothing when no flight is active. On completion the
    /// transition deactivates and `position.y` is snapped exactly onto
    /// the crossed threshold.
    pub fn advance(&mut self, position: &mut Vec3) -> FlightProgress {
        if !self.active {
            return FlightProgress::InFlight;
        }

        *position += self.direction.vector() * self.speed;
        self.speed += FLIGHT_ACCELERATION;

        // Only the threshold matching the flight direction is checked,
        // strictly: a descent that starts above the title altitude must
        // not complete as an ascent.
        match self.direction {
            FlightDirection::Descending if position.y < PLAY_ALTITUDE => {
                self.active = false;
                position.y = PLAY_ALTITUDE;
                FlightProgress::ReachedPlay
            }
            FlightDirection::Ascending if position.y > TITLE_ALTITUDE => {
                self.active = false;
                position.y = TITLE_ALTITUDE;
                FlightProgress::ReachedTitle
            }
            _ => FlightProgress::InFlight,
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Whether a flight is currently in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current flight speed in units per frame.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Direction of the current (or most recent) flight.
    pub fn direction(&self) -> FlightDirection {
        self.direction
    }
}

impl Default for FlightTransition {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
