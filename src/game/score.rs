//=========================================================================
// Score Board
//=========================================================================
//
// Two-part session score: a time component recomputed every frame from
// absolute elapsed play time, and an objective component accumulated
// from discrete achievements (kills). Both scale with the enemy
// difficulty level, rewarding sustained play as the difficulty ramps.
//
// The time component is recomputed from `start_time` rather than by
// accumulating per-frame deltas, so frame-rate variance cannot drift
// the score.
//
//=========================================================================

//=== Tuning Constants ====================================================

/// Time-score points per second of play at level 0.
pub const TIME_SCORE_RATE: f64 = 123.0;

//=== ScoreBoard ==========================================================

/// Session score state.
///
/// Values are meaningful only while a session is running; they are
/// frozen into the title display at game over and reset by
/// [`begin_session`](ScoreBoard::begin_session) when the next session
/// starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBoard {
    time_score: f64,
    objective_score: f64,
    start_time: f64,
}

impl ScoreBoard {
    //--- Construction -----------------------------------------------------

    /// Creates a zeroed score board.
    pub fn new() -> Self {
        Self {
            time_score: 0.0,
            objective_score: 0.0,
            start_time: 0.0,
        }
    }

    //--- Session Lifecycle ------------------------------------------------

    /// Starts a new session: zeroes both components and records the
    /// session's clock origin.
    pub fn begin_session(&mut self, now_secs: f64) {
        self.time_score = 0.0;
        self.objective_score = 0.0;
        self.start_time = now_secs;
    }

    //--- Accumulation -----------------------------------------------------

    /// Recomputes the time component from absolute elapsed play time.
    pub fn update_time_score(&mut self, now_secs: f64, level: u32) {
        let elapsed = now_secs - self.start_time;
        self.time_score = TIME_SCORE_RATE * elapsed * f64::from(level + 1);
    }

    /// Adds a level-scaled achievement award to the objective component.
    ///
    /// `amount` is non-negative by the callers' contract; no bound is
    /// enforced here.
    pub fn add_objective(&mut self, amount: f64, level: u32) {
        self.objective_score += amount * f64::from(level + 1);
    }

    //--- Accessors --------------------------------------------------------

    /// Time component of the score.
    pub fn time_score(&self) -> f64 {
        self.time_score
    }

    /// Objective (achievement) component of the score.
    pub fn objective_score(&self) -> f64 {
        self.objective_score
    }

    /// Clock reading captured when the session began, in seconds.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Displayed total: time plus objective components.
    pub fn total(&self) -> f64 {
        self.time_score + self.objective_score
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
