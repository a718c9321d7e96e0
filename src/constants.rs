//! Engine-wide constants
//!
//! Grouped by subsystem so call sites read as `constants::raycast::EPSILON`.

/// Core world layout
pub mod core {
    /// Default chunk edge length in cells
    pub const CHUNK_SIZE: u32 = 16;

    /// Vertical world limits (inclusive min, exclusive max)
    pub const MIN_BUILD_HEIGHT: i32 = -64;
    pub const MAX_BUILD_HEIGHT: i32 = 320;
}

/// Shape and box comparison tolerances
pub mod geometry {
    /// Tolerance used when comparing shape breakpoints and collision distances
    pub const EPSILON: f64 = 1.0e-7;

    /// Half-extent of the box standing in for "everything" in border shapes
    pub const WORLD_EXTENT: f64 = 3.0e7;
}

/// Ray traversal
pub mod raycast {
    /// Fraction of the segment length used to nudge ray endpoints off cell boundaries
    pub const EPSILON: f64 = 1.0e-7;

    /// Fraction of the segment used to test whether a clip starts inside a shape
    pub const INSIDE_SAMPLE: f64 = 0.001;
}

/// Explosion tuning
pub mod explosion {
    /// Samples per edge of the direction cube
    pub const SHELL_RESOLUTION: u32 = 16;

    /// Distance travelled per ray march step
    pub const STEP_LENGTH: f64 = 0.3;

    /// Energy lost per step independent of block resistance
    pub const STEP_DECAY: f32 = 0.225_000_01;

    /// Energy a resisting cell absorbs per step is `(resistance + BIAS) * SCALE`
    pub const RESISTANCE_BIAS: f32 = 0.3;
    pub const RESISTANCE_SCALE: f32 = 0.3;

    /// Damage at full impact per block of blast diameter
    pub const DAMAGE_SCALE: f64 = 7.0;

    /// Per-ray energy multiplier range
    pub const JITTER_MIN: f32 = 0.7;
    pub const JITTER_RANGE: f32 = 0.6;

    /// Cap applied when merging dropped items into one entry
    pub const DROP_STACK_CAP: u32 = 16;

    /// One in N destroyed cells catches fire
    pub const FIRE_CHANCE: u32 = 3;
}
