// --- File: constants.rs ---
// --- Global Simulation Constants ---

// --- Tank defaults (logical units) ---
pub const DEFAULT_TANK_WIDTH: f32 = 500.0;
pub const DEFAULT_TANK_HEIGHT: f32 = 300.0;
pub const DEFAULT_SAND_HEIGHT: f32 = 20.0;
pub const DEFAULT_WATER_QUALITY: f32 = 0.0;

// Presentation layer ticks at roughly this cadence; the core never sleeps on it.
pub const DEFAULT_TICK_SECONDS: f32 = 0.016;

pub const INITIAL_TIME_SCALE: f32 = 1.0;
pub const MIN_TIME_SCALE: f32 = 0.0;
pub const MAX_TIME_SCALE: f32 = 3600.0;
pub const TIME_SCALE_ADJUST_FACTOR: f32 = 2.0;

// --- Feeding ---
pub const EATING_RADIUS: f32 = 3.0;
pub const FULLNESS_PER_FOOD: f64 = 0.1;
/// Above this fullness a creature ignores food entirely.
pub const SATIATION_THRESHOLD: f64 = 0.9;

pub const FOOD_LIFETIME_SECS: f32 = 60.0;
pub const FOOD_SINK_SPEED: f32 = 10.0;

// --- Physiology calibration ---
pub const SECONDS_PER_HOUR: f64 = 60.0 * 60.0;
pub const SECONDS_PER_DAY: f64 = SECONDS_PER_HOUR * 24.0;
pub const SECONDS_PER_YEAR: f64 = SECONDS_PER_DAY * 365.0;

/// Water quality / fullness at which health neither drains nor heals.
pub const HEALTH_NEUTRAL_LEVEL: f64 = 0.7;

/// Fullness 1 -> 0 in one day without food.
pub const HUNGER_RATE: f64 = 1.0 / SECONDS_PER_DAY;
/// Water quality 0 drains health 1 -> 0 in one day.
pub const WATER_HEALTH_RATE: f64 = 1.0 / (HEALTH_NEUTRAL_LEVEL * SECONDS_PER_DAY);
/// Fullness 0 drains health 1 -> 0 in seven days.
pub const STARVATION_HEALTH_RATE: f64 = 1.0 / (HEALTH_NEUTRAL_LEVEL * SECONDS_PER_DAY * 7.0);
/// A threat of twice our area at zero distance drains health 1 -> 0 in thirty minutes.
pub const THREAT_HEALTH_RATE: f64 = 1.0 / (SECONDS_PER_HOUR * 0.5);
/// Distance burden falls to zero at this many threat body widths.
pub const THREAT_BURDEN_WIDTHS: f32 = 2.0;

// --- Cruising ---
/// Vertical jitter amplitude as a fraction of cruising speed.
pub const CRUISE_JITTER_FRACTION: f32 = 1.0 / 3.0;
/// Downward velocity reflected off the sand keeps this fraction of its magnitude.
pub const SAND_BOUNCE_DAMPING: f32 = 0.25;

// Below this squared length a vector is treated as zero.
pub const VECTOR_EPSILON_SQ: f32 = 1e-12;

// --- End of File: constants.rs ---
