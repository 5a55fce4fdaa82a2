//! Trainer Constants
//!
//! Fixed layout and presentation values. Anything a player might want to
//! re-balance lives in the RON tuning table instead (see `tuning.rs`).

// ============================================================================
// Arena
// ============================================================================

/// Logical play-area width in world units (one unit = one pixel of the
/// reference layout).
pub const ARENA_WIDTH: f32 = 1600.0;

/// Logical play-area height in world units.
pub const ARENA_HEIGHT: f32 = 900.0;

/// Player spawn point as a fraction of the arena size.
pub const PLAYER_SPAWN_FRACTION: (f32, f32) = (0.3, 0.5);

/// Champion/dummy spawn point as a fraction of the arena size.
pub const CHAMPION_SPAWN_FRACTION: (f32, f32) = (0.7, 0.5);

/// Attack range the game client measures everything against. All "game unit"
/// values in the tuning table are converted to world units with
/// `attack_range / REFERENCE_ATTACK_RANGE`.
pub const REFERENCE_ATTACK_RANGE: f32 = 525.0;

// ============================================================================
// Units
// ============================================================================

pub const PLAYER_RADIUS: f32 = 25.0;
pub const CHAMPION_RADIUS: f32 = 35.0;
pub const MINION_RADIUS: f32 = 18.0;

pub const CHAMPION_HEALTH: f32 = 10_000.0;
pub const MELEE_MINION_HEALTH: f32 = 465.0;
pub const CASTER_MINION_HEALTH: f32 = 284.0;

/// Minions per formation row.
pub const MINIONS_PER_ROW: usize = 3;

/// Melee row sits this far in front of the champion (towards the player).
pub const MELEE_ROW_OFFSET_X: f32 = -200.0;

/// Caster row sits behind the melee row.
pub const CASTER_ROW_OFFSET_X: f32 = -120.0;

/// Vertical spacing between minions of the same row.
pub const MINION_ROW_SPACING: f32 = 60.0;

/// Caster row is shifted down relative to the melee row.
pub const CASTER_ROW_OFFSET_Y: f32 = 80.0;

// ============================================================================
// Movement
// ============================================================================

/// A walking actor closer than this to its destination stops.
pub const ARRIVAL_THRESHOLD: f32 = 5.0;

// ============================================================================
// Clock
// ============================================================================

/// Largest frame delta the simulation accepts. Longer frames (a backgrounded
/// window, a debugger pause) are truncated to this.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Longest single integration step. A frame is split into equal sub-steps no
/// longer than this so fast bolts cannot skip over a minion.
pub const MAX_SUBSTEP: f32 = 1.0 / 60.0;

// ============================================================================
// Floating combat text
// ============================================================================

pub const FCT_LIFETIME: f32 = 0.8;

/// Upward drift in world units per second (negative y is up on screen).
pub const FCT_DRIFT_SPEED: f32 = -30.0;

/// Vertical offsets above a unit for the different label families.
pub const FCT_DAMAGE_OFFSET: f32 = -30.0;
pub const FCT_NOTICE_OFFSET: f32 = -40.0;
pub const FCT_DASH_OFFSET: f32 = -45.0;
pub const FCT_CAST_OFFSET: f32 = -50.0;
pub const FCT_ALERT_OFFSET: f32 = -60.0;

// ============================================================================
// Colours (sRGB)
// ============================================================================

pub const TEXT_GOLD: [u8; 3] = [0xfb, 0xbf, 0x24];
pub const TEXT_RED: [u8; 3] = [0xef, 0x44, 0x44];
pub const TEXT_SOFT_RED: [u8; 3] = [0xf8, 0x71, 0x71];
pub const TEXT_SLATE: [u8; 3] = [0x94, 0xa3, 0xb8];
pub const TEXT_SKY: [u8; 3] = [0x38, 0xbd, 0xf8];
pub const TEXT_GREEN: [u8; 3] = [0x34, 0xd3, 0x99];
