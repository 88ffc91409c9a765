/// Points for a regulation win (both point systems)
pub const WIN_POINTS: u32 = 3;

/// Points for each side of a tied game (simple system)
pub const TIE_POINTS: u32 = 1;

/// Points for an overtime win (three-point overtime system)
pub const OVERTIME_WIN_POINTS: u32 = 2;

/// Points for an overtime loss (three-point overtime system)
pub const OVERTIME_LOSS_POINTS: u32 = 1;

/// Probability that the home side wins a decided game
pub const HOME_WIN_SHARE: f64 = 0.5;

/// Bits of precision in one uniform draw, matching an f64 mantissa
pub const UNIFORM_BITS: u32 = 53;

/// Decimal places of emitted percentages
pub const PERCENT_SCALE: i64 = 2;

/// Selector for the simple win/tie/loss system
pub const SIMPLE_SELECTOR: &str = "f";

/// Selector for the three-point overtime system
pub const THREE_POINT_OVERTIME_SELECTOR: &str = "3ph";

/// 2^53, the number of distinct uniform draws
pub fn uniform_range() -> u64 {
    1u64 << UNIFORM_BITS
}
