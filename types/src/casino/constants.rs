/// Basis points in a 1.0x multiplier
pub const BASIS_POINTS: u64 = 10_000;

/// Cards in a standard deck
pub const DECK_SIZE: usize = 52;

/// Ranks per suit
pub const RANKS_PER_SUIT: u8 = 13;

/// Pockets on a single-zero wheel (0-36)
pub const EUROPEAN_POCKETS: u8 = 37;

/// Pockets on a double-zero wheel (0-36 plus 00)
pub const AMERICAN_POCKETS: u8 = 38;

/// Index used for the "00" pocket on a double-zero wheel
pub const DOUBLE_ZERO: u8 = 37;

/// Numbers in the Keno pool (1-80)
pub const KENO_POOL: u8 = 80;

/// Picks a Keno ticket must carry
pub const KENO_PICKS: usize = 10;

/// Numbers called per Keno round
pub const KENO_CALLS: u8 = 20;

/// Numbers in the Bingo pool (1-75)
pub const BINGO_POOL: u8 = 75;

/// Side length of a Bingo card
pub const BINGO_SIDE: usize = 5;

/// Side length of the default Mines grid (5x5)
pub const MINES_GRID_SIDE: u8 = 5;

/// Largest Mines grid side accepted by configuration (8x8 = 64 cells)
pub const MAX_MINES_GRID_SIDE: u8 = 8;

/// Rows of pegs on the Plinko board
pub const PLINKO_ROWS: usize = 8;

/// Buckets at the bottom of the Plinko board
pub const PLINKO_BUCKETS: usize = 9;

/// Smallest Limbo target (1.01x) in basis points
pub const LIMBO_MIN_TARGET: u64 = 10_100;

/// Largest Limbo target (10 000x) in basis points
pub const LIMBO_MAX_TARGET: u64 = 10_000 * BASIS_POINTS;

/// Time for the Limbo curve to reach its target
pub const LIMBO_RISE_MS: u64 = 3_000;

/// Default scheduler tick for curve games and call loops
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
