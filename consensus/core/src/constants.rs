/// The only transaction version produced by the builders.
pub const TX_VERSION: u16 = 0;

/// Number of sompi in one KAS.
pub const SOMPI_PER_KASPA: u64 = 100_000_000;

/// Upper bound on any amount of sompi.
pub const MAX_SOMPI: u64 = 29_000_000_000 * SOMPI_PER_KASPA;

/// Sequence used for every input; relative time locks are not used.
pub const DEFAULT_SEQUENCE: u64 = 0;

/// Each standard signature script performs exactly one signature check.
pub const STANDARD_SIG_OP_COUNT: u8 = 1;
