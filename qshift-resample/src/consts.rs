/// Pair scores are capped at this value before the densities are evaluated.
pub const MAX_ERROR_PROBABILITY: f64 = 50.0;

/// Accepted pairs between two progress checkpoints.
pub const CHECKPOINT_INTERVAL: u64 = 100_000;

pub const DEFAULT_DOWNSAMPLE_FRACTION: f64 = 1.0;

/// Pairs between two spinner updates.
pub const PROGRESS_INTERVAL: u64 = 10_000;
