/// Scaling applied to the `P·A·G` product before it enters the linear model.
pub const LINEAR_FEATURE_SCALE: f64 = 100_000.0;

/// Upper position used by the estimator when no upper bound is cached.
pub const DEFAULT_UPPER_POSITION: f64 = 100.0;

/// Lower position used by the estimator when no lower bound is cached.
pub const DEFAULT_LOWER_POSITION: f64 = 0.0;

/// Gas aperture at controller start (valve closed).
pub const INITIAL_GAS_APERTURE: f64 = 0.0;
