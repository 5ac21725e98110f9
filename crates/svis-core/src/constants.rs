/// Astronomical unit in kilometres
pub const AU_KM: f64 = 149_597_870.7;

/// Gravitational parameter of the Sun (km³/s²)
pub const MU_SUN: f64 = 1.327_124_400_419_393_8e11;

/// Obliquity of the ecliptic at J2000 (degrees)
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_1;

/// Semi-major axis reported for near-parabolic orbits instead of an unbounded value (km)
pub const PARABOLIC_SMA_SENTINEL: f64 = 999_999.0;

/// Mean anomaly reported when it is undefined (parabolic orbit)
pub const UNDEFINED_MEAN_ANOMALY: f64 = -1.0;

/// Orbits closer to parabolic than this are treated as parabolic
pub const PARABOLIC_TOLERANCE: f64 = 1e-8;

/// Samples per revolution when drawing an orbit curve
pub const DEFAULT_ORBIT_SAMPLES: usize = 720;
