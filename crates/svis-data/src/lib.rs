//! External inputs of the map renderer: the tracked-body state vector feed,
//! the background star catalog and the Sun/planet ephemerides.

pub mod ephemeris;
pub mod error;
pub mod stars;
pub mod state_vectors;

pub use ephemeris::{open_ephemeris, AnalyticEphemeris, BodyState, EphemerisKind, EphemerisSource};
#[cfg(feature = "spk")]
pub use ephemeris::SpkEphemeris;
pub use error::{EphemerisError, FeedError};
pub use stars::{StarCatalog, StarfieldEntry};
pub use state_vectors::{load_state_vectors, parse_state_vectors, TrackedState};
