//! Tracked-body state vector feed
//!
//! Plain text: free-form header up to the first line containing `*`, then one
//! row per sample until the next `*` line:
//!
//! ```text
//! JD  UTC  x y z  vx vy vz
//! ```
//!
//! Positions in km, velocities in km/s, heliocentric equatorial J2000.

use crate::error::FeedError;
use hifitime::Epoch;
use std::path::Path;
use std::str::FromStr;
use svis_core::Vec3;
use tracing::{debug, info, warn};

/// One sample of the tracked body
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedState {
    pub julian_date: f64,
    /// UTC token as it appears in the feed, used for labels and file names
    pub timestamp: String,
    pub epoch: Epoch,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl TrackedState {
    /// Timestamp with `:` replaced so it is safe in a file name
    pub fn file_stem(&self) -> String {
        self.timestamp.replace(':', "_")
    }
}

fn parse_row(line: &str) -> Option<TrackedState> {
    let mut fields = line.split_whitespace();
    let julian_date = fields.next()?.parse::<f64>().ok()?;
    let timestamp = fields.next()?.to_string();

    let mut values = [0.0; 6];
    for v in values.iter_mut() {
        *v = fields.next()?.parse::<f64>().ok()?;
    }

    let epoch = match Epoch::from_str(&timestamp) {
        Ok(epoch) => epoch,
        Err(e) => {
            debug!(%timestamp, error = %e, "unparsed UTC token, using the Julian date");
            Epoch::from_jde_utc(julian_date)
        }
    };

    Some(TrackedState {
        julian_date,
        timestamp,
        epoch,
        position: Vec3::from_cartesian(values[0], values[1], values[2]),
        velocity: Vec3::from_cartesian(values[3], values[4], values[5]),
    })
}

/// Parse the feed text. Rows that do not parse are skipped with a warning.
pub fn parse_state_vectors(text: &str) -> Vec<TrackedState> {
    let mut lines = text.lines();

    // Header runs up to and including the first '*' line
    for line in lines.by_ref() {
        if line.contains('*') {
            break;
        }
    }

    let mut states = Vec::new();
    for line in lines {
        if line.contains('*') {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(state) => states.push(state),
            None => warn!(line, "skipping bad state vector row"),
        }
    }
    states
}

/// Read and parse a state vector file
pub fn load_state_vectors(path: &Path) -> Result<Vec<TrackedState>, FeedError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| FeedError::Unreadable { path: path.to_path_buf(), source })?;
    let states = parse_state_vectors(&text);
    info!("Loaded {} state vectors from {:?}", states.len(), path);
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
Ephemeris header
  some description
$$SOE *******
2460310.5 2024-01-01T00:00:00 1.0e8 2.0e7 -3.0e6 -5.1 28.0 1.2
2460311.5 2024-01-02T00:00:00 1.1e8 2.1e7 -3.1e6 -5.2 27.9 1.1
this row is broken
2460312.5 2024-01-03T00:00:00 1.2e8 2.2e7
2460313.5 2024-01-04T00:00:00 1.3e8 2.3e7 -3.3e6 -5.4 27.7 0.9
$$EOE *******
2460314.5 2024-01-05T00:00:00 1.4e8 2.4e7 -3.4e6 -5.5 27.6 0.8
";

    #[test]
    fn test_rows_between_markers_are_read() {
        let states = parse_state_vectors(FEED);
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].timestamp, "2024-01-01T00:00:00");
        assert_eq!(states[0].position, Vec3::from_cartesian(1.0e8, 2.0e7, -3.0e6));
        assert_eq!(states[2].velocity, Vec3::from_cartesian(-5.4, 27.7, 0.9));
    }

    #[test]
    fn test_epoch_comes_from_utc_token() {
        let states = parse_state_vectors(FEED);
        let expected = Epoch::from_gregorian_utc_at_midnight(2024, 1, 2);
        assert_eq!(states[1].epoch, expected);
    }

    #[test]
    fn test_unparsable_timestamp_falls_back_to_julian_date() {
        let feed = "*\n2451545.0 2000-Jan-01_12:00 1 2 3 4 5 6\n";
        let states = parse_state_vectors(feed);
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].epoch, Epoch::from_jde_utc(2451545.0));
    }

    #[test]
    fn test_file_stem_replaces_colons() {
        let states = parse_state_vectors(FEED);
        assert_eq!(states[0].file_stem(), "2024-01-01T00_00_00");
    }

    #[test]
    fn test_no_marker_means_no_rows() {
        assert!(parse_state_vectors("2460310.5 2024-01-01T00:00:00 1 2 3 4 5 6\n").is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_state_vectors(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, FeedError::Unreadable { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state_vectors.txt");
        std::fs::write(&path, FEED).unwrap();
        assert_eq!(load_state_vectors(&path).unwrap().len(), 3);
    }
}
