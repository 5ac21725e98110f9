//! Background star catalog (Tycho-2 style CSV export)

use crate::error::FeedError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use svis_core::Vec3;
use tracing::{info, warn};

/// Zero-based CSV columns holding magnitude, RA and DEC
const MAG_COLUMN: usize = 2;
const RA_COLUMN: usize = 3;
const DEC_COLUMN: usize = 4;

/// A star at effectively infinite distance
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarfieldEntry {
    pub magnitude: f64,
    /// Right ascension in degrees [0, 360)
    pub ra_deg: f64,
    /// Declination in degrees [-90, 90]
    pub dec_deg: f64,
}

impl StarfieldEntry {
    /// Unit direction in the equatorial J2000 frame
    pub fn direction(&self) -> Vec3 {
        Vec3::from_spherical_degrees(self.ra_deg, self.dec_deg)
    }
}

/// Star catalog container, entries in file order
#[derive(Clone, Debug, Default)]
pub struct StarCatalog {
    stars: Vec<StarfieldEntry>,
}

impl StarCatalog {
    /// Load from CSV with a header row. Rows with missing or non-numeric
    /// magnitude/RA/DEC columns are skipped.
    pub fn load_csv(path: &Path) -> Result<Self, FeedError> {
        info!("Loading star catalog from {:?}", path);

        let catalog_err = |source| FeedError::Catalog { path: path.to_path_buf(), source };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(catalog_err)?;

        if reader.headers().map_err(catalog_err)?.is_empty() {
            return Err(FeedError::Empty { path: path.to_path_buf() });
        }

        let mut stars = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(row = row + 2, error = %e, "skipping unreadable catalog row");
                    continue;
                }
            };
            match parse_record(&record) {
                Some(star) => stars.push(star),
                None => warn!(row = row + 2, "skipping malformed catalog row"),
            }
        }

        info!("Loaded {} stars", stars.len());
        Ok(Self { stars })
    }

    pub fn from_entries(stars: Vec<StarfieldEntry>) -> Self {
        Self { stars }
    }

    pub fn len(&self) -> usize { self.stars.len() }
    pub fn is_empty(&self) -> bool { self.stars.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &StarfieldEntry> { self.stars.iter() }

    /// Stars at or brighter than `max_mag`
    pub fn brighter_than(&self, max_mag: f64) -> impl Iterator<Item = &StarfieldEntry> {
        self.stars.iter().filter(move |s| s.magnitude <= max_mag)
    }
}

fn parse_record(record: &csv::StringRecord) -> Option<StarfieldEntry> {
    let field = |idx: usize| record.get(idx)?.trim().parse::<f64>().ok();
    Some(StarfieldEntry {
        magnitude: field(MAG_COLUMN)?,
        ra_deg: field(RA_COLUMN)?,
        dec_deg: field(DEC_COLUMN)?,
    })
}
