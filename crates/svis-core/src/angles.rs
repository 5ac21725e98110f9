//! Angle helpers: wrapping and sexagesimal parsing

use std::f64::consts::TAU;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AngleParseError {
    #[error("invalid angle '{0}': expected decimal degrees or a:b:c sexagesimal")]
    Malformed(String),
    #[error("angle '{0}' out of range")]
    OutOfRange(String),
}

/// Normalize angle to [0, 2π)
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 { a + TAU } else { a }
}

/// Parse a right ascension given either as decimal degrees or as `hh:mm:ss.s`
pub fn parse_ra_deg(text: &str) -> Result<f64, AngleParseError> {
    let text = text.trim();
    if !text.contains(':') {
        return text.parse::<f64>().map_err(|_| AngleParseError::Malformed(text.to_string()));
    }

    let (h, m, s) = split_sexagesimal(text)?;
    if !(0.0..24.0).contains(&h) || !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&s) {
        return Err(AngleParseError::OutOfRange(text.to_string()));
    }
    Ok(15.0 * (h + m / 60.0 + s / 3600.0))
}

/// Parse a declination given either as decimal degrees or as `±dd:mm:ss.s`
pub fn parse_dec_deg(text: &str) -> Result<f64, AngleParseError> {
    let text = text.trim();
    if !text.contains(':') {
        return text.parse::<f64>().map_err(|_| AngleParseError::Malformed(text.to_string()));
    }

    // The sign lives on the string, "-00:30:00" has a zero degree field
    let negative = text.starts_with('-');
    let unsigned = text.trim_start_matches(['+', '-']);
    let (d, m, s) = split_sexagesimal(unsigned)?;
    let value = d + m / 60.0 + s / 3600.0;
    if value > 90.0 || !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&s) {
        return Err(AngleParseError::OutOfRange(text.to_string()));
    }
    Ok(if negative { -value } else { value })
}

fn split_sexagesimal(text: &str) -> Result<(f64, f64, f64), AngleParseError> {
    let malformed = || AngleParseError::Malformed(text.to_string());
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 3 {
        return Err(malformed());
    }
    let a = parts[0].trim().parse::<f64>().map_err(|_| malformed())?;
    let b = parts[1].trim().parse::<f64>().map_err(|_| malformed())?;
    let c = parts[2].trim().parse::<f64>().map_err(|_| malformed())?;
    if a < 0.0 {
        return Err(malformed());
    }
    Ok((a, b, c))
}
