//! Plain-text PPM (P3) output

use crate::error::RasterResult;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the framebuffer as P3: a three line header, then one text row of
/// `R G B ` triples per image row, top row first
pub fn write_ppm<W: Write>(fb: &Framebuffer, out: &mut W) -> std::io::Result<()> {
    write!(out, "P3\n{} {}\n255\n", fb.width(), fb.height())?;
    for row in fb.pixels().chunks(fb.width()) {
        for p in row {
            write!(out, "{} {} {} ", p.0, p.1, p.2)?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Create (or truncate) `path` and write the framebuffer into it
pub fn save_ppm(fb: &Framebuffer, path: &Path) -> RasterResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_ppm(fb, &mut out)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), "wrote image");
    Ok(())
}
