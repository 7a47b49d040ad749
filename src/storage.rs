use crate::models::Country;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a result list as CSV with header.
pub fn save_csv<P: AsRef<Path>>(countries: &[Country], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("name", "flag_png", "flag_alt", "population"))?;
    for c in countries {
        wtr.serialize((
            &c.name.common,
            &c.flags.png,
            c.flags.alt.as_deref().unwrap_or(""),
            c.population,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a result list as a pretty JSON array (the API's own shape).
pub fn save_json<P: AsRef<Path>>(countries: &[Country], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(countries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
