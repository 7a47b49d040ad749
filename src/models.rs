use serde::{Deserialize, Serialize};

/// One country as returned by the REST Countries API when the request is
/// restricted to `fields=name,flags,population`.
///
/// The common name doubles as the list key; the API keeps it unique within a
/// result set. Additional payload fields (e.g. `nativeName`, `svg`) are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    pub flags: Flags,
    pub population: u64,
}

/// The `name` object of a country payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
}

/// The `flags` object: a PNG URL plus optional accessibility text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    pub png: String,
    pub alt: Option<String>,
}

impl Flags {
    /// Accessibility text for the flag, falling back to a generic label when
    /// the API omits `alt` or sends it blank.
    pub fn alt_text(&self) -> &str {
        match self.alt.as_deref() {
            Some(alt) if !alt.trim().is_empty() => alt,
            _ => "Country flag",
        }
    }
}
