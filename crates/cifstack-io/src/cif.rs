//! CIF layout reader.
//!
//! Three line forms carry geometry; every other line is ignored:
//!
//! - `L <name>;` selects the layer for the polygons that follow.
//! - `P <x> <y> ...;` is a polygon on the current layer. Lines with fewer
//!   than three coordinate pairs, or whose coordinates are all one value,
//!   are dropped.
//! - `4N <family><n> <x> <y> ...;` is a contact. It names its own layer
//!   (digits removed, so `C1` and `C2` are both family `C`) and is always
//!   kept.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use cifstack_core::geometry::pair_coords;
use cifstack_core::{ShapeDatabase, ShapeError, ShapeSource};

const LAYER_PREFIX: &str = "L ";
const POLYGON_PREFIX: &str = "P ";
const CONTACT_PREFIX: &str = "4N ";
const TERMINATOR: char = ';';

/// Polygons need at least three coordinate pairs.
const MIN_POLYGON_COORDS: usize = 6;

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line}: invalid integer '{token}' in \"{content}\"")]
    InvalidNumber {
        line: usize,
        token: String,
        content: String,
    },

    #[error("Line {line}: odd number of coordinates ({count}) in \"{content}\"")]
    OddCoordinates {
        line: usize,
        count: usize,
        content: String,
    },

    #[error("Line {line}: contact without coordinates in \"{content}\"")]
    MissingCoordinates { line: usize, content: String },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

// ── CIF Reader ────────────────────────────────────────────────────────

pub struct CifReader<R: BufRead> {
    reader: R,
    current_layer: Option<String>,
    line_number: usize,
}

impl<R: BufRead> CifReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current_layer: None,
            line_number: 0,
        }
    }

    /// Read the entire stream into a ShapeDatabase.
    pub fn read(&mut self) -> Result<ShapeDatabase, CifError> {
        let mut db = ShapeDatabase::new("imported");
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            self.line_number += 1;
            // Names and comments may be in a legacy code page; only the
            // ASCII structure matters here.
            let line = String::from_utf8_lossy(&buf);
            self.read_line(line.trim(), &mut db)?;
        }

        log::info!(
            "Read {} shapes from {} lines",
            db.shape_count(),
            self.line_number
        );
        Ok(db)
    }

    fn read_line(&mut self, line: &str, db: &mut ShapeDatabase) -> Result<(), CifError> {
        if line.starts_with(LAYER_PREFIX) {
            self.current_layer = line
                .split_whitespace()
                .nth(1)
                .map(|token| token.replace(TERMINATOR, ""));
            log::debug!("Layer set to {:?}", self.current_layer);
        } else if line.starts_with(POLYGON_PREFIX) {
            self.read_polygon(line, db)?;
        } else if line.starts_with(CONTACT_PREFIX) {
            self.read_contact(line, db)?;
        }
        Ok(())
    }

    fn read_polygon(&mut self, line: &str, db: &mut ShapeDatabase) -> Result<(), CifError> {
        let coords = extract_integers(line).map_err(|token| self.invalid_number(token, line))?;

        let distinct = coords.iter().any(|&v| v != coords[0]);
        if coords.len() < MIN_POLYGON_COORDS || !distinct {
            log::debug!("Line {}: dropping degenerate polygon", self.line_number);
            return Ok(());
        }

        let points = pair_coords(&coords).ok_or_else(|| CifError::OddCoordinates {
            line: self.line_number,
            count: coords.len(),
            content: line.to_string(),
        })?;
        let id = db.add_shape(self.current_layer.clone(), points, ShapeSource::Polygon)?;
        log::debug!(
            "Line {}: polygon {} on {:?}",
            self.line_number,
            id,
            self.current_layer
        );
        Ok(())
    }

    fn read_contact(&mut self, line: &str, db: &mut ShapeDatabase) -> Result<(), CifError> {
        let mut tokens = line.split_whitespace().skip(1);
        let layer = tokens.next().map(contact_family).unwrap_or_default();

        let mut coords = Vec::new();
        for token in tokens {
            let token = token.replace(TERMINATOR, "");
            if token.is_empty() {
                continue;
            }
            let value = token
                .parse::<i64>()
                .map_err(|_| self.invalid_number(token.clone(), line))?;
            coords.push(value);
        }

        if coords.is_empty() {
            return Err(CifError::MissingCoordinates {
                line: self.line_number,
                content: line.to_string(),
            });
        }
        let points = pair_coords(&coords).ok_or_else(|| CifError::OddCoordinates {
            line: self.line_number,
            count: coords.len(),
            content: line.to_string(),
        })?;

        let id = db.add_shape(Some(layer), points, ShapeSource::Contact)?;
        log::debug!("Line {}: contact {}", self.line_number, id);
        Ok(())
    }

    fn invalid_number(&self, token: String, line: &str) -> CifError {
        CifError::InvalidNumber {
            line: self.line_number,
            token,
            content: line.to_string(),
        }
    }
}

/// Read a CIF file from disk. The database is named after the file stem.
pub fn read_cif_file(path: &Path) -> Result<ShapeDatabase, CifError> {
    let file = File::open(path)?;
    let mut db = CifReader::new(BufReader::new(file)).read()?;
    if let Some(stem) = path.file_stem() {
        db.name = stem.to_string_lossy().into_owned();
    }
    Ok(db)
}

/// Read CIF text already held in memory.
pub fn parse_cif(text: &str) -> Result<ShapeDatabase, CifError> {
    CifReader::new(text.as_bytes()).read()
}

/// Layer family of a contact token: terminator and digits removed.
pub(crate) fn contact_family(token: &str) -> String {
    token
        .chars()
        .filter(|c| *c != TERMINATOR && !c.is_ascii_digit())
        .collect()
}

/// Every signed integer on the line, in order: digit runs, optionally with a
/// leading `-`. Returns the offending text if a value does not fit in `i64`.
fn extract_integers(line: &str) -> Result<Vec<i64>, String> {
    let bytes = line.as_bytes();
    let mut values = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        if bytes[i] == b'-' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 1;
        } else if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let token = &line[start..i];
        values.push(token.parse::<i64>().map_err(|_| token.to_string())?);
    }

    Ok(values)
}
