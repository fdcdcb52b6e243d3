use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::parser::{self, ParseError, Result};

/// Probe result: intended display size and clockwise playback rotation.
///
/// All zeros when the stream carries no usable `tkhd` geometry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Clockwise rotation in degrees: 0, 90, 180 or 270.
    pub rotate: u32,
    pub width: u16,
    pub height: u16,
}

/// Probe an MP4/ISOBMFF file on disk.
///
/// The file handle closes by scope on every exit path, early rotation match
/// and error paths included.
pub fn probe_file(path: impl AsRef<Path>) -> Result<Geometry> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let total_len = f.metadata()?.len();
    parser::probe_stream(BufReader::new(f), total_len)
}
