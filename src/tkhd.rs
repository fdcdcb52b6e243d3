use std::io::Read;

use crate::boxes::FourCC;
use crate::parser::{ParseError, Result};
use crate::reader::TrackedReader;

/// +1.0 in 16.16 fixed point.
pub const FIXED_POS_ONE: u32 = 0x0001_0000;
/// -1.0 in 16.16 fixed point, as the raw unsigned bit pattern.
pub const FIXED_NEG_ONE: u32 = 0xFFFF_0000;

// Fixed field lengths of the tkhd payload, version/flags included. Version 1
// widens the two time fields and the duration.
const TKHD_V0_LEN: u64 = 84;
const TKHD_V1_LEN: u64 = 96;

/// Decoded subset of a `tkhd` (track header) box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackHeader {
    pub version: u8,
    pub track_id: u32,
    pub duration: u64,
    /// Integer part of the 16.16 fixed-point display width.
    pub width: u16,
    /// Integer part of the 16.16 fixed-point display height.
    pub height: u16,
    /// Display transformation matrix: nine unsigned big-endian words,
    /// row-major.
    pub matrix: [[u32; 3]; 3],
}

impl TrackHeader {
    pub fn rotation(&self) -> MatrixMatch {
        classify_matrix(&self.matrix)
    }
}

/// Outcome of matching a display matrix against the known rotation patterns.
///
/// `Rotated` tells the walker to stop; `NoMatch` lets it continue to later
/// tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixMatch {
    Rotated(u32),
    NoMatch,
}

/// Decode the fixed fields of a `tkhd` payload.
///
/// `payload_len` is the declared box size minus the header length. It must
/// cover the fixed fields (84 bytes for version 0, 96 for version 1), or the
/// decode fails instead of reading into sibling boxes. Trailing payload
/// beyond the fixed fields is left unread for the caller to skip.
pub fn decode_track_header<R: Read>(
    r: &mut TrackedReader<R>,
    payload_len: u64,
) -> Result<TrackHeader> {
    let short = |need: u64| ParseError::ShortPayload {
        typ: FourCC(*b"tkhd"),
        have: payload_len,
        need,
    };
    if payload_len < TKHD_V0_LEN {
        return Err(short(TKHD_V0_LEN));
    }

    let version = r.read_u8()?;
    r.skip(3)?; // flags

    if version == 1 && payload_len < TKHD_V1_LEN {
        return Err(short(TKHD_V1_LEN));
    }

    if version == 1 {
        r.skip(8 + 8)?; // creation + modification time
    } else {
        r.skip(4 + 4)?;
    }
    let track_id = r.read_u32()?;
    r.skip(4)?; // reserved
    let duration = if version == 1 {
        r.read_u64()?
    } else {
        r.read_u32()? as u64
    };
    r.skip(8)?; // reserved
    r.skip(2 + 2 + 2 + 2)?; // layer, alternate group, volume, reserved

    let mut matrix = [[0u32; 3]; 3];
    for row in matrix.iter_mut() {
        for cell in row.iter_mut() {
            *cell = r.read_u32()?;
        }
    }

    // 16.16 fixed point: keep the integer half, drop the fraction
    let width = r.read_u16()?;
    r.skip(2)?;
    let height = r.read_u16()?;
    r.skip(2)?;

    Ok(TrackHeader {
        version,
        track_id,
        duration,
        width,
        height,
        matrix,
    })
}

/// Match the display matrix against the three known rotation patterns,
/// first match wins.
///
/// Words are compared as raw unsigned bit patterns, never sign-extended, so
/// -1.0 is the literal `0xFFFF0000`. The pattern pairs come from how phone
/// cameras record sensor orientation.
pub fn classify_matrix(m: &[[u32; 3]; 3]) -> MatrixMatch {
    if m[1][0] == FIXED_NEG_ONE && m[0][1] == FIXED_POS_ONE {
        MatrixMatch::Rotated(90)
    } else if m[0][0] == FIXED_NEG_ONE && m[1][1] == FIXED_NEG_ONE {
        MatrixMatch::Rotated(180)
    } else if m[1][0] == FIXED_POS_ONE && m[0][1] == FIXED_NEG_ONE {
        MatrixMatch::Rotated(270)
    } else {
        MatrixMatch::NoMatch
    }
}
