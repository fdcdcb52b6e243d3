use std::io::Read;
use std::path::PathBuf;

use crate::boxes::{BoxHeader, FourCC};
use crate::probe::Geometry;
use crate::reader::TrackedReader;
use crate::tkhd::{self, MatrixMatch};

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated stream: {needed} more bytes wanted")]
    Truncated { needed: u64 },
    #[error("malformed '{typ}' box: size {size} smaller than {header_len}-byte header")]
    MalformedBox {
        typ: FourCC,
        size: u64,
        header_len: u64,
    },
    #[error("'{typ}' payload too short: {have} bytes, fixed fields need {need}")]
    ShortPayload { typ: FourCC, have: u64, need: u64 },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Read one box header at the current stream position.
///
/// A 32-bit size field of 1 marks an extended size: the true length follows
/// as a 64-bit big-endian value and the header grows to 16 bytes. A declared
/// size smaller than the header (0 included) would stall the consumed-byte
/// accounting and is rejected.
pub fn read_box_header<R: Read>(r: &mut TrackedReader<R>) -> Result<BoxHeader> {
    let size32 = r.read_u32()?;
    let mut typ = [0u8; 4];
    r.read_exact(&mut typ)?;
    let typ = FourCC(typ);

    let (size, header_len) = if size32 == 1 {
        (r.read_u64()?, 16u64)
    } else {
        (size32 as u64, 8u64)
    };

    if size < header_len {
        return Err(ParseError::MalformedBox {
            typ,
            size,
            header_len,
        });
    }

    Ok(BoxHeader {
        size,
        typ,
        header_len,
    })
}

/// Walk the top-level box stream until geometry and rotation are resolved.
///
/// `moov` and `trak` are entered rather than skipped: only their header bytes
/// count as consumed, and the next bytes in the stream are read as the first
/// child box. Every other type is skipped by its declared size. A `tkhd`
/// whose matrix matches a rotation pattern ends the walk immediately; one
/// that does not match is skipped like any other box, so a later track can
/// still contribute.
pub fn probe_stream<R: Read>(r: R, total_len: u64) -> Result<Geometry> {
    let mut r = TrackedReader::new(r);
    let mut geo = Geometry::default();

    while r.consumed() < total_len {
        let hdr = read_box_header(&mut r)?;
        let payload_len = hdr.size - hdr.header_len;

        match &hdr.typ.0 {
            b"moov" | b"trak" => {
                log::debug!("entering '{}' ({} bytes)", hdr.typ, hdr.size);
            }
            b"tkhd" => {
                let before = r.consumed();
                let tk = tkhd::decode_track_header(&mut r, payload_len)?;
                log::debug!(
                    "tkhd v{} track_id={} duration={} {}x{}",
                    tk.version,
                    tk.track_id,
                    tk.duration,
                    tk.width,
                    tk.height
                );
                // an audio track's all-zero geometry must not clobber a
                // video track's dimensions
                if tk.width != 0 || tk.height != 0 {
                    geo.width = tk.width;
                    geo.height = tk.height;
                }
                if let MatrixMatch::Rotated(angle) = tk.rotation() {
                    geo.rotate = angle;
                    log::debug!("display matrix matched, rotate={}", angle);
                    break;
                }
                r.skip(payload_len - (r.consumed() - before))?;
            }
            _ => {
                log::debug!("skipping '{}' ({} bytes)", hdr.typ, hdr.size);
                r.skip(payload_len)?;
            }
        }
    }

    Ok(geo)
}
