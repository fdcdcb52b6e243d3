pub mod boxes;
pub mod parser;
pub mod probe;
pub mod reader;
pub mod tkhd;

pub use boxes::{BoxHeader, FourCC};
pub use parser::{ParseError, probe_stream, read_box_header};
pub use probe::{Geometry, probe_file};
pub use reader::TrackedReader;
pub use tkhd::{MatrixMatch, TrackHeader, classify_matrix, decode_track_header};
