//! Infrastructure layer: line-oriented file I/O

pub mod line_io;

pub use line_io::{read_lines, write_lines};
