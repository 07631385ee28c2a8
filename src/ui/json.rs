use std::io::{self, Write};

use serde::Serialize;

/// Write one value as a single JSON line
pub fn write_json_line(out: &mut impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Same as [`write_json_line`], to stdout
pub fn emit(value: &impl Serialize) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_json_line(&mut out, value)
}
