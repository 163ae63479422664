/* Loading the problem bank and writing the surviving records back out */

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Error, Result};
use mj_io::{read_pathbuf_to_mem, write_mem_to_pathbuf};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Serializer, Value};
use thiserror::Error as ThisError;

const INDENT: &[u8] = b"    ";

/*================================================================================
=                            LOADER                                              =
================================================================================*/

#[derive(ThisError, Debug)]
pub enum LoadError {
    #[error("The file {0:?} was not found.")]
    NotFound(PathBuf),

    #[error("An unexpected error occurred while reading {path:?}: {cause}")]
    Read { path: PathBuf, cause: Error },

    #[error("Could not decode JSON from {path:?}. Please ensure it's a valid JSON file. Details: {cause}")]
    Malformed { path: PathBuf, cause: serde_json::Error },

    #[error("Expected the root of {0:?} to be a list of problems.")]
    NotAnArray(PathBuf),
}

/// Reads the whole file into memory and returns the records of its top-level array.
/// Compressed inputs (.gz, .zst) are handled by mj_io.
pub fn load_records(path: &PathBuf) -> Result<Vec<Value>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.clone()));
    }
    let contents = read_pathbuf_to_mem(path)
        .map_err(|cause| LoadError::Read { path: path.clone(), cause })?
        .into_inner()
        .into_inner();

    let root: Value = serde_json::from_slice(&contents)
        .map_err(|cause| LoadError::Malformed { path: path.clone(), cause })?;

    match root {
        Value::Array(records) => Ok(records),
        _ => Err(LoadError::NotAnArray(path.clone())),
    }
}


/*================================================================================
=                            WRITER                                              =
================================================================================*/

/// Pretty-prints `records` as a JSON array with 4-space indentation.
/// With `escape_ascii` every non-ASCII char is written as a \uXXXX escape.
pub fn records_to_bytes(records: &[Value], escape_ascii: bool) -> Result<Vec<u8>, Error> {
    let mut output_bytes: Vec<u8> = Vec::new();
    if escape_ascii {
        let mut ser = Serializer::with_formatter(&mut output_bytes, AsciiFormatter::new());
        records.serialize(&mut ser)?;
    } else {
        let mut ser = Serializer::with_formatter(&mut output_bytes, PrettyFormatter::with_indent(INDENT));
        records.serialize(&mut ser)?;
    }
    Ok(output_bytes)
}

pub fn write_records(records: &[Value], output_file: &PathBuf, escape_ascii: bool) -> Result<(), Error> {
    let output_bytes = records_to_bytes(records, escape_ascii)?;
    write_mem_to_pathbuf(&output_bytes, output_file)
        .with_context(|| format!("Failed to write filtered data to {:?}", output_file))
}


/// PrettyFormatter that also escapes everything outside ASCII
struct AsciiFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> AsciiFormatter<'a> {
    fn new() -> Self {
        Self { pretty: PrettyFormatter::with_indent(INDENT) }
    }
}

impl<'a> Formatter for AsciiFormatter<'a> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}
