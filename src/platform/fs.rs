// uastats - platform/fs.rs
//
// File access for the pipeline: opening inputs and reading them as
// Latin-1 text lines.

use crate::util::error::InputError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Open an input log file for buffered reading.
///
/// Anything other than a regular file (e.g. a directory, which `File::open`
/// accepts on Unix) is rejected here rather than at the first read.
pub fn open_log(path: &Path) -> Result<BufReader<File>, InputError> {
    let unreadable = |e: io::Error| InputError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    };
    let file = File::open(path).map_err(unreadable)?;
    if !file.metadata().map_err(unreadable)?.is_file() {
        return Err(unreadable(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    tracing::debug!(path = %path.display(), "Opened input file");
    Ok(BufReader::new(file))
}

/// Decode bytes as ISO-8859-1: every byte maps to the code point of the
/// same value, so decoding cannot fail.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Iterator over the Latin-1 decoded lines of a reader.
///
/// Lines are split on `\n`; one trailing `\r` is stripped. A final segment
/// without a newline is still a line, but an empty segment after the last
/// newline is not.
pub struct Latin1Lines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Latin1Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for Latin1Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(decode_latin1(&self.buf)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
