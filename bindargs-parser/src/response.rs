/*!
Response files: plain text files full of arguments, referenced on the command
line as `@path`.

Each line is trimmed of whitespace. Lines starting with `#` are comments.
Every other line is split into tokens on spaces and tabs, honoring
double-quoted runs (see [`split`][crate::split]).
*/

use std::{
    fs, io,
    path::Path,
    str,
    string::{String, ToString},
    vec::Vec,
};

use crate::split;

/// The characters that separate tokens on a response file line.
pub const DELIMITERS: &[char] = &[' ', '\t'];

/// The text encoding used to decode a response file that doesn't start with
/// a byte order mark. A byte order mark, when present, always wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

/// Read a response file and return all of its tokens, in order. The file is
/// read in full and closed before this returns.
pub fn read_tokens(path: &Path, encoding: Encoding) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let text = decode(&bytes, encoding)?;

    Ok(tokens(&text).collect())
}

/// Get the tokens from the text of a response file.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(|line| split(line, DELIMITERS))
}

/// Decode the raw bytes of a response file.
pub fn decode(bytes: &[u8], encoding: Encoding) -> io::Result<String> {
    let (encoding, bytes) = match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => (Encoding::Utf8, rest),
        [0xFF, 0xFE, rest @ ..] => (Encoding::Utf16Le, rest),
        [0xFE, 0xFF, rest @ ..] => (Encoding::Utf16Be, rest),
        bytes => (encoding, bytes),
    };

    match encoding {
        Encoding::Utf8 => str::from_utf8(bytes)
            .map(ToString::to_string)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
        Encoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> io::Result<String> {
    let units = bytes.chunks_exact(2);

    if !units.remainder().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "UTF-16 data has an odd number of bytes",
        ));
    }

    char::decode_utf16(units.map(|pair| unit([pair[0], pair[1]])))
        .collect::<Result<String, _>>()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
