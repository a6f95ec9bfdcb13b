//! Field delimiter resolution for the delimited encoding

use crate::error::{Error, Result};
use crate::xml::ResponseNode;
use tracing::debug;

/// Element declaring the delimiter
pub const DELIMITER_ELEMENT: &str = "DELIMITER";

/// Attribute holding the delimiter's decimal character code
pub const DELIMITER_VALUE: &str = "value";

/// Determine the field separator of a delimited response
///
/// `<DELIMITER value="09"/>` carries the separator as a decimal character
/// code. Without the element, `fallback` is returned. The code must be
/// ASCII since rows are split as text.
pub fn resolve_delimiter<N: ResponseNode>(root: &N, fallback: u8) -> Result<u8> {
    let Some(element) = root.child(DELIMITER_ELEMENT) else {
        debug!(
            "Assuming delimiter {} since none specified in response",
            describe(fallback)
        );
        return Ok(fallback);
    };

    let raw = element.attribute(DELIMITER_VALUE).unwrap_or_default();
    let delimiter = raw
        .trim()
        .parse::<u8>()
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| Error::malformed(DELIMITER_ELEMENT, DELIMITER_VALUE, raw))?;

    debug!("Response declares delimiter {}", describe(delimiter));
    Ok(delimiter)
}

fn describe(delimiter: u8) -> String {
    match delimiter {
        9 => "TAB".to_string(),
        b if b.is_ascii_graphic() => format!("'{}'", char::from(b)),
        b => format!("0x{b:02x}"),
    }
}
