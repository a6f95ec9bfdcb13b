//! Minimal XML reader
//!
//! Recursive descent over the response body. Handles what RETS servers
//! actually send: a prolog, nested elements with quoted attributes,
//! self-closing tags, text, CDATA sections, comments and the predefined
//! and numeric character references. Namespaces are left in element names
//! untouched and DTDs are skipped, never interpreted.

use super::element::Element;
use crate::error::{Error, Result};

/// Cursor over an XML document
pub(crate) struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        // A UTF-8 byte order mark is not part of the document
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self { input, pos: 0 }
    }

    /// Read the prolog, the root element and any trailing misc
    pub(crate) fn read_document(mut self) -> Result<Element> {
        self.skip_misc()?;
        if !self.rest().starts_with('<') {
            return Err(Error::xml("Input does not appear to be XML"));
        }

        let root = self.read_element()?;

        self.skip_misc()?;
        if !self.rest().is_empty() {
            return Err(Error::xml(format!(
                "Unexpected content after root element '{}' at offset {}",
                root.name, self.pos
            )));
        }

        Ok(root)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.advance(rest.len() - trimmed.len());
    }

    /// Skip everything up to and including `terminator`
    fn skip_past(&mut self, terminator: &str, what: &str) -> Result<&'a str> {
        let rest = self.rest();
        match rest.find(terminator) {
            Some(end) => {
                self.advance(end + terminator.len());
                Ok(&rest[..end])
            }
            None => Err(Error::xml(format!("Unterminated {what} at offset {}", self.pos))),
        }
    }

    /// Skip whitespace, declarations, comments, processing instructions and DOCTYPE
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("<?") {
                self.skip_past("?>", "processing instruction")?;
            } else if rest.starts_with("<!--") {
                self.skip_past("-->", "comment")?;
            } else if rest.starts_with("<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_doctype(&mut self) -> Result<()> {
        // Internal subsets may contain '>' inside brackets
        let mut depth = 0usize;
        for (i, c) in self.rest().char_indices() {
            match c {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => {
                    self.advance(i + 1);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(Error::xml("Unterminated DOCTYPE"))
    }

    fn read_name(&mut self) -> Result<&'a str> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '/' | '>' | '=' | '<'))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(Error::xml(format!("Expected a name at offset {}", self.pos)));
        }
        self.advance(end);
        Ok(&rest[..end])
    }

    fn expect(&mut self, token: char) -> Result<()> {
        if self.rest().starts_with(token) {
            self.advance(token.len_utf8());
            Ok(())
        } else {
            Err(Error::xml(format!(
                "Expected '{token}' at offset {}",
                self.pos
            )))
        }
    }

    /// Read one element starting at '<'
    fn read_element(&mut self) -> Result<Element> {
        self.expect('<')?;
        let mut element = Element::new(self.read_name()?);

        // Attributes
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("/>") {
                self.advance(2);
                return Ok(element);
            }
            if rest.starts_with('>') {
                self.advance(1);
                break;
            }
            if rest.is_empty() {
                return Err(Error::xml(format!(
                    "Unterminated start tag for '{}'",
                    element.name
                )));
            }

            let name = self.read_name()?;
            self.skip_whitespace();
            self.expect('=')?;
            self.skip_whitespace();
            let value = self.read_quoted()?;
            // Namespace declarations are not attributes of the element
            if name == "xmlns" || name.starts_with("xmlns:") {
                continue;
            }
            element
                .attributes
                .push((name.to_string(), decode_entities(value)?));
        }

        // Content
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Err(Error::xml(format!(
                    "Missing closing tag for {}",
                    element.name
                )));
            }

            if rest.starts_with("</") {
                self.advance(2);
                let name = self.read_name()?;
                if name != element.name {
                    return Err(Error::xml(format!(
                        "Mismatched closing tag: expected </{}>, found </{name}>",
                        element.name
                    )));
                }
                self.skip_whitespace();
                self.expect('>')?;
                return Ok(element);
            } else if rest.starts_with("<!--") {
                self.skip_past("-->", "comment")?;
            } else if rest.starts_with("<![CDATA[") {
                self.advance("<![CDATA[".len());
                let data = self.skip_past("]]>", "CDATA section")?;
                element.text.push_str(data);
            } else if rest.starts_with("<?") {
                self.skip_past("?>", "processing instruction")?;
            } else if rest.starts_with('<') {
                let child = self.read_element()?;
                element.children.push(child);
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                element.text.push_str(&decode_entities(&rest[..end])?);
                self.advance(end);
            }
        }
    }

    fn read_quoted(&mut self) -> Result<&'a str> {
        let quote = match self.rest().chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => {
                return Err(Error::xml(format!(
                    "Expected quoted attribute value at offset {}",
                    self.pos
                )))
            }
        };
        self.advance(1);
        let rest = self.rest();
        let end = rest
            .find(quote)
            .ok_or_else(|| Error::xml("Unterminated attribute value"))?;
        self.advance(end + 1);
        Ok(&rest[..end])
    }
}

/// Replace character and predefined entity references
///
/// Unknown named entities and stray ampersands are kept verbatim; some
/// servers emit unescaped '&' in free-text remarks.
pub(crate) fn decode_entities(raw: &str) -> Result<String> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let Some(semi) = after.find(';').filter(|&i| i <= 10) else {
            out.push('&');
            rest = after;
            continue;
        };

        let entity = &after[..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => {
                if let Some(num) = entity.strip_prefix('#') {
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16),
                        None => num.parse::<u32>(),
                    }
                    .map_err(|_| Error::xml(format!("Invalid character reference '&{entity};'")))?;
                    let c = char::from_u32(code).ok_or_else(|| {
                        Error::xml(format!("Invalid character reference '&{entity};'"))
                    })?;
                    Some(c)
                } else {
                    None
                }
            }
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}
