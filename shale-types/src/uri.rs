/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! URI references for network locator attributes.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// An RFC 3986 URI reference.
///
/// Covers absolute URIs (`http://example.com/a`), relative references
/// (`../../demo/b/index.html`), and fragment-bearing forms
/// (`sample/a/index.html#28`). Parsing validates each component's character
/// set and percent-encoding but performs no normalization: the value renders
/// back exactly the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriRef {
    text: String,
    scheme: Option<Range<usize>>,
    authority: Option<Range<usize>>,
    path: Range<usize>,
    query: Option<Range<usize>>,
    fragment: Option<Range<usize>>,
}

impl UriRef {
    /// Parses a URI reference.
    pub fn parse(text: impl Into<String>) -> Result<Self, UriParseError> {
        let text = text.into();
        let bytes = text.as_bytes();

        let mut scheme = None;
        for (index, &byte) in bytes.iter().enumerate() {
            match byte {
                b':' => {
                    validate_scheme(&text, 0..index)?;
                    scheme = Some(0..index);
                    break;
                }
                b'/' | b'?' | b'#' => break,
                _ => {}
            }
        }

        let mut pos = scheme.as_ref().map(|range| range.end + 1).unwrap_or(0);

        let authority = if bytes[pos..].starts_with(b"//") {
            let start = pos + 2;
            let end = start
                + bytes[start..]
                    .iter()
                    .position(|b| matches!(b, b'/' | b'?' | b'#'))
                    .unwrap_or(bytes.len() - start);
            validate_component(&text, start..end, b":@[]", "authority")?;
            pos = end;
            Some(start..end)
        } else {
            None
        };

        let path_start = pos;
        let path_end = path_start
            + bytes[path_start..]
                .iter()
                .position(|b| matches!(b, b'?' | b'#'))
                .unwrap_or(bytes.len() - path_start);
        validate_component(&text, path_start..path_end, b":@/", "path")?;
        let path = path_start..path_end;
        pos = path_end;

        let query = if bytes.get(pos) == Some(&b'?') {
            let start = pos + 1;
            let end = start
                + bytes[start..]
                    .iter()
                    .position(|b| *b == b'#')
                    .unwrap_or(bytes.len() - start);
            validate_component(&text, start..end, b":@/?", "query")?;
            pos = end;
            Some(start..end)
        } else {
            None
        };

        let fragment = if bytes.get(pos) == Some(&b'#') {
            let start = pos + 1;
            validate_component(&text, start..bytes.len(), b":@/?", "fragment")?;
            Some(start..bytes.len())
        } else {
            None
        };

        Ok(UriRef {
            text,
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    /// The exact text this reference was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The scheme, when this is an absolute URI.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.clone().map(|range| &self.text[range])
    }

    /// The authority component, without the leading `//`.
    pub fn authority(&self) -> Option<&str> {
        self.authority.clone().map(|range| &self.text[range])
    }

    /// The path component; possibly empty.
    pub fn path(&self) -> &str {
        &self.text[self.path.clone()]
    }

    /// The query component, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.clone().map(|range| &self.text[range])
    }

    /// The fragment component, without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.clone().map(|range| &self.text[range])
    }

    /// Returns `true` when a scheme is present.
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for UriRef {
    type Err = UriParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        UriRef::parse(text)
    }
}

fn validate_scheme(text: &str, range: Range<usize>) -> Result<(), UriParseError> {
    let scheme = &text.as_bytes()[range];
    let valid_start = scheme.first().is_some_and(|b| b.is_ascii_alphabetic());
    let valid_rest = scheme[1.min(scheme.len())..]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'));
    if !valid_start || !valid_rest {
        return Err(UriParseError {
            kind: UriParseErrorKind::InvalidScheme(
                String::from_utf8_lossy(scheme).into_owned(),
            ),
        });
    }
    Ok(())
}

fn validate_component(
    text: &str,
    range: Range<usize>,
    extra: &[u8],
    component: &'static str,
) -> Result<(), UriParseError> {
    let bytes = &text.as_bytes()[..range.end];
    let mut pos = range.start;
    while pos < range.end {
        let byte = bytes[pos];
        if byte == b'%' {
            let hex = pos + 2 < range.end
                && bytes[pos + 1].is_ascii_hexdigit()
                && bytes[pos + 2].is_ascii_hexdigit();
            if !hex {
                return Err(UriParseError {
                    kind: UriParseErrorKind::InvalidPercentEncoding,
                });
            }
            pos += 3;
            continue;
        }
        let allowed = byte.is_ascii_alphanumeric()
            || matches!(
                byte,
                b'-' | b'.' | b'_' | b'~' // unreserved
                | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
            )
            || extra.contains(&byte);
        if !allowed {
            return Err(UriParseError {
                kind: UriParseErrorKind::InvalidCharacter {
                    component,
                    character: text[pos..].chars().next().unwrap_or('\u{fffd}'),
                },
            });
        }
        pos += 1;
    }
    Ok(())
}

/// Text did not parse as a URI reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriParseError {
    kind: UriParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UriParseErrorKind {
    InvalidScheme(String),
    InvalidCharacter {
        component: &'static str,
        character: char,
    },
    InvalidPercentEncoding,
}

impl fmt::Display for UriParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use UriParseErrorKind::*;
        match &self.kind {
            InvalidScheme(scheme) => write!(f, "invalid scheme `{scheme}`"),
            InvalidCharacter {
                component,
                character,
            } => write!(f, "invalid character `{character}` in {component}"),
            InvalidPercentEncoding => write!(f, "`%` must begin a two-digit hex escape"),
        }
    }
}

impl std::error::Error for UriParseError {}
