use std::fmt;

use winnow::ascii::multispace0;
use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{Error, Result};

/// How a recipe acquires its source material.
///
/// A `SOURCE` value is either a `git+<url>` clone or an archive URL, the
/// latter optionally renamed with `url -> filename`. Recipes without a
/// `SOURCE` treat the source hook as a no-op (the tree is already present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Clone a git repository.
    Git {
        /// Clone URL.
        url: String,
    },
    /// Download an archive.
    Archive {
        /// Download URL.
        url: String,
        /// Local filename (last path component unless renamed).
        filename: String,
    },
}

impl SourceSpec {
    /// Parse a `SOURCE` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_metadata::SourceSpec;
    ///
    /// let src = SourceSpec::parse("git+https://github.com/cw118876/grocery.git").unwrap();
    /// assert!(matches!(src, SourceSpec::Git { .. }));
    ///
    /// let src = SourceSpec::parse("https://example.com/foo-1.0.tar.gz").unwrap();
    /// match src {
    ///     SourceSpec::Archive { filename, .. } => assert_eq!(filename, "foo-1.0.tar.gz"),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn parse(input: &str) -> Result<SourceSpec> {
        parse_source
            .parse(input.trim())
            .map_err(|e| Error::InvalidSource(format!("{e}")))
    }
}

/// Extract filename from a URL (last path component).
fn filename_from_url(url: &str) -> String {
    url.rsplit('/')
        .next()
        .unwrap_or(url)
        .split('?')
        .next()
        .unwrap_or(url)
        .to_string()
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SourceSpec::Git { url } => write!(f, "git+{url}"),
            SourceSpec::Archive { url, filename } => {
                if *filename == filename_from_url(url) {
                    write!(f, "{url}")
                } else {
                    write!(f, "{url} -> {filename}")
                }
            }
        }
    }
}

// Winnow parsers

fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            ':' | '/' | '.' | '-' | '_' | '~' | '$' | '&' | '*' | '+' | ',' | ';' | '=' | '%'
                | '@' | '#' | '?'
        )
}

fn is_filename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+')
}

fn parse_source(input: &mut &str) -> ModalResult<SourceSpec> {
    let git = opt("git+").parse_next(input)?.is_some();
    let url: String = take_while(1.., is_uri_char)
        .map(|s: &str| s.to_string())
        .parse_next(input)?;
    if git {
        return Ok(SourceSpec::Git { url });
    }
    let rename = opt(preceded(
        (multispace0, "->", multispace0),
        take_while(1.., is_filename_char).map(|s: &str| s.to_string()),
    ))
    .parse_next(input)?;
    let filename = rename.unwrap_or_else(|| filename_from_url(&url));
    Ok(SourceSpec::Archive { url, filename })
}
