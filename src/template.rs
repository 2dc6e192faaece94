//! Fills `{name}` placeholders in the bilingual page template. `{{` and `}}`
//! stand for literal braces, so inline CSS and scripts in the template must
//! double theirs.

use std::collections::HashMap;
use std::fmt;

/// A template file's contents, ready to be filled.
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    /// `name` identifies the template in error messages (typically its path).
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Template {
        Template {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Replaces every placeholder with its value from `values`. A placeholder
    /// missing from `values` or an unbalanced brace is an error.
    pub fn fill(&self, values: &HashMap<&str, &str>) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        let mut chars = self.source.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            match c {
                '{' => {
                    if let Some((_, '{')) = chars.peek() {
                        chars.next();
                        out.push('{');
                        continue;
                    }
                    let start = i + 1;
                    let end = loop {
                        match chars.next() {
                            Some((j, '}')) => break j,
                            Some((_, '{')) | None => {
                                return Err(self.error(ErrorKind::UnclosedPlaceholder, i))
                            }
                            Some(_) => {}
                        }
                    };
                    let key = &self.source[start..end];
                    match values.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            return Err(
                                self.error(ErrorKind::UnknownPlaceholder(key.to_owned()), i)
                            )
                        }
                    }
                }
                '}' => match chars.next() {
                    Some((_, '}')) => out.push('}'),
                    _ => return Err(self.error(ErrorKind::UnmatchedClose, i)),
                },
                c => out.push(c),
            }
        }
        Ok(out)
    }

    fn error(&self, kind: ErrorKind, offset: usize) -> Error {
        Error {
            template: self.name.clone(),
            offset,
            kind,
        }
    }
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong while filling a template.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// A `{` with no closing `}`.
    UnclosedPlaceholder,

    /// A lone `}` that isn't part of `}}`.
    UnmatchedClose,

    /// A placeholder with no value.
    UnknownPlaceholder(String),
}

/// Represents an error filling a [`Template`]. `offset` is the byte offset of
/// the offending brace.
#[derive(Debug, PartialEq)]
pub struct Error {
    pub template: String,
    pub offset: usize,
    pub kind: ErrorKind,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "template '{}' at byte {}: ", self.template, self.offset)?;
        match &self.kind {
            ErrorKind::UnclosedPlaceholder => write!(f, "unclosed `{{`"),
            ErrorKind::UnmatchedClose => write!(f, "single `}}` encountered"),
            ErrorKind::UnknownPlaceholder(key) => write!(f, "unknown placeholder `{{{}}}`", key),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;

    fn values() -> HashMap<&'static str, &'static str> {
        let mut values = HashMap::new();
        values.insert("lang", "pt");
        values.insert("title", "Olá {mundo}");
        values
    }

    #[test]
    fn test_fill() -> Result<()> {
        let template = Template::new(
            "t.html",
            "<html lang=\"{lang}\"><style>a {{ color: red; }}</style><h1>{title}</h1></html>",
        );
        assert_eq!(
            "<html lang=\"pt\"><style>a { color: red; }</style><h1>Olá {mundo}</h1></html>",
            template.fill(&values())?
        );
        Ok(())
    }

    #[test]
    fn test_fill_errors() {
        struct TestCase {
            source: &'static str,
            wanted: ErrorKind,
            offset: usize,
        }

        let cases = [
            TestCase {
                source: "ab{missing}",
                wanted: ErrorKind::UnknownPlaceholder("missing".to_owned()),
                offset: 2,
            },
            TestCase {
                source: "x {lang",
                wanted: ErrorKind::UnclosedPlaceholder,
                offset: 2,
            },
            TestCase {
                source: "{la{ng}",
                wanted: ErrorKind::UnclosedPlaceholder,
                offset: 0,
            },
            TestCase {
                source: "a } b",
                wanted: ErrorKind::UnmatchedClose,
                offset: 2,
            },
        ];

        for case in cases.iter() {
            let err = Template::new("t.html", case.source)
                .fill(&values())
                .unwrap_err();
            assert_eq!(case.wanted, err.kind, "source: {}", case.source);
            assert_eq!(case.offset, err.offset, "source: {}", case.source);
            assert_eq!("t.html", err.template);
        }
    }

    #[test]
    fn test_error_display() {
        let err = Template::new("t.html", "{nope}").fill(&values()).unwrap_err();
        assert_eq!(
            "template 't.html' at byte 0: unknown placeholder `{nope}`",
            err.to_string()
        );
    }
}
