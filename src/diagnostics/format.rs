//! Placeholder substitution for diagnostic messages.
//!
//! Two strategies are available:
//!
//! - [`FormatMode::Strict`] requires the number of `{}` placeholders to match
//!   the argument count exactly and reports a [`FormatError`] otherwise.
//! - [`FormatMode::Legacy`] fills placeholders left to right and appends any
//!   surplus arguments after the template, separated by a space. Without a
//!   template it synthesises one with a placeholder per argument.
//!
//! Both strategies return a message verbatim when no arguments are supplied,
//! so preformatted text containing braces is never misread as a template.

use std::fmt::{self, Write as _};

use thiserror::Error;

/// Placeholder token recognised in templates.
pub const PLACEHOLDER: &str = "{}";

/// Substitution strategy used by the appender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatMode {
    /// Placeholder and argument counts must match.
    #[default]
    Strict,
    /// Lenient historical behaviour; see the module docs.
    Legacy,
}

/// Errors raised by strict formatting.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The template and the argument list disagree.
    #[error("template has {placeholders} placeholders but {arguments} arguments were supplied")]
    ArgumentCountMismatch {
        /// Number of `{}` tokens in the template.
        placeholders: usize,
        /// Number of arguments supplied.
        arguments: usize,
    },
    /// Strict mode needs a template whenever arguments are supplied.
    #[error("{arguments} arguments supplied without a template")]
    MissingTemplate {
        /// Number of arguments supplied.
        arguments: usize,
    },
}

impl FormatMode {
    /// Render `template` with `args` using this strategy.
    ///
    /// # Errors
    ///
    /// Only [`FormatMode::Strict`] fails, see [`format_strict`].
    pub fn format(
        self,
        template: Option<&str>,
        args: &[&dyn fmt::Display],
    ) -> Result<String, FormatError> {
        match self {
            Self::Strict => format_strict(template, args),
            Self::Legacy => Ok(format_legacy(template, args)),
        }
    }
}

/// Substitute each placeholder with the matching argument.
///
/// # Errors
///
/// Returns [`FormatError::ArgumentCountMismatch`] when the template does not
/// contain exactly one placeholder per argument, and
/// [`FormatError::MissingTemplate`] when arguments come without a template.
///
/// ```
/// use framesink::diagnostics::format::{FormatError, format_strict};
///
/// assert_eq!(format_strict(Some("{} of {}"), &[&1, &2]).as_deref(), Ok("1 of 2"));
/// assert_eq!(
///     format_strict(Some("{}"), &[&1, &2]),
///     Err(FormatError::ArgumentCountMismatch { placeholders: 1, arguments: 2 })
/// );
/// ```
pub fn format_strict(template: Option<&str>, args: &[&dyn fmt::Display]) -> Result<String, FormatError> {
    let Some(template) = template else {
        if args.is_empty() {
            return Ok(String::new());
        }
        return Err(FormatError::MissingTemplate {
            arguments: args.len(),
        });
    };
    if args.is_empty() {
        return Ok(template.to_owned());
    }

    let placeholders = template.matches(PLACEHOLDER).count();
    if placeholders != args.len() {
        return Err(FormatError::ArgumentCountMismatch {
            placeholders,
            arguments: args.len(),
        });
    }

    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut pieces = template.split(PLACEHOLDER);
    if let Some(head) = pieces.next() {
        out.push_str(head);
    }
    for (arg, piece) in args.iter().zip(pieces) {
        let _ = write!(out, "{arg}");
        out.push_str(piece);
    }
    Ok(out)
}

/// Fill placeholders left to right, appending surplus arguments.
///
/// A template that runs out of placeholders (including one that never had
/// any) gets each remaining argument appended after a single space. A missing
/// template is replaced by `"{} "` repeated once per argument.
///
/// ```
/// use framesink::diagnostics::format::format_legacy;
///
/// assert_eq!(format_legacy(Some("a={} b={}"), &[&1, &2, &3]), "a=1 b=2 3");
/// assert_eq!(format_legacy(None, &[&"x", &"y"]), "x y ");
/// ```
#[must_use]
pub fn format_legacy(template: Option<&str>, args: &[&dyn fmt::Display]) -> String {
    let synthesised;
    let template = if let Some(template) = template {
        template
    } else {
        synthesised = format!("{PLACEHOLDER} ").repeat(args.len());
        synthesised.as_str()
    };

    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut start = 0;
    for arg in args {
        if let Some(offset) = template[start..].find(PLACEHOLDER) {
            let at = start + offset;
            out.push_str(&template[start..at]);
            let _ = write!(out, "{arg}");
            start = at + PLACEHOLDER.len();
        } else {
            out.push_str(&template[start..]);
            let _ = write!(out, " {arg}");
            start = template.len();
        }
    }
    out.push_str(&template[start..]);
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{FormatError, FormatMode, format_legacy, format_strict};

    #[rstest]
    #[case(Some("a {} b {} c"), "a x b y c z")]
    #[case(Some("no placeholders"), "no placeholders x y z")]
    #[case(Some("{}{}{}"), "xyz")]
    #[case(None, "x y z ")]
    fn legacy_fills_and_appends(#[case] template: Option<&str>, #[case] expected: &str) {
        assert_eq!(format_legacy(template, &[&"x", &"y", &"z"]), expected);
    }

    #[test]
    fn legacy_leaves_unused_placeholders() {
        assert_eq!(format_legacy(Some("{} and {}"), &[&1]), "1 and {}");
    }

    #[test]
    fn legacy_without_template_or_args_is_empty() {
        assert_eq!(format_legacy(None, &[]), "");
    }

    #[rstest]
    #[case(Some("{} {}"), 1, 2)]
    #[case(Some("{}"), 2, 1)]
    #[case(Some("none"), 1, 0)]
    fn strict_rejects_count_mismatch(
        #[case] template: Option<&str>,
        #[case] arguments: usize,
        #[case] placeholders: usize,
    ) {
        let args: Vec<&dyn std::fmt::Display> = (0..arguments)
            .map(|_| &"v" as &dyn std::fmt::Display)
            .collect();
        assert_eq!(
            format_strict(template, &args),
            Err(FormatError::ArgumentCountMismatch {
                placeholders,
                arguments
            })
        );
    }

    #[test]
    fn strict_without_arguments_is_verbatim() {
        assert_eq!(
            format_strict(Some("literal {} braces"), &[]).as_deref(),
            Ok("literal {} braces")
        );
    }

    #[test]
    fn strict_requires_template_for_arguments() {
        assert_eq!(
            FormatMode::Strict.format(None, &[&1]),
            Err(FormatError::MissingTemplate { arguments: 1 })
        );
    }

    #[test]
    fn strict_substitutes_in_order() {
        assert_eq!(
            FormatMode::Strict
                .format(Some("[{}] {} -> {}"), &[&1, &"two", &3.5])
                .as_deref(),
            Ok("[1] two -> 3.5")
        );
    }
}
