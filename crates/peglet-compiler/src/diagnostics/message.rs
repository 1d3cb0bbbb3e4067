use std::fmt;

use rowan::TextRange;

/// Everything the grammar compiler can complain about.
///
/// Declaration order is priority order: when one diagnostic's suppression
/// range covers another, the kind declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Unterminated groups swallow the rest of the definition.
    UnclosedGroup,
    UnclosedCapture,

    // Something required is missing.
    ExpectedExpression,
    ExpectedArrow,

    // Malformed tokens and stray input.
    UnterminatedLiteral,
    UnterminatedClass,
    UnexpectedToken,
    InvalidEscape,
    InvalidClassRange,
    InvalidRepetitionBounds,

    // Well-formed but meaningless.
    DuplicateDefinition,
    UndefinedReference,
    UnknownDirective,
    MissingStartRule,
    LeftRecursion,

    NullableRepetition,
}

/// Role of a kind when the cascade filter compares two diagnostics that
/// start at the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cascade {
    /// Reported at the opening delimiter; usually a consequence.
    Structural,
    /// Reported where the user left something out.
    RootCause,
    Independent,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        if self == Self::NullableRepetition {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub(crate) fn outranks(self, other: Self) -> bool {
        self < other
    }

    pub(crate) fn cascade(self) -> Cascade {
        match self {
            Self::UnclosedGroup | Self::UnclosedCapture => Cascade::Structural,
            Self::ExpectedExpression | Self::ExpectedArrow => Cascade::RootCause,
            _ => Cascade::Independent,
        }
    }

    /// Message used when the reporter supplies no detail.
    pub fn summary(self) -> &'static str {
        match self {
            Self::UnclosedGroup => "unclosed group",
            Self::UnclosedCapture => "unclosed token capture",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedArrow => "expected `<-`",
            Self::UnterminatedLiteral => "unterminated string literal",
            Self::UnterminatedClass => "unterminated character class",
            Self::UnexpectedToken => "unexpected token",
            Self::InvalidEscape => "invalid escape sequence",
            Self::InvalidClassRange => "invalid character range",
            Self::InvalidRepetitionBounds => "invalid repetition bounds",
            Self::DuplicateDefinition => "duplicate definition",
            Self::UndefinedReference => "undefined reference",
            Self::UnknownDirective => "unknown directive",
            Self::MissingStartRule => "grammar has no start rule",
            Self::LeftRecursion => "left recursion",
            Self::NullableRepetition => "repeated expression can match empty input",
        }
    }

    /// Message for a reporter-supplied detail. Name-carrying kinds read as a
    /// sentence about the name; the rest append the detail to the summary.
    pub fn describe(self, detail: &str) -> String {
        match self {
            Self::DuplicateDefinition => format!("`{detail}` is already defined"),
            Self::UndefinedReference => format!("`{detail}` is not defined"),
            Self::UnknownDirective => format!("unknown directive `{detail}`"),
            Self::MissingStartRule => format!("start rule `{detail}` is not defined"),
            Self::LeftRecursion => format!("`{detail}` is left-recursive"),
            Self::UnclosedGroup | Self::UnclosedCapture => {
                format!("{}; {detail}", self.summary())
            }
            _ => format!("{}: {detail}", self.summary()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suggested source edit over the primary range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fix {
    pub(crate) label: String,
    pub(crate) edit: String,
}

/// A secondary location, e.g. the first definition of a duplicate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Note {
    pub(crate) range: TextRange,
    pub(crate) text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    /// Diagnostics of lower priority starting inside this range are hidden
    /// by [`super::Diagnostics::filtered`]. Same as `range` unless widened.
    pub(crate) suppression_range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) notes: Vec<Note>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            suppression_range: range,
            message: kind.summary().to_owned(),
            fix: None,
            notes: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

/// `<severity> at <start>..<end>: <message>`, followed by the fix label and
/// the notes in parentheses.
impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = |r: TextRange| format!("{}..{}", u32::from(r.start()), u32::from(r.end()));
        write!(f, "{} at {}: {}", self.severity(), span(self.range), self.message)?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.label)?;
        }
        self.notes
            .iter()
            .try_for_each(|n| write!(f, " (related: {} at {})", n.text, span(n.range)))
    }
}
