//! Token and node kinds of the grammar CST.
//!
//! One enum covers both: the variants carrying logos attributes are what the
//! lexer produces, the rest only appear as interior nodes built by the parser.

use logos::Logos;
use rowan::Language;

/// Tokens come first so they fit in a [`TokenSet`]; `__LAST` bounds the
/// raw values accepted back from rowan.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    /// Opens a token capture `< ... >`
    #[token("<")]
    AngleOpen,

    #[token(">")]
    AngleClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    /// Definition arrow. Defined as a token so `<-` wins over `<` by length.
    #[token("<-")]
    #[token("←")]
    Arrow,

    /// `=` (invalid arrow, for error recovery)
    #[token("=")]
    Equals,

    #[token("/")]
    Slash,

    #[token("&")]
    Amp,

    #[token("!")]
    Bang,

    #[token("?")]
    Question,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[regex(r"[0-9]+")]
    Number,

    /// `%whitespace` and other `%name` directives
    #[regex(r"%[a-zA-Z_][a-zA-Z0-9_]*")]
    Directive,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    /// Quoted literal including quotes and an optional `i` suffix
    #[regex(r"'(?:[^'\\\n]|\\.)*'i?")]
    #[regex(r#""(?:[^"\\\n]|\\.)*"i?"#)]
    StrLit,

    /// Literal missing its closing quote before end of line
    #[regex(r"'(?:[^'\\\n]|\\.)*", allow_greedy = true)]
    #[regex(r#""(?:[^"\\\n]|\\.)*"#, allow_greedy = true)]
    UnterminatedStr,

    /// Character class including brackets and an optional `i` suffix
    #[regex(r"\[(?:[^\]\\\n]|\\.)*\]i?")]
    ClassLit,

    #[regex(r"\[(?:[^\]\\\n]|\\.)*", allow_greedy = true)]
    UnterminatedClass,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    /// A run of characters no token matches.
    Garbage,
    Error,

    // Nodes
    Root,
    Def,
    Choice,
    Seq,
    Prefix,
    Suffix,
    Group,
    Capture,
    Ref,
    Literal,
    Class,
    Any,

    // Sentinel
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        token_sets::TRIVIA.contains(self)
    }

    pub fn is_error(self) -> bool {
        self == Error || self == Garbage
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PegLang {}

impl Language for PegLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        assert!(raw.0 < __LAST as u16, "raw kind {} out of range", raw.0);
        // SAFETY: `SyntaxKind` is `repr(u16)` with contiguous discriminants
        // below `__LAST`.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        rowan::SyntaxKind::from(kind)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<PegLang>;
pub type SyntaxToken = rowan::SyntaxToken<PegLang>;

/// Set of token kinds as a bitmask over their discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Fails const evaluation for node kinds past bit 63.
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    const fn with(self, kind: SyntaxKind) -> Self {
        let bit = kind as u16;
        assert!(bit < 64, "kind does not fit in a TokenSet");
        TokenSet(self.0 | (1 << bit))
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let bit = kind as u16;
        bit < 64 && (self.0 >> bit) & 1 == 1
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

pub mod token_sets {
    use super::*;

    /// FIRST set of a primary expression.
    pub const PRIMARY_FIRST: TokenSet = TokenSet::new(&[
        ParenOpen,
        AngleOpen,
        Id,
        StrLit,
        UnterminatedStr,
        ClassLit,
        UnterminatedClass,
        Dot,
    ]);

    pub const PREDICATES: TokenSet = TokenSet::new(&[Amp, Bang]);

    /// FIRST set of a sequence item.
    pub const EXPR_FIRST: TokenSet = PRIMARY_FIRST.union(PREDICATES);

    pub const QUANTIFIERS: TokenSet = TokenSet::new(&[Star, Plus, Question, BraceOpen]);

    /// Tokens that can name a definition.
    pub const DEF_NAMES: TokenSet = TokenSet::new(&[Id, Directive]);

    pub const ARROWS: TokenSet = TokenSet::new(&[Arrow, Equals]);

    pub const TRIVIA: TokenSet = TokenSet::new(&[Whitespace, Newline, Comment]);
}
