use std::ops::Range;

use logos::Logos;

use crate::EnumgenError;
use crate::EnumgenResult;

/// Flat tokens of a source file. Only what is needed to find declaration
/// boundaries and read type and constant specs is distinguished; everything
/// else is [`RawToken::Punct`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
	#[regex(r"//[^\n]*", allow_greedy = true)]
	LineComment,
	#[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
	BlockComment,
	#[token("/*")]
	UnclosedComment,
	#[regex(r#""([^"\\\n]|\\.)*""#)]
	String,
	#[regex(r"`[^`]*`")]
	RawString,
	#[regex(r"'([^'\\\n]|\\.)*'")]
	Rune,
	#[token("\"")]
	#[token("`")]
	#[token("'")]
	UnclosedQuote,
	#[token("\n")]
	Newline,
	#[regex(r"[ \t\r\x0C]+")]
	Whitespace,
	#[token("(")]
	ParenOpen,
	#[token(")")]
	ParenClose,
	#[token("[")]
	BracketOpen,
	#[token("]")]
	BracketClose,
	#[token("{")]
	BraceOpen,
	#[token("}")]
	BraceClose,
	#[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
	Ident,
	#[regex(r"[0-9][0-9a-zA-Z_.]*")]
	Number,
	#[regex(r#"[^ \t\r\x0C\n\p{L}\p{Nd}_"`'()\[\]{}]"#)]
	Punct,
}

impl RawToken {
	pub(crate) fn is_trivia(self) -> bool {
		matches!(
			self,
			Self::Whitespace | Self::Newline | Self::LineComment | Self::BlockComment
		)
	}

	pub(crate) fn is_comment(self) -> bool {
		matches!(self, Self::LineComment | Self::BlockComment)
	}

	pub(crate) fn opens(self) -> bool {
		matches!(self, Self::ParenOpen | Self::BracketOpen | Self::BraceOpen)
	}

	pub(crate) fn closes(self) -> bool {
		matches!(self, Self::ParenClose | Self::BracketClose | Self::BraceClose)
	}
}

/// Keywords after which a line break does not end a statement.
const CONTINUING_KEYWORDS: &[&str] = &[
	"case",
	"chan",
	"const",
	"default",
	"defer",
	"else",
	"for",
	"func",
	"go",
	"goto",
	"if",
	"import",
	"interface",
	"map",
	"package",
	"range",
	"select",
	"struct",
	"switch",
	"type",
	"var",
];

/// The last two significant tokens seen, enough to decide whether a line
/// break ends a statement.
///
/// A line break ends a statement only after an identifier, a literal, a
/// closing bracket, `++`, `--` or one of `break`, `continue`, `fallthrough`
/// and `return`. After anything else, such as a binary operator, `.` or `,`,
/// the statement continues on the next line.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LineEnd<'t> {
	last: Option<&'t Spanned>,
	before_last: Option<&'t Spanned>,
}

impl<'t> LineEnd<'t> {
	pub(crate) fn push(&mut self, spanned: &'t Spanned) {
		if !spanned.token.is_trivia() {
			self.before_last = self.last;
			self.last = Some(spanned);
		}
	}

	pub(crate) fn terminates(&self, source: &str) -> bool {
		let Some(last) = self.last else {
			return false;
		};
		let text = &source[last.span.clone()];

		match last.token {
			RawToken::Ident => !CONTINUING_KEYWORDS.contains(&text),
			RawToken::Number
			| RawToken::String
			| RawToken::RawString
			| RawToken::Rune
			| RawToken::ParenClose
			| RawToken::BracketClose
			| RawToken::BraceClose => true,
			RawToken::Punct if matches!(text, "+" | "-") => {
				self.before_last.is_some_and(|before| {
					before.token == RawToken::Punct
						&& before.span.end == last.span.start
						&& &source[before.span.clone()] == text
				})
			}
			_ => false,
		}
	}
}

/// Single characters, classified the way identifiers and quoted literals need.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
	#[regex(r"[\p{L}\p{Nd}_]")]
	Identifier,
	#[regex(r"[\p{Cc}\p{Cf}\p{Co}\p{Zs}\p{Zl}\p{Zp}]")]
	NonPrintable,
}

fn classify_char(c: char) -> Option<CharClass> {
	let mut buffer = [0u8; 4];
	CharClass::lexer(c.encode_utf8(&mut buffer)).next()?.ok()
}

/// Whether `c` may appear in an identifier: a letter, a decimal digit or `_`.
pub(crate) fn is_identifier_char(c: char) -> bool {
	classify_char(c) == Some(CharClass::Identifier)
}

/// Whether `c` must be escaped in a quoted literal. The ASCII space is the
/// only printable space character.
pub(crate) fn is_non_printable(c: char) -> bool {
	c != ' ' && classify_char(c) == Some(CharClass::NonPrintable)
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
	pub token: RawToken,
	pub span: Range<usize>,
}

/// Tokenize `source`, failing on unterminated comments and literals.
pub(crate) fn tokenize(source: &str) -> EnumgenResult<Vec<Spanned>> {
	let lines = LineTable::new(source);
	let mut tokens = Vec::new();

	for (token, span) in RawToken::lexer(source).spanned() {
		let token = match token {
			Ok(RawToken::UnclosedComment) => {
				return Err(lines.unterminated("block comment", span.start));
			}
			Ok(RawToken::UnclosedQuote) => {
				return Err(lines.unterminated("literal", span.start));
			}
			Ok(token) => token,
			// Every character is covered by some pattern, but keep going with
			// punctuation rather than failing on the unexpected.
			Err(()) => RawToken::Punct,
		};
		tokens.push(Spanned { token, span });
	}

	Ok(tokens)
}

/// Byte offsets of line starts, for offset to line/column conversion.
pub(crate) struct LineTable {
	line_starts: Vec<usize>,
}

impl LineTable {
	pub(crate) fn new(content: &str) -> Self {
		let mut line_starts = vec![0];
		for (i, byte) in content.bytes().enumerate() {
			if byte == b'\n' {
				line_starts.push(i + 1);
			}
		}
		Self { line_starts }
	}

	/// 1-indexed line and column of `offset`.
	pub(crate) fn line_column(&self, offset: usize) -> (usize, usize) {
		let line_idx = match self.line_starts.binary_search(&offset) {
			Ok(exact) => exact,
			Err(insert) => insert.saturating_sub(1),
		};
		(line_idx + 1, offset - self.line_starts[line_idx] + 1)
	}

	pub(crate) fn unterminated(&self, what: &'static str, offset: usize) -> EnumgenError {
		let (line, column) = self.line_column(offset);
		EnumgenError::Unterminated { what, line, column }
	}
}
