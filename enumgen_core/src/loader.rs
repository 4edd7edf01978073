use tracing::trace;

use crate::CommentMap;
use crate::ConstDecl;
use crate::ConstSpec;
use crate::Decl;
use crate::DeclKind;
use crate::Decoration;
use crate::Decorations;
use crate::EnumgenError;
use crate::EnumgenResult;
use crate::File;
use crate::MemberSpec;
use crate::NodeId;
use crate::TypeDecl;
use crate::TypeExpr;
use crate::TypeSpec;
use crate::lexer::LineEnd;
use crate::lexer::LineTable;
use crate::lexer::RawToken;
use crate::lexer::Spanned;
use crate::lexer::tokenize;

const DECL_KEYWORDS: &[&str] = &["package", "import", "type", "const", "var", "func"];

/// A parsed file that has not yet committed to a comment representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTree {
	pub decls: Vec<SourceDecl>,
	/// Comments after the last declaration.
	pub trailing: Decorations,
	pub trailing_blank_before: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDecl {
	pub kind: DeclKind,
	pub leading: Decorations,
	pub blank_before: bool,
}

impl SourceTree {
	/// Every node keeps its own leading comments.
	pub fn into_decorated(self) -> File<Decorations> {
		let mut file = File::<Decorations>::default();
		for decl in self.decls {
			let id = file.ids.next_id();
			file.decls.push(Decl {
				id,
				kind: decl.kind,
				decs: decl.leading,
				blank_before: decl.blank_before,
			});
		}
		file.trailing = self.trailing;
		file.trailing_blank_before = self.trailing_blank_before;
		file
	}

	/// Comments move into a side table keyed by node id.
	pub fn into_comment_map(self) -> (File<()>, CommentMap) {
		let mut file = File::<()>::default();
		let mut comments = CommentMap::default();

		for decl in self.decls {
			let id = file.ids.next_id();
			let groups = decl.leading.to_groups();
			if !groups.is_empty() {
				comments.insert(id, groups);
			}
			file.decls.push(Decl {
				id,
				kind: decl.kind,
				decs: (),
				blank_before: decl.blank_before,
			});
		}

		let trailing = self.trailing.to_groups();
		if !trailing.is_empty() {
			comments.insert(NodeId::FILE, trailing);
		}
		file.trailing_blank_before = self.trailing_blank_before;

		(file, comments)
	}
}

/// Normalize CRLF line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}

/// Split `source` into top-level declarations and the comments leading up to
/// each of them.
pub fn parse_source(source: &str) -> EnumgenResult<SourceTree> {
	let tokens = tokenize(source)?;
	let lines = LineTable::new(source);
	let mut tree = SourceTree::default();
	let mut pending: Vec<Decoration> = Vec::new();
	let mut blank_before = false;
	let mut newlines = 0usize;
	let mut index = 0;

	while index < tokens.len() {
		let Spanned { token, span } = &tokens[index];
		match token {
			RawToken::Whitespace => index += 1,
			RawToken::Newline => {
				newlines += 1;
				index += 1;
			}
			token if token.is_comment() => {
				if pending.is_empty() {
					blank_before = newlines >= 2;
				} else if newlines >= 2 {
					pending.push(Decoration::Blank);
				}
				pending.push(Decoration::Comment(source[span.clone()].to_string()));
				newlines = 0;
				index += 1;
			}
			RawToken::Ident if DECL_KEYWORDS.contains(&&source[span.clone()]) => {
				if pending.is_empty() {
					blank_before = newlines >= 2;
				} else if newlines >= 2 {
					pending.push(Decoration::Blank);
				}

				let end = declaration_end(source, &tokens, index, &lines)?;
				let kind = classify_declaration(source, &tokens[index..end]);
				trace!(start = span.start, "parsed declaration");
				tree.decls.push(SourceDecl {
					kind,
					leading: Decorations(std::mem::take(&mut pending)),
					blank_before,
				});
				newlines = 0;
				index = end;
			}
			_ => {
				let (line, column) = lines.line_column(span.start);
				return Err(EnumgenError::UnexpectedToken {
					found: source[span.clone()].to_string(),
					line,
					column,
				});
			}
		}
	}

	// Comments that later move to the end of the file start a new paragraph.
	tree.trailing_blank_before = pending.is_empty() || blank_before;
	tree.trailing = Decorations(pending);

	Ok(tree)
}

/// Index one past the last token of the declaration starting at `start`: the
/// first newline outside any brackets that ends a statement, or the end of
/// input.
fn declaration_end(
	source: &str,
	tokens: &[Spanned],
	start: usize,
	lines: &LineTable,
) -> EnumgenResult<usize> {
	let mut open: Vec<&Spanned> = Vec::new();
	let mut line_end = LineEnd::default();

	for (index, spanned) in tokens.iter().enumerate().skip(start) {
		line_end.push(spanned);
		match spanned.token {
			RawToken::Newline if open.is_empty() && line_end.terminates(source) => {
				return Ok(index);
			}
			token if token.opens() => open.push(spanned),
			token if token.closes() => {
				let matches = open
					.pop()
					.is_some_and(|opener| closes_pair(opener.token, token));
				if !matches {
					let (line, column) = lines.line_column(spanned.span.start);
					return Err(EnumgenError::UnbalancedBracket {
						found: first_char(source, spanned),
						line,
						column,
					});
				}
			}
			_ => {}
		}
	}

	if let Some(opener) = open.last() {
		let (line, column) = lines.line_column(opener.span.start);
		return Err(EnumgenError::UnbalancedBracket {
			found: first_char(source, opener),
			line,
			column,
		});
	}

	Ok(tokens.len())
}

fn closes_pair(open: RawToken, close: RawToken) -> bool {
	matches!(
		(open, close),
		(RawToken::ParenOpen, RawToken::ParenClose)
			| (RawToken::BracketOpen, RawToken::BracketClose)
			| (RawToken::BraceOpen, RawToken::BraceClose)
	)
}

fn first_char(source: &str, spanned: &Spanned) -> char {
	source[spanned.span.clone()].chars().next().unwrap_or_default()
}

/// Text covered by `tokens`, trailing whitespace excluded.
fn text_of<'a>(source: &'a str, tokens: &[Spanned]) -> &'a str {
	match (tokens.first(), tokens.last()) {
		(Some(first), Some(last)) => source[first.span.start..last.span.end].trim_end(),
		_ => "",
	}
}

fn classify_declaration(source: &str, tokens: &[Spanned]) -> DeclKind {
	let text = text_of(source, tokens).to_string();
	let keyword = &source[tokens[0].span.clone()];
	let body = &tokens[1..];

	match keyword {
		"type" => {
			parse_type_decl(source, body, &text)
				.map_or_else(|| DeclKind::Other(text.clone()), DeclKind::Type)
		}
		"const" => DeclKind::Const(parse_const_decl(source, body, &text)),
		_ => DeclKind::Other(text),
	}
}

/// Split the body of a declaration into specs. A parenthesized body yields
/// one spec per terminated line or `;`; otherwise the whole body is one spec.
fn split_specs<'t>(source: &str, tokens: &'t [Spanned]) -> (bool, Vec<&'t [Spanned]>) {
	let Some(first) = tokens.iter().position(|spanned| !spanned.token.is_trivia()) else {
		return (false, Vec::new());
	};

	if tokens[first].token != RawToken::ParenOpen {
		return (false, vec![&tokens[first..]]);
	}

	let inner = &tokens[first + 1..];
	let mut specs = Vec::new();
	let mut depth = 0usize;
	let mut start = 0;
	let mut line_end = LineEnd::default();

	for (index, spanned) in inner.iter().enumerate() {
		let is_separator = depth == 0
			&& ((spanned.token == RawToken::Newline && line_end.terminates(source))
				|| (spanned.token == RawToken::Punct && &source[spanned.span.clone()] == ";"));
		line_end.push(spanned);

		if spanned.token.opens() {
			depth += 1;
		} else if spanned.token.closes() {
			if depth == 0 {
				specs.push(&inner[start..index]);
				break;
			}
			depth -= 1;
		}

		if is_separator {
			specs.push(&inner[start..index]);
			start = index + 1;
		}
	}

	let specs = specs
		.into_iter()
		.filter(|spec| spec.iter().any(|spanned| !spanned.token.is_trivia()))
		.collect();

	(true, specs)
}

/// Tokens of a spec without whitespace and comments.
fn significant(tokens: &[Spanned]) -> Vec<&Spanned> {
	tokens
		.iter()
		.filter(|spanned| !spanned.token.is_trivia())
		.collect()
}

fn parse_type_decl(source: &str, body: &[Spanned], text: &str) -> Option<TypeDecl> {
	let (grouped, raw_specs) = split_specs(source, body);
	let specs = raw_specs
		.into_iter()
		.map(|spec| parse_type_spec(source, spec))
		.collect::<Option<Vec<_>>>()?;

	Some(TypeDecl {
		grouped,
		specs,
		source: text.to_string(),
	})
}

fn parse_type_spec(source: &str, tokens: &[Spanned]) -> Option<TypeSpec> {
	let tokens = significant(tokens);
	let slice = |spanned: &Spanned| &source[spanned.span.clone()];

	let name = tokens.first().filter(|t| t.token == RawToken::Ident)?;
	let mut rest = &tokens[1..];

	let mut type_params = None;
	if rest.first().is_some_and(|t| t.token == RawToken::BracketOpen) && has_type_params(source, rest) {
		let close = matching_close(rest)?;
		type_params = Some(source[rest[0].span.start..rest[close].span.end].to_string());
		rest = &rest[close + 1..];
	}

	let alias = rest.first().is_some_and(|t| slice(t) == "=");
	if alias {
		rest = &rest[1..];
	}

	let ty = match rest {
		[] => return None,
		[single] if single.token == RawToken::Ident => TypeExpr::Ident(slice(single).to_string()),
		[first, .., last] => TypeExpr::Composite(source[first.span.start..last.span.end].to_string()),
		[single] => TypeExpr::Composite(slice(single).to_string()),
	};

	Some(TypeSpec {
		name: slice(name).to_string(),
		type_params,
		alias,
		ty,
	})
}

/// Tell `Name[T any]` (type parameters) from `Name [4]byte` (array type).
fn has_type_params(source: &str, tokens: &[&Spanned]) -> bool {
	let (Some(first), Some(second)) = (tokens.get(1), tokens.get(2)) else {
		return false;
	};

	first.token == RawToken::Ident
		&& (second.token == RawToken::Ident
			|| matches!(&source[second.span.clone()], "," | "~"))
}

/// Index of the token closing the bracket at `tokens[0]`.
fn matching_close(tokens: &[&Spanned]) -> Option<usize> {
	let mut depth = 0usize;
	for (index, spanned) in tokens.iter().enumerate() {
		if spanned.token.opens() {
			depth += 1;
		} else if spanned.token.closes() {
			depth = depth.checked_sub(1)?;
			if depth == 0 {
				return Some(index);
			}
		}
	}
	None
}

fn parse_const_decl(source: &str, body: &[Spanned], text: &str) -> ConstDecl {
	let (grouped, raw_specs) = split_specs(source, body);
	let specs = raw_specs
		.into_iter()
		.map(|spec| {
			parse_member(source, spec).map_or_else(
				|| ConstSpec::Verbatim(text_of(source, trim_trivia(spec)).to_string()),
				ConstSpec::Member,
			)
		})
		.collect();

	ConstDecl {
		grouped,
		specs,
		source: Some(text.to_string()),
	}
}

/// `Name Type = "literal"`, nothing more.
fn parse_member(source: &str, tokens: &[Spanned]) -> Option<MemberSpec> {
	let tokens = significant(tokens);
	let [name, ty, eq, value] = tokens.as_slice() else {
		return None;
	};

	let slice = |spanned: &Spanned| source[spanned.span.clone()].to_string();
	let is_member = name.token == RawToken::Ident
		&& ty.token == RawToken::Ident
		&& slice(eq) == "="
		&& value.token == RawToken::String;

	is_member.then(|| {
		MemberSpec {
			name: slice(name),
			ty: slice(ty),
			value: slice(value),
		}
	})
}

fn trim_trivia(tokens: &[Spanned]) -> &[Spanned] {
	let start = tokens
		.iter()
		.position(|spanned| !spanned.token.is_trivia())
		.unwrap_or(tokens.len());
	let end = tokens
		.iter()
		.rposition(|spanned| !spanned.token.is_trivia())
		.map_or(start, |index| index + 1);
	&tokens[start..end]
}
