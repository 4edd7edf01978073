use crate::ConstDecl;
use crate::ConstSpec;
use crate::DirectiveSyntax;
use crate::EnumSpec;
use crate::MemberSpec;
use crate::lexer::is_identifier_char;
use crate::lexer::is_non_printable;

/// A freshly built constant block and the marker comment that binds it to
/// its type. The marker is installed through whichever comment binding the
/// file uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBlock {
	pub block: ConstDecl,
	pub marker: String,
}

/// Build the constant block for `spec`: one member per variant, in variant
/// order.
pub fn build_block(spec: &EnumSpec, syntax: &DirectiveSyntax) -> GeneratedBlock {
	let specs = spec
		.variants
		.iter()
		.map(|variant| {
			ConstSpec::Member(MemberSpec {
				name: member_name(&spec.type_name, variant),
				ty: spec.type_name.clone(),
				value: quote_literal(variant),
			})
		})
		.collect();

	GeneratedBlock {
		block: ConstDecl {
			grouped: true,
			specs,
			source: None,
		},
		marker: syntax.marker(&spec.type_name),
	}
}

/// `Enum` + `b"ar` gives `EnumB_ar`.
pub fn member_name(type_name: &str, variant: &str) -> String {
	format!("{type_name}{}", capitalize(&sanitize_identifier(variant)))
}

/// Upper-case the first character and leave the rest untouched.
pub fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Replace every character that cannot appear in an identifier with `_`,
/// one for one. Letters of any script and decimal digits are kept.
pub fn sanitize_identifier(s: &str) -> String {
	s.chars()
		.map(|c| if is_identifier_char(c) { c } else { '_' })
		.collect()
}

/// Quote `value` as a double-quoted string literal. Control, format,
/// private-use and non-ASCII space characters are escaped; unassigned code
/// points are written as they are.
pub fn quote_literal(value: &str) -> String {
	let mut quoted = String::with_capacity(value.len() + 2);
	quoted.push('"');

	for c in value.chars() {
		match c {
			'"' => quoted.push_str("\\\""),
			'\\' => quoted.push_str("\\\\"),
			'\n' => quoted.push_str("\\n"),
			'\r' => quoted.push_str("\\r"),
			'\t' => quoted.push_str("\\t"),
			'\u{7}' => quoted.push_str("\\a"),
			'\u{8}' => quoted.push_str("\\b"),
			'\u{b}' => quoted.push_str("\\v"),
			'\u{c}' => quoted.push_str("\\f"),
			c if is_non_printable(c) => {
				let code = u32::from(c);
				if code < 0x80 {
					quoted.push_str(&format!("\\x{code:02x}"));
				} else if code < 0x1_0000 {
					quoted.push_str(&format!("\\u{code:04x}"));
				} else {
					quoted.push_str(&format!("\\U{code:08x}"));
				}
			}
			c => quoted.push(c),
		}
	}

	quoted.push('"');
	quoted
}
