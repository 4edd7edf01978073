use serde::Serialize;

use crate::Decoration;

/// Key listing the variants of a string-backed type.
pub const VARIANTS_KEY: &str = "variants=";
/// Key binding a generated block to the type it was generated for.
pub const GENERATED_FOR_KEY: &str = "generated_for=";
/// Separator between variant tokens in a `variants=` value.
pub const VARIANT_DELIMITER: char = ',';

/// A `key=value` instruction read from a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	/// `variants=foo,bar,baz`. Token order is output order.
	Variants(Vec<String>),
	/// `generated_for=Enum`.
	GeneratedFor(String),
}

impl Directive {
	/// Attach the owning type's name to a `variants` directive.
	pub fn into_enum_spec(self, type_name: impl Into<String>) -> Option<EnumSpec> {
		match self {
			Self::Variants(variants) => {
				Some(EnumSpec {
					type_name: type_name.into(),
					variants,
				})
			}
			Self::GeneratedFor(_) => None,
		}
	}

	/// Whether this directive binds a block to `type_name`.
	pub fn is_generated_for(&self, type_name: &str) -> bool {
		matches!(self, Self::GeneratedFor(name) if name == type_name)
	}
}

/// The variants of one string-backed type, built fresh on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumSpec {
	pub type_name: String,
	pub variants: Vec<String>,
}

/// How directive keys are spelled. With a namespace of `enum` the keys
/// become `enum:variants=` and `enum:generated_for=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSyntax {
	namespace: Option<String>,
}

impl DirectiveSyntax {
	pub fn new(namespace: Option<String>) -> Self {
		Self {
			namespace: namespace.filter(|ns| !ns.is_empty()),
		}
	}

	pub fn namespace(&self) -> Option<&str> {
		self.namespace.as_deref()
	}

	fn key(&self, key: &str) -> String {
		match &self.namespace {
			Some(namespace) => format!("{namespace}:{key}"),
			None => key.to_string(),
		}
	}

	/// The comment text that marks a block as generated for `type_name`.
	pub fn marker(&self, type_name: &str) -> String {
		format!("//{}{type_name}", self.key(GENERATED_FOR_KEY))
	}

	/// Read a directive from a single comment, markers included.
	pub fn parse_comment(&self, text: &str) -> Option<Directive> {
		let content = strip_marker(text);

		if let Some(value) = content.strip_prefix(self.key(VARIANTS_KEY).as_str()) {
			let variants = value.split(VARIANT_DELIMITER).map(String::from).collect();
			return Some(Directive::Variants(variants));
		}

		content
			.strip_prefix(self.key(GENERATED_FOR_KEY).as_str())
			.map(|name| Directive::GeneratedFor(name.to_string()))
	}

	/// Scan comment lines in file order and return the first directive.
	pub fn parse_lines<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Option<Directive> {
		lines
			.into_iter()
			.find_map(|line| self.parse_comment(line))
	}

	/// Scan decorations backwards from the node, stopping at the first blank
	/// line. Comments above that blank line belong to something else.
	pub fn parse_decorations(&self, decorations: &[Decoration]) -> Option<Directive> {
		for decoration in decorations.iter().rev() {
			match decoration {
				Decoration::Blank => break,
				Decoration::Comment(text) => {
					if let Some(directive) = self.parse_comment(text) {
						return Some(directive);
					}
				}
			}
		}

		None
	}
}

/// Remove the `//` or `/* */` comment marker and any whitespace after it.
pub fn strip_marker(text: &str) -> &str {
	let content = if let Some(rest) = text.strip_prefix("//") {
		rest
	} else if let Some(rest) = text.strip_prefix("/*") {
		rest.strip_suffix("*/").unwrap_or(rest).trim_end()
	} else {
		text
	};

	content.trim_start()
}
