use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum EnumgenError {
	#[error(transparent)]
	#[diagnostic(code(enumgen::io_error))]
	Io(#[from] std::io::Error),

	#[error("unterminated {what} starting at {line}:{column}")]
	#[diagnostic(
		code(enumgen::unterminated),
		help("close the {what} before the end of the file")
	)]
	Unterminated {
		what: &'static str,
		line: usize,
		column: usize,
	},

	#[error("unbalanced `{found}` at {line}:{column}")]
	#[diagnostic(code(enumgen::unbalanced_bracket))]
	UnbalancedBracket {
		found: char,
		line: usize,
		column: usize,
	},

	#[error("expected a top-level declaration at {line}:{column}, found `{found}`")]
	#[diagnostic(
		code(enumgen::unexpected_token),
		help("top-level declarations start with package, import, type, const, var, or func")
	)]
	UnexpectedToken {
		found: String,
		line: usize,
		column: usize,
	},

	#[error("failed to parse `{path}`: {reason}")]
	#[diagnostic(code(enumgen::source_parse))]
	SourceParse { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(enumgen::config_parse),
		help("check that enumgen.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(enumgen::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type EnumgenResult<T> = Result<T, EnumgenError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
