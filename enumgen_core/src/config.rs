use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::DirectiveSyntax;
use crate::EnumgenError;
use crate::EnumgenResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["enumgen.toml", ".enumgen.toml"];

/// Configuration loaded from an `enumgen.toml` file.
///
/// ```toml
/// namespace = "enum"
/// comments = "decorations"
/// output = "generated"
/// disable_gitignore = false
///
/// [exclude]
/// patterns = ["vendor/", "*_test.go"]
///
/// [include]
/// patterns = ["third_party/models/**/*.go"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct EnumgenConfig {
	/// Prefix that directive keys must carry, e.g. `enum` for
	/// `//enum:variants=a,b`. Unprefixed keys are used when absent.
	#[serde(default)]
	pub namespace: Option<String>,
	/// How comments are kept attached to declarations while rewriting.
	#[serde(default)]
	pub comments: CommentStyle,
	/// Directory that rewritten files are written to, mirroring their path
	/// relative to the project root. Files are rewritten in place when
	/// absent.
	#[serde(default)]
	pub output: Option<PathBuf>,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Inclusion configuration: additional glob patterns to scan.
	#[serde(default)]
	pub include: IncludeConfig,
	/// When true, `.gitignore` files are not used for filtering.
	#[serde(default)]
	pub disable_gitignore: bool,
}

/// The comment representation used for every file of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStyle {
	/// Comments live in a side table keyed by node id.
	#[default]
	Map,
	/// Every declaration owns its leading comments.
	Decorations,
}

/// Configuration for excluding files and directories from scanning.
///
/// Patterns follow gitignore syntax and are applied on top of any
/// `.gitignore` rules (unless `disable_gitignore` is set).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// Configuration for including additional files in scanning.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeConfig {
	/// Additional glob patterns for files to scan, relative to the project
	/// root. Matched files are scanned even when excluded by `.gitignore`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl EnumgenConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> EnumgenResult<Option<EnumgenConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: EnumgenConfig =
			toml::from_str(&content).map_err(|e| EnumgenError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	pub fn directive_syntax(&self) -> DirectiveSyntax {
		DirectiveSyntax::new(self.namespace.clone())
	}
}
