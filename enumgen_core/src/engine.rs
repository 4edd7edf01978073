use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::CommentBinding;
use crate::Decl;
use crate::Decorated;
use crate::DirectiveSyntax;
use crate::EnumgenError;
use crate::EnumgenResult;
use crate::SynthesisReport;
use crate::classify;
use crate::find_bound;
use crate::config::CommentStyle;
use crate::loader::normalize_line_endings;
use crate::loader::parse_source;
use crate::project::ProjectContext;
use crate::render::render;
use crate::synthesize;

/// The rewritten text of one file and what the pass did to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
	pub content: String,
	pub report: SynthesisReport,
}

/// Parse `source`, run the synthesis pass with the given comment
/// representation, and print the result.
pub fn process_source(
	source: &str,
	style: CommentStyle,
	syntax: &DirectiveSyntax,
) -> EnumgenResult<Processed> {
	let tree = parse_source(&normalize_line_endings(source))?;

	let processed = match style {
		CommentStyle::Map => {
			let (mut file, mut comments) = tree.into_comment_map();
			let report = synthesize(&mut file, &mut comments, syntax);
			Processed {
				content: render(&file, &comments),
				report,
			}
		}
		CommentStyle::Decorations => {
			let mut file = tree.into_decorated();
			let mut binding = Decorated;
			let report = synthesize(&mut file, &mut binding, syntax);
			Processed {
				content: render(&file, &binding),
				report,
			}
		}
	};

	Ok(processed)
}

/// A file whose generated declarations are missing or out of date.
#[derive(Debug, Clone, Serialize)]
pub struct FileUpdate {
	/// The scanned source file.
	pub source: PathBuf,
	/// Where the new content goes: `source` itself, or its mirror in the
	/// output directory.
	pub target: PathBuf,
	/// Current content of `target`, `None` if it does not exist yet.
	pub original: Option<String>,
	pub content: String,
	pub report: SynthesisReport,
}

#[derive(Debug, Default)]
pub struct UpdateResult {
	pub updated_files: Vec<FileUpdate>,
	/// Number of types whose blocks were inserted or changed.
	pub updated_count: usize,
}

impl UpdateResult {
	pub fn is_empty(&self) -> bool {
		self.updated_files.is_empty()
	}
}

#[derive(Debug, Default)]
pub struct CheckResult {
	pub stale: Vec<FileUpdate>,
}

impl CheckResult {
	pub fn is_ok(&self) -> bool {
		self.stale.is_empty()
	}
}

/// Compute the new content of every file whose generated declarations need
/// to change, without writing anything.
pub fn compute_updates(ctx: &ProjectContext) -> EnumgenResult<UpdateResult> {
	let mut result = UpdateResult::default();

	for path in &ctx.project.files {
		let source = std::fs::read_to_string(path)?;
		let processed =
			process_source(&source, ctx.comments, &ctx.syntax).map_err(|e| {
				EnumgenError::SourceParse {
					path: ctx.project.relative(path).display().to_string(),
					reason: e.to_string(),
				}
			})?;

		if processed.report.entries.is_empty() {
			continue;
		}

		let target = ctx.target_path(path);
		let original = if target == *path {
			// Rewriting in place only when the pass changed something keeps
			// unrelated formatting out of the diff.
			if !processed.report.has_changes() {
				continue;
			}
			Some(source)
		} else {
			read_optional(&target)?
		};

		if original.as_deref() == Some(processed.content.as_str()) {
			continue;
		}

		debug!(file = %ctx.project.relative(path).display(), "file needs update");
		result.updated_count += processed
			.report
			.entries
			.iter()
			.filter(|entry| entry.mutation.is_change())
			.count();
		result.updated_files.push(FileUpdate {
			source: path.clone(),
			target,
			original,
			content: processed.content,
			report: processed.report,
		});
	}

	Ok(result)
}

/// Every file [`compute_updates`] would rewrite.
pub fn check_project(ctx: &ProjectContext) -> EnumgenResult<CheckResult> {
	let updates = compute_updates(ctx)?;
	Ok(CheckResult {
		stale: updates.updated_files,
	})
}

/// Write the computed updates, creating output directories as needed.
pub fn write_updates(updates: &UpdateResult) -> EnumgenResult<()> {
	for update in &updates.updated_files {
		if let Some(parent) = update.target.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&update.target, &update.content)?;
		info!(file = %update.target.display(), "wrote generated declarations");
	}
	Ok(())
}

/// A type declaration that asks for generated constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveEntry {
	pub file: PathBuf,
	pub type_name: String,
	pub variants: Vec<String>,
	/// Whether a block generated for the type already exists.
	pub generated: bool,
}

/// List every eligible type carrying a `variants=` directive.
pub fn list_directives(ctx: &ProjectContext) -> EnumgenResult<Vec<DirectiveEntry>> {
	let mut entries = Vec::new();

	for path in &ctx.project.files {
		let source = std::fs::read_to_string(path)?;
		let tree = parse_source(&normalize_line_endings(&source)).map_err(|e| {
			EnumgenError::SourceParse {
				path: ctx.project.relative(path).display().to_string(),
				reason: e.to_string(),
			}
		})?;
		let file = ctx.project.relative(path).to_path_buf();

		match ctx.comments {
			CommentStyle::Map => {
				let (parsed, comments) = tree.into_comment_map();
				collect_directives(&file, &parsed.decls, &comments, &ctx.syntax, &mut entries);
			}
			CommentStyle::Decorations => {
				let parsed = tree.into_decorated();
				collect_directives(&file, &parsed.decls, &Decorated, &ctx.syntax, &mut entries);
			}
		}
	}

	Ok(entries)
}

fn collect_directives<B: CommentBinding>(
	file: &Path,
	decls: &[Decl<B::Decs>],
	binding: &B,
	syntax: &DirectiveSyntax,
	entries: &mut Vec<DirectiveEntry>,
) {
	for decl in decls {
		let Some(candidate) = decl
			.as_type()
			.and_then(classify)
			.filter(|candidate| candidate.eligible)
		else {
			continue;
		};
		let Some(spec) = binding
			.directive(decl, syntax)
			.and_then(|directive| directive.into_enum_spec(candidate.name))
		else {
			continue;
		};

		let generated = find_bound(decls, binding, syntax, &spec.type_name).is_some();
		entries.push(DirectiveEntry {
			file: file.to_path_buf(),
			type_name: spec.type_name,
			variants: spec.variants,
			generated,
		});
	}
}

fn read_optional(path: &Path) -> EnumgenResult<Option<String>> {
	match std::fs::read_to_string(path) {
		Ok(content) => Ok(Some(normalize_line_endings(&content))),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e.into()),
	}
}
