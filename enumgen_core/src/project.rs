use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use tracing::debug;

use crate::DirectiveSyntax;
use crate::EnumgenError;
use crate::EnumgenResult;
use crate::config::CONFIG_FILE_CANDIDATES;
use crate::config::CommentStyle;
use crate::config::EnumgenConfig;

/// Extension of the source files that are scanned for directives.
pub const SOURCE_EXTENSION: &str = "go";

/// Options for controlling how a project is scanned.
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// Gitignore-style patterns to exclude from scanning.
	pub exclude_patterns: Vec<String>,
	/// Glob patterns for additional files to include.
	pub include_set: GlobSet,
	/// Whether to disable `.gitignore` integration.
	pub disable_gitignore: bool,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			exclude_patterns: Vec::new(),
			include_set: GlobSet::empty(),
			disable_gitignore: false,
		}
	}
}

impl ScanOptions {
	/// Construct [`ScanOptions`] from an [`EnumgenConfig`].
	pub fn from_config(config: Option<&EnumgenConfig>) -> Self {
		let exclude_patterns = config
			.map(|c| c.exclude.patterns.clone())
			.unwrap_or_default();
		let include_patterns = config.map(|c| &c.include.patterns[..]).unwrap_or_default();
		let disable_gitignore = config.is_some_and(|c| c.disable_gitignore);

		Self {
			exclude_patterns,
			include_set: build_glob_set(include_patterns),
			disable_gitignore,
		}
	}
}

/// The source files of a project.
#[derive(Debug, Default)]
pub struct Project {
	pub root: PathBuf,
	/// Absolute paths, sorted.
	pub files: Vec<PathBuf>,
}

impl Project {
	/// `path` relative to the project root.
	pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
		path.strip_prefix(&self.root).unwrap_or(path)
	}
}

/// A scanned project together with the settings every file is processed
/// with.
#[derive(Debug)]
pub struct ProjectContext {
	pub project: Project,
	pub syntax: DirectiveSyntax,
	pub comments: CommentStyle,
	/// Absolute output directory. `None` rewrites files in place.
	pub output: Option<PathBuf>,
}

impl ProjectContext {
	/// Where the rewritten version of `path` goes.
	pub fn target_path(&self, path: &Path) -> PathBuf {
		match &self.output {
			Some(output) => output.join(self.project.relative(path)),
			None => path.to_path_buf(),
		}
	}
}

/// Scan a project with default options and no config.
pub fn scan_project(root: &Path) -> EnumgenResult<Project> {
	scan_project_with_options(root, &ScanOptions::default())
}

/// Scan a project with config: loads the discovered project config and
/// scans with its settings.
pub fn scan_project_with_config(root: &Path) -> EnumgenResult<ProjectContext> {
	let config = EnumgenConfig::load(root)?;
	let options = ScanOptions::from_config(config.as_ref());
	let mut project = scan_project_with_options(root, &options)?;
	let config = config.unwrap_or_default();
	let output = config.output.as_ref().map(|output| root.join(output));

	// Never read back what was written to the output directory.
	if let Some(output) = &output {
		project.files.retain(|file| !file.starts_with(output));
	}

	Ok(ProjectContext {
		project,
		syntax: config.directive_syntax(),
		comments: config.comments,
		output,
	})
}

pub fn scan_project_with_options(root: &Path, options: &ScanOptions) -> EnumgenResult<Project> {
	let mut files = collect_files(root, &options.exclude_patterns, options.disable_gitignore)?;

	if !options.include_set.is_empty() {
		let exclude_matcher = build_exclude_matcher(root, &options.exclude_patterns)?;
		collect_included_files(
			root,
			root,
			&options.include_set,
			&exclude_matcher,
			&mut files,
			true,
		)?;
		files.sort();
		files.dedup();
	}

	debug!(root = %root.display(), count = files.len(), "scanned project");

	Ok(Project {
		root: root.to_path_buf(),
		files,
	})
}

/// Build a `GlobSet` from a list of glob pattern strings.
fn build_glob_set(patterns: &[String]) -> GlobSet {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		if let Ok(glob) = Glob::new(pattern) {
			builder.add(glob);
		}
	}
	builder.build().unwrap_or_else(|_| GlobSet::empty())
}

/// Build a `Gitignore` matcher from the `[exclude]` patterns of
/// `enumgen.toml`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> EnumgenResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			EnumgenError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| EnumgenError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the project's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

/// Collect all source files from a directory tree.
///
/// When `disable_gitignore` is false (the default), files matched by the
/// project's `.gitignore` are skipped. Exclude patterns always apply on top.
fn collect_files(
	root: &Path,
	exclude_patterns: &[String],
	disable_gitignore: bool,
) -> EnumgenResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();

	let gitignore = if disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};
	let custom_exclude = build_exclude_matcher(root, exclude_patterns)?;

	walk_dir(
		root,
		&mut files,
		true,
		&gitignore,
		&custom_exclude,
		&mut visited_dirs,
	)?;
	files.sort();
	Ok(files)
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "vendor" || name == "testdata" || name == "node_modules"
}

fn has_project_config(dir: &Path) -> bool {
	CONFIG_FILE_CANDIDATES
		.iter()
		.any(|candidate| dir.join(candidate).is_file())
}

fn walk_dir(
	dir: &Path,
	files: &mut Vec<PathBuf>,
	is_root: bool,
	gitignore: &Gitignore,
	custom_exclude: &Gitignore,
	visited_dirs: &mut HashSet<PathBuf>,
) -> EnumgenResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// Detect symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(EnumgenError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();

		if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
			if is_ignored_directory_name(name) {
				continue;
			}
		}

		let is_dir = path.is_dir();
		if gitignore.matched(&path, is_dir).is_ignore()
			|| custom_exclude.matched(&path, is_dir).is_ignore()
		{
			continue;
		}

		if is_dir {
			// Subdirectories with their own config are separate projects.
			if !is_root && has_project_config(&path) {
				continue;
			}
			walk_dir(
				&path,
				files,
				false,
				gitignore,
				custom_exclude,
				visited_dirs,
			)?;
		} else if is_scannable_file(&path) {
			files.push(path);
		}
	}

	Ok(())
}

/// Recursively collect files matching include patterns.
fn collect_included_files(
	root: &Path,
	dir: &Path,
	include_set: &GlobSet,
	exclude_matcher: &Gitignore,
	files: &mut Vec<PathBuf>,
	is_root: bool,
) -> EnumgenResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();

		if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
			if is_ignored_directory_name(name) {
				continue;
			}
		}

		let is_dir = path.is_dir();
		if exclude_matcher.matched(&path, is_dir).is_ignore() {
			continue;
		}

		if let Ok(rel_path) = path.strip_prefix(root) {
			if !is_dir
				&& is_scannable_file(&path)
				&& include_set.is_match(rel_path)
				&& !files.contains(&path)
			{
				files.push(path.clone());
			}
		}

		if is_dir {
			if !is_root && has_project_config(&path) {
				continue;
			}
			collect_included_files(root, &path, include_set, exclude_matcher, files, false)?;
		}
	}

	Ok(())
}

fn is_scannable_file(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| ext == SOURCE_EXTENSION)
}
