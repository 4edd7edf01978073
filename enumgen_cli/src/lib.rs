use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Keep string enum constants in sync with the variants listed above their type.",
	long_about = "enumgen reads `variants=` directives from the comments above `type Name \
	              string` declarations and generates a constant block for every listed \
	              variant, directly after the type. Blocks are marked with `generated_for=` and \
	              regenerated in place on later runs.\n\nQuick start:\n  enumgen update  \
	              Generate or refresh every block\n  enumgen check   Verify everything is up to \
	              date\n  enumgen list    Show every type carrying a directive"
)]
pub struct EnumgenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Check that every generated block matches its directive.
	///
	/// Exits with a non-zero status code if any file would be rewritten by
	/// `update`. Use `--diff` to see exactly what would change.
	Check {
		/// Show a unified diff for each stale file.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Generate missing blocks and regenerate stale ones.
	Update {
		/// Preview changes without writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// List every type carrying a `variants=` directive.
	List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
