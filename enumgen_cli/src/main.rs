use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use enumgen_cli::Commands;
use enumgen_cli::EnumgenCli;
use enumgen_cli::OutputFormat;
use enumgen_core::FileUpdate;
use enumgen_core::check_project;
use enumgen_core::compute_updates;
use enumgen_core::list_directives;
use enumgen_core::project::ProjectContext;
use enumgen_core::project::scan_project_with_config;
use enumgen_core::write_updates;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "ENUMGEN_LOG";

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = EnumgenCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_logging(args.verbose, use_color);

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Check { diff, format }) => run_check(&args, diff, format),
		Some(Commands::Update { dry_run }) => run_update(&args, dry_run),
		Some(Commands::List) => run_list(&args),
		None => {
			eprintln!("No subcommand specified. Run `enumgen --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<enumgen_core::EnumgenError>() {
			Ok(enumgen_err) => {
				let report: miette::Report = (*enumgen_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_logging(verbose: bool, use_color: bool) {
	let default_level = if verbose { "enumgen_core=debug" } else { "warn" };
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.init();
}

fn resolve_root(args: &EnumgenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn scan(args: &EnumgenCli) -> Result<ProjectContext, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	Ok(scan_project_with_config(&root)?)
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn type_names(update: &FileUpdate) -> Vec<&str> {
	update
		.report
		.entries
		.iter()
		.filter(|entry| entry.mutation.is_change())
		.map(|entry| entry.type_name.as_str())
		.collect()
}

#[derive(Serialize)]
struct StaleJson<'a> {
	file: String,
	target: String,
	types: Vec<&'a str>,
}

fn run_check(
	args: &EnumgenCli,
	show_diff: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = scan(args)?;
	let root = resolve_root(args);
	let result = check_project(&ctx)?;

	if result.is_ok() {
		match format {
			OutputFormat::Json => println!("{{\"ok\":true,\"stale\":[]}}"),
			OutputFormat::Text => println!("Check passed: all generated blocks are up to date."),
		}
		return Ok(());
	}

	match format {
		OutputFormat::Json => {
			let stale: Vec<StaleJson<'_>> = result
				.stale
				.iter()
				.map(|update| {
					StaleJson {
						file: make_relative(&update.source, &root),
						target: make_relative(&update.target, &root),
						types: type_names(update),
					}
				})
				.collect();
			let output = serde_json::json!({
				"ok": false,
				"stale": stale,
			});
			println!("{output}");
		}
		OutputFormat::Text => {
			eprintln!("Check failed.");
			eprintln!();
			eprintln!("Stale files:");
			for update in &result.stale {
				eprintln!(
					"  {} ({})",
					make_relative(&update.target, &root),
					type_names(update).join(", ")
				);
				if show_diff {
					print_diff(update.original.as_deref().unwrap_or_default(), &update.content);
				}
			}
			eprintln!();
			eprintln!(
				"{}",
				colored!(
					format!(
						"{} stale file(s). Run `enumgen update` to regenerate.",
						result.stale.len()
					),
					yellow
				)
			);
		}
	}

	process::exit(1);
}

fn run_update(args: &EnumgenCli, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = scan(args)?;
	let root = resolve_root(args);
	let updates = compute_updates(&ctx)?;

	if updates.is_empty() {
		println!("All generated blocks are already up to date.");
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would update {} block(s) in {} file(s):",
			updates.updated_count,
			updates.updated_files.len()
		);
		for update in &updates.updated_files {
			println!("  {}", make_relative(&update.target, &root));
		}
		return Ok(());
	}

	write_updates(&updates)?;
	println!(
		"{}",
		colored!(
			format!(
				"Updated {} block(s) in {} file(s).",
				updates.updated_count,
				updates.updated_files.len()
			),
			green
		)
	);

	if args.verbose {
		for update in &updates.updated_files {
			println!(
				"  {} ({})",
				make_relative(&update.target, &root),
				type_names(update).join(", ")
			);
		}
	}

	Ok(())
}

fn run_list(args: &EnumgenCli) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = scan(args)?;
	let entries = list_directives(&ctx)?;

	if entries.is_empty() {
		println!("No variants directives found.");
		return Ok(());
	}

	println!("{}", colored!("Types:", bold));
	for entry in &entries {
		let status = if entry.generated {
			colored!("generated", green)
		} else {
			colored!("missing", yellow)
		};
		println!(
			"  {} {} [{}] ({status})",
			entry.type_name,
			entry.file.display(),
			entry.variants.join(", ")
		);
	}

	println!();
	println!("{} type(s)", entries.len());

	Ok(())
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
