use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use srclists_cli::Commands;
use srclists_cli::OutputFormat;
use srclists_cli::SrclistsCli;
use srclists_core::CONFIG_FILE_CANDIDATES;
use srclists_core::CheckResult;
use srclists_core::ProjectContext;
use srclists_core::SrclistsConfig;
use srclists_core::StaleKind;
use srclists_core::check_all;
use srclists_core::collect_all_manifests;
use srclists_core::generate_all_with;
use srclists_core::load_project;
use srclists_core::plan_tree;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

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

const SAMPLE_CONFIG: &str = "# srclists configuration\n#\n# Without this file srclists \
                             processes the three built-in trees shown below.\n\n# File written \
                             into every directory.\n# fragment_name = \"CMakeLists.txt\"\n\n# \
                             Gitignore-style patterns, relative to the project root.\n# \
                             [exclude]\n# patterns = [\"third_party/\"]\n\n# [[trees]]\n# name \
                             = \"library\"\n# root = \"bouncerlib/src\"\n# sources = \
                             \"SOURCES\"\n# headers = \"HEADERS\"\n\n# [[trees]]\n# name = \
                             \"test\"\n# root = \"test/src\"\n# sources = \"TEST_SOURCES\"\n# \
                             headers = \"TEST_HEADERS\"\n\n# [[trees]]\n# name = \"client\"\n# \
                             root = \"repobouncerclient/src\"\n# sources = \
                             \"CLIENT_SOURCES\"\n# headers = \"CLIENT_HEADERS\"\n";

fn main() {
	let args = SrclistsCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		None => run_update(&args, false),
		Some(Commands::Update { dry_run }) => run_update(&args, *dry_run),
		Some(Commands::Check { diff, format }) => run_check(&args, *diff, *format),
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Init) => run_init(&args),
	};

	if let Err(e) = result {
		match e.downcast::<srclists_core::SrcError>() {
			Ok(src_err) => {
				let report: miette::Report = (*src_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.try_init();
}

fn resolve_root(args: &SrclistsCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_and_report(args: &SrclistsCli) -> Result<ProjectContext, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let ctx = load_project(&root)?;
	tracing::debug!(root = %root.display(), trees = ctx.trees().len(), "loaded project");

	if args.verbose {
		match &ctx.config_path {
			Some(path) => println!("Using config {}", make_relative(path, &root)),
			None => println!("No config file found, using built-in trees"),
		}
		for profile in ctx.trees() {
			println!(
				"  {} {} ({} / {})",
				profile.name,
				profile.root.display(),
				profile.sources,
				profile.headers
			);
		}
	}

	Ok(ctx)
}

fn run_update(args: &SrclistsCli, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_and_report(args)?;
	let fragment_name = ctx.fragment_name();
	let trees = ctx.trees().len();

	if dry_run {
		let mut count = 0usize;
		for profile in ctx.trees() {
			for plan in plan_tree(&ctx, profile) {
				let plan = plan?;
				let rel = make_relative(&plan.directory, &ctx.root);
				println!("Would create {fragment_name} in {rel}");
				count += 1;
			}
		}
		println!("Dry run: would write {count} fragment(s) across {trees} tree(s).");
		return Ok(());
	}

	let summary = generate_all_with(&ctx, |_, plan| {
		let rel = make_relative(&plan.directory, &ctx.root);
		println!("Created {fragment_name} in {rel}");
	})?;

	println!(
		"{} {} fragment(s) across {trees} tree(s).",
		colored!("Wrote", green),
		summary.written_count()
	);

	Ok(())
}

fn run_check(
	args: &SrclistsCli,
	show_diff: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_and_report(args)?;
	let result = check_all(&ctx)?;

	match format {
		OutputFormat::Json => {
			let stale: Vec<serde_json::Value> = result
				.stale
				.iter()
				.map(|entry| {
					serde_json::json!({
						"tree": entry.tree,
						"path": make_relative(&entry.path, &ctx.root),
						"kind": entry.kind,
					})
				})
				.collect();
			let output = serde_json::json!({
				"ok": result.is_ok(),
				"checked": result.checked,
				"stale": stale,
			});
			println!("{output}");
		}
		OutputFormat::Text => print_check_text(&ctx, &result, show_diff),
	}

	if !result.is_ok() {
		process::exit(1);
	}

	Ok(())
}

fn print_check_text(ctx: &ProjectContext, result: &CheckResult, show_diff: bool) {
	if result.is_ok() {
		println!(
			"Check passed: all {} fragment(s) are up to date.",
			result.checked
		);
		return;
	}

	eprintln!("Check failed.");
	let mut stale: Vec<_> = result.stale.iter().collect();
	stale.sort_by(|a, b| a.path.cmp(&b.path));

	for entry in stale {
		let rel = make_relative(&entry.path, &ctx.root);
		let label = match entry.kind {
			StaleKind::Missing => colored!("missing", red),
			StaleKind::Outdated => colored!("outdated", yellow),
		};
		eprintln!("  {label} [{}] {rel}", entry.tree);

		if show_diff && entry.kind == StaleKind::Outdated {
			print_diff(&entry.current, &entry.expected);
		}
	}

	eprintln!();
	eprintln!(
		"{} of {} fragment(s) are out of date. Run `srclists update` to fix.",
		result.stale.len(),
		result.checked
	);
}

fn run_list(args: &SrclistsCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_and_report(args)?;
	let manifests = collect_all_manifests(&ctx)?;

	if let OutputFormat::Json = format {
		println!("{}", serde_json::to_string_pretty(&manifests)?);
		return Ok(());
	}

	for (index, manifest) in manifests.iter().enumerate() {
		if index > 0 {
			println!();
		}
		println!("{}", colored!(format!("{}:", manifest.tree), bold));

		if manifest.is_empty() {
			println!("  no sources or headers found");
			continue;
		}

		for (variable, files) in [
			(&manifest.sources_var, &manifest.sources),
			(&manifest.headers_var, &manifest.headers),
		] {
			if files.is_empty() {
				continue;
			}
			println!("  {variable} ({})", files.len());
			for file in files {
				println!("    {file}");
			}
		}
	}

	Ok(())
}

fn run_init(args: &SrclistsCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = SrclistsConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join(CONFIG_FILE_CANDIDATES[0]);
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created config file: {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Uncomment and edit the trees to match your layout");
	println!("  2. Run `srclists` to generate every CMakeLists.txt");

	Ok(())
}

/// Print a unified diff between two strings, colorized.
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

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
