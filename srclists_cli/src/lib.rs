use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Regenerate per-directory CMake source and header lists from the files on disk.",
	long_about = "srclists walks the library, test and client source trees and writes a \
	              CMakeLists.txt into every directory. Each fragment descends into its \
	              subdirectories and appends the directory's .cpp and .h files to the tree's \
	              aggregate variables.\n\nRunning without a subcommand is the same as `srclists \
	              update`.\n\nQuick start:\n  srclists         Regenerate every fragment\n  \
	              srclists check   Verify every fragment is up to date\n  srclists list    Show \
	              the accumulated source and header lists\n  srclists init    Create a sample \
	              srclists.toml"
)]
pub struct SrclistsCli {
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
	/// Regenerate every fragment in every configured tree.
	///
	/// Each directory's CMakeLists.txt is fully rewritten from the files
	/// currently on disk. Fragments left behind in directories that are no
	/// longer walked are not removed.
	Update {
		/// Print which fragments would be written without touching disk.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that every fragment matches what `update` would write.
	///
	/// Exits with a non-zero status code when any fragment is missing or
	/// out of date. Nothing is written.
	Check {
		/// Show a line diff for each outdated fragment.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the sources and headers each tree accumulates, in the order
	/// CMake sees them after executing every fragment.
	List {
		/// Output format for the listing.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Create a sample `srclists.toml` in the project root.
	///
	/// If a config file already exists this command is a no-op and exits
	/// successfully.
	Init,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
