use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SrcError {
	#[error(transparent)]
	#[diagnostic(code(srclists::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read directory `{}`", .path.display())]
	#[diagnostic(
		code(srclists::read_dir),
		help("check that the directory is readable by the current user")
	)]
	ReadDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write fragment `{}`", .path.display())]
	#[diagnostic(
		code(srclists::fragment_write),
		help("fragments written before this one were kept; fix the cause and run again")
	)]
	FragmentWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read fragment `{}`", .path.display())]
	#[diagnostic(
		code(srclists::fragment_read),
		help("check that the fragment is a readable file")
	)]
	FragmentRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(srclists::config_parse),
		help("check that srclists.toml is valid TOML with `[[trees]]` and/or `[exclude]` sections")
	)]
	ConfigParse(String),

	#[error("invalid aggregate variable name `{name}` in tree `{tree}`")]
	#[diagnostic(
		code(srclists::invalid_variable_name),
		help("variable names may only contain ASCII letters, digits and `_`")
	)]
	InvalidVariableName { tree: String, name: String },

	#[error("duplicate tree `{0}` in config")]
	#[diagnostic(
		code(srclists::duplicate_tree),
		help("each `[[trees]]` entry needs a unique `name`")
	)]
	DuplicateTreeName(String),

	#[error("invalid exclude pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(srclists::invalid_exclude_pattern),
		help("exclude patterns follow .gitignore syntax")
	)]
	InvalidExcludePattern { pattern: String, reason: String },
}

pub type SrcResult<T> = Result<T, SrcError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
