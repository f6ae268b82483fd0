use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use serde::Deserialize;
use serde::Serialize;

use crate::SrcError;
use crate::SrcResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["srclists.toml", ".srclists.toml", ".config/srclists.toml"];

/// Name of the fragment written into every visited directory.
pub const DEFAULT_FRAGMENT_NAME: &str = "CMakeLists.txt";

/// One root tree together with the aggregate variables its fragments
/// redefine.
///
/// ```toml
/// [[trees]]
/// name = "library"
/// root = "bouncerlib/src"
/// sources = "SOURCES"
/// headers = "HEADERS"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct TreeProfile {
	/// Short label used in output and logs.
	pub name: String,
	/// Tree root, relative to the project root.
	pub root: PathBuf,
	/// Aggregate variable receiving `.cpp` files.
	pub sources: String,
	/// Aggregate variable receiving `.h` files.
	pub headers: String,
}

impl TreeProfile {
	pub fn new(
		name: impl Into<String>,
		root: impl Into<PathBuf>,
		sources: impl Into<String>,
		headers: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			root: root.into(),
			sources: sources.into(),
			headers: headers.into(),
		}
	}

	/// Library sources: `bouncerlib/src` into `SOURCES` / `HEADERS`.
	pub fn library() -> Self {
		Self::new("library", "bouncerlib/src", "SOURCES", "HEADERS")
	}

	/// Test sources: `test/src` into `TEST_SOURCES` / `TEST_HEADERS`.
	pub fn test() -> Self {
		Self::new("test", "test/src", "TEST_SOURCES", "TEST_HEADERS")
	}

	/// Client sources: `repobouncerclient/src` into `CLIENT_SOURCES` /
	/// `CLIENT_HEADERS`.
	pub fn client() -> Self {
		Self::new(
			"client",
			"repobouncerclient/src",
			"CLIENT_SOURCES",
			"CLIENT_HEADERS",
		)
	}

	/// The three trees processed when no config file overrides them.
	pub fn builtin() -> Vec<Self> {
		vec![Self::library(), Self::test(), Self::client()]
	}
}

/// Configuration loaded from a `srclists.toml` file.
///
/// ```toml
/// fragment_name = "CMakeLists.txt"
///
/// [exclude]
/// patterns = ["third_party/", "*.generated.cpp"]
///
/// [[trees]]
/// name = "library"
/// root = "bouncerlib/src"
/// sources = "SOURCES"
/// headers = "HEADERS"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SrclistsConfig {
	/// File name of the generated fragment in each directory.
	#[serde(default = "default_fragment_name")]
	pub fragment_name: String,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Trees to process, in order. When present this replaces the built-in
	/// library, test and client trees.
	#[serde(default = "TreeProfile::builtin")]
	pub trees: Vec<TreeProfile>,
}

/// Configuration for excluding files and directories from the walk.
///
/// Patterns follow gitignore syntax and are relative to the project root.
/// Excluded directories are neither descended into nor declared with
/// `add_subdirectory`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

fn default_fragment_name() -> String {
	DEFAULT_FRAGMENT_NAME.to_string()
}

impl Default for SrclistsConfig {
	fn default() -> Self {
		Self {
			fragment_name: default_fragment_name(),
			exclude: ExcludeConfig::default(),
			trees: TreeProfile::builtin(),
		}
	}
}

impl SrclistsConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load and validate the config from the first discovered config file at
	/// `root`. Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SrcResult<Option<SrclistsConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: SrclistsConfig =
			toml::from_str(&content).map_err(|e| SrcError::ConfigParse(e.to_string()))?;
		config.validate()?;

		Ok(Some(config))
	}

	/// Check tree names are unique and variable names are usable as CMake
	/// identifiers.
	pub fn validate(&self) -> SrcResult<()> {
		if self.fragment_name.is_empty()
			|| self.fragment_name.contains(['/', '\\'])
			|| self.fragment_name == "."
			|| self.fragment_name == ".."
		{
			return Err(SrcError::ConfigParse(format!(
				"`fragment_name` must be a plain file name, got `{}`",
				self.fragment_name
			)));
		}

		let mut names = HashSet::new();
		for tree in &self.trees {
			if !names.insert(tree.name.as_str()) {
				return Err(SrcError::DuplicateTreeName(tree.name.clone()));
			}

			for variable in [&tree.sources, &tree.headers] {
				if !is_valid_variable_name(variable) {
					return Err(SrcError::InvalidVariableName {
						tree: tree.name.clone(),
						name: variable.clone(),
					});
				}
			}
		}

		Ok(())
	}

	/// Build the exclude matcher for a project rooted at `root`.
	pub fn exclude_matcher(&self, root: &Path) -> SrcResult<Gitignore> {
		let mut builder = GitignoreBuilder::new(root);
		for pattern in &self.exclude.patterns {
			builder
				.add_line(None, pattern)
				.map_err(|e| SrcError::InvalidExcludePattern {
					pattern: pattern.clone(),
					reason: e.to_string(),
				})?;
		}
		builder.build().map_err(|e| SrcError::InvalidExcludePattern {
			pattern: self.exclude.patterns.join(", "),
			reason: e.to_string(),
		})
	}
}

fn is_valid_variable_name(name: &str) -> bool {
	!name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
