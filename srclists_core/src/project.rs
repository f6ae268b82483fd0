use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;

use crate::SrcResult;
use crate::SrclistsConfig;
use crate::TreeProfile;
use crate::TreeWalk;

/// A project root together with its loaded configuration.
///
/// This is the entry point consumed by [`generate_all`](crate::generate_all),
/// [`check_tree`](crate::check_tree) and
/// [`collect_manifest`](crate::collect_manifest).
#[derive(Debug, Clone)]
pub struct ProjectContext {
	/// Directory every tree root is resolved against.
	pub root: PathBuf,
	pub config: SrclistsConfig,
	/// The config file this context was loaded from, if any.
	pub config_path: Option<PathBuf>,
	exclude: Gitignore,
}

impl ProjectContext {
	/// Build a context from an explicit config, skipping discovery.
	pub fn new(root: impl Into<PathBuf>, config: SrclistsConfig) -> SrcResult<Self> {
		let root = root.into();
		config.validate()?;
		let exclude = config.exclude_matcher(&root)?;

		Ok(Self {
			root,
			config,
			config_path: None,
			exclude,
		})
	}

	/// The configured trees, in processing order.
	pub fn trees(&self) -> &[TreeProfile] {
		&self.config.trees
	}

	/// Find a configured tree by name.
	pub fn tree(&self, name: &str) -> Option<&TreeProfile> {
		self.config.trees.iter().find(|tree| tree.name == name)
	}

	/// Absolute location of a tree's root directory.
	pub fn tree_root(&self, profile: &TreeProfile) -> PathBuf {
		self.root.join(&profile.root)
	}

	pub fn fragment_name(&self) -> &str {
		&self.config.fragment_name
	}

	pub(crate) fn exclude(&self) -> &Gitignore {
		&self.exclude
	}

	/// Start a fresh walk over `profile`'s tree.
	pub fn walk(&self, profile: &TreeProfile) -> TreeWalk {
		TreeWalk::new(self.tree_root(profile), self.exclude.clone())
	}
}

/// Load the project at `root`, using the discovered `srclists.toml` or the
/// built-in trees when there is none.
pub fn load_project(root: &Path) -> SrcResult<ProjectContext> {
	let config = SrclistsConfig::load(root)?;
	let config_path = config.as_ref().and_then(|_| SrclistsConfig::resolve_path(root));
	let mut context = ProjectContext::new(root, config.unwrap_or_default())?;
	context.config_path = config_path;

	Ok(context)
}
