use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use serde::Serialize;

use crate::FileKind;
use crate::ProjectContext;
use crate::SrcResult;
use crate::TreeProfile;
use crate::walker::mark_visited;
use crate::walker::read_directory;

/// Every source and header in a tree, in the order CMake accumulates them
/// when it executes the generated fragments.
///
/// Paths are relative to the tree root and use `/` as separator.
/// Descendants always precede their ancestors: a directory's own files are
/// appended after every subdirectory has contributed.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct TreeManifest {
	/// Name of the tree this manifest describes.
	pub tree: String,
	/// Contents of the tree's source aggregate variable.
	pub sources_var: String,
	pub sources: Vec<String>,
	/// Contents of the tree's header aggregate variable.
	pub headers_var: String,
	pub headers: Vec<String>,
}

impl TreeManifest {
	pub fn is_empty(&self) -> bool {
		self.sources.is_empty() && self.headers.is_empty()
	}
}

struct Collector<'a> {
	exclude: &'a Gitignore,
	visited: HashSet<PathBuf>,
	manifest: TreeManifest,
}

/// Accumulate every file of `profile`'s tree into a [`TreeManifest`].
///
/// A missing tree root produces an empty manifest.
pub fn collect_manifest(ctx: &ProjectContext, profile: &TreeProfile) -> SrcResult<TreeManifest> {
	let mut collector = Collector {
		exclude: ctx.exclude(),
		visited: HashSet::new(),
		manifest: TreeManifest {
			tree: profile.name.clone(),
			sources_var: profile.sources.clone(),
			headers_var: profile.headers.clone(),
			..TreeManifest::default()
		},
	};

	let root = ctx.tree_root(profile);
	if root.is_dir() {
		accumulate(&root, "", &mut collector)?;
	}

	Ok(collector.manifest)
}

/// Collect manifests for every configured tree, in order.
pub fn collect_all_manifests(ctx: &ProjectContext) -> SrcResult<Vec<TreeManifest>> {
	ctx.trees()
		.iter()
		.map(|profile| collect_manifest(ctx, profile))
		.collect()
}

fn accumulate(dir: &Path, prefix: &str, collector: &mut Collector<'_>) -> SrcResult<()> {
	if !mark_visited(&mut collector.visited, dir) {
		return Ok(());
	}

	let entry = read_directory(dir, collector.exclude)?;

	for subdirectory in &entry.subdirectories {
		let child_prefix = format!("{prefix}{subdirectory}/");
		accumulate(&dir.join(subdirectory), &child_prefix, collector)?;
	}

	for name in &entry.files {
		match FileKind::of(name) {
			Some(FileKind::Source) => collector.manifest.sources.push(format!("{prefix}{name}")),
			Some(FileKind::Header) => collector.manifest.headers.push(format!("{prefix}{name}")),
			None => {}
		}
	}

	Ok(())
}
