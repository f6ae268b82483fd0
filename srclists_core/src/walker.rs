use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use serde::Serialize;

use crate::SrcError;
use crate::SrcResult;

/// One visited directory: its path and the names of its immediate children.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DirectoryEntry {
	pub path: PathBuf,
	/// Immediate subdirectory names, sorted.
	pub subdirectories: Vec<String>,
	/// Immediate file names, sorted.
	pub files: Vec<String>,
}

/// A lazy pre-order walk over every directory below a root.
///
/// Parents are always yielded before their descendants and siblings are
/// visited in name order, so walking the same unchanged tree twice yields
/// identical entries. A root that is missing or not a directory yields
/// nothing.
///
/// Symbolic links to directories are followed. A directory whose canonical
/// path was already visited is skipped, which breaks symlink loops.
///
/// ```rust,no_run
/// use ignore::gitignore::Gitignore;
/// use srclists_core::TreeWalk;
///
/// for entry in TreeWalk::new("bouncerlib/src", Gitignore::empty()) {
/// 	let entry = entry.unwrap();
/// 	println!("{} has {} files", entry.path.display(), entry.files.len());
/// }
/// ```
#[derive(Debug)]
pub struct TreeWalk {
	pending: Vec<PathBuf>,
	visited: HashSet<PathBuf>,
	exclude: Gitignore,
}

impl TreeWalk {
	pub fn new(root: impl Into<PathBuf>, exclude: Gitignore) -> Self {
		let root = root.into();
		let pending = if root.is_dir() {
			vec![root]
		} else {
			tracing::debug!(root = %root.display(), "tree root is missing, nothing to walk");
			Vec::new()
		};

		Self {
			pending,
			visited: HashSet::new(),
			exclude,
		}
	}
}

impl Iterator for TreeWalk {
	type Item = SrcResult<DirectoryEntry>;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(dir) = self.pending.pop() {
			if !mark_visited(&mut self.visited, &dir) {
				continue;
			}

			match read_directory(&dir, &self.exclude) {
				Ok(entry) => {
					// Reversed so the first name is popped first.
					for name in entry.subdirectories.iter().rev() {
						self.pending.push(dir.join(name));
					}
					return Some(Ok(entry));
				}
				Err(error) => {
					self.pending.clear();
					return Some(Err(error));
				}
			}
		}

		None
	}
}

/// Record `dir` as visited. Returns false when its canonical path has been
/// seen before.
pub(crate) fn mark_visited(visited: &mut HashSet<PathBuf>, dir: &Path) -> bool {
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if visited.insert(canonical) {
		return true;
	}

	tracing::warn!(dir = %dir.display(), "directory already visited, skipping symlink loop");
	false
}

/// List the immediate children of `dir`, split into subdirectories and files.
pub(crate) fn read_directory(dir: &Path, exclude: &Gitignore) -> SrcResult<DirectoryEntry> {
	let read_dir_error = |source: std::io::Error| SrcError::ReadDir {
		path: dir.to_path_buf(),
		source,
	};

	let mut subdirectories = Vec::new();
	let mut files = Vec::new();

	for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
		let entry = entry.map_err(read_dir_error)?;
		let path = entry.path();
		let Ok(name) = entry.file_name().into_string() else {
			tracing::warn!(path = %path.display(), "skipping entry with a non UTF-8 name");
			continue;
		};

		let is_dir = path.is_dir();
		if exclude.matched(&path, is_dir).is_ignore() {
			tracing::debug!(path = %path.display(), "excluded by config");
			continue;
		}

		if is_dir {
			subdirectories.push(name);
		} else {
			files.push(name);
		}
	}

	subdirectories.sort();
	files.sort();
	tracing::debug!(
		dir = %dir.display(),
		subdirectories = subdirectories.len(),
		files = files.len(),
		"visited directory"
	);

	Ok(DirectoryEntry {
		path: dir.to_path_buf(),
		subdirectories,
		files,
	})
}
