use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::ClassifiedFiles;
use crate::SrcError;
use crate::SrcResult;
use crate::TreeProfile;

/// Comment block opening every generated fragment, followed by one blank
/// line.
pub const FRAGMENT_HEADER: &str = "#THIS IS AN AUTOMATICALLY GENERATED FILE - DO NOT OVERWRITE THE \
                                   CONTENT!\n#If you need to update the sources/headers/sub \
                                   directory information, run srclists at project root level\n#If \
                                   you need to import an extra library or something clever, do it \
                                   on the CMakeLists.txt at the root level\n#If you really need to \
                                   overwrite this file, be aware that it will be overwritten if \
                                   srclists is executed.\n\n";

/// Prefix qualifying every listed file with the directory CMake is
/// processing when it executes the fragment.
pub const CURRENT_SOURCE_DIR: &str = "${CMAKE_CURRENT_SOURCE_DIR}";

/// A rendered fragment, ready to be written or compared with disk.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FragmentPlan {
	/// The directory this fragment describes.
	pub directory: PathBuf,
	/// Where the fragment lives: `<directory>/<fragment name>`.
	pub path: PathBuf,
	pub contents: String,
}

/// Render the fragment for one directory.
///
/// Subdirectory directives come first so that, when CMake executes the
/// fragment, every descendant appends to the aggregate variables before this
/// directory appends its own files.
pub fn render_fragment(
	subdirectories: &[String],
	files: &ClassifiedFiles,
	profile: &TreeProfile,
) -> String {
	let mut out = String::from(FRAGMENT_HEADER);

	for subdirectory in subdirectories {
		out.push_str("add_subdirectory(");
		out.push_str(subdirectory);
		out.push_str(")\n");
	}

	push_set_block(&mut out, &profile.sources, &files.sources);
	push_set_block(&mut out, &profile.headers, &files.headers);

	out
}

/// Append a `set(<var> ${<var>} ... CACHE STRING "<var>" FORCE)` block, or
/// nothing when `names` is empty.
fn push_set_block(out: &mut String, variable: &str, names: &[String]) {
	if names.is_empty() {
		return;
	}

	out.push_str(&format!("set({variable}\n"));
	out.push_str(&format!("\t${{{variable}}}\n"));
	for name in names {
		out.push_str(&format!("\t{CURRENT_SOURCE_DIR}/{name}\n"));
	}
	out.push_str(&format!("\tCACHE STRING \"{variable}\" FORCE)\n\n"));
}

/// Replace the file at `path` with `contents`.
///
/// The contents go to a sibling temporary file first and are renamed over
/// the target only after a successful flush, so a failed write leaves the
/// previous fragment untouched.
pub fn write_fragment(path: &Path, contents: &str) -> SrcResult<()> {
	let temp_path = temp_path_for(path);
	let result = write_and_flush(&temp_path, contents).and_then(|()| std::fs::rename(&temp_path, path));

	if let Err(source) = result {
		let _ = std::fs::remove_file(&temp_path);
		return Err(SrcError::FragmentWrite {
			path: path.to_path_buf(),
			source,
		});
	}

	Ok(())
}

fn write_and_flush(path: &Path, contents: &str) -> std::io::Result<()> {
	let file = std::fs::File::create(path)?;
	let mut writer = BufWriter::new(file);
	writer.write_all(contents.as_bytes())?;
	let file = writer.into_inner().map_err(std::io::IntoInnerError::into_error)?;
	file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
	let file_name = path
		.file_name()
		.map_or_else(|| "fragment".into(), |name| name.to_string_lossy());
	path.with_file_name(format!(".{file_name}.tmp-{}", std::process::id()))
}
