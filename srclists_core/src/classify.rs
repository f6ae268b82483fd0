use serde::Serialize;

/// Suffix identifying a compilable source file.
pub const SOURCE_SUFFIX: &str = ".cpp";
/// Suffix identifying a header file.
pub const HEADER_SUFFIX: &str = ".h";

/// The kind a file name was classified as.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum FileKind {
	Source,
	Header,
}

impl FileKind {
	/// Classify a single file name by its suffix, ignoring ASCII case.
	/// Returns `None` for names that are neither sources nor headers.
	pub fn of(name: &str) -> Option<Self> {
		if has_suffix_ignore_case(name, SOURCE_SUFFIX) {
			Some(Self::Source)
		} else if has_suffix_ignore_case(name, HEADER_SUFFIX) {
			Some(Self::Header)
		} else {
			None
		}
	}
}

/// A directory's file names split into sources and headers.
///
/// Both lists keep the order the names were presented in. Names matching
/// neither suffix are dropped.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct ClassifiedFiles {
	pub sources: Vec<String>,
	pub headers: Vec<String>,
}

impl ClassifiedFiles {
	/// Returns true when neither sources nor headers were found.
	pub fn is_empty(&self) -> bool {
		self.sources.is_empty() && self.headers.is_empty()
	}
}

/// Partition `names` into [`ClassifiedFiles`].
pub fn classify<I, S>(names: I) -> ClassifiedFiles
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut classified = ClassifiedFiles::default();

	for name in names {
		let name = name.as_ref();
		match FileKind::of(name) {
			Some(FileKind::Source) => classified.sources.push(name.to_string()),
			Some(FileKind::Header) => classified.headers.push(name.to_string()),
			None => {}
		}
	}

	classified
}

fn has_suffix_ignore_case(name: &str, suffix: &str) -> bool {
	let Some(start) = name.len().checked_sub(suffix.len()) else {
		return false;
	};

	name.get(start..)
		.is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}
