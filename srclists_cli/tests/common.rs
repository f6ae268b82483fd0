use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn srclists_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("srclists"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Create an empty file at `relative`, including missing parent directories.
pub fn touch(root: &Path, relative: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, "")
}
