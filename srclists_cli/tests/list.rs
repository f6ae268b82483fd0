mod common;

use serde_json::Value;
use similar_asserts::assert_eq;
use srclists_core::AnyEmptyResult;

#[test]
fn list_prints_accumulated_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::touch(tmp.path(), "bouncerlib/src/a.cpp")?;
	common::touch(tmp.path(), "bouncerlib/src/sub/b.cpp")?;
	common::touch(tmp.path(), "bouncerlib/src/sub/b.h")?;
	common::touch(tmp.path(), "bouncerlib/src/README.md")?;

	let output = common::srclists_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let stdout = String::from_utf8(output.stdout)?;
	assert!(stdout.contains("library:\n  SOURCES (2)\n    sub/b.cpp\n    a.cpp\n  HEADERS (1)\n    sub/b.h\n"));
	assert!(stdout.contains("test:\n  no sources or headers found\n"));
	assert!(!stdout.contains("README.md"));

	// Listing never writes fragments.
	assert!(!tmp.path().join("bouncerlib/src/CMakeLists.txt").exists());

	Ok(())
}

#[test]
fn list_json_matches_manifest() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::touch(tmp.path(), "test/src/unit/ut_a.cpp")?;
	common::touch(tmp.path(), "test/src/helpers.H")?;

	let output = common::srclists_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let json: Value = serde_json::from_slice(&output.stdout)?;
	let trees = json.as_array().ok_or("expected an array")?;
	assert_eq!(trees.len(), 3);
	assert_eq!(trees[1]["tree"], "test");
	assert_eq!(trees[1]["sources_var"], "TEST_SOURCES");
	assert_eq!(trees[1]["sources"], serde_json::json!(["unit/ut_a.cpp"]));
	assert_eq!(trees[1]["headers"], serde_json::json!(["helpers.H"]));

	Ok(())
}
