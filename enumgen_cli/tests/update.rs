mod common;

use enumgen_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn update_inserts_generated_block() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "enum.go", common::FRESH_ENUM)?;

	common::enumgen_cmd()
		.arg("update")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated 1 block(s) in 1 file(s)."));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("enum.go"))?,
		common::FRESH_ENUM_GENERATED
	);

	Ok(())
}

#[test]
fn update_twice_is_a_no_op() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "enum.go", common::FRESH_ENUM)?;

	common::enumgen_cmd()
		.arg("update")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();
	common::enumgen_cmd()
		.arg("update")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("enum.go"))?,
		common::FRESH_ENUM_GENERATED
	);

	Ok(())
}

#[test]
fn update_dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "enum.go", common::FRESH_ENUM)?;

	common::enumgen_cmd()
		.arg("update")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			predicates::str::contains("Dry run: would update 1 block(s) in 1 file(s):")
				.and(predicates::str::contains("enum.go")),
		);

	assert_eq!(std::fs::read_to_string(tmp.path().join("enum.go"))?, common::FRESH_ENUM);

	Ok(())
}

#[test]
fn update_regenerates_in_place() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = common::FRESH_ENUM_GENERATED.replace("variants=foo,bar,baz", "variants=foo,bar,baz,qux");
	common::write_file(tmp.path(), "enum.go", &source)?;

	common::enumgen_cmd()
		.arg("update")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let updated = std::fs::read_to_string(tmp.path().join("enum.go"))?;
	let expected = source.replace(
		"\tEnumBaz Enum = \"baz\"\n)",
		"\tEnumBaz Enum = \"baz\"\n\tEnumQux Enum = \"qux\"\n)",
	);
	assert_eq!(updated, expected);
	assert_eq!(updated.matches("//generated_for=Enum").count(), 1);

	Ok(())
}

#[test]
fn update_uses_configured_namespace_and_comments() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		".enumgen.toml",
		"namespace = \"enum\"\ncomments = \"decorations\"\n",
	)?;
	common::write_file(
		tmp.path(),
		"color.go",
		"package paint\n\n// Color is a paint color.\n//enum:variants=red,dark-blue\ntype Color string\n",
	)?;

	common::enumgen_cmd()
		.arg("update")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("color.go"))?,
		"package paint

// Color is a paint color.
//enum:variants=red,dark-blue
type Color string

//enum:generated_for=Color
const (
	ColorRed Color = \"red\"
	ColorDark_blue Color = \"dark-blue\"
)
"
	);

	Ok(())
}
