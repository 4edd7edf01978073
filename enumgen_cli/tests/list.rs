mod common;

use enumgen_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn list_shows_directives() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "a.go", common::FRESH_ENUM)?;
	common::write_file(
		tmp.path(),
		"b.go",
		&common::FRESH_ENUM_GENERATED.replace("Enum", "Kind"),
	)?;

	common::enumgen_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			predicates::str::contains("Enum a.go [foo, bar, baz] (missing)")
				.and(predicates::str::contains("Kind b.go [foo, bar, baz] (generated)"))
				.and(predicates::str::contains("2 type(s)")),
		);

	Ok(())
}

#[test]
fn list_without_directives() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "plain.go", "package plain\n\ntype Name string\n")?;

	common::enumgen_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No variants directives found."));

	Ok(())
}
