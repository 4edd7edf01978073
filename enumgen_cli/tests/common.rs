#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;

pub const FRESH_ENUM: &str = "package sample

//variants=foo,bar,baz
type Enum string
";

pub const FRESH_ENUM_GENERATED: &str = "package sample

//variants=foo,bar,baz
type Enum string

//generated_for=Enum
const (
	EnumFoo Enum = \"foo\"
	EnumBar Enum = \"bar\"
	EnumBaz Enum = \"baz\"
)
";

pub fn enumgen_cmd() -> Command {
	let mut cmd = Command::cargo_bin("enumgen").unwrap_or_else(|e| panic!("binary not built: {e}"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("ENUMGEN_LOG");
	cmd
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}
