#![allow(dead_code)]

use assert_cmd::Command;

/// Formatter script that puts spaces around every `+`.
pub const SPACING_SCRIPT: &str = "sed 's/ *+ */ + /g'";

pub const UNFORMATTED: &str = "Some text.\n    ```melbi\n    a+b\n    ```\nMore text.\n";
pub const FORMATTED: &str = "Some text.\n    ```melbi\n    a + b\n    ```\nMore text.\n";

pub fn fencefmt_cmd() -> Command {
	let mut cmd =
		Command::cargo_bin("fencefmt").unwrap_or_else(|e| panic!("binary builds: {e}"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

/// A `fencefmt` command that formats with `sh -c <script>`.
pub fn fencefmt_with_script(script: &str) -> Command {
	let mut cmd = fencefmt_cmd();
	cmd.args(["--formatter", "sh", "--formatter-arg", "-c", "--formatter-arg", script]);
	cmd
}
