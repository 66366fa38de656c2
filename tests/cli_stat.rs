use assert_cmd::Command;
use predicates::prelude::*;

const EXAMPLE: &str = "((A:1,B:2)X:1,(C:1,D:1,E:1)Y:1)root;";

#[test]
fn command_stat_basic() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    let output = cmd.arg("stat").arg("stdin").write_stdin(EXAMPLE).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("nodes\t8"));
    assert!(stdout.contains("tips\t5"));
    assert!(stdout.contains("internals\t3"));
    assert!(stdout.contains("unnamed internals\t0"));
    assert!(stdout.contains("max children\t3"));
    Ok(())
}

#[test]
fn command_stat_unnamed() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("stat").arg("stdin").write_stdin("((A,B),(C,D)Y);");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("unnamed internals\t2"));
    Ok(())
}

#[test]
fn command_stat_invalid_input() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("stat").arg("stdin").write_stdin("((A,B;");
    cmd.assert().failure();
    Ok(())
}
