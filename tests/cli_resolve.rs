use assert_cmd::Command;
use predicates::prelude::*;

const EXAMPLE: &str = "((A:1,B:2)X:1,(C:1,D:1,E:1)Y:1)root;";

#[test]
fn command_resolve_bifurcating_default() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("resolve").arg("stdin").write_stdin("(A,B,C,D,E);");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(A,(B,(C,(D,E):0):0):0);"));
    Ok(())
}

#[test]
fn command_resolve_max_three() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("resolve")
        .arg("stdin")
        .arg("--max")
        .arg("3")
        .write_stdin("(A,B,C,D,E);");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(A,B,(C,D,E):0);"));
    Ok(())
}

#[test]
fn command_resolve_eps() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("resolve")
        .arg("stdin")
        .arg("--eps")
        .arg("0.5")
        .write_stdin(EXAMPLE);
    cmd.assert().success().stdout(predicate::str::contains(
        "((A:1,B:2)X:1,(C:1,(D:1,E:1):0.5)Y:1)root;",
    ));
    Ok(())
}

#[test]
fn command_resolve_invalid_max() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("resolve")
        .arg("stdin")
        .arg("--max")
        .arg("1")
        .write_stdin("(A,B,C);");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must be >= 2"));
    Ok(())
}
