use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_name_basic() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("name").arg("stdin").write_stdin("((A,B),(C,D));");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("((A,B)node2,(C,D)node3)node1;"));
    Ok(())
}

#[test]
fn command_name_keeps_existing() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("name")
        .arg("stdin")
        .write_stdin("((A,B)X,(C,D))root;");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("((A,B)X,(C,D)node1)root;"));
    Ok(())
}

#[test]
fn command_name_collision() -> anyhow::Result<()> {
    // A tip already called node1 forces the counter past it
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("name")
        .arg("stdin")
        .write_stdin("((node1,B),(C,D));");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("((node1,B)node3,(C,D)node4)node2;"));
    Ok(())
}

#[test]
fn command_name_idempotent() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    let output = cmd
        .arg("name")
        .arg("stdin")
        .write_stdin("((A,B),(C,D));")
        .output()?;
    let first = String::from_utf8(output.stdout)?;

    let mut cmd = Command::cargo_bin("nwt")?;
    let output = cmd.arg("name").arg("stdin").write_stdin(first.clone()).output()?;
    let second = String::from_utf8(output.stdout)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn command_name_multiple_trees() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    let output = cmd
        .arg("name")
        .arg("stdin")
        .write_stdin("(A,B);\n(C,(D,E));\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("(A,B)node1;"));
    assert!(stdout.contains("(C,(D,E)node2)node1;"));
    Ok(())
}
