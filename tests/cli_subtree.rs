use assert_cmd::Command;
use predicates::prelude::*;

const EXAMPLE: &str = "((A:1,B:2)X:1,(C:1,D:1,E:1)Y:1)root;";
const CATARRHINI: &str = "(((Homo,Pan)Hominini,Gorilla)Homininae,Pongo)Hominidae;";

#[test]
fn command_subtree_basic() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("subtree")
        .arg("stdin")
        .arg("-n")
        .arg("A")
        .arg("-n")
        .arg("C")
        .arg("-n")
        .arg("D")
        .write_stdin(EXAMPLE);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(A:2,(C:1,D:1)Y:1)root;"));
    Ok(())
}

#[test]
fn command_subtree_fast_agrees() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("subtree")
        .arg("stdin")
        .arg("--fast")
        .arg("-n")
        .arg("A")
        .arg("-n")
        .arg("C")
        .arg("-n")
        .arg("D")
        .write_stdin(EXAMPLE);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(A:2,(C:1,D:1)Y:1)root;"));
    Ok(())
}

#[test]
fn command_subtree_regex() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("subtree")
        .arg("stdin")
        .arg("-r")
        .arg("^(homo|pan)$")
        .write_stdin(CATARRHINI);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(Homo,Pan)Hominini;"));
    Ok(())
}

#[test]
fn command_subtree_unknown_name() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("subtree")
        .arg("stdin")
        .arg("-n")
        .arg("nonexistent_taxon")
        .write_stdin(EXAMPLE);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent_taxon"));
    Ok(())
}

#[test]
fn command_subtree_no_lengths() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwt")?;
    cmd.arg("subtree")
        .arg("stdin")
        .arg("-n")
        .arg("A")
        .arg("-n")
        .arg("C")
        .write_stdin("((A,B)X,(C,D,E)Y);");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(A,C);"));
    Ok(())
}
