#![cfg(unix)]
#![allow(deprecated)]

#[allow(unused_imports)]
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_LS: &str = r#"#!/bin/sh
if [ "$1" = "--help" ]; then
    echo "fake listing help"
    exit 0
fi
if [ -n "$FAKE_LS_ARGS" ]; then
    printf '%s\n' "$*" > "$FAKE_LS_ARGS"
fi
echo "total 8"
printf '%s\n' '-rw-r--r-- 1 me me 10 Jan  1 12:00 abc'
printf 'drwxr-xr-x 2 me me 4096 Jan  1 12:00 \033[01;34mtenletters\033[0m\n'
printf '%s\n' '-rw-r--r-- 1 me me 99 Jan  1 12:00 fivec'
if [ -n "$FAKE_LS_FAIL" ]; then
    echo "fake: cannot access 'missing'" >&2
    exit 2
fi
"#;

// Two entries whose names are single bytes that are not valid UTF-8.
const FAKE_LS_RAW_NAMES: &str = r#"#!/bin/sh
printf '%s 1 \376\n' '-rw'
printf '%s 1 \377\n' '-rw'
"#;

fn fake_ls(temp: &TempDir) -> PathBuf {
    write_script(temp, "fake-ls", FAKE_LS)
}

fn write_script(temp: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("lsn").unwrap();
    c.current_dir(temp.path())
        .env("LSN_LS", fake_ls(temp))
        .env("NO_COLOR", "1")
        .env_remove("LSN_STORE")
        .env_remove("LSN_LOG");
    c
}

fn store_contents(dir: &Path) -> String {
    fs::read_to_string(dir.join(".descriptions")).unwrap()
}

#[test]
fn set_then_list_aligns_descriptions() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["-e", "abc", "three letters"])
        .assert()
        .success()
        .stdout("");
    cmd(&temp)
        .args(["--extended-description", "tenletters", "a directory"])
        .assert()
        .success();

    let out = cmd(&temp).assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "total 8");
    assert_eq!(
        lines[1],
        "-rw-r--r-- 1 me me 10 Jan  1 12:00 abc         three letters"
    );
    assert_eq!(
        lines[2],
        "drwxr-xr-x 2 me me 4096 Jan  1 12:00 \x1b[01;34mtenletters\x1b[0m  a directory"
    );
    assert_eq!(lines[3], "-rw-r--r-- 1 me me 99 Jan  1 12:00 fivec");
}

#[test]
fn set_description_replaces_existing_record() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["-e", "a", "1"]).assert().success();
    cmd(&temp).args(["-e", "b", "2"]).assert().success();
    cmd(&temp).args(["-e", "a", "new text"]).assert().success();
    assert_eq!(store_contents(temp.path()), "a|new%20text\nb|2\n");
}

#[test]
fn set_description_encodes_delimiters() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["-e", "fivec", "pipes | and\nnewlines"])
        .assert()
        .success();
    assert_eq!(
        store_contents(temp.path()),
        "fivec|pipes%20%7C%20and%0Anewlines\n"
    );
}

#[test]
fn set_description_needs_two_arguments() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["-e", "only-a-name"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing filename"));
    assert!(!temp.path().join(".descriptions").exists());
}

#[test]
fn unknown_arguments_are_forwarded() {
    let temp = TempDir::new().unwrap();
    let args_file = temp.path().join("args.txt");
    cmd(&temp)
        .env("FAKE_LS_ARGS", &args_file)
        .args(["-a", "--sort=size", "src"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(args_file).unwrap(),
        "--color=always -l -a --sort=size src\n"
    );
}

#[test]
fn custom_store_path() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("notes.db");
    cmd(&temp)
        .env("LSN_STORE", &store)
        .args(["-e", "fivec", "from env"])
        .assert()
        .success();
    assert!(!temp.path().join(".descriptions").exists());
    cmd(&temp)
        .env("LSN_STORE", &store)
        .assert()
        .success()
        .stdout(predicate::str::contains("fivec       from env"));
}

#[test]
fn colored_descriptions_without_no_color() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["-e", "abc", "blue"]).assert().success();
    cmd(&temp)
        .env_remove("NO_COLOR")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[34mblue\x1b[0m"));
}

#[test]
fn missing_listing_program_is_reported() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .env("LSN_LS", temp.path().join("does-not-exist"))
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("failed to run"));
}

#[test]
fn listing_failure_status_is_propagated() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["-e", "abc", "still shown"]).assert().success();
    cmd(&temp)
        .env("FAKE_LS_FAIL", "1")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("still shown"))
        .stderr(predicate::str::contains("cannot access"));
}

#[test]
fn help_includes_listing_help() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lsn - List with Notes"))
        .stdout(predicate::str::contains("--extended-description"))
        .stdout(predicate::str::contains("fake listing help"));
}

#[test]
fn malformed_store_value_aborts_listing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".descriptions"), "abc|bad%Z\n").unwrap();
    cmd(&temp)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("malformed percent escape"));
}

#[test]
fn non_utf8_names_keep_their_own_descriptions() {
    let temp = TempDir::new().unwrap();
    let ls = write_script(&temp, "fake-ls-raw", FAKE_LS_RAW_NAMES);
    cmd(&temp)
        .env("LSN_LS", &ls)
        .arg("-e")
        .arg(OsStr::from_bytes(&[0xff]))
        .arg("for ff only")
        .assert()
        .success();
    assert_eq!(store_contents(temp.path()), "%FF|for%20ff%20only\n");

    let out = cmd(&temp)
        .env("LSN_LS", &ls)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(out, b"-rw 1 \xfe\n-rw 1 \xff  for ff only\n");
}
