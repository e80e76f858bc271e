use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, keys_json, trans_json};

fn setup() -> Result<CliTest> {
    let test = CliTest::with_keys(&keys_json(&[("Hello", false), ("Bye", false)]))?;
    test.write_file(
        "cache/app/trans-en.json",
        &format!(
            "[{},{}]",
            trans_json("Hello", "Hello", None),
            trans_json("Bye", "Bye", None)
        ),
    )?;
    test.write_file(
        "cache/app/trans-ko.json",
        &format!(
            "[{},{},{}]",
            trans_json("Hello", "안녕", None),
            trans_json("Bye", "", Some("new")),
            trans_json("Old", "옛날", Some("obsolete"))
        ),
    )?;
    Ok(test)
}

#[test]
fn test_count_total() -> Result<()> {
    let test = setup()?;
    assert_cli_snapshot!(test, test.l10n(&["count", "-l", "en,ko"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    app,en:2,ko:3

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_count_missing_locale_is_zero() -> Result<()> {
    let test = setup()?;
    assert_cli_snapshot!(test, test.l10n(&["count"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    app,en:2,ko:3,fr:0

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_count_with_specs() -> Result<()> {
    let test = setup()?;

    assert_cli_snapshot!(test, test.l10n(&["count", "-l", "ko", "-s", "untranslated"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    app,ko:1

    ----- stderr -----
    ");

    let result = test.run(&["count", "-l", "ko", "-s", "translated,!obsolete"])?;
    assert_eq!(result.stdout, "app,ko:1\n");

    let result = test.run(&["count", "-l", "ko", "--spec", "obsolete"])?;
    assert_eq!(result.stdout, "app,ko:1\n");
    Ok(())
}

#[test]
fn test_count_does_not_modify_files() -> Result<()> {
    let test = setup()?;
    let before = test.read_file("cache/app/trans-ko.json")?;
    test.run(&["count"])?;
    assert_eq!(test.read_file("cache/app/trans-ko.json")?, before);
    Ok(())
}

#[test]
fn test_count_invalid_spec() -> Result<()> {
    let test = setup()?;
    let result = test.run(&["count", "-s", "!"])?;
    assert_eq!(result.code, Some(2));
    Ok(())
}

#[test]
fn test_count_corrupt_file_is_an_error() -> Result<()> {
    let test = setup()?;
    test.write_file("cache/app/trans-fr.json", "[")?;
    let result = test.run(&["count"])?;
    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("Failed to parse JSON"));
    Ok(())
}
