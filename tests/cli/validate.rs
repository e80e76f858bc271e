use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_validate_valid_message() -> Result<()> {
    let test = CliTest::new()?;
    assert_cli_snapshot!(
        test,
        test.l10n(&["validate", "Hello %s, <b>{count}</b> new", "안녕 %s, <b>{count}</b>개"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ valid

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_validate_invalid_message() -> Result<()> {
    let test = CliTest::new()?;
    assert_cli_snapshot!(test, test.l10n(&["validate", "%s and %d", "%d 그리고 %s"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ multiple formats without ordinal (%s, %d), use ordinal formats like %1$s  no-ordinal-format

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_validate_unexpected_tag() -> Result<()> {
    let test = CliTest::new()?;
    assert_cli_snapshot!(test, test.l10n(&["validate", "Hello", "<i>안녕</i>"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ unexpected tag <i>  unexpected-tag

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_validate_needs_no_config() -> Result<()> {
    let test = CliTest::new()?;
    let result = test.run(&["validate", "Bye", "잘가"])?;
    assert_eq!(result.code, Some(0));
    assert!(!test.root().join(".l10nrc.json").exists());
    Ok(())
}
