use super::*;

#[test]
fn test_extension() {
    let cases = [
        ("foo", ""),
        ("foo.sql", ".sql"),
        ("foo.tpl.sql", ".tpl.sql"),
        ("foo.rs", ".rs"),
        ("migrations/foo.rs", ".rs"),
        ("migrations/foo.sql", ".sql"),
        ("migrations/foo.tpl.sql", ".tpl.sql"),
        ("migrations", ""),
    ];
    for (name, expected) in cases {
        assert_eq!(extension(name), expected, "extension of {name}");
    }
}

#[test]
fn test_numeric_component_valid() {
    assert_eq!(numeric_component("00001_create_users.sql").unwrap(), 1);
    assert_eq!(numeric_component("42_seed.tpl.sql").unwrap(), 42);
    assert_eq!(numeric_component("dir/00002_rename_root.rs").unwrap(), 2);
    assert_eq!(
        numeric_component("20230115093000_add_index.sql").unwrap(),
        20230115093000
    );
    assert_eq!(numeric_component("00003_add.users.sql").unwrap(), 3);
}

#[test]
fn test_numeric_component_unknown_extension() {
    let err = numeric_component("00001_notes.txt").unwrap_err();
    assert!(matches!(err, CoreError::UnknownExtension { ref extension, .. } if extension == ".txt"));
}

#[test]
fn test_numeric_component_missing_separator() {
    let err = numeric_component("00001.sql").unwrap_err();
    assert!(matches!(err, CoreError::InvalidFilename { .. }));
}

#[test]
fn test_numeric_component_not_a_number() {
    for name in ["abc_create.sql", "_create.sql", "+5_create.sql", "1a_create.sql"] {
        let err = numeric_component(name).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidVersion { .. }),
            "{name}: {err}"
        );
    }
}

#[test]
fn test_numeric_component_zero_rejected() {
    let err = numeric_component("00000_init.sql").unwrap_err();
    assert!(err.to_string().contains("greater than zero"));
}

#[test]
fn test_is_timestamp() {
    assert!(is_timestamp(20230115093000));
    assert!(!is_timestamp(1));
    assert!(!is_timestamp(42));
    assert!(!is_timestamp(20230101));
    // month 13 is not a date
    assert!(!is_timestamp(20231301093000));
}
