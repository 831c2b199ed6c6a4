use super::*;
use std::fs;
use tempfile::TempDir;

fn ctx() -> MigrationContext {
    MigrationContext::new("00004_audit.tpl.sql", "billing")
}

#[test]
fn test_render_plain_sql_unchanged() {
    let env = JinjaEnvironment::new();
    let sql = "-- +tidemark Up\nSELECT * FROM users;\n";
    assert_eq!(env.render(sql, &ctx()).unwrap(), sql);
}

#[test]
fn test_render_filename_and_package() {
    let env = JinjaEnvironment::new();
    let result = env
        .render(
            "INSERT INTO audit VALUES ('{{ PackageName }}', '{{ Filename }}');",
            &ctx(),
        )
        .unwrap();
    assert_eq!(
        result,
        "INSERT INTO audit VALUES ('billing', '00004_audit.tpl.sql');"
    );
}

#[test]
fn test_render_control_flow() {
    let env = JinjaEnvironment::new();
    let template = "{% for t in ['a', 'b'] %}CREATE TABLE {{ PackageName }}_{{ t }} (id INT);\n{% endfor %}";
    let result = env.render(template, &ctx()).unwrap();
    assert_eq!(
        result,
        "CREATE TABLE billing_a (id INT);\nCREATE TABLE billing_b (id INT);\n"
    );
}

#[test]
fn test_render_undefined_variable_is_error() {
    let env = JinjaEnvironment::new();
    let err = env.render("SELECT '{{ Schema }}';", &ctx()).unwrap_err();
    assert!(matches!(err, JinjaError::RenderError(_)));
    assert!(err.to_string().contains("J001"));
}

#[test]
fn test_render_syntax_error() {
    let env = JinjaEnvironment::new();
    let err = env.render("SELECT {{ Filename ;", &ctx()).unwrap_err();
    assert!(matches!(err, JinjaError::RenderError(_)));
}

#[test]
fn test_render_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("00002_seed.tpl.sql");
    fs::write(
        &path,
        "-- +tidemark Up\nINSERT INTO log VALUES ('{{ Filename }}');\n",
    )
    .unwrap();

    let env = JinjaEnvironment::default();
    let result = env.render_file(&path, "migrations").unwrap();
    assert_eq!(
        result,
        "-- +tidemark Up\nINSERT INTO log VALUES ('00002_seed.tpl.sql');\n"
    );
}

#[test]
fn test_render_file_missing() {
    let dir = TempDir::new().unwrap();
    let env = JinjaEnvironment::new();
    let err = env
        .render_file(&dir.path().join("nope.tpl.sql"), "migrations")
        .unwrap_err();
    assert!(matches!(err, JinjaError::ReadError { .. }));
}
