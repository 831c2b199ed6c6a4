use super::*;
use crate::migration::MigrationKind;

fn sql(version: i64) -> Migration {
    Migration::new(
        version,
        format!("migrations/{version:05}_step.sql"),
        MigrationKind::Sql,
    )
}

fn sequence(versions: &[i64]) -> Migrations {
    Migrations::new(versions.iter().copied().map(sql).collect()).unwrap()
}

#[test]
fn test_new_sorts_ascending() {
    let ms = sequence(&[5, 1, 3]);
    assert_eq!(ms.versions(), vec![1, 3, 5]);
    assert_eq!(ms.first().unwrap().version, 1);
    assert_eq!(ms.last().unwrap().version, 5);
    assert_eq!(ms.max_version(), Some(5));
}

#[test]
fn test_new_rejects_duplicates() {
    let items = vec![
        sql(2),
        Migration::new(2, "migrations/00002_other.sql", MigrationKind::Sql),
    ];
    let err = Migrations::new(items).unwrap_err();
    match err {
        CoreError::DuplicateVersion {
            version,
            first,
            second,
        } => {
            assert_eq!(version, 2);
            assert_ne!(first, second);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_next() {
    let ms = sequence(&[1, 2, 5]);
    assert_eq!(ms.next(0).unwrap().version, 1);
    assert_eq!(ms.next(2).unwrap().version, 5);
    // gaps are tolerated
    assert_eq!(ms.next(3).unwrap().version, 5);
    assert!(matches!(
        ms.next(5).unwrap_err(),
        CoreError::NoNextVersion { current: 5 }
    ));
}

#[test]
fn test_previous() {
    let ms = sequence(&[1, 2, 5]);
    assert_eq!(ms.previous(5).unwrap().version, 2);
    assert_eq!(ms.previous(4).unwrap().version, 2);
    assert_eq!(ms.previous(100).unwrap().version, 5);
    assert!(matches!(
        ms.previous(1).unwrap_err(),
        CoreError::NoPreviousVersion { current: 1 }
    ));
}

#[test]
fn test_current() {
    let ms = sequence(&[1, 2, 5]);
    assert_eq!(ms.current(2).unwrap().script(), "00002_step.sql");
    assert!(matches!(
        ms.current(3).unwrap_err(),
        CoreError::NoCurrentVersion { version: 3 }
    ));
    assert!(ms.contains(5));
    assert!(!ms.contains(0));
}

#[test]
fn test_range_inclusive() {
    let ms = sequence(&[1, 2, 3, 4, 5]);
    assert_eq!(ms.range(2, 4).versions(), vec![2, 3, 4]);
    assert_eq!(ms.range(0, i64::MAX).len(), 5);
    assert!(ms.range(6, 10).is_empty());
}

#[test]
fn test_timestamp_partition() {
    let ms = sequence(&[1, 2, 20230115093000, 20230201000000]);
    assert_eq!(ms.versioned().versions(), vec![1, 2]);
    assert_eq!(
        ms.timestamped().versions(),
        vec![20230115093000, 20230201000000]
    );
}

#[test]
fn test_empty_sequence() {
    let ms = Migrations::new(Vec::new()).unwrap();
    assert!(ms.is_empty());
    assert_eq!(ms.max_version(), None);
    assert!(ms.next(0).is_err());
    assert!(ms.previous(1).is_err());
}
