use std::{fs, io::Write};

use maze_chase_core::{CellKind, Level, Position};
use maze_chase_level::{load_level, LevelError, LoadSource};

#[test]
fn reads_and_centres_a_level_file() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "#S#").expect("write level");
    writeln!(file, "D.X").expect("write level");
    writeln!(file, "#G#").expect("write level");

    let loaded = load_level(file.path(), 7, 7).expect("level loads");

    assert_eq!(loaded.source, LoadSource::Loaded);
    assert_eq!(loaded.level.start, Some(Position::new(2, 3)));
    assert_eq!(loaded.level.goal, Some(Position::new(4, 3)));
    assert_eq!(
        loaded.level.rewards.iter().copied().collect::<Vec<_>>(),
        vec![Position::new(3, 2)]
    );
    assert_eq!(loaded.level.pursuers, vec![Position::new(3, 4)]);
    assert_eq!(
        loaded.level.grid.kind(Position::new(2, 2)),
        Some(CellKind::Wall)
    );
}

#[test]
fn missing_file_yields_empty_layout() {
    let directory = tempfile::tempdir().expect("create temp dir");
    let path = directory.path().join("absent.txt");

    let loaded = load_level(&path, 30, 30).expect("missing file is not an error");

    assert_eq!(loaded.source, LoadSource::Missing);
    assert_eq!(loaded.level, Level::empty(30, 30));
}

#[test]
fn unreadable_path_is_reported() {
    let directory = tempfile::tempdir().expect("create temp dir");
    let nested = directory.path().join("levels");
    fs::create_dir(&nested).expect("create nested dir");

    let error = load_level(&nested, 30, 30).expect_err("directories are not level files");

    let LevelError::Read { path, .. } = error;
    assert_eq!(path, nested);
}
