//! Save domain: tests for progress bookkeeping and the save file.

use std::path::PathBuf;

use super::{SaveData, SaveError, SavePath, bank_level, load_save_file, write_save_file};

fn temp_save(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("kula-warp-test-{}", std::process::id()))
        .join(name)
}

// -----------------------------------------------------------------------------
// Progress
// -----------------------------------------------------------------------------

#[test]
fn test_completing_a_level_banks_points_and_advances() {
    let mut save = SaveData::default();
    save.complete_level(30, 1);
    save.complete_level(12, 2);

    assert_eq!(save.total_points, 42);
    assert_eq!(save.current_level, 2);
    assert_eq!(save.points_per_level, vec![30, 12]);
}

#[test]
fn test_death_penalty_can_end_the_game() {
    let mut save = SaveData::default();
    save.complete_level(10, 1);

    save.apply_death_penalty(10);
    assert_eq!(save.total_points, 0);
    assert!(!save.is_game_over());

    save.apply_death_penalty(5);
    assert!(save.is_game_over());
}

#[test]
fn test_reset_starts_over() {
    let mut save = SaveData::default();
    save.complete_level(10, 3);
    save.reset();

    assert_eq!(save, SaveData::default());
}

// -----------------------------------------------------------------------------
// File
// -----------------------------------------------------------------------------

#[test]
fn test_missing_file_is_a_fresh_save() {
    let save = load_save_file(&temp_save("missing.json")).unwrap();
    assert_eq!(save, SaveData::default());
}

#[test]
fn test_written_save_reads_back() {
    let path = temp_save("written.json");
    let mut save = SaveData::default();
    save.complete_level(25, 1);

    write_save_file(&path, &save).unwrap();
    let loaded = load_save_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, save);
}

#[test]
fn test_older_save_without_history_still_loads() {
    let path = temp_save("older.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{ "total_points": 7, "current_level": 2 }"#).unwrap();

    let loaded = load_save_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.total_points, 7);
    assert!(loaded.points_per_level.is_empty());
}

#[test]
fn test_corrupt_save_is_a_json_error() {
    let path = temp_save("corrupt.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let result = load_save_file(&path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(SaveError::JsonError(_))));
}

#[test]
fn test_banked_level_is_on_disk_before_confirming() {
    let path = temp_save("banked.json");
    let mut save = SaveData::default();

    bank_level(&SavePath(path.clone()), &mut save, 18, 1);
    let loaded = load_save_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.total_points, 18);
    assert_eq!(loaded.current_level, 1);
    assert_eq!(loaded, save);
}
