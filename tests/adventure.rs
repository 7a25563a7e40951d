use optician::game::{load_progress, save_progress, Outcome, ScriptedConsole};
use optician::{Adventure, GameError, Progress, Room};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tempfile::TempDir;

fn save_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    (dir, path)
}

fn adventure(path: &PathBuf, answers: &[&str]) -> Adventure<ScriptedConsole, StdRng> {
    Adventure::new(
        ScriptedConsole::new(answers.iter().copied()),
        StdRng::seed_from_u64(42),
        path.clone(),
    )
}

#[test]
fn secret_room_route_collects_both_items() {
    let (_dir, path) = save_file();
    let mut game = adventure(
        &path,
        &["center", "yes", "inspect", "31", "yes", "yes", "yes"],
    );

    let outcome = game.play().unwrap();
    let progress = match outcome {
        Outcome::Finished(progress) => progress,
        other => panic!("expected the game to finish, got {other:?}"),
    };
    assert_eq!(progress.score, 50);
    assert_eq!(progress.inventory, vec!["Enchanted Scroll", "Bag of Gold"]);
    assert_eq!(
        progress.moves,
        vec![
            "Start room: chose center",
            "Solved secret room puzzle and obtained Enchanted Scroll",
            "Entered treasure room and collected treasure",
        ]
    );
    assert!(game.console().said("Game Over. Final Progress:"));
    assert_eq!(load_progress(&path).unwrap(), progress);
}

#[test]
fn quitting_keeps_the_position_for_next_time() {
    let (_dir, path) = save_file();

    let mut first = adventure(&path, &["right", "no"]);
    let outcome = first.play().unwrap();
    assert!(matches!(outcome, Outcome::Suspended(_)));
    assert!(first.console().said("Exiting game and saving progress."));
    assert_eq!(load_progress(&path).unwrap().current_room, Room::TreasureRoom);

    let mut second = adventure(&path, &["no", "yes"]);
    let outcome = second.play().unwrap();
    assert!(matches!(outcome, Outcome::Finished(_)));
    let progress = outcome.progress();
    assert_eq!(progress.score, 0);
    assert!(progress.inventory.is_empty());
    assert_eq!(progress.moves.len(), 2);
}

#[test]
fn unknown_room_in_the_save_ends_the_game() {
    let (_dir, path) = save_file();
    std::fs::write(
        &path,
        r#"{"current_room":"dungeon","inventory":["Lamp"],"score":5,"moves":[]}"#,
    )
    .unwrap();

    let mut game = adventure(&path, &["yes"]);
    let outcome = game.play().unwrap();
    let progress = outcome.progress();
    assert!(progress.current_room.is_end());
    assert_eq!(progress.score, 5);
    assert_eq!(progress.moves, vec!["Encountered an unknown room"]);
    assert!(game.console().said("lost in the game world"));
}

#[test]
fn running_out_of_input_still_saves() {
    let (_dir, path) = save_file();
    let mut game = adventure(&path, &["left"]);

    assert!(matches!(game.play(), Err(GameError::InputClosed)));
    let saved = load_progress(&path).unwrap();
    assert_eq!(saved.current_room, Room::PuzzleRoom);
    assert_eq!(saved.moves, vec!["Start room: chose left"]);
}

#[test]
fn corrupted_save_is_reported() {
    let (_dir, path) = save_file();
    std::fs::write(&path, "not json").unwrap();

    let mut game = adventure(&path, &["left"]);
    assert!(matches!(game.play(), Err(GameError::CorruptedSave(_))));
}

#[test]
fn finished_save_replays_only_the_summary() {
    let (_dir, path) = save_file();
    let mut done = Progress::new();
    done.collect("Bag of Gold", 30);
    done.move_to(Room::End);
    save_progress(&path, &done).unwrap();

    let mut game = adventure(&path, &[]);
    let outcome = game.play().unwrap();
    assert_eq!(outcome, Outcome::Finished(done));
    assert_eq!(game.console().remaining(), 0);
}
