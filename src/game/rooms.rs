//! Room handlers
//!
//! Each handler narrates its room, asks until it gets an answer it can act
//! on, updates the progress and sets the next room. None of them save.

use super::console::Console;
use crate::data::{Progress, Room};
use crate::GameError;
use rand::Rng;

pub const RIDDLE_ANSWER: &str = "piano";
pub const SCROLL_RIDDLE: &str = "12 * 3 - 5";
pub const SCROLL_ANSWER: i64 = 12 * 3 - 5;

pub const ENCHANTED_SCROLL: &str = "Enchanted Scroll";
pub const BAG_OF_GOLD: &str = "Bag of Gold";

pub const PUZZLE_POINTS: u32 = 10;
pub const SCROLL_POINTS: u32 = 20;
pub const TREASURE_POINTS: u32 = 30;

/// Three paths: left, right and center
pub fn start_room(console: &mut impl Console, progress: &mut Progress) -> Result<(), GameError> {
    console.say("\n[Start Room]");
    console.say("You find yourself in a mysterious hall with three pathways: left, right, and center.");

    loop {
        let choice = console.ask("Choose a path (left/right/center): ")?.to_lowercase();
        progress.record(format!("Start room: chose {choice}"));

        let next = match choice.as_str() {
            "left" => Room::PuzzleRoom,
            "right" => Room::TreasureRoom,
            "center" => Room::SecretRoom,
            _ => {
                console.say("Invalid choice. Please try again.");
                continue;
            }
        };
        progress.move_to(next);
        return Ok(());
    }
}

/// A riddle, then an addition; both retried until correct
pub fn puzzle_room(
    console: &mut impl Console,
    rng: &mut impl Rng,
    progress: &mut Progress,
) -> Result<(), GameError> {
    console.say("\n[Puzzle Room]");
    console.say("You enter a room with a locked door. A mysterious voice challenges you with two puzzles.");

    loop {
        let answer = console.ask("Puzzle 1 - Riddle: What has keys but can't open locks? ")?;
        if answer.eq_ignore_ascii_case(RIDDLE_ANSWER) {
            console.say("Correct! Now onto the next puzzle.");
            break;
        }
        console.say("Incorrect. Try again.");
    }

    let a: i64 = rng.gen_range(1..=10);
    let b: i64 = rng.gen_range(1..=10);
    loop {
        let answer = console.ask(&format!("Puzzle 2 - Math: What is {a} + {b}? "))?;
        match answer.parse::<i64>() {
            Ok(n) if n == a + b => {
                console.say("Correct! The door unlocks.");
                progress.award(PUZZLE_POINTS);
                break;
            }
            Ok(_) => console.say("Incorrect. Try again."),
            Err(_) => console.say("Please enter a valid number."),
        }
    }

    progress.record("Solved puzzles in puzzle_room");
    progress.move_to(Room::TreasureRoom);
    Ok(())
}

/// Inspect the artifacts (and solve the scroll) or ignore them
pub fn secret_room(console: &mut impl Console, progress: &mut Progress) -> Result<(), GameError> {
    console.say("\n[Secret Room]");
    console.say("You have discovered a hidden passage leading to a secret room filled with ancient artifacts.");

    loop {
        let choice = console
            .ask("Do you want to (inspect) the artifacts or (ignore) them and go back? ")?
            .to_lowercase();
        match choice.as_str() {
            "inspect" => {
                console.say(&format!(
                    "You inspect the artifacts and find a mysterious scroll with a math riddle: 'Solve: {SCROLL_RIDDLE}'"
                ));
                let answer = console.ask("What is your answer? ")?;
                match answer.parse::<i64>() {
                    Ok(n) if n == SCROLL_ANSWER => {
                        console.say("Correct! The scroll grants you an enchanted item.");
                        progress.collect(ENCHANTED_SCROLL, SCROLL_POINTS);
                        progress.record("Solved secret room puzzle and obtained Enchanted Scroll");
                        break;
                    }
                    Ok(_) => console.say("That is not correct. Try again."),
                    Err(_) => console.say("Please enter a valid number."),
                }
            }
            "ignore" => {
                console.say("You decide to ignore the artifacts and return to the hall.");
                progress.record("Ignored secret room puzzle");
                break;
            }
            _ => console.say("Invalid choice. Please choose 'inspect' or 'ignore'."),
        }
    }

    progress.move_to(Room::TreasureRoom);
    Ok(())
}

/// Last room; taking the treasure is optional
pub fn treasure_room(console: &mut impl Console, progress: &mut Progress) -> Result<(), GameError> {
    console.say("\n[Treasure Room]");
    console.say("You enter a room filled with glittering treasure: gold, jewels, and mystical relics lie before you!");
    progress.record("Entered treasure room and collected treasure");

    let take = console.ask("Do you want to take some treasure? (yes/no): ")?;
    if take.eq_ignore_ascii_case("yes") {
        progress.collect(BAG_OF_GOLD, TREASURE_POINTS);
        console.say("You take a bag of gold. Your wealth increases!");
    } else {
        console.say("You decide not to take anything and simply admire the view.");
    }

    progress.move_to(Room::End);
    Ok(())
}

/// A room tag nobody handles ends the game
pub fn unknown_room(console: &mut impl Console, progress: &mut Progress) {
    console.say("You seem to be lost in the game world!");
    progress.record("Encountered an unknown room");
    progress.move_to(Room::End);
}
