//! Shared helpers for integration tests.
//!
//! Dice are random, so scenario tests that need a particular hand restore
//! the session from an edited snapshot, the same way a store would load
//! one.

#![allow(dead_code)]

use dice_referee::{Category, FeatureSet, GameRng, Outcome, Session, TurnController};
use serde_json::{json, Value};

/// A session with `names` joined in order.
pub fn seated(features: FeatureSet, names: &[&str]) -> Session {
    let mut session = Session::new(features);
    for name in names {
        session = TurnController::new(&session, name).join().unwrap().session;
    }
    session
}

/// Edit a session through its serialized form.
pub fn edit(session: &Session, f: impl FnOnce(&mut Value)) -> Session {
    let mut value = serde_json::to_value(session).unwrap();
    f(&mut value);
    serde_json::from_value(value).unwrap()
}

/// Replace the face values of the dice, keeping lock flags.
pub fn with_dice(session: &Session, faces: &[u8]) -> Session {
    edit(session, |value| {
        let dice = value["dice"]["dice"].as_array_mut().unwrap();
        assert_eq!(dice.len(), faces.len(), "dice count mismatch");
        for (die, &face) in dice.iter_mut().zip(faces) {
            die["value"] = json!(face);
        }
    })
}

/// Roll once, force the hand to `faces`, and score it into `category`.
pub fn play_turn(session: &Session, who: &str, faces: &[u8], category: Category) -> Outcome {
    let mut rng = GameRng::new(0);
    let rolled = TurnController::new(session, who).roll(&mut rng).unwrap().session;
    let forced = with_dice(&rolled, faces);
    TurnController::new(&forced, who).score(category).unwrap()
}
