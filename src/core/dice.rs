//! Dice and the per-session dice tray.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;
use crate::error::{Error, Result};

/// Number of faces on a die.
pub const FACES: u8 = 6;

/// Face shown by every die of a freshly created session.
pub const DEFAULT_FACE: u8 = 1;

/// A single die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    /// Face value in `1..=6`.
    pub value: u8,
    /// Locked dice keep their value across rolls.
    pub locked: bool,
}

impl Default for Die {
    fn default() -> Self {
        Self {
            value: DEFAULT_FACE,
            locked: false,
        }
    }
}

/// The dice tray of a session. Length is fixed at creation (5 or 6).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    dice: SmallVec<[Die; 6]>,
}

impl Dice {
    /// Create `count` unlocked dice showing the default face.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            dice: SmallVec::from_elem(Die::default(), count),
        }
    }

    /// Create unlocked dice from literal face values.
    pub fn from_values(values: &[u8]) -> Result<Self> {
        validate_faces(values)?;
        Ok(Self {
            dice: values
                .iter()
                .map(|&value| Die {
                    value,
                    locked: false,
                })
                .collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    /// Face values in stored order.
    #[must_use]
    pub fn values(&self) -> SmallVec<[u8; 6]> {
        self.dice.iter().map(|d| d.value).collect()
    }

    /// Overwrite face values in stored order, keeping lock flags.
    ///
    /// Used by hooks that rewrite dice before scoring. Extra values are ignored.
    pub fn set_values(&mut self, values: &[u8]) {
        for (die, &value) in self.dice.iter_mut().zip(values) {
            die.value = value;
        }
    }

    /// Re-roll every unlocked die.
    pub fn roll(&mut self, rng: &mut GameRng) {
        for die in self.dice.iter_mut().filter(|d| !d.locked) {
            die.value = rng.roll_die();
        }
    }

    /// Toggle the lock flag of the die at `index`.
    pub fn toggle_lock(&mut self, index: usize) -> Result<bool> {
        let len = self.dice.len();
        let die = self
            .dice
            .get_mut(index)
            .ok_or(Error::InvalidDieIndex { index, len })?;
        die.locked = !die.locked;
        Ok(die.locked)
    }

    pub fn unlock_all(&mut self) {
        for die in &mut self.dice {
            die.locked = false;
        }
    }
}

/// Check that every value is a legal face.
pub fn validate_faces(values: &[u8]) -> Result<()> {
    match values.iter().find(|&&v| !(1..=FACES).contains(&v)) {
        Some(bad) => Err(Error::InvalidDice(format!("face {bad} outside 1..={FACES}"))),
        None => Ok(()),
    }
}
