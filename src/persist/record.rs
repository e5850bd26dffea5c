//! The on-disk save record.
//!
//! Field order is fixed and some fields are present only in two-player
//! saves, so the record is written as one flat tuple rather than a derived
//! struct:
//!
//! ```text
//! two_player: bool
//! rows: i32, cols: i32
//! cells: rows*cols x i32        row-major; -1 empty, -2 prop, >= 0 block type
//! p1_row: i32, p1_col: i32
//! [p2_row: i32, p2_col: i32]    two-player only
//! p1_score: i32
//! [p2_score: i32]               two-player only
//! remaining_time: i32
//! prop_count: u64
//! prop_count x (kind: i32, row: i32, col: i32)
//! ```

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{MAX_COLS, MAX_ROWS};

/// A prop entry in a save file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropRecord {
    pub kind: i32,
    pub row: i32,
    pub col: i32,
}

/// The raw contents of a save file, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRecord {
    pub two_player: bool,
    pub rows: i32,
    pub cols: i32,
    /// Row-major cell codes.
    pub cells: Vec<i32>,
    /// `(row, col)` per player: one entry, or two in two-player saves.
    pub positions: Vec<(i32, i32)>,
    /// One per player, same order as `positions`.
    pub scores: Vec<i32>,
    pub remaining_time: i32,
    pub props: Vec<PropRecord>,
}

impl SaveRecord {
    #[must_use]
    pub fn player_count(&self) -> usize {
        if self.two_player {
            2
        } else {
            1
        }
    }

    fn field_count(&self) -> usize {
        3 + self.cells.len() + self.positions.len() * 2 + self.scores.len() + 2 + self.props.len() * 3
    }
}

/// Dimension check done while decoding, before any cell is read.
fn check_dimension<E: de::Error>(name: &str, value: i32, max: usize) -> Result<usize, E> {
    usize::try_from(value)
        .ok()
        .filter(|v| (1..=max).contains(v))
        .ok_or_else(|| E::custom(format!("{} {} outside 1..={}", name, value, max)))
}

impl Serialize for SaveRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(self.field_count())?;
        tup.serialize_element(&self.two_player)?;
        tup.serialize_element(&self.rows)?;
        tup.serialize_element(&self.cols)?;
        for code in &self.cells {
            tup.serialize_element(code)?;
        }
        for (row, col) in &self.positions {
            tup.serialize_element(row)?;
            tup.serialize_element(col)?;
        }
        for score in &self.scores {
            tup.serialize_element(score)?;
        }
        tup.serialize_element(&self.remaining_time)?;
        tup.serialize_element(&(self.props.len() as u64))?;
        for prop in &self.props {
            tup.serialize_element(&prop.kind)?;
            tup.serialize_element(&prop.row)?;
            tup.serialize_element(&prop.col)?;
        }
        tup.end()
    }
}

struct RecordVisitor;

fn next<'de, T, A>(seq: &mut A, what: &str) -> Result<T, A::Error>
where
    T: Deserialize<'de>,
    A: SeqAccess<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::custom(format!("save data ends before {}", what)))
}

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = SaveRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a pairlink save record")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SaveRecord, A::Error> {
        let two_player: bool = next(&mut seq, "the mode flag")?;
        let rows: i32 = next(&mut seq, "rows")?;
        let cols: i32 = next(&mut seq, "cols")?;
        let cell_count = check_dimension::<A::Error>("rows", rows, MAX_ROWS)?
            * check_dimension::<A::Error>("cols", cols, MAX_COLS)?;

        let mut cells = Vec::with_capacity(cell_count);
        for _ in 0..cell_count {
            cells.push(next(&mut seq, "the last cell")?);
        }

        let players = if two_player { 2 } else { 1 };
        let mut positions = Vec::with_capacity(players);
        for _ in 0..players {
            let row: i32 = next(&mut seq, "a player row")?;
            let col: i32 = next(&mut seq, "a player column")?;
            positions.push((row, col));
        }
        let mut scores = Vec::with_capacity(players);
        for _ in 0..players {
            scores.push(next(&mut seq, "a score")?);
        }

        let remaining_time: i32 = next(&mut seq, "the remaining time")?;
        let prop_count: u64 = next(&mut seq, "the prop count")?;
        let mut props = Vec::new();
        for _ in 0..prop_count {
            props.push(PropRecord {
                kind: next(&mut seq, "a prop kind")?,
                row: next(&mut seq, "a prop row")?,
                col: next(&mut seq, "a prop column")?,
            });
        }

        Ok(SaveRecord {
            two_player,
            rows,
            cols,
            cells,
            positions,
            scores,
            remaining_time,
            props,
        })
    }
}

impl<'de> Deserialize<'de> for SaveRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The element count depends on the header, so accept as many as the
        // visitor asks for; the codec rejects trailing bytes.
        deserializer.deserialize_tuple(usize::MAX, RecordVisitor)
    }
}
