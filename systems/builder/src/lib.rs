#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system translating pointer clicks into defender placement commands.

use lane_defence_core::{CellCoord, Command, Point, Rules};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuilderInput {
    /// Indicates whether the player clicked on this frame.
    pub click: bool,
    /// Pointer position in playfield units, `None` while it is off the field.
    pub cursor: Option<Point>,
}

impl BuilderInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(click: bool, cursor: Option<Point>) -> Self {
        Self { click, cursor }
    }
}

/// Placement system that snaps clicks to grid cells.
///
/// Clicks on the control bar are dropped here. Occupancy and affordability
/// are checked by the world, which owns that state.
#[derive(Debug, Clone)]
pub struct Builder {
    rules: Rules,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(&Rules::default())
    }
}

impl Builder {
    /// Creates a new builder system for the provided rules.
    #[must_use]
    pub fn new(rules: &Rules) -> Self {
        Self {
            rules: rules.clone(),
        }
    }

    /// Cell containing the pointer, snapped down to the grid.
    #[must_use]
    pub fn snap(&self, cursor: Point) -> Option<CellCoord> {
        self.rules.cell_at(cursor)
    }

    /// Consumes adapter input and emits placement commands.
    pub fn handle(&self, input: BuilderInput, out: &mut Vec<Command>) {
        if !input.click {
            return;
        }

        let Some(cell) = input.cursor.and_then(|cursor| self.snap(cursor)) else {
            return;
        };

        if cell.rect(self.rules.cell_size).y < self.rules.cell_size {
            return;
        }

        out.push(Command::PlaceDefender { cell });
    }
}
