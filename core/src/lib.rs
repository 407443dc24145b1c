use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use animation::*;
pub use board::*;
pub use card::*;
pub use deal::*;
pub use error::*;
pub use surface::*;
pub use types::*;

mod animation;
mod board;
mod card;
mod deal;
mod error;
mod surface;
mod types;

/// Durations driving the flip animation and the scheduled pauses, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub flip: Millis,
    pub mismatch_pause: Millis,
    pub victory_delay: Millis,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            flip: 500.,
            mismatch_pause: 1000.,
            victory_delay: 500.,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    pub corner_radius: f64,
    pub back: Color,
    pub glyph: Color,
    pub placeholder: Color,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            corner_radius: 4.,
            back: Color::BLUE,
            glyph: Color::RED,
            placeholder: Color::GRAY,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub columns: Coord,
    pub rows: Coord,
    pub card_size: Size,
    pub spacing: f64,
    pub timing: Timing,
    pub style: CardStyle,
}

impl BoardConfig {
    pub const DEFAULT_COLUMNS: Coord = 3;
    pub const DEFAULT_ROWS: Coord = 4;

    pub fn new(columns: Coord, rows: Coord) -> Result<Self> {
        let config = Self {
            columns,
            rows,
            card_size: Size::new(100., 150.),
            spacing: 10.,
            timing: Timing::default(),
            style: CardStyle::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(GameError::EmptyGrid);
        }
        if self.total_cards() % 2 != 0 {
            return Err(GameError::OddCardCount);
        }
        Ok(())
    }

    pub const fn total_cards(&self) -> CellCount {
        mult(self.columns, self.rows)
    }

    pub const fn total_pairs(&self) -> CellCount {
        self.total_cards() / 2
    }

    /// Top-left corner of the card at `(row, column)`.
    pub fn cell_origin(&self, (row, column): Cell) -> Point {
        let Size { width, height } = self.card_size;
        Point::new(
            f64::from(column) * (width + self.spacing) + self.spacing,
            f64::from(row) * (height + self.spacing) + self.spacing,
        )
    }

    /// Surface dimensions needed to fit the grid with spacing on every side.
    pub fn surface_size(&self) -> Size {
        let Size { width, height } = self.card_size;
        Size::new(
            f64::from(self.columns) * (width + self.spacing) + self.spacing,
            f64::from(self.rows) * (height + self.spacing) + self.spacing,
        )
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COLUMNS, Self::DEFAULT_ROWS).expect("default grid is valid")
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TapOutcome {
    Ignored,
    Flipping(Cell),
}

impl TapOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Flipping(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Animated,
    Revealed,
    Reverted,
    Mismatched,
    Matched,
    Victory,
}

impl TickOutcome {
    pub const fn needs_redraw(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl BitOr for TickOutcome {
    type Output = TickOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use TickOutcome::*;
        match (self, rhs) {
            (Victory, _) | (_, Victory) => Victory,
            (Matched, _) | (_, Matched) => Matched,
            (Mismatched, _) | (_, Mismatched) => Mismatched,
            (Reverted, _) | (_, Reverted) => Reverted,
            (Revealed, _) | (_, Revealed) => Revealed,
            (Animated, _) | (_, Animated) => Animated,
            (NoChange, NoChange) => NoChange,
        }
    }
}
