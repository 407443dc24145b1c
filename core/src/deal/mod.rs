use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait DealGenerator {
    fn generate(self, config: &BoardConfig) -> Result<Deal>;
}

/// Face identities assigned to every cell of the grid, shaped `(rows, columns)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    faces: Array2<FaceId>,
}

impl Deal {
    /// Builds a deal from faces listed in row-major order.
    pub fn from_faces(config: &BoardConfig, faces: Vec<FaceId>) -> Result<Self> {
        config.validate()?;

        let mut counts = std::collections::BTreeMap::<FaceId, usize>::new();
        for &face in &faces {
            *counts.entry(face).or_default() += 1;
        }
        if counts.values().any(|&count| count != 2) {
            return Err(GameError::InvalidDeal);
        }

        let shape: (usize, usize) = (config.rows.into(), config.columns.into());
        let faces = Array2::from_shape_vec(shape, faces).map_err(|_| GameError::InvalidDeal)?;
        Ok(Self { faces })
    }

    /// The unshuffled multiset `[1, 1, 2, 2, ..]` for `config`.
    pub fn ordered_faces(config: &BoardConfig) -> Vec<FaceId> {
        (1..=config.total_pairs())
            .flat_map(|face| [face, face])
            .collect()
    }

    pub fn size(&self) -> Cell {
        let (rows, columns) = self.faces.dim();
        (rows.try_into().unwrap(), columns.try_into().unwrap())
    }

    pub fn face_at(&self, cell: Cell) -> Option<FaceId> {
        self.faces.get(cell.to_nd_index()).copied()
    }

    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.iter().copied()
    }

    /// Places one face-down card per cell at its grid offset.
    pub fn lay_out(&self, config: &BoardConfig) -> Array2<Card> {
        let columns = self.faces.ncols();
        Array2::from_shape_fn(self.faces.dim(), |(row, column)| {
            let cell = (row as Coord, column as Coord);
            let stack_order = (row * columns + column) as CellCount;
            Card::new(
                config.cell_origin(cell),
                config.card_size,
                stack_order,
                self.faces[[row, column]],
            )
        })
    }
}
