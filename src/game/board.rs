use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shared::{BoardSync, PlayerSlot, Terrain, UnitId};

/// Probability of each bonus terrain per cell; the remainder is Normal.
/// Defaults to an 80/20 split, 5% per bonus kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainWeights {
    pub attack: f32,
    pub defense: f32,
    pub healing: f32,
    pub resource: f32,
}

impl Default for TerrainWeights {
    fn default() -> Self {
        Self {
            attack: 0.05,
            defense: 0.05,
            healing: 0.05,
            resource: 0.05,
        }
    }
}

fn draw_terrain<R: Rng>(weights: &TerrainWeights, rng: &mut R) -> Terrain {
    let roll: f32 = rng.gen_range(0.0..1.0);
    let mut acc = weights.attack;
    if roll < acc {
        return Terrain::AttackBonus;
    }
    acc += weights.defense;
    if roll < acc {
        return Terrain::DefenseBonus;
    }
    acc += weights.healing;
    if roll < acc {
        return Terrain::Healing;
    }
    acc += weights.resource;
    if roll < acc {
        return Terrain::ResourceGen;
    }
    Terrain::Normal
}

/// One grid cell. Coordinate and terrain are fixed at board generation; the
/// occupant is a non-owning id reference into the match's unit registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    col: i32,
    row: i32,
    terrain: Terrain,
    occupant: Option<UnitId>,
}

impl Cell {
    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Spatial truth for terrain and occupancy. Mutation is pure bookkeeping;
/// callers validate before occupying or clearing.
#[derive(Debug, Clone)]
pub struct Board {
    columns: i32,
    rows: i32,
    cell_size: f32,
    origin: (f32, f32),
    cells: Vec<Cell>,
}

impl Board {
    /// Weighted-random terrain assignment, drawn once per match on the
    /// authority and broadcast as a flat sequence.
    pub fn generate(columns: i32, rows: i32, cell_size: f32, weights: &TerrainWeights) -> Self {
        Self::generate_with(columns, rows, cell_size, weights, &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng>(
        columns: i32,
        rows: i32,
        cell_size: f32,
        weights: &TerrainWeights,
        rng: &mut R,
    ) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let terrain = (0..columns * rows)
            .map(|_| draw_terrain(weights, rng))
            .collect();
        Self::build(columns, rows, cell_size, terrain)
    }

    /// Rebuilds a board from a broadcast row-major terrain sequence, so an
    /// observer holds the identical grid the authority generated. Returns
    /// `None` if the sequence does not cover the grid.
    pub fn from_terrain(
        columns: i32,
        rows: i32,
        cell_size: f32,
        terrain: Vec<Terrain>,
    ) -> Option<Self> {
        let columns = columns.max(1);
        let rows = rows.max(1);
        if terrain.len() != (columns * rows) as usize {
            return None;
        }
        Some(Self::build(columns, rows, cell_size, terrain))
    }

    /// `terrain` must already cover `columns * rows` cells.
    fn build(columns: i32, rows: i32, cell_size: f32, terrain: Vec<Terrain>) -> Self {
        // Grid centred on the display origin, matching cell centres.
        let grid_w = columns as f32 * cell_size;
        let grid_h = rows as f32 * cell_size;
        let origin = (
            -grid_w / 2.0 + cell_size / 2.0,
            -grid_h / 2.0 + cell_size / 2.0,
        );

        let cells = terrain
            .into_iter()
            .enumerate()
            .map(|(i, terrain)| Cell {
                col: i as i32 % columns,
                row: i as i32 / columns,
                terrain,
                occupant: None,
            })
            .collect();

        Self {
            columns,
            rows,
            cell_size,
            origin,
            cells,
        }
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.columns && row >= 0 && row < self.rows
    }

    fn index(&self, col: i32, row: i32) -> usize {
        (row * self.columns + col) as usize
    }

    pub fn cell_at(&self, col: i32, row: i32) -> Option<&Cell> {
        if !self.in_bounds(col, row) {
            return None;
        }
        self.cells.get(self.index(col, row))
    }

    pub fn occupant_at(&self, col: i32, row: i32) -> Option<UnitId> {
        self.cell_at(col, row).and_then(Cell::occupant)
    }

    pub fn occupy(&mut self, col: i32, row: i32, unit: UnitId) {
        if self.in_bounds(col, row) {
            let i = self.index(col, row);
            self.cells[i].occupant = Some(unit);
        }
    }

    pub fn clear(&mut self, col: i32, row: i32) {
        if self.in_bounds(col, row) {
            let i = self.index(col, row);
            self.cells[i].occupant = None;
        }
    }

    pub fn clear_all_occupants(&mut self) {
        for cell in &mut self.cells {
            cell.occupant = None;
        }
    }

    /// Display-space centre of a cell: origin plus column/row steps. Used by
    /// the presentation side only, but computed once here so authority and
    /// observers derive identical geometry.
    pub fn world_position(&self, col: i32, row: i32) -> (f32, f32) {
        (
            self.origin.0 + col as f32 * self.cell_size,
            self.origin.1 + row as f32 * self.cell_size,
        )
    }

    /// The column a player is trying to reach: the opponent's board edge.
    pub fn far_column(&self, player: PlayerSlot) -> i32 {
        match player {
            PlayerSlot::One => self.columns - 1,
            PlayerSlot::Two => 0,
        }
    }

    pub fn to_sync(&self) -> BoardSync {
        BoardSync {
            columns: self.columns,
            rows: self.rows,
            cell_size: self.cell_size,
            origin: self.origin,
            terrain: self.cells.iter().map(|c| c.terrain).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cell_at_returns_matching_coordinates() {
        let board = Board::from_terrain(8, 5, 1.0, vec![Terrain::Normal; 40]).unwrap();
        for col in 0..8 {
            for row in 0..5 {
                let cell = board.cell_at(col, row).unwrap();
                assert_eq!((cell.col(), cell.row()), (col, row));
            }
        }
    }

    #[test]
    fn out_of_bounds_is_none_not_a_panic() {
        let board = Board::from_terrain(8, 5, 1.0, vec![Terrain::Normal; 40]).unwrap();
        assert!(board.cell_at(-1, 0).is_none());
        assert!(board.cell_at(0, -1).is_none());
        assert!(board.cell_at(8, 0).is_none());
        assert!(board.cell_at(0, 5).is_none());
        assert!(board.cell_at(i32::MAX, i32::MAX).is_none());
    }

    proptest! {
        #[test]
        fn cell_at_is_total(col in -1000i32..1000, row in -1000i32..1000) {
            let board = Board::from_terrain(8, 5, 1.0, vec![Terrain::Normal; 40]).unwrap();
            let expected = col >= 0 && col < 8 && row >= 0 && row < 5;
            prop_assert_eq!(board.cell_at(col, row).is_some(), expected);
        }
    }

    #[test]
    fn occupy_and_clear_are_bookkeeping_only() {
        let mut board = Board::from_terrain(4, 4, 1.0, vec![Terrain::Normal; 16]).unwrap();
        let id = UnitId(7);
        board.occupy(2, 3, id);
        assert_eq!(board.occupant_at(2, 3), Some(id));
        board.clear(2, 3);
        assert_eq!(board.occupant_at(2, 3), None);

        // off-board mutation is ignored, never a panic
        board.occupy(-1, 0, id);
        board.clear(99, 99);
    }

    #[test]
    fn terrain_replay_reproduces_the_generated_board() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Board::generate_with(8, 5, 1.0, &TerrainWeights::default(), &mut rng);
        let sync = board.to_sync();
        let replayed =
            Board::from_terrain(sync.columns, sync.rows, sync.cell_size, sync.terrain).unwrap();
        for col in 0..8 {
            for row in 0..5 {
                assert_eq!(
                    board.cell_at(col, row).unwrap().terrain(),
                    replayed.cell_at(col, row).unwrap().terrain()
                );
            }
        }
        assert_eq!(board.origin(), replayed.origin());
    }

    #[test]
    fn from_terrain_rejects_short_sequences() {
        assert!(Board::from_terrain(8, 5, 1.0, vec![Terrain::Normal; 39]).is_none());
    }

    #[test]
    fn terrain_distribution_roughly_matches_weights() {
        let weights = TerrainWeights::default();
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::generate_with(100, 100, 1.0, &weights, &mut rng);
        let sync = board.to_sync();
        let total = sync.terrain.len() as f32;
        let count = |t: Terrain| sync.terrain.iter().filter(|&&c| c == t).count() as f32 / total;

        assert!((count(Terrain::AttackBonus) - weights.attack).abs() < 0.02);
        assert!((count(Terrain::DefenseBonus) - weights.defense).abs() < 0.02);
        assert!((count(Terrain::Healing) - weights.healing).abs() < 0.02);
        assert!((count(Terrain::ResourceGen) - weights.resource).abs() < 0.02);
        assert!((count(Terrain::Normal) - 0.8).abs() < 0.04);
    }

    #[test]
    fn world_position_is_affine_from_origin() {
        let board = Board::from_terrain(8, 5, 2.0, vec![Terrain::Normal; 40]).unwrap();
        let origin = board.origin();
        assert_eq!(board.world_position(0, 0), origin);
        let (x, y) = board.world_position(3, 2);
        assert_eq!(x, origin.0 + 6.0);
        assert_eq!(y, origin.1 + 4.0);
    }

    #[test]
    fn far_columns_are_the_opposing_edges() {
        let board = Board::from_terrain(8, 5, 1.0, vec![Terrain::Normal; 40]).unwrap();
        assert_eq!(board.far_column(PlayerSlot::One), 7);
        assert_eq!(board.far_column(PlayerSlot::Two), 0);
    }
}
