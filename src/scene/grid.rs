use glam::Vec3;

/// Floor for the roughness sweep; exactly 0 produces a singular highlight.
pub const ROUGHNESS_FLOOR: f32 = 0.05;

/// Lays out the demo's sphere grid: metallic sweeps along rows, roughness
/// along columns.
#[derive(Debug, Clone, Copy)]
pub struct MaterialGrid {
    pub n_rows: u32,
    pub n_cols: u32,
    pub spacing: f32,
}

/// One sphere in the grid with its resolved placement and material sweep.
#[derive(Debug, Clone, Copy)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub position: Vec3,
    pub metallic: f32,
    pub roughness: f32,
}

impl MaterialGrid {
    pub fn new(n_rows: u32, n_cols: u32, spacing: f32) -> Self {
        Self {
            n_rows,
            n_cols,
            spacing,
        }
    }

    pub fn position(&self, row: u32, col: u32) -> Vec3 {
        // Integer-division centering, matching the classic grid layout.
        Vec3::new(
            (col as i32 - (self.n_cols / 2) as i32) as f32 * self.spacing,
            (row as i32 - (self.n_rows / 2) as i32) as f32 * self.spacing,
            0.0,
        )
    }

    pub fn metallic(&self, row: u32) -> f32 {
        row as f32 / self.n_rows as f32
    }

    pub fn roughness(&self, col: u32) -> f32 {
        (col as f32 / self.n_cols as f32).clamp(ROUGHNESS_FLOOR, 1.0)
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.n_rows).flat_map(move |row| {
            (0..self.n_cols).map(move |col| GridCell {
                row,
                col,
                position: self.position(row, col),
                metallic: self.metallic(row),
                roughness: self.roughness(col),
            })
        })
    }
}

impl Default for MaterialGrid {
    fn default() -> Self {
        Self::new(7, 7, 2.5)
    }
}
