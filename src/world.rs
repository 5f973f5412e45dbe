use std::fmt;

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    /// A map index left the grid. Unreachable with a closed perimeter; seeing
    /// it means the map was constructed wrong.
    OutOfBounds { x: i32, y: i32 },
    OpenPerimeter { x: usize, y: usize },
    BadDimensions { rows: usize, cols: usize, cells: usize },
    MissingColor { kind: u8 },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WorldError::OutOfBounds { x, y } => {
                write!(f, "map index ({x}, {y}) outside the grid")
            }
            WorldError::OpenPerimeter { x, y } => {
                write!(f, "perimeter cell ({x}, {y}) is open; the border must be solid")
            }
            WorldError::BadDimensions { rows, cols, cells } => {
                write!(f, "{cells} cells do not fill a {rows}x{cols} grid")
            }
            WorldError::MissingColor { kind } => {
                write!(f, "wall kind {kind} has no palette entry")
            }
        }
    }
}

impl std::error::Error for WorldError {}

/// Fixed 2-D grid of cell kinds: 0 is open space, k >= 1 is a wall colored by
/// palette index k. Immutable once built.
pub struct Map {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Map {
    /// Builds a map from row-major cells. Rejects grids whose border has any
    /// open cell: the solid perimeter is what bounds every ray walk.
    pub fn new(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self, WorldError> {
        if rows < 3 || cols < 3 || cells.len() != rows * cols {
            return Err(WorldError::BadDimensions {
                rows,
                cols,
                cells: cells.len(),
            });
        }
        for x in 0..rows {
            for y in 0..cols {
                let border = x == 0 || x == rows - 1 || y == 0 || y == cols - 1;
                if border && cells[x * cols + y] == 0 {
                    return Err(WorldError::OpenPerimeter { x, y });
                }
            }
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn kind_at(&self, x: i32, y: i32) -> Result<u8, WorldError> {
        if x < 0 || y < 0 || x as usize >= self.rows || y as usize >= self.cols {
            return Err(WorldError::OutOfBounds { x, y });
        }
        Ok(self.cells[x as usize * self.cols + y as usize])
    }

    pub fn is_open(&self, x: i32, y: i32) -> bool {
        matches!(self.kind_at(x, y), Ok(0))
    }
}

/// Wall colors indexed by cell kind. Index 0 is a placeholder for open space.
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Valid for every kind present in a `World`-checked map.
    pub fn color(&self, kind: u8) -> Rgb {
        self.colors[kind as usize]
    }
}

/// A map and its palette, checked against each other: every wall kind in the
/// grid has a color.
pub struct World {
    map: Map,
    palette: Palette,
}

impl World {
    pub fn new(map: Map, palette: Palette) -> Result<Self, WorldError> {
        if let Some(&kind) = map.cells.iter().max() {
            if kind as usize >= palette.len() {
                return Err(WorldError::MissingColor { kind });
            }
        }
        Ok(Self { map, palette })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
