//! Minefield grid cells.
//!
//! A minefield question is a 5×4 board of 20 cells. Each cell shows an
//! optional cover image and hides a text or image payload that the host
//! reveals during play.

use serde::{Deserialize, Serialize};

use crate::ids::generate_id;

/// Board rows.
pub const GRID_ROWS: usize = 5;

/// Board columns.
pub const GRID_COLUMNS: usize = 4;

/// Number of cells on a minefield board.
pub const GRID_SIZE: usize = GRID_ROWS * GRID_COLUMNS;

/// Kind of content hidden under a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HiddenKind {
    #[default]
    Text,
    Image,
}

impl HiddenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
        }
    }
}

/// One slot of the minefield board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinefieldCell {
    pub id: String,
    /// Position on the board, 0 to 19, row-major.
    pub index: usize,
    /// Visible top layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub hidden_type: HiddenKind,
    /// Text, or an image reference when `hidden_type` is `Image`.
    #[serde(default)]
    pub hidden_content: String,
    /// Per-play reveal marker. Not meaningful while authoring.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_revealed: bool,
}

impl MinefieldCell {
    /// A blank text cell with a fresh identity.
    pub fn blank(index: usize) -> Self {
        Self {
            id: generate_id(),
            index,
            cover_image: None,
            hidden_type: HiddenKind::Text,
            hidden_content: String::new(),
            is_revealed: false,
        }
    }

    /// Row and column of this cell on the board.
    pub fn position(&self) -> (usize, usize) {
        (self.index / GRID_COLUMNS, self.index % GRID_COLUMNS)
    }

    /// Apply a partial edit; unnamed fields are kept.
    pub fn apply(&mut self, update: &CellUpdate) {
        if let Some(cover) = &update.cover_image {
            self.cover_image.clone_from(cover);
        }
        if let Some(kind) = update.hidden_type {
            self.hidden_type = kind;
        }
        if let Some(content) = &update.hidden_content {
            self.hidden_content.clone_from(content);
        }
    }
}

/// Partial edit of a single cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellUpdate {
    /// `Some(None)` clears the cover image.
    pub cover_image: Option<Option<String>>,
    pub hidden_type: Option<HiddenKind>,
    pub hidden_content: Option<String>,
}

impl CellUpdate {
    pub fn is_empty(&self) -> bool {
        self.cover_image.is_none() && self.hidden_type.is_none() && self.hidden_content.is_none()
    }
}

/// Payload of a `MINEFIELD` question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinefieldPayload {
    #[serde(default)]
    pub grid: Vec<MinefieldCell>,
}

impl MinefieldPayload {
    /// A full board of blank text cells.
    pub fn blank() -> Self {
        Self {
            grid: (0..GRID_SIZE).map(MinefieldCell::blank).collect(),
        }
    }

    /// Cell at a board position, if the stored grid has one.
    pub fn cell(&self, index: usize) -> Option<&MinefieldCell> {
        self.grid.iter().find(|cell| cell.index == index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut MinefieldCell> {
        self.grid.iter_mut().find(|cell| cell.index == index)
    }

    /// The board as 20 cells, filling any gaps of a partial grid with
    /// placeholders so a play surface always has a complete board.
    pub fn padded_cells(&self) -> Vec<MinefieldCell> {
        (0..GRID_SIZE)
            .map(|index| {
                self.cell(index).cloned().unwrap_or_else(|| MinefieldCell {
                    id: format!("empty-{index}"),
                    index,
                    cover_image: None,
                    hidden_type: HiddenKind::Text,
                    hidden_content: String::new(),
                    is_revealed: false,
                })
            })
            .collect()
    }

    /// Whether the grid has exactly one cell per board position.
    pub fn is_complete(&self) -> bool {
        self.grid.len() == GRID_SIZE && (0..GRID_SIZE).all(|index| self.cell(index).is_some())
    }
}
