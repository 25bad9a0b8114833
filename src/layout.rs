//! Layout pattern and complexity detection
//!
//! An explicit auto-layout axis is trusted as declared. Without one, the
//! children's top edges are clustered into rows; several rows of several
//! children make a grid.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::node::{DesignNode, LayoutMode};

/// Fewest children for a grid to be considered
const GRID_MIN_CHILDREN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Row,
    Column,
    Grid,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutPattern {
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    pub columns: usize,
    pub rows: usize,
}

impl LayoutPattern {
    pub fn none() -> Self {
        Self {
            kind: LayoutKind::None,
            columns: 0,
            rows: 0,
        }
    }

    pub fn row(columns: usize) -> Self {
        Self {
            kind: LayoutKind::Row,
            columns,
            rows: 1,
        }
    }

    pub fn column(rows: usize) -> Self {
        Self {
            kind: LayoutKind::Column,
            columns: 1,
            rows,
        }
    }

    pub fn grid(columns: usize, rows: usize) -> Self {
        Self {
            kind: LayoutKind::Grid,
            columns,
            rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

pub fn detect_layout(node: &DesignNode, config: &EngineConfig) -> LayoutPattern {
    let children: Vec<&DesignNode> = node.visible_children().collect();
    let n = children.len();
    if n == 0 {
        return LayoutPattern::none();
    }

    match node.layout.mode {
        LayoutMode::Horizontal if !node.layout.wrap => return LayoutPattern::row(n),
        LayoutMode::Vertical => return LayoutPattern::column(n),
        _ => {}
    }

    let rows = row_buckets(&children, config.row_cluster_px);
    let first_row = rows.first().map_or(0, Vec::len);
    if n >= GRID_MIN_CHILDREN && rows.len() >= 2 && first_row >= 2 {
        LayoutPattern::grid(first_row, rows.len())
    } else if rows.len() == 1 {
        LayoutPattern::row(n)
    } else {
        LayoutPattern::column(n)
    }
}

/// Group children into rows, top to bottom. A child joins the current row
/// when its top edge is within `threshold` of the row's first top edge.
pub fn row_buckets<'a>(children: &[&'a DesignNode], threshold: f64) -> Vec<Vec<&'a DesignNode>> {
    let mut sorted: Vec<&'a DesignNode> = children.to_vec();
    sorted.sort_by(|a, b| top(a).total_cmp(&top(b)).then(left(a).total_cmp(&left(b))));

    let mut rows: Vec<(f64, Vec<&'a DesignNode>)> = Vec::new();
    for child in sorted {
        let y = top(child);
        match rows.last_mut() {
            Some((anchor, row)) if (y - *anchor).abs() <= threshold => row.push(child),
            _ => rows.push((y, vec![child])),
        }
    }
    rows.into_iter().map(|(_, row)| row).collect()
}

fn top(node: &DesignNode) -> f64 {
    let y = node.geometry.origin().1;
    if y.is_finite() {
        y
    } else {
        0.0
    }
}

fn left(node: &DesignNode) -> f64 {
    let x = node.geometry.origin().0;
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Direct visible child count against the configured thresholds
pub fn complexity(node: &DesignNode, config: &EngineConfig) -> Complexity {
    let n = node.visible_children().count();
    if n >= config.complexity_complex_at {
        Complexity::Complex
    } else if n >= config.complexity_moderate_at {
        Complexity::Moderate
    } else {
        Complexity::Simple
    }
}
