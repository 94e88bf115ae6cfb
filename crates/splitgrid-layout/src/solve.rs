//! Rectangle solving: mapping a tree onto a host area.

use std::collections::BTreeMap;

use splitgrid_core::{Point, Rect};

use crate::node::{Node, Orientation, PaneId, Proportions};
use crate::tree::SplitterTree;

/// Smallest share [`PaneLayout::share_at`] will report for either child.
pub const MIN_SHARE: f64 = 0.05;

/// The splitter bar between the two children of a branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    pub branch: PaneId,
    pub orientation: Orientation,
    pub rect: Rect,
}

/// Solved rectangles for every node, plus divider bars.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    pub area: Rect,
    thickness: f64,
    rects: BTreeMap<PaneId, Rect>,
    leaf_bounds: BTreeMap<PaneId, Rect>,
    dividers: Vec<Divider>,
}

impl PaneLayout {
    /// Lookup rectangle for a specific node.
    #[must_use]
    pub fn rect(&self, node_id: PaneId) -> Option<Rect> {
        self.rects.get(&node_id).copied()
    }

    /// Iterate all solved rectangles in deterministic ID order.
    pub fn iter(&self) -> impl Iterator<Item = (PaneId, Rect)> + '_ {
        self.rects.iter().map(|(node_id, rect)| (*node_id, *rect))
    }

    /// Leaf rectangles, suitable as drag hit-test bounds.
    #[must_use]
    pub const fn leaf_bounds(&self) -> &BTreeMap<PaneId, Rect> {
        &self.leaf_bounds
    }

    /// Divider bars in pre-order of their branches.
    #[must_use]
    pub fn dividers(&self) -> &[Divider] {
        &self.dividers
    }

    #[must_use]
    pub const fn thickness(&self) -> f64 {
        self.thickness
    }

    /// First divider containing `point` (edges inclusive). Nested dividers
    /// are checked before their ancestors so the innermost bar wins.
    #[must_use]
    pub fn divider_at(&self, point: Point) -> Option<&Divider> {
        self.dividers
            .iter()
            .rev()
            .find(|divider| divider.rect.contains_inclusive(point))
    }

    /// First-child share that would put `branch`'s bar centred on `point`,
    /// clamped to `[MIN_SHARE, 1 - MIN_SHARE]`.
    ///
    /// Returns `None` for unknown branches or when there is no room to
    /// distribute.
    #[must_use]
    pub fn share_at(&self, branch: PaneId, point: Point) -> Option<f64> {
        let divider = self.dividers.iter().find(|d| d.branch == branch)?;
        let rect = self.rect(branch)?;
        let (origin, extent, pos) = match divider.orientation {
            Orientation::Horizontal => (rect.y, rect.height, point.y),
            Orientation::Vertical => (rect.x, rect.width, point.x),
        };
        let available = extent - self.thickness;
        if available <= 0.0 || !pos.is_finite() {
            return None;
        }
        let share = (pos - origin - self.thickness / 2.0) / available;
        Some(share.clamp(MIN_SHARE, 1.0 - MIN_SHARE))
    }
}

impl<C> SplitterTree<C> {
    /// Solve rectangles for every node within `area`.
    ///
    /// Each branch reserves `thickness` for its bar and divides the rest
    /// between its children by proportion. Negative or non-finite thickness
    /// is treated as zero.
    #[must_use]
    pub fn solve_layout(&self, area: Rect, thickness: f64) -> PaneLayout {
        let thickness = if thickness.is_finite() {
            thickness.max(0.0)
        } else {
            0.0
        };
        let mut layout = PaneLayout {
            area,
            thickness,
            rects: BTreeMap::new(),
            leaf_bounds: BTreeMap::new(),
            dividers: Vec::new(),
        };
        let mut stack = vec![(self.root(), area)];
        while let Some((node, rect)) = stack.pop() {
            let _ = layout.rects.insert(node.id(), rect);
            match node {
                Node::Leaf(leaf) => {
                    let _ = layout.leaf_bounds.insert(leaf.id(), rect);
                }
                Node::Branch(branch) => {
                    let (first, bar, second) =
                        split_rect(rect, branch.orientation(), branch.proportions(), thickness);
                    layout.dividers.push(Divider {
                        branch: branch.id(),
                        orientation: branch.orientation(),
                        rect: bar,
                    });
                    stack.push((branch.second(), second));
                    stack.push((branch.first(), first));
                }
            }
        }
        layout
    }
}

/// Split `rect` into (first, bar, second).
fn split_rect(
    rect: Rect,
    orientation: Orientation,
    proportions: Proportions,
    thickness: f64,
) -> (Rect, Rect, Rect) {
    match orientation {
        Orientation::Horizontal => {
            let bar = thickness.min(rect.height);
            let first_h = (rect.height - bar) * proportions.first();
            let second_h = (rect.height - bar - first_h).max(0.0);
            (
                Rect::new(rect.x, rect.y, rect.width, first_h),
                Rect::new(rect.x, rect.y + first_h, rect.width, bar),
                Rect::new(rect.x, rect.y + first_h + bar, rect.width, second_h),
            )
        }
        Orientation::Vertical => {
            let bar = thickness.min(rect.width);
            let first_w = (rect.width - bar) * proportions.first();
            let second_w = (rect.width - bar - first_w).max(0.0);
            (
                Rect::new(rect.x, rect.y, first_w, rect.height),
                Rect::new(rect.x + first_w, rect.y, bar, rect.height),
                Rect::new(rect.x + first_w + bar, rect.y, second_w, rect.height),
            )
        }
    }
}
