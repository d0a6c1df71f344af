use crate::hierarchy::{Hierarchy, NodeId, ROOT, Rect};

/// Aspect-ratio target of the squarified tiling, the golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

/// Assign a rectangle to every node: the root gets the full canvas and each
/// internal node's rectangle is partitioned among its children
/// proportionally to value. Deterministic for a fixed child order, so the
/// hierarchy must be sorted before layout.
pub fn treemap(hierarchy: &mut Hierarchy, width: f64, height: f64) {
    hierarchy.node_mut(ROOT).rect = Rect::new(0.0, 0.0, width, height);
    for node_id in hierarchy.descendants() {
        if !hierarchy.node(node_id).children.is_empty() {
            let rect = hierarchy.node(node_id).rect;
            squarify(hierarchy, node_id, rect);
        }
    }
}

/// Squarified row packing: accumulate children into a row while the worst
/// aspect ratio in the row does not degrade, then lay the row along the
/// shorter side of the remaining rectangle and continue with the rest.
fn squarify(hierarchy: &mut Hierarchy, parent: NodeId, rect: Rect) {
    let children = hierarchy.node(parent).children.clone();
    let mut value = hierarchy.node(parent).value;
    let Rect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = rect;

    let n = children.len();
    let mut i0 = 0;
    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let mut i1 = i0;

        // Seed the row with the next non-empty child; zero-value children
        // ride along in the row and end up with degenerate rectangles.
        let mut sum_value;
        loop {
            sum_value = hierarchy.node(children[i1]).value;
            i1 += 1;
            if sum_value != 0.0 || i1 >= n {
                break;
            }
        }
        let mut min_value = sum_value;
        let mut max_value = sum_value;
        let alpha = (dy / dx).max(dx / dy) / (value * PHI);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while i1 < n {
            let node_value = hierarchy.node(children[i1]).value;
            sum_value += node_value;
            min_value = min_value.min(node_value);
            max_value = max_value.max(node_value);
            beta = sum_value * sum_value * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= node_value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let row = &children[i0..i1];
        if dx < dy {
            let row_y1 = if value > 0.0 {
                y0 + dy * sum_value / value
            } else {
                y1
            };
            dice(hierarchy, row, sum_value, Rect::new(x0, y0, x1, row_y1));
            y0 = row_y1;
        } else {
            let row_x1 = if value > 0.0 {
                x0 + dx * sum_value / value
            } else {
                x1
            };
            slice(hierarchy, row, sum_value, Rect::new(x0, y0, row_x1, y1));
            x0 = row_x1;
        }
        value -= sum_value;
        i0 = i1;
    }
}

/// Lay a row out left to right, each child spanning the row's full height.
fn dice(hierarchy: &mut Hierarchy, row: &[NodeId], sum_value: f64, rect: Rect) {
    let k = if sum_value > 0.0 {
        rect.width() / sum_value
    } else {
        0.0
    };
    let mut x = rect.x0;
    for node_id in row {
        let span = hierarchy.node(*node_id).value * k;
        hierarchy.node_mut(*node_id).rect = Rect::new(x, rect.y0, x + span, rect.y1);
        x += span;
    }
}

/// Lay a row out top to bottom, each child spanning the row's full width.
fn slice(hierarchy: &mut Hierarchy, row: &[NodeId], sum_value: f64, rect: Rect) {
    let k = if sum_value > 0.0 {
        rect.height() / sum_value
    } else {
        0.0
    };
    let mut y = rect.y0;
    for node_id in row {
        let span = hierarchy.node(*node_id).value * k;
        hierarchy.node_mut(*node_id).rect = Rect::new(rect.x0, y, rect.x1, y + span);
        y += span;
    }
}
