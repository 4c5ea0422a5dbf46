//! Edge drawing-order helpers.
//!
//! The browser draws matrix edges on a grid; these helpers decide which
//! horizontal lane each edge takes and where edge endpoints sit relative
//! to their node, so as few lines as possible cross.

use serde::Serialize;
use tracing::trace;

/// True when two diagonal edge lines cross between their shared rows.
///
/// Each line is `[x_start, y_start, x_end, y_end]` in grid coordinates.
pub fn diagonal_lines_crossed(l1: [i64; 4], l2: [i64; 4]) -> bool {
    // Make sure both lines run from top to bottom (y_start < y_end).
    let a = if l1[3] > l1[1] {
        l1
    } else {
        [l1[2], l1[3], l1[0], l1[1]]
    };
    let b = if l2[3] > l2[1] {
        l2
    } else {
        [l2[2], l2[3], l2[0], l2[1]]
    };

    (a[0] > b[0] && a[2] < b[2]) || (b[0] > a[0] && b[2] < a[2])
}

/// True when two horizontal lane segments cross or overlap.
///
/// `y` here is the lane, not a pixel row. Same-level lines overlap when
/// the distance of their midpoints is smaller than their combined length.
pub fn orthogonal_lines_crossed(
    x1_start: i64,
    x1_end: i64,
    y1: i64,
    x2_start: i64,
    x2_end: i64,
    y2: i64,
) -> bool {
    // Make sure line 1 is the upper line and line 2 the lower.
    let (upper, lower) = if y1 < y2 {
        ((x1_start, y1, x1_end), (x2_start, y2, x2_end))
    } else {
        ((x2_start, y2, x2_end), (x1_start, y1, x1_end))
    };
    let (u_start, u_y, u_end) = upper;
    let (l_start, l_y, l_end) = lower;

    // Lower line's start point between start and end of the upper line?
    if (l_start > u_start && l_start <= u_end) || (l_start < u_start && l_start >= u_end) {
        return u_start != u_end;
    }

    // Upper line's end point between start and end of the lower line?
    if (u_end >= l_start && u_end < l_end) || (u_end <= l_start && u_end > l_end) {
        return true;
    }

    let k = (u_end - u_start).abs() + (l_end - l_start).abs();
    let n = ((l_end + l_start) - (u_end + u_start)).abs();
    u_y == l_y && n < k
}

/// An incoming edge's horizontal span, in grid coordinates.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSpan {
    pub id: u64,
    pub from_x: i64,
    pub to_x: i64,
    /// Order the edge leaves its source node with.
    pub out_order: i64,
}

/// A lane assignment produced by [`best_horizontal_order_for_edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeOrder {
    pub id: u64,
    pub order: i64,
}

const MAX_ITERATIONS: usize = 5;

/// Assign horizontal lanes to a node's incoming edges so that as few
/// lines as possible cross, sorted by lane.
///
/// Vertical edges never move. Edge pairs where swapping lanes cannot
/// help are remembered so they are not retried on later passes.
pub fn best_horizontal_order_for_edges(in_edges: &[EdgeSpan]) -> Vec<EdgeOrder> {
    struct Lane {
        id: u64,
        from_x: i64,
        to_x: i64,
        order: i64,
    }

    let mut min_out_order = 0;
    let mut max_out_order = 1;
    for edge in in_edges {
        min_out_order = min_out_order.min(edge.out_order);
        max_out_order = max_out_order.max(edge.out_order);
    }
    let out_order_range = max_out_order - min_out_order;

    let mut edges: Vec<Lane> = in_edges
        .iter()
        .map(|edge| Lane {
            id: edge.id,
            from_x: edge.from_x * out_order_range + edge.out_order,
            to_x: edge.to_x * out_order_range + edge.out_order,
            order: 1,
        })
        .collect();

    let mut futile: Vec<(u64, u64)> = Vec::new();
    let mut iteration = 0;

    while iteration < MAX_ITERATIONS {
        let mut crossing = false;
        'pairs: for i in 0..edges.len().saturating_sub(1) {
            for n in (i + 1)..edges.len() {
                if futile
                    .iter()
                    .any(|(a, b)| *a == edges[i].id && *b == edges[n].id)
                {
                    continue;
                }
                if !orthogonal_lines_crossed(
                    edges[i].from_x,
                    edges[i].to_x,
                    edges[i].order,
                    edges[n].from_x,
                    edges[n].to_x,
                    edges[n].order,
                ) {
                    continue;
                }
                if edges[i].from_x == edges[i].to_x || edges[n].from_x == edges[n].to_x {
                    continue;
                }
                crossing = true;
                trace!(
                    "edges cross: {} -> {} and {} -> {}",
                    edges[i].from_x, edges[i].to_x, edges[n].from_x, edges[n].to_x
                );
                let new_i_order = (edges[i].order + 1).max(edges[n].order + 1);
                let mut change_i = !orthogonal_lines_crossed(
                    edges[i].from_x,
                    edges[i].to_x,
                    new_i_order,
                    edges[n].from_x,
                    edges[n].to_x,
                    edges[n].order,
                );
                let new_n_order = (edges[n].order + 1).max(edges[i].order + 1);
                let mut change_n = !orthogonal_lines_crossed(
                    edges[i].from_x,
                    edges[i].to_x,
                    edges[i].order,
                    edges[n].from_x,
                    edges[n].to_x,
                    new_n_order,
                );

                if (change_i && change_n)
                    || (!change_i && !change_n && edges[i].order == edges[n].order)
                {
                    let sign_i = (edges[i].to_x - edges[i].from_x).signum();
                    let sign_n = (edges[n].to_x - edges[n].from_x).signum();
                    if sign_i == sign_n {
                        let length_i = (edges[i].to_x - edges[i].from_x).abs();
                        let length_n = (edges[n].to_x - edges[n].from_x).abs();
                        change_i = length_i > length_n;
                    } else {
                        change_i = edges[i].from_x < edges[n].from_x;
                    }
                    change_n = !change_i;
                }
                if change_i {
                    edges[i].order = new_i_order;
                    continue 'pairs;
                } else if change_n {
                    edges[n].order = new_n_order;
                } else {
                    // Swapping those two edges does not help; remember that.
                    futile.push((edges[i].id, edges[n].id));
                }
            }
        }
        if !crossing {
            break;
        }
        iteration += 1;
    }

    edges.sort_by_key(|e| e.order);
    edges
        .into_iter()
        .map(|e| EdgeOrder {
            id: e.id,
            order: e.order,
        })
        .collect()
}

/// Spread a sorted array of offsets symmetrically around a middle
/// element.
///
/// Elements left of the middle get decreasing negative positions, those
/// right of it increasing positive ones. Zeroes in the input center the
/// middle among them; without zeroes it sits between the negative and
/// positive elements. Inputs without negative or positive elements
/// produce no negative or positive positions.
pub fn position_ends(sorted_elements: &[i64]) -> Vec<i64> {
    let len = sorted_elements.len() as isize;
    let mut start_negative: isize = -1;
    let mut start_equal: isize = -1;
    let mut start_positive: isize = len;
    let mut positions = vec![0i64; sorted_elements.len()];

    for (index, &element) in sorted_elements.iter().enumerate() {
        let index = index as isize;
        if element < 0 && start_negative == -1 {
            start_negative = index;
        } else if element == 0 && start_equal == -1 {
            start_equal = index;
        } else if element > 0 && start_positive == len {
            start_positive = index;
        }
    }

    let mid_element: isize;
    if start_equal > -1 {
        let mid_range = start_positive - start_equal;
        if mid_range % 2 == 0 {
            let mut mid = start_equal + mid_range / 2;
            if len - (mid + 1) < mid {
                mid -= 1;
            }
            mid_element = mid;
        } else {
            mid_element = start_equal + mid_range / 2;
        }
    } else {
        mid_element = start_positive;
        if start_positive < len {
            positions[mid_element as usize] = 1;
        }
    }

    let mut x = mid_element - 1;
    while x >= start_negative && x > -1 {
        positions[x as usize] = (x - mid_element) as i64;
        x -= 1;
    }
    let mut mid_position = if mid_element >= 0 && mid_element < len {
        positions[mid_element as usize]
    } else {
        0
    };
    let mut x = mid_element + 1;
    while x < len {
        mid_position += 1;
        positions[x as usize] = mid_position;
        x += 1;
    }

    positions
}

/// Merge freshly computed positions into a set of already fixed ones,
/// pushing collisions outward from the first non-negative position.
pub fn merge_new_positions(fixed_positions: &[i64], mut new_positions: Vec<i64>) -> Vec<i64> {
    if fixed_positions.is_empty() {
        return new_positions;
    }

    let len = new_positions.len();
    let first_positive = new_positions.iter().position(|&p| p > -1).unwrap_or(len);

    if first_positive > 0 {
        let mut current = first_positive as isize - 1;
        while current >= 0 {
            let cur = current as usize;
            let value = new_positions[cur];
            if fixed_positions.contains(&value) {
                new_positions[cur] = value - 1;
            } else {
                let duplicate = (0..first_positive)
                    .any(|left| new_positions[left] == value && left != cur);
                if duplicate {
                    new_positions[cur] = value - 1;
                } else {
                    current -= 1;
                }
            }
        }
    }

    let mut current = first_positive;
    while current < len {
        let value = new_positions[current];
        if fixed_positions.contains(&value) {
            new_positions[current] = value + 1;
        } else {
            let duplicate = (first_positive..len)
                .any(|right| new_positions[right] == value && right != current);
            if duplicate {
                new_positions[current] = value + 1;
            } else {
                current += 1;
            }
        }
    }

    new_positions
}
