//! Manhattan A* over the routing grid
//!
//! The cost model makes turns vastly more expensive than distance: a
//! direction change costs the cube of the start-to-end Manhattan distance,
//! and the heuristic adds the square of it per estimated remaining bend.
//! The search therefore prefers long straight runs and only bends where a
//! bend is unavoidable.

use crate::geometry::{Bounds, Point};

use super::grid::Grid;
use super::heading::{Heading, HEADINGS};
use super::heap::OpenSet;

/// Find the cheapest orthogonal path between two grid nodes, or `None`
/// when the open set drains first.
///
/// Rules applied per candidate edge:
/// - the edge midpoint must not fall strictly inside any obstacle box
/// - the step must not reverse the previous direction (the start node's
///   previous direction is `start_heading`)
/// - stepping onto the start node against `start_heading`, or onto the end
///   node along `end_heading`, is forbidden, so the path leaves the start
///   forward and enters the end from the facing side
pub fn astar(
    grid: &mut Grid,
    start: usize,
    end: usize,
    start_heading: Heading,
    end_heading: Heading,
    aabbs: &[Bounds],
) -> Option<Vec<usize>> {
    let bend_multiplier = grid.data[start].pos.manhattan(grid.data[end].pos);
    let start_addr = grid.data[start].addr;
    let end_addr = grid.data[end].addr;

    let mut open = OpenSet::new();
    open.push(start, &grid.data);

    while let Some(current) = open.pop(&grid.data) {
        if grid.data[current].closed {
            continue;
        }
        if current == end {
            return Some(backtrack(grid, current, start));
        }
        grid.data[current].closed = true;

        let previous_direction = match grid.data[current].parent {
            Some(parent) => Heading::from_points(grid.data[parent].pos, grid.data[current].pos),
            None => start_heading,
        };

        let neighbors = grid.neighbors(current);
        for (i, neighbor) in neighbors.into_iter().enumerate() {
            let Some(neighbor) = neighbor else {
                continue;
            };
            if grid.data[neighbor].closed {
                continue;
            }

            let half_point = grid.data[current].pos.midpoint(grid.data[neighbor].pos);
            if aabbs.iter().any(|aabb| aabb.contains_point_strict(half_point)) {
                continue;
            }

            let neighbor_heading = HEADINGS[i];
            if neighbor_heading == previous_direction.reverse() {
                continue;
            }
            let neighbor_addr = grid.data[neighbor].addr;
            if (neighbor_addr == start_addr && neighbor_heading == start_heading)
                || (neighbor_addr == end_addr && neighbor_heading == end_heading)
            {
                continue;
            }

            let direction_change = neighbor_heading != previous_direction;
            let step = grid.data[current].pos.manhattan(grid.data[neighbor].pos);
            let g = grid.data[current].g
                + step
                + if direction_change {
                    bend_multiplier.powi(3)
                } else {
                    0.0
                };

            let been_visited = grid.data[neighbor].visited;
            if !been_visited || g < grid.data[neighbor].g {
                let bends = estimated_bends(
                    grid.data[neighbor].pos,
                    grid.data[end].pos,
                    neighbor_heading,
                    end_heading,
                );
                let h = grid.data[neighbor].pos.manhattan(grid.data[end].pos)
                    + bends * bend_multiplier.powi(2);
                let node = &mut grid.data[neighbor];
                node.visited = true;
                node.parent = Some(current);
                node.g = g;
                node.h = h;
                node.f = g + h;
                if been_visited {
                    open.rescore(neighbor, &grid.data);
                } else {
                    open.push(neighbor, &grid.data);
                }
            }
        }
    }

    None
}

fn backtrack(grid: &Grid, end: usize, start: usize) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = end;
    while let Some(parent) = grid.data[current].parent {
        path.push(current);
        current = parent;
    }
    path.push(start);
    path.reverse();
    path
}

/// Minimum number of turns any legal orthogonal path must make between two
/// half-lines, given the departure heading, the arrival heading, and the
/// relative position of the two points. Closed-form lookup, values 0 to 4.
pub fn estimated_bends(start: Point, end: Point, start_heading: Heading, end_heading: Heading) -> f64 {
    let bends = match end_heading {
        Heading::Right => match start_heading {
            Heading::Right => {
                if start.x >= end.x {
                    4
                } else if start.y == end.y {
                    0
                } else {
                    2
                }
            }
            Heading::Up => {
                if start.y > end.y && start.x < end.x {
                    1
                } else {
                    3
                }
            }
            Heading::Down => {
                if start.y < end.y && start.x < end.x {
                    1
                } else {
                    3
                }
            }
            Heading::Left => {
                if start.y == end.y {
                    4
                } else {
                    2
                }
            }
        },
        Heading::Left => match start_heading {
            Heading::Right => {
                if start.y == end.y {
                    4
                } else {
                    2
                }
            }
            Heading::Up => {
                if start.y > end.y && start.x > end.x {
                    1
                } else {
                    3
                }
            }
            Heading::Down => {
                if start.y < end.y && start.x > end.x {
                    1
                } else {
                    3
                }
            }
            Heading::Left => {
                if start.x <= end.x {
                    4
                } else if start.y == end.y {
                    0
                } else {
                    2
                }
            }
        },
        Heading::Up => match start_heading {
            Heading::Right => {
                if start.y > end.y && start.x < end.x {
                    1
                } else {
                    3
                }
            }
            Heading::Up => {
                if start.y >= end.y {
                    4
                } else if start.x == end.x {
                    0
                } else {
                    2
                }
            }
            Heading::Down => {
                if start.x == end.x {
                    4
                } else {
                    2
                }
            }
            Heading::Left => {
                if start.y > end.y && start.x > end.x {
                    1
                } else {
                    3
                }
            }
        },
        Heading::Down => match start_heading {
            Heading::Right => {
                if start.y < end.y && start.x < end.x {
                    1
                } else {
                    3
                }
            }
            Heading::Up => {
                if start.x == end.x {
                    4
                } else {
                    2
                }
            }
            Heading::Down => {
                if start.y <= end.y {
                    4
                } else if start.x == end.x {
                    0
                } else {
                    2
                }
            }
            Heading::Left => {
                if start.y < end.y && start.x > end.x {
                    1
                } else {
                    3
                }
            }
        },
    };
    bends as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_bends_straight_shot() {
        assert_eq!(
            estimated_bends(
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Heading::Right,
                Heading::Right,
            ),
            0.0
        );
    }

    #[test]
    fn test_estimated_bends_behind_target() {
        assert_eq!(
            estimated_bends(
                Point::new(100.0, 0.0),
                Point::new(100.0, 0.0),
                Heading::Right,
                Heading::Right,
            ),
            4.0
        );
        assert_eq!(
            estimated_bends(
                Point::new(150.0, 10.0),
                Point::new(100.0, 0.0),
                Heading::Right,
                Heading::Right,
            ),
            4.0
        );
    }

    #[test]
    fn test_estimated_bends_single_turn() {
        assert_eq!(
            estimated_bends(
                Point::new(0.0, 50.0),
                Point::new(100.0, 0.0),
                Heading::Up,
                Heading::Right,
            ),
            1.0
        );
    }

    #[test]
    fn test_estimated_bends_opposing_on_same_line() {
        assert_eq!(
            estimated_bends(
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Heading::Left,
                Heading::Right,
            ),
            4.0
        );
    }

    #[test]
    fn test_estimated_bends_same_vertical_heading_overshoot() {
        // start.y >= end.y with both half-lines facing up forces the path
        // to loop around the target
        assert_eq!(
            estimated_bends(
                Point::new(0.0, 50.0),
                Point::new(0.0, 0.0),
                Heading::Up,
                Heading::Up,
            ),
            4.0
        );
    }

    #[test]
    fn test_astar_straight_line() {
        let mut grid = Grid::calculate(
            &[],
            Point::new(0.0, 0.0),
            Heading::Right,
            Point::new(100.0, 0.0),
            Heading::Left,
            Bounds::new(0.0, 0.0, 100.0, 0.0),
        );
        let start = grid.node_at(Point::new(0.0, 0.0)).unwrap();
        let end = grid.node_at(Point::new(100.0, 0.0)).unwrap();
        let path = astar(&mut grid, start, end, Heading::Right, Heading::Left, &[])
            .expect("straight route");
        let points: Vec<Point> = path.iter().map(|&i| grid.data[i].pos).collect();
        assert_eq!(points.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(points.last(), Some(&Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_astar_start_equals_end() {
        let mut grid = Grid::calculate(
            &[],
            Point::new(0.0, 0.0),
            Heading::Right,
            Point::new(0.0, 0.0),
            Heading::Left,
            Bounds::new(0.0, 0.0, 0.0, 0.0),
        );
        let node = grid.node_at(Point::new(0.0, 0.0)).unwrap();
        let path = astar(&mut grid, node, node, Heading::Right, Heading::Left, &[])
            .expect("degenerate route");
        assert_eq!(path, vec![node]);
    }

    #[test]
    fn test_astar_no_route_when_end_banned() {
        let mut grid = Grid::calculate(
            &[],
            Point::new(0.0, 0.0),
            Heading::Right,
            Point::new(100.0, 0.0),
            Heading::Left,
            Bounds::new(0.0, 0.0, 100.0, 0.0),
        );
        let start = grid.node_at(Point::new(0.0, 0.0)).unwrap();
        let end = grid.node_at(Point::new(100.0, 0.0)).unwrap();
        grid.data[end].closed = true;
        assert!(astar(&mut grid, start, end, Heading::Right, Heading::Left, &[]).is_none());
    }

    #[test]
    fn test_astar_midpoint_obstacle_test_blocks_interior_edges() {
        // A single obstacle column between start and end forces the route
        // over the top or bottom edge of the box
        let obstacle = Bounds::new(40.0, -20.0, 60.0, 20.0);
        let mut grid = Grid::calculate(
            &[obstacle],
            Point::new(0.0, 0.0),
            Heading::Right,
            Point::new(100.0, 0.0),
            Heading::Left,
            Bounds::new(0.0, -20.0, 100.0, 20.0),
        );
        let start = grid.node_at(Point::new(0.0, 0.0)).unwrap();
        let end = grid.node_at(Point::new(100.0, 0.0)).unwrap();
        let path = astar(
            &mut grid,
            start,
            end,
            Heading::Right,
            Heading::Left,
            &[obstacle],
        )
        .expect("route around the obstacle");
        for window in path.windows(2) {
            let mid = grid.data[window[0]].pos.midpoint(grid.data[window[1]].pos);
            assert!(!obstacle.contains_point_strict(mid));
        }
    }
}
