//! Wall-segment and bounding-box math.
//!
//! Pure functions over plan-space coordinates. The central primitive is
//! [`wall_with_gaps`], which turns a straight line plus a set of doorway
//! openings into the solid wall segments between them.

use crate::constants::EPSILON;
use crate::error::PlanError;
use crate::model::Wall;

/// Axis-aligned rectangle in plan space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Rect {
    pub fn from_center(center: [f32; 2], size: [f32; 2]) -> Self {
        let (hw, hd) = (size[0] / 2.0, size[1] / 2.0);
        Self {
            min_x: center[0] - hw,
            max_x: center[0] + hw,
            min_z: center[1] - hd,
            max_z: center[1] + hd,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    pub fn center(&self) -> [f32; 2] {
        [
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        ]
    }

    /// Interior overlap. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let overlap_x = self.max_x - EPSILON > other.min_x && other.max_x - EPSILON > self.min_x;
        let overlap_z = self.max_z - EPSILON > other.min_z && other.max_z - EPSILON > self.min_z;
        overlap_x && overlap_z
    }

    pub fn contains(&self, p: [f32; 2]) -> bool {
        p[0] >= self.min_x - EPSILON
            && p[0] <= self.max_x + EPSILON
            && p[1] >= self.min_z - EPSILON
            && p[1] <= self.max_z + EPSILON
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_z: self.min_z.min(other.min_z),
            max_z: self.max_z.max(other.max_z),
        }
    }
}

/// Smallest rectangle enclosing every input, or `None` if empty.
pub fn bounding_box<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects.into_iter().reduce(|acc, r| acc.union(&r))
}

/// Which axis a straight line runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Fixed z, varying x.
    X,
    /// Fixed x, varying z.
    Z,
}

/// Classify a line as running along x or z. Diagonal and degenerate
/// lines are rejected.
pub fn line_axis(start: [f32; 2], end: [f32; 2]) -> Result<Axis, PlanError> {
    let dx = (end[0] - start[0]).abs();
    let dz = (end[1] - start[1]).abs();
    match (dx > EPSILON, dz > EPSILON) {
        (true, false) => Ok(Axis::X),
        (false, true) => Ok(Axis::Z),
        (false, false) => Err(PlanError::geometry(format!(
            "zero-length wall line at ({}, {})",
            start[0], start[1]
        ))),
        (true, true) => Err(PlanError::geometry(format!(
            "wall line ({}, {})→({}, {}) is not axis-aligned",
            start[0], start[1], end[0], end[1]
        ))),
    }
}

/// Split a straight line into solid wall segments around doorway gaps.
///
/// `gap_centers` are positions along the line's varying axis and must be
/// sorted ascending; each opening spans `center ± gap_width / 2`. Gaps must
/// lie within the line and must not overlap each other (touching is fine).
/// The line may be given in either direction; segments are emitted in
/// ascending order. Zero gaps yield one wall spanning the whole line.
pub fn wall_with_gaps(
    line_start: [f32; 2],
    line_end: [f32; 2],
    gap_centers: &[f32],
    gap_width: f32,
    height: f32,
    thickness: f32,
) -> Result<Vec<Wall>, PlanError> {
    let axis = line_axis(line_start, line_end)?;
    if !gap_centers.is_empty() && gap_width <= 0.0 {
        return Err(PlanError::geometry(format!(
            "gap width must be positive, got {}",
            gap_width
        )));
    }

    let (fixed, a, b) = match axis {
        Axis::X => (line_start[1], line_start[0], line_end[0]),
        Axis::Z => (line_start[0], line_start[1], line_end[1]),
    };
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let point = |t: f32| match axis {
        Axis::X => [t, fixed],
        Axis::Z => [fixed, t],
    };
    let segment = |from: f32, to: f32| Wall {
        start: point(from),
        end: point(to),
        height,
        thickness,
        floor: None,
    };

    let half = gap_width / 2.0;
    let mut walls = Vec::with_capacity(gap_centers.len() + 1);
    let mut cursor = lo;
    let mut prev_center: Option<f32> = None;

    for &center in gap_centers {
        if let Some(prev) = prev_center {
            if center < prev {
                return Err(PlanError::geometry(format!(
                    "gap centers not sorted: {} after {}",
                    center, prev
                )));
            }
        }
        let gap_start = center - half;
        let gap_end = center + half;
        if gap_start < lo - EPSILON || gap_end > hi + EPSILON {
            return Err(PlanError::geometry(format!(
                "gap [{}, {}] extends past wall line [{}, {}]",
                gap_start, gap_end, lo, hi
            )));
        }
        if gap_start < cursor - EPSILON {
            return Err(PlanError::geometry(format!(
                "gap at {} overlaps the previous gap ending at {}",
                center, cursor
            )));
        }
        if gap_start > cursor + EPSILON {
            walls.push(segment(cursor, gap_start));
        }
        cursor = gap_end;
        prev_center = Some(center);
    }

    if cursor < hi - EPSILON {
        walls.push(segment(cursor, hi));
    }
    Ok(walls)
}

/// Four outer walls tracing a rectangle clockwise from its north-west corner.
pub fn perimeter_walls(rect: &Rect, height: f32, thickness: f32) -> Vec<Wall> {
    let corners = [
        [rect.min_x, rect.min_z],
        [rect.max_x, rect.min_z],
        [rect.max_x, rect.max_z],
        [rect.min_x, rect.max_z],
    ];
    (0..4)
        .map(|i| Wall {
            start: corners[i],
            end: corners[(i + 1) % 4],
            height,
            thickness,
            floor: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(walls: &[Wall]) -> Vec<(f32, f32)> {
        walls.iter().map(|w| (w.start[0], w.end[0])).collect()
    }

    #[test]
    fn test_three_gaps_on_horizontal_line() {
        let walls = wall_with_gaps([-10.0, 0.0], [10.0, 0.0], &[-5.0, 0.0, 5.0], 2.0, 3.0, 0.2)
            .unwrap();
        assert_eq!(
            spans(&walls),
            vec![(-10.0, -6.0), (-4.0, -1.0), (1.0, 4.0), (6.0, 10.0)]
        );
        assert!(walls.iter().all(|w| w.start[1] == 0.0 && w.end[1] == 0.0));
        assert!(walls.iter().all(|w| w.height == 3.0 && w.thickness == 0.2));
    }

    #[test]
    fn test_no_gaps_single_wall() {
        let walls = wall_with_gaps([0.0, 2.0], [0.0, 8.0], &[], 2.0, 3.0, 0.2).unwrap();
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].start, [0.0, 2.0]);
        assert_eq!(walls[0].end, [0.0, 8.0]);
    }

    #[test]
    fn test_vertical_line_reversed_direction() {
        let walls = wall_with_gaps([3.0, 10.0], [3.0, 0.0], &[5.0], 2.0, 3.0, 0.2).unwrap();
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].start, [3.0, 0.0]);
        assert_eq!(walls[0].end, [3.0, 4.0]);
        assert_eq!(walls[1].start, [3.0, 6.0]);
        assert_eq!(walls[1].end, [3.0, 10.0]);
    }

    #[test]
    fn test_gap_flush_with_line_ends() {
        let walls = wall_with_gaps([0.0, 0.0], [10.0, 0.0], &[1.0, 9.0], 2.0, 3.0, 0.2).unwrap();
        assert_eq!(spans(&walls), vec![(2.0, 8.0)]);
    }

    #[test]
    fn test_touching_gaps_allowed() {
        let walls = wall_with_gaps([0.0, 0.0], [10.0, 0.0], &[3.0, 5.0], 2.0, 3.0, 0.2).unwrap();
        assert_eq!(spans(&walls), vec![(0.0, 2.0), (6.0, 10.0)]);
    }

    #[test]
    fn test_overlapping_gaps_rejected() {
        let err = wall_with_gaps([0.0, 0.0], [10.0, 0.0], &[4.0, 5.0], 2.0, 3.0, 0.2);
        assert!(matches!(err, Err(PlanError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_unsorted_gaps_rejected() {
        let err = wall_with_gaps([0.0, 0.0], [20.0, 0.0], &[10.0, 3.0], 2.0, 3.0, 0.2);
        assert!(matches!(err, Err(PlanError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_gap_outside_line_rejected() {
        let err = wall_with_gaps([0.0, 0.0], [10.0, 0.0], &[10.0], 2.0, 3.0, 0.2);
        assert!(matches!(err, Err(PlanError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_diagonal_and_degenerate_lines_rejected() {
        assert!(wall_with_gaps([0.0, 0.0], [5.0, 5.0], &[], 2.0, 3.0, 0.2).is_err());
        assert!(wall_with_gaps([1.0, 1.0], [1.0, 1.0], &[], 2.0, 3.0, 0.2).is_err());
    }

    #[test]
    fn test_segments_never_cover_gaps() {
        let centers = [-7.0, -2.5, 3.0, 8.0];
        let walls = wall_with_gaps([-10.0, 0.0], [10.0, 0.0], &centers, 1.5, 3.0, 0.2).unwrap();
        for w in &walls {
            assert!(w.length() > 0.0);
            for c in centers {
                assert!(!(w.start[0] < c && c < w.end[0]), "wall covers gap at {}", c);
            }
        }
        for pair in walls.windows(2) {
            assert!(pair[0].end[0] <= pair[1].start[0]);
        }
    }

    #[test]
    fn test_rect_overlap_and_touching() {
        let a = Rect::from_center([0.0, 0.0], [4.0, 4.0]);
        let touching = Rect::from_center([4.0, 0.0], [4.0, 4.0]);
        let overlapping = Rect::from_center([3.0, 1.0], [4.0, 4.0]);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }

    #[test]
    fn test_bounding_box() {
        let bb = bounding_box([
            Rect::from_center([0.0, 0.0], [2.0, 2.0]),
            Rect::from_center([5.0, -3.0], [2.0, 2.0]),
        ])
        .unwrap();
        assert_eq!((bb.min_x, bb.max_x, bb.min_z, bb.max_z), (-1.0, 6.0, -4.0, 1.0));
        assert!(bounding_box(std::iter::empty()).is_none());
    }

    #[test]
    fn test_perimeter_is_closed() {
        let walls = perimeter_walls(&Rect::from_center([0.0, 0.0], [10.0, 6.0]), 3.0, 0.3);
        assert_eq!(walls.len(), 4);
        for i in 0..4 {
            assert_eq!(walls[i].end, walls[(i + 1) % 4].start);
        }
    }
}
