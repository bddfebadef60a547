//! The eight strokes of the classic outer square.
//!
//! ```text
//!      s0  s1
//!      _   _
//!  s2 |     | s3
//!
//!  s4 |     | s5
//!      -   -
//!      s6  s7
//! ```
//!
//! Positions are in the indicator's positioning space (the square spans
//! roughly -0.5..0.5 on X and Z). Opening a segment shortens it and slides
//! it toward its corner, leaving gaps in the middle of each edge.

use focus_config::ClassicStyle;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Which corner of the square a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Orientation of a segment's stroke within the square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentAlignment {
    /// Runs along X
    Horizontal,
    /// Runs along Z
    Vertical,
}

/// Direction a segment slides when the square opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenDirection {
    Left,
    Right,
    Up,
    Down,
}

impl OpenDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Unit step in positioning space ("up" is toward -Z)
    fn unit(self) -> Vec3 {
        match self {
            Self::Left => Vec3::NEG_X,
            Self::Right => Vec3::X,
            Self::Up => Vec3::NEG_Z,
            Self::Down => Vec3::Z,
        }
    }
}

/// One stroke of the outer square
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Index 0..8, see the module diagram
    pub index: u8,
    pub corner: Corner,
    pub alignment: SegmentAlignment,
    /// Center of the stroke in positioning space
    pub position: Vec3,
    /// Current stroke length
    pub length: f32,
    /// RGBA color
    pub color: [f32; 4],
    open: bool,
}

/// Corner and alignment of s0..s7, in index order
pub const SEGMENT_LAYOUT: [(Corner, SegmentAlignment); 8] = [
    (Corner::TopLeft, SegmentAlignment::Horizontal),
    (Corner::TopRight, SegmentAlignment::Horizontal),
    (Corner::TopLeft, SegmentAlignment::Vertical),
    (Corner::TopRight, SegmentAlignment::Vertical),
    (Corner::BottomLeft, SegmentAlignment::Vertical),
    (Corner::BottomRight, SegmentAlignment::Vertical),
    (Corner::BottomLeft, SegmentAlignment::Horizontal),
    (Corner::BottomRight, SegmentAlignment::Horizontal),
];

impl Segment {
    /// A closed (full length) segment at `position`
    pub fn new(
        index: u8,
        corner: Corner,
        alignment: SegmentAlignment,
        position: Vec3,
        style: &ClassicStyle,
        color: [f32; 4],
    ) -> Self {
        Self {
            index,
            corner,
            alignment,
            position,
            length: style.segment_length,
            color,
            open: false,
        }
    }

    /// Scene name of the segment ("s0".."s7")
    pub fn name(&self) -> String {
        format!("s{}", self.index)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open_direction(&self) -> OpenDirection {
        match (self.corner, self.alignment) {
            (Corner::TopLeft, SegmentAlignment::Horizontal) => OpenDirection::Left,
            (Corner::TopLeft, SegmentAlignment::Vertical) => OpenDirection::Up,
            (Corner::TopRight, SegmentAlignment::Horizontal) => OpenDirection::Right,
            (Corner::TopRight, SegmentAlignment::Vertical) => OpenDirection::Up,
            (Corner::BottomLeft, SegmentAlignment::Horizontal) => OpenDirection::Left,
            (Corner::BottomLeft, SegmentAlignment::Vertical) => OpenDirection::Down,
            (Corner::BottomRight, SegmentAlignment::Horizontal) => OpenDirection::Right,
            (Corner::BottomRight, SegmentAlignment::Vertical) => OpenDirection::Down,
        }
    }

    /// Shorten to the open length and slide toward the corner. No-op if open.
    pub fn open(&mut self, style: &ClassicStyle) {
        if self.open {
            return;
        }
        let offset = style.segment_length / 2.0 - style.open_segment_length / 2.0;
        self.length = style.open_segment_length;
        self.position += self.open_direction().unit() * offset;
        self.open = true;
    }

    /// Restore the full length and slide back. No-op if closed.
    pub fn close(&mut self, style: &ClassicStyle) {
        if !self.open {
            return;
        }
        let offset = style.segment_length / 2.0 - self.length / 2.0;
        self.length = style.segment_length;
        self.position += self.open_direction().reversed().unit() * offset;
        self.open = false;
    }

    /// Footprint of the stroke on the X/Z plane
    pub fn extent(&self, style: &ClassicStyle) -> Vec2 {
        match self.alignment {
            SegmentAlignment::Horizontal => Vec2::new(self.length, style.thickness),
            SegmentAlignment::Vertical => Vec2::new(style.thickness, self.length),
        }
    }
}

/// Build the eight segments of the classic square, opened.
pub fn classic_segments(style: &ClassicStyle, color: [f32; 4]) -> [Segment; 8] {
    let sl = style.segment_length;
    // Half thickness, so horizontal and vertical strokes meet cleanly
    let c = style.thickness / 2.0;

    let positions = [
        Vec3::new(-(sl / 2.0 - c), 0.0, -(sl - c)),
        Vec3::new(sl / 2.0 - c, 0.0, -(sl - c)),
        Vec3::new(-sl, 0.0, -sl / 2.0),
        Vec3::new(sl, 0.0, -sl / 2.0),
        Vec3::new(-sl, 0.0, sl / 2.0),
        Vec3::new(sl, 0.0, sl / 2.0),
        Vec3::new(-(sl / 2.0 - c), 0.0, sl - c),
        Vec3::new(sl / 2.0 - c, 0.0, sl - c),
    ];

    std::array::from_fn(|i| {
        let (corner, alignment) = SEGMENT_LAYOUT[i];
        let mut segment = Segment::new(i as u8, corner, alignment, positions[i], style, color);
        segment.open(style);
        segment
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_layout_names_and_state() {
        let style = ClassicStyle::default();
        let segments = classic_segments(&style, [1.0; 4]);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.index as usize, i);
            assert_eq!(segment.name(), format!("s{i}"));
            assert!(segment.is_open());
            assert!((segment.length - style.open_segment_length).abs() < EPSILON);
        }
        assert_eq!(segments[2].corner, Corner::TopLeft);
        assert_eq!(segments[2].alignment, SegmentAlignment::Vertical);
        assert_eq!(segments[7].corner, Corner::BottomRight);
    }

    #[test]
    fn test_open_slides_toward_corner() {
        let style = ClassicStyle::default();
        let segments = classic_segments(&style, [1.0; 4]);
        let offset = 0.15;
        let c = style.thickness / 2.0;

        // s0 is top-left horizontal: slides left
        let expected_s0 = Vec3::new(-(0.25 - c) - offset, 0.0, -(0.5 - c));
        assert!(segments[0].position.abs_diff_eq(expected_s0, EPSILON));

        // s5 is bottom-right vertical: slides down (+Z)
        let expected_s5 = Vec3::new(0.5, 0.0, 0.25 + offset);
        assert!(segments[5].position.abs_diff_eq(expected_s5, EPSILON));
    }

    #[test]
    fn test_close_restores_position_and_length() {
        let style = ClassicStyle::default();
        let mut segment = Segment::new(
            3,
            Corner::TopRight,
            SegmentAlignment::Vertical,
            Vec3::new(0.5, 0.0, -0.25),
            &style,
            [1.0; 4],
        );
        segment.open(&style);
        assert!(segment.position.abs_diff_eq(Vec3::new(0.5, 0.0, -0.4), EPSILON));
        segment.close(&style);
        assert!(!segment.is_open());
        assert!(segment.position.abs_diff_eq(Vec3::new(0.5, 0.0, -0.25), EPSILON));
        assert!((segment.length - style.segment_length).abs() < EPSILON);
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let style = ClassicStyle::default();
        let mut segments = classic_segments(&style, [1.0; 4]);
        let opened = segments[1].clone();
        segments[1].open(&style);
        assert_eq!(segments[1], opened);

        segments[1].close(&style);
        let closed = segments[1].clone();
        segments[1].close(&style);
        assert_eq!(segments[1], closed);
    }

    #[test]
    fn test_extent_follows_alignment() {
        let style = ClassicStyle::default();
        let segments = classic_segments(&style, [1.0; 4]);
        assert_eq!(segments[0].extent(&style), Vec2::new(0.2, style.thickness));
        assert_eq!(segments[2].extent(&style), Vec2::new(style.thickness, 0.2));
    }

    #[test]
    fn test_open_direction_reversal() {
        assert_eq!(OpenDirection::Left.reversed(), OpenDirection::Right);
        assert_eq!(OpenDirection::Up.reversed(), OpenDirection::Down);
    }
}
