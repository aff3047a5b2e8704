// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Guide layout: where the measurement lines and labels go on a photo of a
// given size. Everything is a fixed fraction of the image's own dimensions.

/// Gap between the vertical guide and the start of the height label.
pub const HEIGHT_LABEL_OFFSET_X: i32 = 10;
/// Gap between the width label's baseline and the horizontal guide.
pub const WIDTH_LABEL_LIFT_Y: i32 = 8;

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Line and label anchors for one image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideLayout {
    /// Vertical (height) guide: 10% to 90% of the height at 10% of the width.
    pub vertical: (Point, Point),
    /// Horizontal (width) guide: 10% to 90% of the width at 90% of the height.
    pub horizontal: (Point, Point),
    /// Baseline start of the height label, right of the vertical guide at
    /// mid-height.
    pub height_label: Point,
    /// Baseline start of the width label, at mid-width just above the
    /// horizontal guide.
    pub width_label: Point,
}

impl GuideLayout {
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        let x10 = at_percent(width, 10);
        let x50 = at_percent(width, 50);
        let x90 = at_percent(width, 90);
        let y10 = at_percent(height, 10);
        let y50 = at_percent(height, 50);
        let y90 = at_percent(height, 90);

        Self {
            vertical: (Point::new(x10, y10), Point::new(x10, y90)),
            horizontal: (Point::new(x10, y90), Point::new(x90, y90)),
            height_label: Point::new(x10 + HEIGHT_LABEL_OFFSET_X, y50),
            width_label: Point::new(x50, y90 - WIDTH_LABEL_LIFT_Y),
        }
    }

    /// Length of the vertical guide in pixels (end minus start).
    pub fn vertical_span(&self) -> u32 {
        self.vertical.1.y.abs_diff(self.vertical.0.y)
    }

    /// Length of the horizontal guide in pixels (end minus start).
    pub fn horizontal_span(&self) -> u32 {
        self.horizontal.1.x.abs_diff(self.horizontal.0.x)
    }
}

/// `percent`% of `length`, truncated toward zero.
fn at_percent(length: u32, percent: u32) -> i32 {
    (u64::from(length) * u64::from(percent) / 100) as i32
}
