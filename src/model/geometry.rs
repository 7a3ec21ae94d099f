//! Box geometry: normalization, union, overlap and IOU.
//!
//! Source documents are produced at different resolutions, so every box the
//! scoring core sees lives in a page-relative space where the page spans
//! `0..=NORMALIZED_SCALE` on both axes.

use serde::{Deserialize, Serialize};

/// Extent of a page along each axis after normalization.
pub const NORMALIZED_SCALE: f64 = 1000.0;

/// Raw bounds as recorded by the source engine, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBounds {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
}

impl PixelBounds {
    /// Create bounds from left, top, right and bottom edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Check that every edge is a finite number.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }
}

/// Declared page dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
}

impl PageSize {
    /// Create a page size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check whether the size can be used as a normalization divisor.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned box in normalized page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Left edge, 0-1000
    pub xmin: f64,
    /// Top edge, 0-1000
    pub ymin: f64,
    /// Right edge, 0-1000
    pub xmax: f64,
    /// Bottom edge, 0-1000
    pub ymax: f64,
}

impl BoundingBox {
    /// Create a box from already-normalized coordinates.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Scale raw pixel bounds into normalized space, one axis at a time.
    pub fn normalize(bounds: &PixelBounds, size: PageSize) -> Self {
        Self {
            xmin: bounds.left / size.width * NORMALIZED_SCALE,
            ymin: bounds.top / size.height * NORMALIZED_SCALE,
            xmax: bounds.right / size.width * NORMALIZED_SCALE,
            ymax: bounds.bottom / size.height * NORMALIZED_SCALE,
        }
    }

    /// Tightest box containing every input box, or `None` for no input.
    pub fn union<'a, I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes.into_iter().fold(None, |acc, b| {
            Some(match acc {
                None => *b,
                Some(u) => BoundingBox {
                    xmin: u.xmin.min(b.xmin),
                    ymin: u.ymin.min(b.ymin),
                    xmax: u.xmax.max(b.xmax),
                    ymax: u.ymax.max(b.ymax),
                },
            })
        })
    }

    /// Inclusive overlap test: boxes that only touch at an edge overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        let x_overlap = self.xmax >= other.xmin && other.xmax >= self.xmin;
        let y_overlap = self.ymax >= other.ymin && other.ymax >= self.ymin;
        x_overlap && y_overlap
    }

    /// Area under the inclusive-pixel convention (each side gets `+1`).
    pub fn inclusive_area(&self) -> f64 {
        (self.xmax - self.xmin + 1.0) * (self.ymax - self.ymin + 1.0)
    }

    /// Intersection area under the inclusive-pixel convention.
    pub fn intersection_area(&self, other: &BoundingBox) -> f64 {
        let width = (self.xmax.min(other.xmax) - self.xmin.max(other.xmin) + 1.0).max(0.0);
        let height = (self.ymax.min(other.ymax) - self.ymin.max(other.ymin) + 1.0).max(0.0);
        width * height
    }

    /// Intersection over union, using inclusive-pixel areas.
    ///
    /// Non-overlapping boxes score `0.0` without evaluating the ratio, and
    /// so does a non-positive union, which only inverted boxes can produce.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        if !self.overlaps(other) {
            return 0.0;
        }

        let intersection = self.intersection_area(other);
        let union = self.inclusive_area() + other.inclusive_area() - intersection;
        if union <= 0.0 {
            log::debug!(
                "Non-positive union area {} for {:?} and {:?}",
                union,
                self,
                other
            );
            return 0.0;
        }

        intersection / union
    }
}
