//! Ruled-line (grid) detection for the lattice table strategy.
//!
//! Distinguishes a page that actually contains a ruled-line table — thin,
//! drawn path objects spanning most of a row or column — from one that only
//! has body text, so the lattice strategy can refuse pages it has no
//! business matching rather than silently behaving like the stream
//! strategy.
use pdfium_render::prelude::*;

use super::error::PdfError;

/// Minimum span, in PDF points, for a thin path object to count as a ruled
/// line rather than incidental page furniture (bullets, underlines).
const MIN_LINE_SPAN: f32 = 20.0;

/// Maximum thickness, in PDF points, for a path object to still be "thin
/// enough" to be a ruled line rather than a filled shape.
const MAX_LINE_THICKNESS: f32 = 2.0;

/// Ruled-line positions found on a page, converted to the same top-left,
/// image-style coordinate system [`crate::pdf::words`] reconstructs word
/// boxes in.
#[derive(Debug, Default, Clone)]
pub struct RuledLines {
    pub horizontal: Vec<f32>,
    pub vertical: Vec<f32>,
}

impl RuledLines {
    /// A page only has a ruled-line grid once there are at least two
    /// horizontal and two vertical lines — enough to bound one cell.
    pub fn is_grid(&self) -> bool {
        self.horizontal.len() >= 2 && self.vertical.len() >= 2
    }
}

/// Scans a page's drawn path objects for thin horizontal/vertical strokes
/// consistent with a ruled table grid.
pub fn detect_ruled_lines(page: &PdfPage, page_height: f32) -> Result<RuledLines, PdfError> {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();

    for object in page.objects().iter() {
        if !matches!(object.object_type(), PdfPageObjectType::Path) {
            continue;
        }

        let bounds = object
            .bounds()
            .map_err(|e| PdfError::Extraction(format!("failed to read path bounds: {e}")))?;
        let width = bounds.width().value;
        let height = bounds.height().value;

        if height <= MAX_LINE_THICKNESS && width >= MIN_LINE_SPAN {
            let y = (bounds.bottom().value + bounds.top().value) / 2.0;
            horizontal.push(page_height - y);
        } else if width <= MAX_LINE_THICKNESS && height >= MIN_LINE_SPAN {
            let x = (bounds.left().value + bounds.right().value) / 2.0;
            vertical.push(x);
        }
    }

    sort_and_dedupe(&mut horizontal);
    sort_and_dedupe(&mut vertical);

    Ok(RuledLines { horizontal, vertical })
}

/// Sorts and collapses lines within [`MAX_LINE_THICKNESS`] of each other,
/// since a single ruled line is often drawn as two or three overlapping
/// path objects.
fn sort_and_dedupe(values: &mut Vec<f32>) {
    values.sort_by(|a, b| a.partial_cmp(b).expect("line coordinates are finite"));
    let mut deduped: Vec<f32> = Vec::with_capacity(values.len());
    for &v in values.iter() {
        if deduped.last().is_none_or(|&last: &f32| (v - last).abs() > MAX_LINE_THICKNESS) {
            deduped.push(v);
        }
    }
    *values = deduped;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_grid_requires_at_least_two_lines_each_way() {
        assert!(!RuledLines::default().is_grid());
        assert!(!RuledLines { horizontal: vec![1.0, 2.0], vertical: vec![1.0] }.is_grid());
        assert!(RuledLines { horizontal: vec![1.0, 2.0], vertical: vec![1.0, 2.0] }.is_grid());
    }

    #[test]
    fn sort_and_dedupe_collapses_nearby_values() {
        let mut values = vec![30.0, 10.0, 10.5];
        sort_and_dedupe(&mut values);
        assert_eq!(values, vec![10.0, 30.0]);
    }

    #[test]
    fn sort_and_dedupe_keeps_distinct_values() {
        let mut values = vec![50.0, 10.0, 30.0];
        sort_and_dedupe(&mut values);
        assert_eq!(values, vec![10.0, 30.0, 50.0]);
    }
}
