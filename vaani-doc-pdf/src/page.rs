//! A4 page geometry and the paginating cursor.
//!
//! All layout math happens in millimeters measured from the paper's top
//! left corner; conversion to PDF user space (points, origin bottom left)
//! happens at the moment an operation is pushed.

use lopdf::content::Operation;

pub(crate) const PAGE_WIDTH_MM: f32 = 210.0;
pub(crate) const PAGE_HEIGHT_MM: f32 = 297.0;

/// Outer frame inset from the paper edge.
pub(crate) const BORDER_MM: f32 = 8.0;

/// Content inset from the paper edge.
pub(crate) const MARGIN_MM: f32 = 14.0;

pub(crate) const MM_TO_PT: f32 = 72.0 / 25.4;

const BORDER_STROKE_PT: f32 = 1.2;

/// X coordinate in points for a distance from the left paper edge in mm.
pub(crate) fn x_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// Y coordinate in points for a distance from the top paper edge in mm.
pub(crate) fn y_pt(mm_from_top: f32) -> f32 {
    (PAGE_HEIGHT_MM - mm_from_top) * MM_TO_PT
}

/// Accumulates content operations page by page.
///
/// The cursor counts millimeters of content written since the top content
/// edge of the current page. [`PageBuilder::ensure_room`] implements the
/// pagination rule: once a block would end past the break threshold, the
/// current page is sealed and a fresh one begins with its own border, so
/// nothing drawn afterwards can land on the sealed page.
pub(crate) struct PageBuilder {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    cursor_mm: f32,
    break_after_mm: f32,
}

impl PageBuilder {
    pub(crate) fn new(break_after_mm: f32) -> Self {
        let mut ops = Vec::new();
        push_border(&mut ops);
        Self {
            pages: Vec::new(),
            ops,
            cursor_mm: 0.0,
            break_after_mm,
        }
    }

    /// Start a new page if a block of `height_mm` would end past the break
    /// threshold. A block taller than the whole threshold draws on the
    /// current page rather than looping.
    pub(crate) fn ensure_room(&mut self, height_mm: f32) {
        if self.cursor_mm > 0.0 && self.cursor_mm + height_mm > self.break_after_mm {
            self.pages.push(std::mem::take(&mut self.ops));
            push_border(&mut self.ops);
            self.cursor_mm = 0.0;
        }
    }

    pub(crate) fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    pub(crate) fn advance(&mut self, height_mm: f32) {
        self.cursor_mm += height_mm;
    }

    /// Distance from the paper top to the cursor, in mm.
    pub(crate) fn top_mm(&self) -> f32 {
        MARGIN_MM + self.cursor_mm
    }

    pub(crate) fn into_pages(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(self.ops);
        self.pages
    }
}

fn push_border(ops: &mut Vec<Operation>) {
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("w", vec![BORDER_STROKE_PT.into()]));
    ops.push(Operation::new(
        "re",
        vec![
            x_pt(BORDER_MM).into(),
            y_pt(PAGE_HEIGHT_MM - BORDER_MM).into(),
            ((PAGE_WIDTH_MM - 2.0 * BORDER_MM) * MM_TO_PT).into(),
            ((PAGE_HEIGHT_MM - 2.0 * BORDER_MM) * MM_TO_PT).into(),
        ],
    ));
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Object;

    fn operators(page: &[Operation]) -> Vec<String> {
        page.iter().map(|op| op.operator.clone()).collect()
    }

    #[test]
    fn single_page_carries_one_border() {
        let page = PageBuilder::new(210.0);
        let pages = page.into_pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(operators(&pages[0]), ["q", "w", "re", "S", "Q"]);
    }

    #[test]
    fn break_starts_a_fresh_bordered_page_without_leaking_content() {
        let mut page = PageBuilder::new(100.0);
        page.push(Operation::new(
            "Tj",
            vec![Object::string_literal("first page marker")],
        ));
        page.advance(90.0);

        // 90 + 20 ends past the threshold: the next block goes on page 2.
        page.ensure_room(20.0);
        assert_eq!(page.top_mm(), MARGIN_MM);
        page.push(Operation::new(
            "Tj",
            vec![Object::string_literal("second page marker")],
        ));

        let pages = page.into_pages();
        assert_eq!(pages.len(), 2);

        // Each page begins with its own border rectangle.
        assert_eq!(operators(&pages[0])[..5], ["q", "w", "re", "S", "Q"]);
        assert_eq!(operators(&pages[1])[..5], ["q", "w", "re", "S", "Q"]);

        let first_marker = Object::string_literal("first page marker");
        assert!(pages[0].iter().any(|op| op.operands.contains(&first_marker)));
        assert!(!pages[1].iter().any(|op| op.operands.contains(&first_marker)));
    }

    #[test]
    fn blocks_within_the_threshold_stay_on_one_page() {
        let mut page = PageBuilder::new(210.0);
        for _ in 0..20 {
            page.ensure_room(10.0);
            page.advance(10.0);
        }
        // 20 blocks of 10mm fit exactly under 210.
        assert_eq!(page.into_pages().len(), 1);
    }

    #[test]
    fn oversized_block_draws_without_looping() {
        let mut page = PageBuilder::new(50.0);
        page.ensure_room(80.0);
        page.advance(80.0);
        page.ensure_room(80.0);
        page.advance(80.0);
        assert_eq!(page.into_pages().len(), 2);
    }
}
