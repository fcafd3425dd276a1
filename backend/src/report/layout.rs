//! Page layout for PDF reports
//!
//! [`ReportLayout`] walks a vertical cursor down an A4 page, measured in
//! millimetres from the top edge. Before an element of height `h` is placed,
//! a new page is started exactly when `cursor + h` would pass the page
//! threshold, so no element ever extends below it.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const TOP_MARGIN_MM: f32 = 20.0;
pub const LEFT_MARGIN_MM: f32 = 15.0;
pub const DEFAULT_THRESHOLD_MM: f32 = 270.0;

/// Millimetres per typographic point
const MM_PER_PT: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
/// Rough average glyph width of Helvetica, as a fraction of the font size
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A positioned drawing command; `y` is the baseline, from the top edge
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        text: String,
    },
    Line {
        x1: f32,
        x2: f32,
        y: f32,
    },
}

impl DrawOp {
    pub fn y(&self) -> f32 {
        match self {
            DrawOp::Text { y, .. } | DrawOp::Line { y, .. } => *y,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Height of one line of text at `size` points
pub fn line_height(size: f32) -> f32 {
    size * MM_PER_PT * LINE_SPACING
}

/// Greedy word wrap to the printable width at `size` points
pub fn wrap(text: &str, size: f32) -> Vec<String> {
    let usable = PAGE_WIDTH_MM - 2.0 * LEFT_MARGIN_MM;
    let max_chars = ((usable / (size * MM_PER_PT * AVG_GLYPH_WIDTH)) as usize).max(10);

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub struct ReportLayout {
    threshold: f32,
    cursor: f32,
    pages: Vec<Page>,
}

impl ReportLayout {
    /// Start the first page; thresholds at or above the page height are
    /// clamped to it
    pub fn new(threshold_mm: f32) -> Self {
        Self {
            threshold: threshold_mm.clamp(TOP_MARGIN_MM + 1.0, PAGE_HEIGHT_MM),
            cursor: TOP_MARGIN_MM,
            pages: vec![Page::default()],
        }
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = TOP_MARGIN_MM;
    }

    /// Break to a new page if an element of `height` would pass the
    /// threshold; returns whether a page was added
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.cursor + height > self.threshold {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Reserve `height` and return the element's top, breaking first if
    /// needed. Elements taller than a whole page are shrunk to fit.
    fn place(&mut self, height: f32) -> (f32, f32) {
        let height = height.min(self.threshold - TOP_MARGIN_MM);
        self.ensure_space(height);
        let top = self.cursor;
        self.cursor += height;
        (top, height)
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Vertical whitespace; never forces a page break by itself
    pub fn gap(&mut self, mm: f32) {
        self.cursor += mm;
    }

    /// One line of text at `x`, without wrapping
    pub fn line(&mut self, x: f32, text: impl Into<String>, size: f32, weight: FontWeight) {
        let (top, height) = self.place(line_height(size));
        self.push(DrawOp::Text {
            x,
            y: top + height,
            size,
            weight,
            text: text.into(),
        });
    }

    /// Wrapped paragraph at the left margin
    pub fn paragraph(&mut self, text: &str, size: f32, weight: FontWeight) {
        for line in wrap(text, size) {
            self.line(LEFT_MARGIN_MM, line, size, weight);
        }
    }

    /// Table row; `columns` are (x offset, cell text)
    pub fn row(&mut self, columns: &[(f32, String)], size: f32, weight: FontWeight) {
        let (top, height) = self.place(line_height(size));
        for (x, text) in columns {
            self.push(DrawOp::Text {
                x: *x,
                y: top + height,
                size,
                weight,
                text: text.clone(),
            });
        }
    }

    /// Horizontal rule across the printable width
    pub fn rule(&mut self) {
        let (top, height) = self.place(2.0);
        self.push(DrawOp::Line {
            x1: LEFT_MARGIN_MM,
            x2: PAGE_WIDTH_MM - LEFT_MARGIN_MM,
            y: top + height / 2.0,
        });
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_break_exactly_at_threshold() {
        let mut layout = ReportLayout::new(DEFAULT_THRESHOLD_MM);
        layout.gap(240.0);
        assert_eq!(layout.cursor(), 260.0);

        // 260 + 10 == 270 still fits
        assert!(!layout.ensure_space(10.0));
        // 260 + 10.5 > 270 does not
        assert!(layout.ensure_space(10.5));
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.cursor(), TOP_MARGIN_MM);
    }

    #[test]
    fn test_wrap() {
        let text = "word ".repeat(100);
        let lines = wrap(&text, 10.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| !l.starts_with(' ') && !l.ends_with(' ')));
        assert_eq!(lines.join(" ").split(' ').count(), 100);
        assert!(wrap("   ", 10.0).is_empty());
    }

    #[test]
    fn test_threshold_clamped_to_page() {
        assert_eq!(ReportLayout::new(500.0).threshold(), PAGE_HEIGHT_MM);
    }

    #[derive(Debug, Clone)]
    enum Element {
        Line(f32),
        Row(f32),
        Rule,
        Gap(f32),
    }

    fn element() -> impl Strategy<Value = Element> {
        prop_oneof![
            (6.0f32..24.0).prop_map(Element::Line),
            (6.0f32..14.0).prop_map(Element::Row),
            Just(Element::Rule),
            (0.0f32..30.0).prop_map(Element::Gap),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Nothing is ever drawn below the threshold or above the top margin
        #[test]
        fn prop_no_op_below_threshold(
            elements in prop::collection::vec(element(), 0..300),
            threshold in 100.0f32..297.0,
        ) {
            let mut layout = ReportLayout::new(threshold);
            for e in &elements {
                match e {
                    Element::Line(size) => layout.line(LEFT_MARGIN_MM, "text", *size, FontWeight::Regular),
                    Element::Row(size) => layout.row(&[(LEFT_MARGIN_MM, "a".into()), (100.0, "b".into())], *size, FontWeight::Bold),
                    Element::Rule => layout.rule(),
                    Element::Gap(mm) => layout.gap(*mm),
                }
            }
            for page in layout.finish() {
                for op in &page.ops {
                    prop_assert!(op.y() <= threshold + 1e-3);
                    prop_assert!(op.y() > TOP_MARGIN_MM);
                }
            }
        }

        /// A page is added exactly when the element would not fit
        #[test]
        fn prop_break_iff_overflow(
            gaps in prop::collection::vec(0.0f32..60.0, 1..20),
            height in 1.0f32..40.0,
        ) {
            let mut layout = ReportLayout::new(DEFAULT_THRESHOLD_MM);
            for g in gaps {
                layout.gap(g);
            }
            let before = layout.cursor();
            let pages = layout.page_count();
            let broke = layout.ensure_space(height);

            prop_assert_eq!(broke, before + height > DEFAULT_THRESHOLD_MM);
            prop_assert_eq!(layout.page_count(), pages + usize::from(broke));
        }
    }
}
