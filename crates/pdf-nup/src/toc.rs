//! Table-of-contents pagination and line layout
//!
//! The generator is pure: it partitions entries into fixed-capacity
//! pages and computes the rectangles of every text fragment and link
//! region. Turning those rectangles into content-stream operators is the
//! renderer's job.

use crate::constants::{
    PAGE_HEIGHT_PT, PAGE_WIDTH_PT, TOC_FONT_SIZE_PT, TOC_LINE_HEIGHT_PT, TOC_MARGIN_PT,
    TOC_NUMBER_COLUMN_PT, TOC_SLACK_LINES,
};
use crate::layout::Rect;

/// One TOC line: a section title, the output page it starts on, and the
/// page number displayed next to the title.
///
/// `dest` is an index into the final output page order. `display_number`
/// is recorded when the section is first composed, before any front
/// matter is inserted, and is not adjusted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub dest: usize,
    pub display_number: usize,
}

/// Layout parameters for TOC pages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TocLayout {
    pub top_margin: f32,
    pub right_margin: f32,
    pub bottom_margin: f32,
    pub left_margin: f32,
    pub line_height: f32,
    pub font_size: f32,
    pub page_width: f32,
    pub page_height: f32,
}

impl Default for TocLayout {
    fn default() -> Self {
        Self {
            top_margin: TOC_MARGIN_PT,
            right_margin: TOC_MARGIN_PT,
            bottom_margin: TOC_MARGIN_PT,
            left_margin: TOC_MARGIN_PT,
            line_height: TOC_LINE_HEIGHT_PT,
            font_size: TOC_FONT_SIZE_PT,
            page_width: PAGE_WIDTH_PT,
            page_height: PAGE_HEIGHT_PT,
        }
    }
}

impl TocLayout {
    /// Entry lines that fit on one page, with two lines of slack reserved
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height - self.top_margin - self.bottom_margin;
        ((usable / self.line_height) as usize)
            .saturating_sub(TOC_SLACK_LINES)
            .max(1)
    }

    /// Width of the title column
    fn title_width(&self) -> f32 {
        self.page_width - self.left_margin - self.right_margin - TOC_NUMBER_COLUMN_PT
    }
}

/// One generated TOC page. Only the first page of a TOC draws the
/// centered title header.
#[derive(Debug, Clone, PartialEq)]
pub struct TocPage {
    pub entries: Vec<TocEntry>,
    pub draw_title: bool,
}

/// Layout of one entry line on a TOC page
#[derive(Debug, Clone, PartialEq)]
pub struct TocLine {
    /// Left-aligned title column
    pub title_rect: Rect,
    /// Right-aligned page-number column
    pub number_rect: Rect,
    /// Link region spanning the full line
    pub link_rect: Rect,
}

/// Number of TOC pages `entry_count` entries paginate into
pub fn toc_page_count(entry_count: usize, layout: &TocLayout) -> usize {
    entry_count.div_ceil(layout.lines_per_page())
}

/// Partition entries into pages, preserving order. Zero entries yield
/// zero pages.
pub fn paginate(entries: &[TocEntry], layout: &TocLayout) -> Vec<TocPage> {
    entries
        .chunks(layout.lines_per_page())
        .enumerate()
        .map(|(index, chunk)| TocPage {
            entries: chunk.to_vec(),
            draw_title: index == 0,
        })
        .collect()
}

impl TocPage {
    /// The rectangle of the title header, if this page draws one
    pub fn title_rect(&self, layout: &TocLayout) -> Option<Rect> {
        if !self.draw_title {
            return None;
        }
        let y = layout.page_height - layout.top_margin - layout.line_height * 2.0;
        Some(Rect::new(
            layout.left_margin,
            y,
            layout.page_width - layout.left_margin - layout.right_margin,
            layout.line_height * 2.0,
        ))
    }

    /// Line rectangles for every entry on this page, top to bottom
    pub fn lines(&self, layout: &TocLayout) -> Vec<TocLine> {
        // The header consumes one extra line of vertical space
        let mut y = if self.draw_title {
            layout.page_height - layout.top_margin - layout.line_height * 3.0
        } else {
            layout.page_height - layout.top_margin - layout.line_height
        };

        let title_x = layout.left_margin;
        let title_width = layout.title_width();
        let number_x = layout.page_width - layout.right_margin - TOC_NUMBER_COLUMN_PT;

        let mut lines = Vec::with_capacity(self.entries.len());
        for _ in &self.entries {
            lines.push(TocLine {
                title_rect: Rect::new(title_x, y, title_width, layout.line_height),
                number_rect: Rect::new(number_x, y, TOC_NUMBER_COLUMN_PT, layout.line_height),
                link_rect: Rect::new(
                    title_x,
                    y,
                    title_width + TOC_NUMBER_COLUMN_PT,
                    layout.line_height,
                ),
            });
            y -= layout.line_height;
        }
        lines
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> TocEntry {
        TocEntry {
            title: format!("Section {}", n),
            dest: n,
            display_number: n + 1,
        }
    }

    #[test]
    fn test_lines_per_page_reserves_slack() {
        let layout = TocLayout::default();
        // (792 - 50 - 50) / 20 = 34, minus 2 lines of slack
        assert_eq!(layout.lines_per_page(), 32);
    }

    #[test]
    fn test_paginate_empty_is_empty() {
        assert!(paginate(&[], &TocLayout::default()).is_empty());
    }

    #[test]
    fn test_paginate_chunking_and_title() {
        let layout = TocLayout::default();
        let entries: Vec<TocEntry> = (0..70).map(entry).collect();

        let pages = paginate(&entries, &layout);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].entries.len(), 32);
        assert_eq!(pages[1].entries.len(), 32);
        assert_eq!(pages[2].entries.len(), 6);

        assert!(pages[0].draw_title);
        assert!(!pages[1].draw_title);
        assert!(!pages[2].draw_title);

        // Order across pages preserves input order
        let flat: Vec<usize> = pages
            .iter()
            .flat_map(|p| p.entries.iter().map(|e| e.dest))
            .collect();
        assert_eq!(flat, (0..70).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_count_matches_pagination() {
        let layout = TocLayout::default();
        for count in [0, 1, 31, 32, 33, 64, 65] {
            let entries: Vec<TocEntry> = (0..count).map(entry).collect();
            assert_eq!(
                toc_page_count(count, &layout),
                paginate(&entries, &layout).len(),
                "count {}",
                count
            );
        }
    }

    #[test]
    fn test_first_page_entries_start_below_title() {
        let layout = TocLayout::default();
        let entries: Vec<TocEntry> = (0..3).map(entry).collect();
        let pages = paginate(&entries, &layout);

        let first_lines = pages[0].lines(&layout);
        assert_eq!(first_lines.len(), 3);

        // Header consumes one extra line before entries start
        assert_eq!(first_lines[0].title_rect.y, 792.0 - 50.0 - 60.0);
        // Successive lines descend by one line height
        assert_eq!(
            first_lines[0].title_rect.y - first_lines[1].title_rect.y,
            layout.line_height
        );

        // A follow-on page starts entries from the top margin directly
        let follow = TocPage {
            entries: entries.clone(),
            draw_title: false,
        };
        let follow_lines = follow.lines(&layout);
        assert_eq!(follow_lines[0].title_rect.y, 792.0 - 50.0 - 20.0);
        assert!(follow.title_rect(&layout).is_none());
    }

    #[test]
    fn test_link_rect_spans_both_columns() {
        let layout = TocLayout::default();
        let page = TocPage {
            entries: vec![entry(0)],
            draw_title: true,
        };
        let line = &page.lines(&layout)[0];

        assert_eq!(line.link_rect.x, line.title_rect.x);
        assert_eq!(line.link_rect.right(), line.number_rect.right());
        assert_eq!(line.number_rect.width, 25.0);
    }
}
