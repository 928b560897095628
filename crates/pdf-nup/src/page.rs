//! The composed-page model
//!
//! An output page is a value of `ComposedPage`; rendering dispatches on
//! the variant tag. Source pages are referenced, never copied, until the
//! final write resolves them into the output document.

use lopdf::ObjectId;

use crate::toc::TocPage;
use crate::types::NupMode;

/// Which open document a source page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocSlot {
    /// The n-th input document, in argument order
    Input(usize),
    /// The cover document
    Cover,
}

/// Reference to one page of an open source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRef {
    pub doc: DocSlot,
    pub page: ObjectId,
}

/// One page of the output document.
///
/// All variants render onto the fixed Letter canvas. `Grid` slots hold
/// `None` for blank cells left by a trailing partial stride.
#[derive(Debug, Clone)]
pub enum ComposedPage {
    /// N source pages placed into the grid cells of `mode`
    Grid {
        mode: NupMode,
        slots: Vec<Option<SourceRef>>,
    },
    /// Decorator: draws `inner`, then a page-number label.
    ///
    /// `number` is the zero-based output ordinal assigned at composition
    /// time; the printed label is `number + 1`. Also carries forward the
    /// annotations of the first constituent source page.
    Numbered {
        inner: Box<ComposedPage>,
        number: usize,
    },
    /// A generated table-of-contents page
    Toc(TocPage),
    /// Verbatim passthrough of a cover source page
    Cover(SourceRef),
}

impl ComposedPage {
    /// The first source page this page composes, if any
    pub fn first_source(&self) -> Option<SourceRef> {
        match self {
            ComposedPage::Grid { slots, .. } => slots.iter().flatten().next().copied(),
            ComposedPage::Numbered { inner, .. } => inner.first_source(),
            ComposedPage::Toc(_) => None,
            ComposedPage::Cover(source) => Some(*source),
        }
    }
}
