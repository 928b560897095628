//! Rendering composed pages into the output document
//!
//! Page object ids are reserved up front so TOC link annotations and
//! outline destinations can reference pages that have not been rendered
//! yet.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::constants::{
    CONTENT_BORDER_WIDTH_PT, HELVETICA_CHAR_WIDTH_RATIO, PAGE_HEIGHT_PT, PAGE_NUMBER_FONT_SIZE,
    PAGE_NUMBER_LABEL_WIDTH, PAGE_NUMBER_LABEL_X, PAGE_NUMBER_LABEL_Y, PAGE_WIDTH_PT, TOC_TITLE,
};
use crate::layout::{Rect, aspect_fit, grid_cells};
use crate::outline::OutlineBuilder;
use crate::page::{ComposedPage, DocSlot, SourceRef};
use crate::toc::{TocLayout, TocPage};
use crate::types::{NupError, NupMode, Result};

use super::source::{
    CopyCache, copy_annotations, copy_object_deep, create_page_xobject, page_dimensions,
};

/// Open source documents plus their per-document copy caches
struct RenderSources<'a> {
    inputs: &'a [Document],
    cover: Option<&'a Document>,
    caches: Vec<CopyCache>,
}

impl<'a> RenderSources<'a> {
    fn new(inputs: &'a [Document], cover: Option<&'a Document>) -> Self {
        Self {
            inputs,
            cover,
            caches: vec![CopyCache::new(); inputs.len() + 1],
        }
    }

    fn resolve(&mut self, slot: DocSlot) -> Result<(&'a Document, &mut CopyCache)> {
        match slot {
            DocSlot::Input(index) => {
                let doc = self.inputs.get(index).ok_or_else(|| {
                    NupError::Config(format!("no input document at index {}", index))
                })?;
                Ok((doc, &mut self.caches[index]))
            }
            DocSlot::Cover => {
                let doc = self
                    .cover
                    .ok_or_else(|| NupError::Config("no cover document".to_string()))?;
                let last = self.caches.len() - 1;
                Ok((doc, &mut self.caches[last]))
            }
        }
    }
}

/// Content accumulated for one output page
#[derive(Default)]
struct PageContent {
    ops: String,
    xobjects: Dictionary,
    needs_font: bool,
    needs_bold_font: bool,
    /// Annotations carried forward from source pages, already copied
    annotations: Vec<Object>,
    /// Link regions to resolve against the final page order
    links: Vec<(Rect, usize)>,
}

/// Render the full page plan into a fresh output document and attach
/// the outline tree.
pub(crate) fn render_document(
    pages: &[ComposedPage],
    inputs: &[Document],
    cover: Option<&Document>,
    toc_layout: &TocLayout,
    outline: &OutlineBuilder,
) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();

    // Reserve one object id per output page up front
    let page_ids: Vec<ObjectId> = pages.iter().map(|_| output.new_object_id()).collect();

    let mut sources = RenderSources::new(inputs, cover);
    for (index, page) in pages.iter().enumerate() {
        render_page(
            &mut output,
            page,
            page_ids[index],
            &page_ids,
            pages_tree_id,
            &mut sources,
            toc_layout,
        )?;
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_ids.len() as i64)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    outline.attach(&mut output, catalog_id, &page_ids)?;

    Ok(output)
}

fn render_page(
    output: &mut Document,
    page: &ComposedPage,
    self_id: ObjectId,
    page_ids: &[ObjectId],
    parent_id: ObjectId,
    sources: &mut RenderSources<'_>,
    toc_layout: &TocLayout,
) -> Result<()> {
    // A cover page is a verbatim passthrough of the source page object
    if let ComposedPage::Cover(source_ref) = page {
        let (doc, cache) = sources.resolve(source_ref.doc)?;
        let source_dict = doc.get_dictionary(source_ref.page)?.clone();

        let mut page_dict = Dictionary::new();
        for (key, value) in source_dict.iter() {
            if key == b"Parent" {
                continue;
            }
            page_dict.set(key.clone(), copy_object_deep(output, doc, value, cache)?);
        }
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(parent_id));

        output.objects.insert(self_id, Object::Dictionary(page_dict));
        return Ok(());
    }

    let mut content = PageContent::default();
    let mut xobject_counter = 0usize;
    render_content(output, page, sources, toc_layout, &mut content, &mut xobject_counter)?;

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH_PT),
            Object::Real(PAGE_HEIGHT_PT),
        ]),
    );

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(content.xobjects));

    let mut fonts = Dictionary::new();
    if content.needs_font {
        fonts.set("F1", Object::Reference(add_type1_font(output, b"Helvetica")));
    }
    if content.needs_bold_font {
        fonts.set(
            "F2",
            Object::Reference(add_type1_font(output, b"Helvetica-Bold")),
        );
    }
    if !fonts.is_empty() {
        resources.set("Font", Object::Dictionary(fonts));
    }

    let content_id = output.add_object(Stream::new(Dictionary::new(), content.ops.into_bytes()));
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    let mut annotations = content.annotations;
    for (rect, dest) in content.links {
        if let Some(&target) = page_ids.get(dest) {
            annotations.push(link_annotation(&rect, target));
        }
    }
    if !annotations.is_empty() {
        page_dict.set("Annots", Object::Array(annotations));
    }

    output.objects.insert(self_id, Object::Dictionary(page_dict));
    Ok(())
}

fn render_content(
    output: &mut Document,
    page: &ComposedPage,
    sources: &mut RenderSources<'_>,
    toc_layout: &TocLayout,
    content: &mut PageContent,
    xobject_counter: &mut usize,
) -> Result<()> {
    match page {
        ComposedPage::Grid { mode, slots } => {
            render_grid(output, *mode, slots, sources, content, xobject_counter)
        }
        ComposedPage::Numbered { inner, number } => {
            render_content(output, inner, sources, toc_layout, content, xobject_counter)?;
            render_page_number(content, *number);

            // Carry forward link annotations from the first constituent
            // source page so in-slide links stay clickable
            if let Some(source_ref) = inner.first_source() {
                let (doc, cache) = sources.resolve(source_ref.doc)?;
                let carried = copy_annotations(output, doc, source_ref.page, cache)?;
                content.annotations.extend(carried);
            }
            Ok(())
        }
        ComposedPage::Toc(toc_page) => {
            render_toc(toc_page, toc_layout, content);
            Ok(())
        }
        ComposedPage::Cover(_) => Err(NupError::Config(
            "cover pages are passthrough, not composed content".to_string(),
        )),
    }
}

fn render_grid(
    output: &mut Document,
    mode: NupMode,
    slots: &[Option<SourceRef>],
    sources: &mut RenderSources<'_>,
    content: &mut PageContent,
    xobject_counter: &mut usize,
) -> Result<()> {
    let canvas = Rect::new(0.0, 0.0, PAGE_WIDTH_PT, PAGE_HEIGHT_PT);
    let cells = grid_cells(mode, &canvas);

    for (slot, cell) in slots.iter().zip(cells.iter()) {
        let Some(source_ref) = slot else {
            continue;
        };
        let (doc, cache) = sources.resolve(source_ref.doc)?;

        let (source_width, source_height) = page_dimensions(doc, source_ref.page)?;
        let target = aspect_fit(source_width, source_height, cell)?;
        let scale = target.width / source_width;

        if mode != NupMode::Full {
            content.ops.push_str(&format!(
                "q {} w 0 G {} {} {} {} re S Q\n",
                CONTENT_BORDER_WIDTH_PT, target.x, target.y, target.width, target.height
            ));
        }

        let name = format!("P{}", *xobject_counter);
        *xobject_counter += 1;
        let xobject_id = create_page_xobject(output, doc, source_ref.page, cache)?;
        content
            .xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));

        content.ops.push_str(&format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            scale, scale, target.x, target.y, name
        ));
    }
    Ok(())
}

fn render_page_number(content: &mut PageContent, number: usize) {
    let label = (number + 1).to_string();
    let text_width = label.len() as f32 * PAGE_NUMBER_FONT_SIZE * HELVETICA_CHAR_WIDTH_RATIO;
    let x = PAGE_NUMBER_LABEL_X + PAGE_NUMBER_LABEL_WIDTH - text_width;

    content.needs_font = true;
    content.ops.push_str(&format!(
        "BT /F1 {} Tf 0 g {} {} Td ({}) Tj ET\n",
        PAGE_NUMBER_FONT_SIZE,
        x,
        PAGE_NUMBER_LABEL_Y,
        escape_text(&label)
    ));
}

fn render_toc(page: &TocPage, layout: &TocLayout, content: &mut PageContent) {
    if let Some(rect) = page.title_rect(layout) {
        let size = layout.font_size * 1.5;
        let text_width = TOC_TITLE.len() as f32 * size * HELVETICA_CHAR_WIDTH_RATIO;
        let x = rect.x + (rect.width - text_width) / 2.0;
        let y = rect.top() - size;

        content.needs_bold_font = true;
        content.ops.push_str(&format!(
            "BT /F2 {} Tf 0 g {} {} Td ({}) Tj ET\n",
            size,
            x,
            y,
            escape_text(TOC_TITLE)
        ));
    }

    for (entry, line) in page.entries.iter().zip(page.lines(layout)) {
        content.needs_font = true;
        let baseline = line.title_rect.top() - layout.font_size;

        content.ops.push_str(&format!(
            "BT /F1 {} Tf 0 g {} {} Td ({}) Tj ET\n",
            layout.font_size,
            line.title_rect.x,
            baseline,
            escape_text(&entry.title)
        ));

        let number = entry.display_number.to_string();
        let number_width = number.len() as f32 * layout.font_size * HELVETICA_CHAR_WIDTH_RATIO;
        content.ops.push_str(&format!(
            "BT /F1 {} Tf 0 g {} {} Td ({}) Tj ET\n",
            layout.font_size,
            line.number_rect.right() - number_width,
            baseline,
            escape_text(&number)
        ));

        content.links.push((line.link_rect, entry.dest));
    }
}

fn add_type1_font(output: &mut Document, base_font: &[u8]) -> ObjectId {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(base_font.to_vec()));
    output.add_object(font_dict)
}

fn link_annotation(rect: &Rect, target: ObjectId) -> Object {
    Object::Dictionary(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Link".to_vec())),
        (
            "Rect",
            Object::Array(vec![
                Object::Real(rect.x),
                Object::Real(rect.y),
                Object::Real(rect.right()),
                Object::Real(rect.top()),
            ]),
        ),
        (
            "Border",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(0),
            ]),
        ),
        (
            "Dest",
            Object::Array(vec![
                Object::Reference(target),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ]),
        ),
    ]))
}

/// Escape a string for a literal PDF text operand
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("a(b)c"), "a\\(b\\)c");
        assert_eq!(escape_text("back\\slash"), "back\\\\slash");
    }
}
