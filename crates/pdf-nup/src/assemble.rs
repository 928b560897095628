//! Assembly orchestration
//!
//! `assemble` turns loaded documents into the final output in one
//! deterministic pass: compose each input into numbered section pages,
//! then splice cover and TOC pages in front. `run` is the async shell
//! around it: load, assemble on the blocking pool, save.

use lopdf::Document;

use crate::io::{load_inputs, load_pdf, save_pdf};
use crate::options::{AssemblyOptions, FileDetail};
use crate::outline::OutlineBuilder;
use crate::page::{ComposedPage, DocSlot, SourceRef};
use crate::render::render_document;
use crate::toc::{TocEntry, TocLayout, paginate, toc_page_count};
use crate::types::{NupError, Result};

/// Compose all inputs into one output document.
///
/// `details` and `inputs` are parallel: `inputs[i]` is the loaded
/// document for `details[i]`. A cover document gates the TOC: without
/// one, the output starts directly at the first section.
pub fn assemble(
    details: &[FileDetail],
    inputs: &[Document],
    cover: Option<&Document>,
) -> Result<Document> {
    if details.len() != inputs.len() {
        return Err(NupError::Config(format!(
            "{} manifest entries but {} loaded documents",
            details.len(),
            inputs.len()
        )));
    }

    let layout = TocLayout::default();
    let mut sections: Vec<ComposedPage> = Vec::new();
    let mut entries: Vec<TocEntry> = Vec::new();

    for (index, (detail, input)) in details.iter().zip(inputs).enumerate() {
        let source_pages: Vec<_> = input.get_pages().values().copied().collect();
        let per_sheet = detail.nup.pages_per_sheet();

        let section_start = sections.len();
        log::info!(
            "composing {} ({} pages, {:?})",
            detail.file.display(),
            source_pages.len(),
            detail.nup
        );

        for chunk in source_pages.chunks(per_sheet) {
            let mut slots: Vec<Option<SourceRef>> = chunk
                .iter()
                .map(|&page| {
                    Some(SourceRef {
                        doc: DocSlot::Input(index),
                        page,
                    })
                })
                .collect();
            slots.resize(per_sheet, None);

            let number = sections.len();
            sections.push(ComposedPage::Numbered {
                inner: Box::new(ComposedPage::Grid {
                    mode: detail.nup,
                    slots,
                }),
                number,
            });
        }

        // An input with no pages contributes no section, no TOC line,
        // and no bookmark. The displayed page number is recorded now,
        // before front matter shifts the real positions.
        if sections.len() > section_start {
            entries.push(TocEntry {
                title: detail.title(),
                dest: section_start,
                display_number: section_start + 1,
            });
        }
    }

    let mut outline = OutlineBuilder::new();
    let mut front: Vec<ComposedPage> = Vec::new();

    if let Some(cover_doc) = cover {
        let cover_pages: Vec<_> = cover_doc.get_pages().values().copied().collect();
        let toc_pages = toc_page_count(entries.len(), &layout);
        let front_len = cover_pages.len() + toc_pages;

        for entry in &mut entries {
            entry.dest += front_len;
        }

        outline.add_link("Cover", cover_pages.first().map(|_| 0));
        outline.add_link(
            "Table of Contents",
            (toc_pages > 0).then_some(cover_pages.len()),
        );

        for page in cover_pages {
            front.push(ComposedPage::Cover(SourceRef {
                doc: DocSlot::Cover,
                page,
            }));
        }
        for toc_page in paginate(&entries, &layout) {
            front.push(ComposedPage::Toc(toc_page));
        }
        log::info!("front matter: {} pages", front.len());
    }

    for entry in &entries {
        outline.add_link(&entry.title, Some(entry.dest));
    }

    let mut pages = front;
    pages.extend(sections);
    log::info!("rendering {} output pages", pages.len());

    render_document(&pages, inputs, cover, &layout, &outline)
}

/// Load all inputs, assemble, and save the output
pub async fn run(options: AssemblyOptions) -> Result<()> {
    options.validate()?;

    let inputs = load_inputs(&options.inputs).await?;
    let cover = match &options.cover {
        Some(path) => Some(load_pdf(path).await?),
        None => None,
    };

    let details = options.inputs.clone();
    let document =
        tokio::task::spawn_blocking(move || assemble(&details, &inputs, cover.as_ref())).await??;

    save_pdf(document, &options.output).await?;
    log::info!("wrote {}", options.output.display());
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NupMode;

    #[test]
    fn test_mismatched_inputs_rejected() {
        let details = vec![FileDetail::new("a.pdf", NupMode::Six)];
        let result = assemble(&details, &[], None);
        assert!(matches!(result, Err(NupError::Config(_))));
    }
}
