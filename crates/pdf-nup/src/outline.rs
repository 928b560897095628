//! Bookmark (outline) tree construction
//!
//! The builder accumulates labeled links in call order and materializes
//! them as a flat list of top-level bookmarks on the output catalog.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use crate::types::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
struct OutlineItem {
    label: String,
    /// Index into the final output page order
    dest: usize,
}

/// Accumulates outline links during assembly
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    items: Vec<OutlineItem>,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bookmark pointing at the output page with index
    /// `dest`. An absent destination is a documented no-op: optional
    /// sections (cover, TOC) that were not produced simply create no
    /// bookmark.
    pub fn add_link(&mut self, label: impl Into<String>, dest: Option<usize>) {
        if let Some(dest) = dest {
            self.items.push(OutlineItem {
                label: label.into(),
                dest,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Build the `/Outlines` dictionary chain and wire it to the catalog.
    ///
    /// `page_ids` maps output page indices to their object ids. Bookmarks
    /// render in insertion order.
    pub fn attach(
        &self,
        output: &mut Document,
        catalog_id: ObjectId,
        page_ids: &[ObjectId],
    ) -> Result<()> {
        let items: Vec<&OutlineItem> = self
            .items
            .iter()
            .filter(|item| item.dest < page_ids.len())
            .collect();
        if items.is_empty() {
            return Ok(());
        }

        let outlines_id = output.new_object_id();
        let item_ids: Vec<ObjectId> = items.iter().map(|_| output.new_object_id()).collect();

        for (index, item) in items.iter().enumerate() {
            let mut dict = Dictionary::new();
            dict.set(
                "Title",
                Object::String(item.label.clone().into_bytes(), StringFormat::Literal),
            );
            dict.set("Parent", Object::Reference(outlines_id));
            dict.set(
                "Dest",
                Object::Array(vec![
                    Object::Reference(page_ids[item.dest]),
                    Object::Name(b"XYZ".to_vec()),
                    Object::Null,
                    Object::Null,
                    Object::Null,
                ]),
            );
            if index > 0 {
                dict.set("Prev", Object::Reference(item_ids[index - 1]));
            }
            if index + 1 < item_ids.len() {
                dict.set("Next", Object::Reference(item_ids[index + 1]));
            }
            output
                .objects
                .insert(item_ids[index], Object::Dictionary(dict));
        }

        let outlines_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Outlines".to_vec())),
            ("First", Object::Reference(item_ids[0])),
            ("Last", Object::Reference(item_ids[item_ids.len() - 1])),
            ("Count", Object::Integer(item_ids.len() as i64)),
        ]);
        output
            .objects
            .insert(outlines_id, Object::Dictionary(outlines_dict));

        if let Object::Dictionary(catalog) = output.get_object_mut(catalog_id)? {
            catalog.set("Outlines", Object::Reference(outlines_id));
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_destination_is_ignored() {
        let mut builder = OutlineBuilder::new();
        builder.add_link("Cover", None);
        builder.add_link("Table of Contents", None);
        assert!(builder.is_empty());

        builder.add_link("Section", Some(0));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut builder = OutlineBuilder::new();
        builder.add_link("b", Some(1));
        builder.add_link("a", Some(0));
        builder.add_link("c", Some(2));

        let labels: Vec<&str> = builder.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
    }
}
