//! Pulling content out of source documents
//!
//! A source page becomes a Form XObject in the output document: BBox
//! from its MediaBox, content streams concatenated, resources
//! deep-copied. A per-document cache keeps shared resources from being
//! copied more than once.

use crate::constants::{PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Cache of already-copied objects, keyed by their id in the source
pub(crate) type CopyCache = HashMap<ObjectId, ObjectId>;

/// Create a Form XObject from a source page
pub(crate) fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut CopyCache,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    let media_box = page_dict
        .get(b"MediaBox")
        .and_then(|obj| obj.as_array())
        .ok()
        .cloned()
        .unwrap_or_else(default_media_box);

    let content = page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", Object::Array(media_box));
    xobject_dict.set("FormType", Object::Integer(1));

    if let Ok(resources) = page_dict.get(b"Resources") {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(xobject_dict, content)))
}

/// Source page size in points, from its MediaBox. Falls back to Letter
/// when the box is missing or malformed.
pub(crate) fn page_dimensions(source: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let page_dict = source.get_dictionary(page_id)?;

    let Ok(media_box) = page_dict.get(b"MediaBox").and_then(|obj| obj.as_array()) else {
        return Ok((PAGE_WIDTH_PT, PAGE_HEIGHT_PT));
    };
    if media_box.len() < 4 {
        return Ok((PAGE_WIDTH_PT, PAGE_HEIGHT_PT));
    }

    let llx = as_number(&media_box[0]).unwrap_or(0.0);
    let lly = as_number(&media_box[1]).unwrap_or(0.0);
    let urx = as_number(&media_box[2]).unwrap_or(PAGE_WIDTH_PT);
    let ury = as_number(&media_box[3]).unwrap_or(PAGE_HEIGHT_PT);
    Ok((urx - llx, ury - lly))
}

/// Deep-copy a source page's annotations into the output document,
/// resolving every indirect reference behind them.
pub(crate) fn copy_annotations(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut CopyCache,
) -> Result<Vec<Object>> {
    let page_dict = source.get_dictionary(page_id)?;

    let annots = match page_dict.get(b"Annots") {
        Ok(Object::Array(arr)) => arr.clone(),
        Ok(Object::Reference(id)) => match source.get_object(*id) {
            Ok(Object::Array(arr)) => arr.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    annots
        .iter()
        .map(|annot| copy_object_deep(output, source, annot, cache))
        .collect()
}

/// Deep copy an object from source to output, following references
pub(crate) fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut CopyCache,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;

            let new_id = output.add_object(copied);
            cache.insert(*id, new_id);
            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        _ => Ok(obj.clone()),
    }
}

/// Concatenated, decompressed content of a page. A page without content
/// is blank, not an error.
fn page_content(source: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(id) => Ok(stream_content(source, *id)?.unwrap_or_default()),
        Object::Array(refs) => {
            let mut result = Vec::new();
            for obj in refs {
                if let Object::Reference(id) = obj
                    && let Some(content) = stream_content(source, *id)?
                {
                    result.extend_from_slice(&content);
                    result.push(b'\n');
                }
            }
            Ok(result)
        }
        _ => Ok(Vec::new()),
    }
}

fn stream_content(source: &Document, id: ObjectId) -> Result<Option<Vec<u8>>> {
    let Ok(stream) = source.get_object(id)?.as_stream() else {
        return Ok(None);
    };
    Ok(Some(
        stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()),
    ))
}

fn default_media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(PAGE_WIDTH_PT as i64),
        Object::Integer(PAGE_HEIGHT_PT as i64),
    ]
}

fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
