//! Codec seam over lopdf: decode, page embedding, overlay drawing, encode
//!
//! The compositor talks to the PDF codec exclusively through this module, so
//! the placement rules and error taxonomy stay testable apart from lopdf.
//! Embedding turns a foreign page into a Form XObject owned by the host
//! document: the page's content streams become the XObject's stream, and the
//! page's resource tree is deep-copied into the host so the foreign document
//! can be discarded afterwards.

use std::collections::HashMap;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::pdf::inspect;

/// A foreign page embedded into a host document as a Form XObject
///
/// Carries the foreign page's intrinsic dimensions so callers can compute
/// placement without touching the source document again.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedPage {
    /// The Form XObject in the host document
    pub xobject_id: ObjectId,
    /// Intrinsic page width in points
    pub width: f32,
    /// Intrinsic page height in points
    pub height: f32,
    /// Lower-left corner of the page's MediaBox (usually the origin)
    bbox_x: f32,
    bbox_y: f32,
}

/// Decode a byte buffer into a PDF document
pub fn decode(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(Error::Decode)
}

/// Re-encode a document into a byte buffer
pub fn encode(doc: &mut Document) -> Result<Vec<u8>> {
    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Error::Encode(e.into()))?;
    Ok(bytes)
}

/// Embed a page of a foreign document into the host as a Form XObject
///
/// The page's content streams are concatenated into the XObject's stream and
/// its resource dictionary is deep-copied into the host, so the returned
/// handle stays valid after the foreign document is dropped.
pub fn embed_page(host: &mut Document, foreign: &Document, index: usize) -> Result<EmbeddedPage> {
    let page_id = foreign
        .get_pages()
        .values()
        .nth(index)
        .copied()
        .ok_or(Error::MissingPage)?;

    let media_box = inspect::media_box(foreign, page_id)?;
    let content = page_content(foreign, page_id)?;

    // Build the Form XObject dictionary. BBox is the page's MediaBox so the
    // XObject's coordinate space matches the original page space.
    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("FormType", Object::Integer(1));
    xobject_dict.set(
        "BBox",
        Object::Array(media_box.iter().map(|&v| Object::Real(v)).collect()),
    );

    // Copy the page's resources into the host, caching copied objects so
    // shared resources are imported once and reference cycles terminate.
    if let Some(resources) = inspect::inherited_page_attr(foreign, page_id, b"Resources")? {
        let mut cache = HashMap::new();
        let copied = copy_object_deep(host, foreign, &resources, &mut cache)?;
        xobject_dict.set("Resources", copied);
    }

    let xobject_id = host.add_object(Stream::new(xobject_dict, content));

    Ok(EmbeddedPage {
        xobject_id,
        width: media_box[2] - media_box[0],
        height: media_box[3] - media_box[1],
        bbox_x: media_box[0],
        bbox_y: media_box[1],
    })
}

/// Draw an embedded page onto a page of the host document
///
/// The XObject is registered in the page's resources and invoked from a new
/// content stream appended after the existing content, so the embedded page
/// composites as an overlay without disturbing what is already there.
pub fn draw_embedded(
    host: &mut Document,
    page_id: ObjectId,
    embedded: &EmbeddedPage,
    rect: Rect,
) -> Result<()> {
    let name = format!("Stamp{}", embedded.xobject_id.0);
    add_xobject_to_page_resources(host, page_id, &name, embedded.xobject_id)?;

    // Scale from the XObject's intrinsic size to the placement rectangle,
    // translating so the BBox's lower-left corner lands at (rect.x, rect.y).
    let sx = rect.width / embedded.width;
    let sy = rect.height / embedded.height;
    let tx = rect.x - embedded.bbox_x * sx;
    let ty = rect.y - embedded.bbox_y * sy;

    let content = format!("q\n{} 0 0 {} {} {} cm\n/{} Do\nQ\n", sx, sy, tx, ty, name);
    let content_id = host.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    append_content_to_page(host, page_id, content_id)
}

/// Collect a page's content streams into a single decompressed buffer
fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc.get_dictionary(page_id).map_err(Error::Decode)?;

    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents.clone(),
        Err(_) => return Ok(Vec::new()),
    };

    let content_ids: Vec<ObjectId> = match contents {
        Object::Reference(id) => vec![id],
        Object::Array(arr) => arr
            .iter()
            .filter_map(|obj| match obj {
                Object::Reference(id) => Some(*id),
                _ => None,
            })
            .collect(),
        _ => return Ok(Vec::new()),
    };

    let mut combined = Vec::new();
    for content_id in content_ids {
        if let Ok(stream) = doc.get_object(content_id).map_err(Error::Decode)?.as_stream() {
            // Decompressed when possible, raw content when not compressed
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            combined.extend_from_slice(&data);
            combined.push(b'\n');
        }
    }

    Ok(combined)
}

/// Deep-copy an object from a source document into the host
///
/// References are followed and the referenced objects copied under fresh host
/// ids. The cache maps source ids to host ids so shared objects are copied
/// once; entries are reserved before recursing so reference cycles terminate.
fn copy_object_deep(
    host: &mut Document,
    source: &Document,
    object: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match object {
        Object::Reference(old_id) => {
            if let Some(&new_id) = cache.get(old_id) {
                return Ok(Object::Reference(new_id));
            }
            let new_id = host.new_object_id();
            cache.insert(*old_id, new_id);

            let resolved = source.get_object(*old_id).map_err(Error::Decode)?;
            let copied = copy_object_deep(host, source, &resolved.clone(), cache)?;
            host.objects.insert(new_id, copied);
            Ok(Object::Reference(new_id))
        }
        Object::Array(arr) => {
            let mut copied = Vec::with_capacity(arr.len());
            for item in arr {
                copied.push(copy_object_deep(host, source, item, cache)?);
            }
            Ok(Object::Array(copied))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(host, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(host, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        _ => Ok(object.clone()),
    }
}

/// Add an XObject reference to a page's Resources dictionary
fn add_xobject_to_page_resources(
    doc: &mut Document,
    page_id: ObjectId,
    name: &str,
    xobject_id: ObjectId,
) -> Result<()> {
    // Resources may live behind a reference or be inherited; resolve to an
    // owned dictionary first, then write it back directly onto the page.
    let resources_dict = match inspect::inherited_page_attr(doc, page_id, b"Resources")? {
        Some(Object::Dictionary(dict)) => dict,
        Some(Object::Reference(res_id)) => match doc.get_object(res_id) {
            Ok(Object::Dictionary(dict)) => dict.clone(),
            _ => Dictionary::new(),
        },
        _ => Dictionary::new(),
    };

    let page_obj = doc.get_object_mut(page_id).map_err(Error::Decode)?;

    if let Object::Dictionary(ref mut page_dict) = page_obj {
        let mut new_resources = resources_dict;

        // Get or create the XObject subdictionary
        let mut xobjects = if let Ok(Object::Dictionary(xo)) = new_resources.get(b"XObject") {
            xo.clone()
        } else {
            Dictionary::new()
        };

        xobjects.set(name, Object::Reference(xobject_id));
        new_resources.set("XObject", Object::Dictionary(xobjects));

        // Set the Resources directly on the page (not as a reference) so the
        // page has its own copy with our XObject
        page_dict.set("Resources", Object::Dictionary(new_resources));
    }

    Ok(())
}

/// Append a content stream to a page's Contents
///
/// The new content goes after the original content so the overlay is drawn
/// on top, not covered by background fills.
fn append_content_to_page(doc: &mut Document, page_id: ObjectId, new_content_id: ObjectId) -> Result<()> {
    let page_obj = doc.get_object_mut(page_id).map_err(Error::Decode)?;

    if let Object::Dictionary(ref mut page_dict) = page_obj {
        let existing_content = page_dict.get(b"Contents").ok().cloned();

        match existing_content {
            Some(Object::Reference(content_id)) => {
                // Convert single reference to array, append our content
                let new_contents = vec![
                    Object::Reference(content_id),
                    Object::Reference(new_content_id),
                ];
                page_dict.set("Contents", Object::Array(new_contents));
            }
            Some(Object::Array(mut content_array)) => {
                content_array.push(Object::Reference(new_content_id));
                page_dict.set("Contents", Object::Array(content_array));
            }
            _ => {
                page_dict.set("Contents", Object::Array(vec![Object::Reference(new_content_id)]));
            }
        }
    }

    Ok(())
}
