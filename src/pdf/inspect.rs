//! PDF page inspection: page counts and page dimensions

use lopdf::{Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::geometry::PageSize;

/// Page-tree attributes are inheritable; stop walking Parent links after
/// this many levels so a cyclic tree cannot loop forever.
const MAX_PARENT_DEPTH: usize = 32;

/// Count pages by reading the Count field from the Pages dictionary
///
/// This is more reliable than `get_pages()` for documents with nested page
/// trees, since it reads the total the writer recorded in the catalog.
pub fn count_pages(doc: &Document) -> Result<usize> {
    let catalog_ref = doc
        .trailer
        .get(b"Root")
        .map_err(|_| Error::Malformed("No Root in trailer".to_string()))?;

    let catalog_id = match catalog_ref {
        Object::Reference(id) => *id,
        _ => return Err(Error::Malformed("Root is not a reference".to_string())),
    };

    let catalog_dict = doc
        .get_dictionary(catalog_id)
        .map_err(|_| Error::Malformed("Catalog is not a dictionary".to_string()))?;

    let pages_ref = catalog_dict
        .get(b"Pages")
        .map_err(|_| Error::Malformed("No Pages in catalog".to_string()))?;

    let pages_id = match pages_ref {
        Object::Reference(id) => *id,
        _ => return Err(Error::Malformed("Pages is not a reference".to_string())),
    };

    let pages_dict = doc
        .get_dictionary(pages_id)
        .map_err(|_| Error::Malformed("Pages is not a dictionary".to_string()))?;

    match pages_dict.get(b"Count") {
        Ok(Object::Integer(n)) => Ok(*n as usize),
        _ => Err(Error::Malformed("No Count in Pages".to_string())),
    }
}

/// Get a page's dimensions in points from its MediaBox
pub fn page_size(doc: &Document, page_id: ObjectId) -> Result<PageSize> {
    let media_box = media_box(doc, page_id)?;
    Ok(PageSize::new(
        media_box[2] - media_box[0],
        media_box[3] - media_box[1],
    ))
}

/// Get a page's MediaBox as `[x0, y0, x1, y1]`
///
/// MediaBox is inheritable, so a page without one falls back to its parent
/// nodes. Pages with no MediaBox anywhere default to US Letter.
pub fn media_box(doc: &Document, page_id: ObjectId) -> Result<[f32; 4]> {
    let attr = match inherited_page_attr(doc, page_id, b"MediaBox")? {
        Some(attr) => attr,
        None => return Ok([0.0, 0.0, 612.0, 792.0]),
    };

    // The array itself may sit behind a reference
    let resolved = match attr {
        Object::Reference(id) => doc
            .get_object(id)
            .map_err(|_| Error::Malformed("Dangling MediaBox reference".to_string()))?
            .clone(),
        other => other,
    };

    let arr = match resolved {
        Object::Array(arr) => arr,
        _ => return Err(Error::Malformed("MediaBox is not an array".to_string())),
    };

    if arr.len() != 4 {
        return Err(Error::Malformed(format!(
            "MediaBox has {} entries, expected 4",
            arr.len()
        )));
    }

    let mut values = [0.0f32; 4];
    for (slot, obj) in values.iter_mut().zip(arr.iter()) {
        *slot = extract_number(obj)
            .ok_or_else(|| Error::Malformed("MediaBox entry is not a number".to_string()))?;
    }

    Ok(values)
}

/// Look up a page attribute, walking Parent links for inheritable entries
pub(crate) fn inherited_page_attr(
    doc: &Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<Object>> {
    let mut current_id = page_id;

    for _ in 0..MAX_PARENT_DEPTH {
        let dict = doc
            .get_dictionary(current_id)
            .map_err(|_| Error::Malformed("Page tree node is not a dictionary".to_string()))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value.clone()));
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => current_id = *parent_id,
            _ => return Ok(None),
        }
    }

    Ok(None)
}

fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_support::{doc_with_pages, single_page_doc};

    #[test]
    fn test_count_pages_from_catalog() {
        let doc = doc_with_pages(&[(612.0, 792.0), (612.0, 792.0), (200.0, 100.0)]);
        assert_eq!(count_pages(&doc).unwrap(), 3);
    }

    #[test]
    fn test_count_pages_empty_tree() {
        let doc = doc_with_pages(&[]);
        assert_eq!(count_pages(&doc).unwrap(), 0);
    }

    #[test]
    fn test_page_size_from_media_box() {
        let doc = single_page_doc(200.0, 100.0);
        let page_id = *doc.get_pages().values().next().unwrap();

        let size = page_size(&doc, page_id).unwrap();
        assert_eq!(size.width, 200.0);
        assert_eq!(size.height, 100.0);
    }

    #[test]
    fn test_media_box_inherited_from_parent() {
        let mut doc = single_page_doc(612.0, 792.0);
        let page_id = *doc.get_pages().values().next().unwrap();

        // Strip the page's own MediaBox and hang it on the Pages node instead
        let media_box = {
            let page_dict = doc
                .get_object_mut(page_id)
                .unwrap()
                .as_dict_mut()
                .unwrap();
            page_dict.remove(b"MediaBox").unwrap()
        };
        let parent_id = {
            let page_dict = doc.get_dictionary(page_id).unwrap();
            page_dict.get(b"Parent").unwrap().as_reference().unwrap()
        };
        doc.get_object_mut(parent_id)
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("MediaBox", media_box);

        let size = page_size(&doc, page_id).unwrap();
        assert_eq!(size.width, 612.0);
        assert_eq!(size.height, 792.0);
    }
}
