//! PDF page counting

use std::path::Path;

use lopdf::{Document, Object};

use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary.
/// This is more reliable than get_pages() for documents with nested page
/// trees.
pub fn count_pages_in(doc: &Document) -> Result<usize> {
    let catalog_ref = doc
        .trailer
        .get(b"Root")
        .map_err(|_| Error::General("No Root in trailer".to_string()))?;

    let catalog_id = match catalog_ref {
        Object::Reference(id) => *id,
        _ => return Err(Error::General("Root is not a reference".to_string())),
    };

    let catalog_dict = doc.get_object(catalog_id)?.as_dict()?;

    let pages_id = match catalog_dict.get(b"Pages")? {
        Object::Reference(id) => *id,
        _ => return Err(Error::General("Pages is not a reference".to_string())),
    };

    let pages_dict = doc.get_object(pages_id)?.as_dict()?;
    let count = pages_dict.get(b"Count")?.as_i64()?;

    Ok(count as usize)
}

/// Count the number of pages in a PDF file.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_pages_in(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pages_nonexistent_file() {
        let result = count_pages(Path::new("nonexistent.pdf"));
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }
}
