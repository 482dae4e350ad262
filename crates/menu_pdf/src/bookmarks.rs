//! PDF outline listing the menu sections, written into rendered bytes with `lopdf`.

use std::fmt;
use std::io;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

use crate::document::SectionHeader;

/// Failure to add the section outline to a rendered menu.
#[derive(Debug)]
pub enum BookmarkError {
    /// The rendered bytes could not be read back or lack a catalog.
    Pdf(lopdf::Error),
    /// Re-encoding the document failed.
    Write(io::Error),
    /// A section was recorded on a page the document does not have.
    PageOutOfRange {
        section: String,
        page: usize,
        page_count: usize,
    },
}

impl From<lopdf::Error> for BookmarkError {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf(err)
    }
}

impl From<io::Error> for BookmarkError {
    fn from(err: io::Error) -> Self {
        Self::Write(err)
    }
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf(_) => write!(f, "rendered menu is not a readable PDF"),
            Self::Write(_) => write!(f, "failed to re-encode the menu PDF"),
            Self::PageOutOfRange {
                section,
                page,
                page_count,
            } => write!(
                f,
                "section \"{section}\" was placed on page {page} of a {page_count}-page menu"
            ),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pdf(err) => Some(err),
            Self::Write(err) => Some(err),
            Self::PageOutOfRange { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutlineTarget {
    title: String,
    page: usize,
}

/// Outline with one entry per placed section, in menu order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionOutline {
    targets: Vec<OutlineTarget>,
}

impl SectionOutline {
    /// Pairs each header with the 1-based page it was laid out on.
    ///
    /// Headers that never reached a page are left out.
    pub fn new(headers: &[&SectionHeader], section_pages: &[Option<usize>]) -> Self {
        let targets = headers
            .iter()
            .zip(section_pages)
            .filter_map(|(header, page)| {
                page.map(|page| OutlineTarget {
                    title: header.title.clone(),
                    page,
                })
            })
            .collect();
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns `pdf` with the outline attached to its catalog.
    ///
    /// Viewers are asked to open with the outline panel visible.  An empty
    /// outline leaves the bytes untouched.
    pub fn embed(&self, pdf: &[u8]) -> Result<Vec<u8>, BookmarkError> {
        if self.is_empty() {
            return Ok(pdf.to_vec());
        }

        let mut document = Document::load_mem(pdf)?;
        let pages = document.get_pages();
        let root_id = document.new_object_id();
        let ids: Vec<ObjectId> = self
            .targets
            .iter()
            .map(|_| document.new_object_id())
            .collect();

        for (position, target) in self.targets.iter().enumerate() {
            let page_id = pages.get(&(target.page as u32)).copied().ok_or_else(|| {
                BookmarkError::PageOutOfRange {
                    section: target.title.clone(),
                    page: target.page,
                    page_count: pages.len(),
                }
            })?;

            let mut entry = dictionary! {
                "Title" => Object::string_literal(target.title.as_str()),
                "Parent" => Object::Reference(root_id),
                "Dest" => Object::Array(vec![
                    Object::Reference(page_id),
                    Object::Name(b"Fit".to_vec()),
                ]),
            };
            if position > 0 {
                entry.set("Prev", Object::Reference(ids[position - 1]));
            }
            if let Some(&next) = ids.get(position + 1) {
                entry.set("Next", Object::Reference(next));
            }
            document.objects.insert(ids[position], Object::Dictionary(entry));
        }

        let root: Dictionary = dictionary! {
            "Type" => Object::Name(b"Outlines".to_vec()),
            "Count" => Object::Integer(ids.len() as i64),
            "First" => Object::Reference(ids[0]),
            "Last" => Object::Reference(ids[ids.len() - 1]),
        };
        document.objects.insert(root_id, Object::Dictionary(root));

        let catalog_id = document.trailer.get(b"Root")?.as_reference()?;
        let catalog = document.get_object_mut(catalog_id)?.as_dict_mut()?;
        catalog.set("Outlines", Object::Reference(root_id));
        catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(title: &str) -> SectionHeader {
        SectionHeader {
            title: title.to_owned(),
            display_title: title.to_uppercase(),
        }
    }

    fn blank_pdf(page_count: usize) -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let kids: Vec<Object> = (0..page_count)
            .map(|_| {
                Object::Reference(document.add_object(dictionary! {
                    "Type" => Object::Name(b"Page".to_vec()),
                    "Parent" => Object::Reference(pages_id),
                    "MediaBox" => Object::Array(
                        [0, 0, 595, 842].into_iter().map(Object::Integer).collect(),
                    ),
                }))
            })
            .collect();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => Object::Name(b"Pages".to_vec()),
                "Count" => Object::Integer(page_count as i64),
                "Kids" => Object::Array(kids),
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => Object::Name(b"Catalog".to_vec()),
            "Pages" => Object::Reference(pages_id),
        });
        document.trailer.set("Root", Object::Reference(catalog_id));

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).expect("save blank pdf");
        bytes
    }

    #[test]
    fn unplaced_sections_are_skipped() {
        let salads = header("Salads");
        let desserts = header("Desserts");
        let outline = SectionOutline::new(&[&salads, &desserts], &[Some(3), None]);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline.targets[0].title, "Salads");
    }

    #[test]
    fn entries_point_at_recorded_pages() {
        let cold = header("Cold Mezzes");
        let warm = header("Warm Mezzes");
        let skewers = header("Skewers");
        let outline =
            SectionOutline::new(&[&cold, &warm, &skewers], &[Some(2), Some(2), Some(3)]);

        let bytes = outline.embed(&blank_pdf(3)).expect("embed outline");
        let document = Document::load_mem(&bytes).expect("reload");
        let pages = document.get_pages();

        let catalog = document
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .and_then(|id| document.get_object(id))
            .and_then(Object::as_dict)
            .expect("catalog");
        let root_id = catalog
            .get(b"Outlines")
            .and_then(Object::as_reference)
            .expect("outline root");
        let root = document
            .get_object(root_id)
            .and_then(Object::as_dict)
            .expect("outline dictionary");
        assert_eq!(root.get(b"Count").and_then(Object::as_i64).ok(), Some(3));

        let mut titles = Vec::new();
        let mut cursor = root.get(b"First").and_then(Object::as_reference).ok();
        while let Some(id) = cursor {
            let entry = document
                .get_object(id)
                .and_then(Object::as_dict)
                .expect("entry");
            let title = entry.get(b"Title").and_then(Object::as_str).expect("title");
            let dest = entry.get(b"Dest").and_then(Object::as_array).expect("dest");
            let page_id = dest[0].as_reference().expect("page reference");
            let page = pages
                .iter()
                .find_map(|(number, id)| (*id == page_id).then_some(*number));
            titles.push((String::from_utf8_lossy(title).into_owned(), page));
            cursor = entry.get(b"Next").and_then(Object::as_reference).ok();
        }

        assert_eq!(
            titles,
            [
                ("Cold Mezzes".to_owned(), Some(2)),
                ("Warm Mezzes".to_owned(), Some(2)),
                ("Skewers".to_owned(), Some(3)),
            ]
        );
    }

    #[test]
    fn page_beyond_document_is_rejected() {
        let salads = header("Salads");
        let outline = SectionOutline::new(&[&salads], &[Some(5)]);
        match outline.embed(&blank_pdf(2)) {
            Err(BookmarkError::PageOutOfRange {
                page, page_count, ..
            }) => {
                assert_eq!(page, 5);
                assert_eq!(page_count, 2);
            }
            other => panic!("expected an out-of-range page, got {other:?}"),
        }
    }

    #[test]
    fn empty_outline_keeps_bytes() {
        let pdf = blank_pdf(1);
        assert_eq!(SectionOutline::default().embed(&pdf).expect("embed"), pdf);
    }
}
