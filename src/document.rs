use crate::{
    form_xobject::FormXObject,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    LabelError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document stores the pages produced for a sheet of labels, along with the images
/// and forms they refer to, then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub images: Arena<Image>,
    pub form_xobjects: Arena<FormXObject>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, such that any page or label can place it by referring to its id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Add a Form XObject to the document structure, returning the id used to place it
    pub fn add_form_xobject(&mut self, form: FormXObject) -> Id<FormXObject> {
        self.form_xobjects.alloc(form)
    }

    /// Write the entire document to the writer. The document is rendered in memory
    /// first and then written out in one go.
    pub fn write<W: Write>(&self, w: W) -> Result<(), LabelError> {
        let all: Vec<usize> = (0..self.pages.len()).collect();
        self.write_pages(&all, w)
    }

    /// Write a document containing only the pages at the given 0-based indices, in the
    /// given order. Useful for previewing single sheets.
    pub fn write_pages<W: Write>(&self, page_indices: &[usize], mut w: W) -> Result<(), LabelError> {
        let mut refs = ObjectReferences::new();
        let catalog_id = refs.get(RefType::Catalog);
        let page_tree_id = refs.get(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let mut selected = Vec::with_capacity(page_indices.len());
        for &index in page_indices {
            let page = self
                .pages
                .get(index)
                .ok_or(LabelError::InvalidPageNumber(index + 1))?;
            selected.push((index, page));
        }

        let page_refs: Vec<Ref> = selected
            .iter()
            .map(|(index, _)| refs.get(RefType::Page(*index)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (i, image) in self.images.iter() {
            image.write(&mut refs, i.index(), &mut writer)?;
        }

        for (i, xobj) in self.form_xobjects.iter() {
            xobj.write(
                &mut refs,
                i.index(),
                &self.images,
                &self.form_xobjects,
                &mut writer,
            )?;
        }

        for (index, page) in selected {
            page.write(
                &mut refs,
                index,
                &self.images,
                &self.form_xobjects,
                &mut writer,
            )?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        log::debug!(
            "writing {} of {} pages, {} forms, {} images",
            page_indices.len(),
            self.pages.len(),
            self.form_xobjects.len(),
            self.images.len()
        );
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
