//! Form XObjects for content that is drawn once and placed many times.
//!
//! Every logical label handed to a [`Sheet`](crate::Sheet) is rendered exactly once into
//! a Form XObject; each repeat of that label on the sheet is just another placement of
//! the same object. The same mechanism carries prepared background drawings.
//!
//! # Coordinate system
//!
//! Form XObjects use PDF's coordinate system where (0, 0) is at the bottom-left.
//! When placed on a page, the form's origin aligns with the page origin unless
//! a transformation is applied.

use crate::content::render_contents;
use crate::image::Image;
use crate::page::{resource_dictionary, ImageLayout, PageContents};
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::transform::Transform;
use crate::units::*;
use crate::LabelError;
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Content, Pdf};

/// A reusable content container (Form XObject). This is the drawing surface handed to a
/// [`LabelRenderer`](crate::LabelRenderer): its bounding box is the drawable area of one
/// label, with the origin at the bottom-left corner of that area.
#[derive(Debug)]
pub struct FormXObject {
    /// Bounding box of the form content
    pub bbox: Rect,
    /// Content to render (same types as Page)
    pub contents: Vec<PageContents>,
}

impl FormXObject {
    /// Create a new Form XObject with the given dimensions
    pub fn new(width: Pt, height: Pt) -> Self {
        FormXObject {
            bbox: Rect::from_origin(Pt(0.0), Pt(0.0), width, height),
            contents: Vec::new(),
        }
    }

    /// Width of the form
    pub fn width(&self) -> Pt {
        self.bbox.width()
    }

    /// Height of the form
    pub fn height(&self) -> Pt {
        self.bbox.height()
    }

    /// Add an image to the form
    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Add arbitrary pdf_writer::Content to the form
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    /// Add raw content bytes to the form
    pub fn add_raw_content<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = u8>,
    {
        self.contents
            .push(PageContents::RawContent(content.into_iter().collect()));
    }

    /// Place another form inside this one
    pub fn add_form_xobject(&mut self, layout: FormXObjectLayout) {
        self.contents.push(PageContents::FormXObject(layout));
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        xobj_index: usize,
        images: &Arena<Image>,
        form_xobjects: &Arena<FormXObject>,
        writer: &mut Pdf,
    ) -> Result<(), LabelError> {
        let xobj_ref = refs.get(RefType::FormXObject(xobj_index));

        let rendered = render_contents(&self.contents)?;
        let compressed =
            compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);

        let mut xobj = writer.form_xobject(xobj_ref, &compressed);
        xobj.filter(pdf_writer::Filter::FlateDecode);
        xobj.bbox(self.bbox.into());

        let mut resources = xobj.resources();
        resource_dictionary(&mut resources, refs, images, form_xobjects);

        Ok(())
    }
}

/// Specifies how to place a Form XObject on a page.
#[derive(Debug)]
pub struct FormXObjectLayout {
    /// The Form XObject to place (obtained from [`Document::add_form_xobject`](crate::Document::add_form_xobject))
    pub xobj_id: Id<FormXObject>,
    /// Transformation matrix applied when rendering this placement
    pub transform: Transform,
}
