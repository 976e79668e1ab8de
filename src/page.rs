use crate::colour::Colour;
use crate::content::render_contents;
use crate::form_xobject::{FormXObject, FormXObjectLayout};
use crate::image::Image;
use crate::outline::RoundedRect;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::LabelError;
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::writers::Resources;
use pdf_writer::{Content, Finish, Name, Pdf, Ref};

/// An image placed within a rectangle on a page or in a label
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// One label slot drawn on a page: optionally shaded, optionally filled with rendered
/// label content, optionally outlined.
#[derive(Clone, PartialEq, Debug)]
pub struct LabelLayout {
    /// The lower-left corner of the label on the page
    pub origin: (Pt, Pt),
    /// Outline of the label, relative to `origin`
    pub outline: RoundedRect,
    /// Outline of the padded drawing area, relative to `origin`
    pub drawable: RoundedRect,
    /// The rendered content, drawn at the corner of `drawable` and clipped to both
    /// outlines
    pub xobj_id: Option<Id<FormXObject>>,
    /// Fill the label outline with this colour, beneath any content
    pub fill: Option<Colour>,
    /// Stroke the label outline with this colour, above any content
    pub border: Option<Colour>,
}

#[derive(Debug)]
pub enum PageContents {
    Image(ImageLayout),
    RawContent(Vec<u8>),
    FormXObject(FormXObjectLayout),
    Label(LabelLayout),
}

/// A single physical sheet in the output document
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect::from_origin(Pt(0.0), Pt(0.0), width, height),
            contents: Vec::default(),
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Add arbitrary pdf_writer::Content to the page
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    pub fn add_form_xobject(&mut self, layout: FormXObjectLayout) {
        self.contents.push(PageContents::FormXObject(layout));
    }

    pub fn add_label(&mut self, layout: LabelLayout) {
        self.contents.push(PageContents::Label(layout));
    }

    /// The labels placed on this page, in placement order
    pub fn labels(&self) -> impl Iterator<Item = &LabelLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Label(label) => Some(label),
            _ => None,
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        images: &Arena<Image>,
        form_xobjects: &Arena<FormXObject>,
        writer: &mut Pdf,
    ) -> Result<(), LabelError> {
        let id = refs.get(RefType::Page(page_index));
        let parent = refs.get(RefType::PageTree);
        let content_id = refs.get(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        resource_dictionary(&mut resources, refs, images, form_xobjects);
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents)?;
        let compressed = compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);
        writer
            .stream(content_id, &compressed)
            .filter(pdf_writer::Filter::FlateDecode);

        Ok(())
    }
}

/// Make every image and form of the document available to a content stream, as
/// `/I{index}` and `/X{index}` respectively
pub(crate) fn resource_dictionary(
    resources: &mut Resources<'_>,
    refs: &mut ObjectReferences,
    images: &Arena<Image>,
    form_xobjects: &Arena<FormXObject>,
) {
    let mut entries: Vec<(String, Ref)> = Vec::with_capacity(images.len() + form_xobjects.len());
    for (id, _) in images.iter() {
        entries.push((format!("I{}", id.index()), refs.get(RefType::Image(id.index()))));
    }
    for (id, _) in form_xobjects.iter() {
        entries.push((
            format!("X{}", id.index()),
            refs.get(RefType::FormXObject(id.index())),
        ));
    }

    let mut xobjects = resources.x_objects();
    for (name, id) in entries.iter() {
        xobjects.pair(Name(name.as_bytes()), *id);
    }
    xobjects.finish();
}
