//! Laying items out on sheets of labels.
//!
//! A [`Sheet`] owns a validated [`SheetSpec`], a [`LabelRenderer`] and the [`Document`]
//! being built. Each item added is rendered once into a form, and that form is placed in
//! as many consecutive free label slots as the item has repeats, starting new pages as
//! the grid fills up.

use crate::colour::Colour;
use crate::cursor::{rectangle_for, LayoutCursor, Position};
use crate::document::Document;
use crate::form_xobject::{FormXObject, FormXObjectLayout};
use crate::image::Image;
use crate::info::Info;
use crate::page::{ImageLayout, LabelLayout, Page};
use crate::rect::Rect;
use crate::renderer::LabelRenderer;
use crate::repeat::Repeat;
use crate::slots::{Slot, SlotRegistry};
use crate::specification::{Background, SheetSpec};
use crate::transform::Transform;
use crate::units::*;
use crate::LabelError;
use id_arena::Id;
use std::collections::BTreeSet;
use std::io::Write;
use std::marker::PhantomData;

/// Optional behaviour of a [`Sheet`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetOptions {
    /// Stroke the outline of every label slot drawn on with this colour
    pub border: Option<Colour>,
    /// Fill slots that were marked as used with this colour, so a preview shows which
    /// labels are already gone from the physical sheet
    pub shade_missing: Option<Colour>,
    /// Only draw these pages (1-based). Every page is still laid out and emitted, but
    /// pages outside the set are left blank. `None` draws every page.
    pub pages_to_draw: Option<BTreeSet<usize>>,
}

impl SheetOptions {
    pub fn new() -> SheetOptions {
        SheetOptions::default()
    }

    pub fn border(mut self, colour: Colour) -> Self {
        self.border = Some(colour);
        self
    }

    pub fn shade_missing(mut self, colour: Colour) -> Self {
        self.shade_missing = Some(colour);
        self
    }

    pub fn pages_to_draw<I: IntoIterator<Item = usize>>(mut self, pages: I) -> Self {
        self.pages_to_draw = Some(pages.into_iter().collect());
        self
    }

    fn draws(&self, page: usize) -> bool {
        self.pages_to_draw
            .as_ref()
            .map_or(true, |pages| pages.contains(&page))
    }
}

/// Where one copy of an item ended up
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    /// The page, counting from 1
    pub page: usize,
    pub slot: Slot,
    /// The index of the item among all items added to the sheet, counting from 0
    pub item: usize,
    /// The whole label, in points from the bottom-left of the page
    pub label: Rect,
    /// The padded drawing area of the label
    pub drawable: Rect,
    /// Whether content was drawn, i.e. the page is one of the pages to draw
    pub drawn: bool,
}

#[derive(Debug, Copy, Clone)]
enum LoadedBackground {
    Image(Id<Image>),
    Drawing {
        xobj_id: Id<FormXObject>,
        width: f32,
        height: f32,
    },
}

/// A run of label sheets being filled with items of type `T`
pub struct Sheet<T, R> {
    spec: SheetSpec,
    renderer: R,
    options: SheetOptions,
    cursor: LayoutCursor,
    registry: SlotRegistry,
    document: Document,
    background: Option<LoadedBackground>,
    labels_placed: usize,
    items_added: usize,
    item: PhantomData<fn(&T)>,
}

impl<T, R> Sheet<T, R>
where
    R: LabelRenderer<T>,
{
    pub fn new(spec: SheetSpec, renderer: R, options: SheetOptions) -> Sheet<T, R> {
        let cursor = LayoutCursor::new(spec.rows(), spec.columns());
        let registry = SlotRegistry::new(spec.rows(), spec.columns());
        Sheet {
            spec,
            renderer,
            options,
            cursor,
            registry,
            document: Document::default(),
            background: None,
            labels_placed: 0,
            items_added: 0,
            item: PhantomData,
        }
    }

    pub fn spec(&self) -> &SheetSpec {
        &self.spec
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// The renderer, e.g. to hand it the ids of images added with [`Sheet::add_image`]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Sets the metadata of the generated document
    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Make an image available to renderers, which place it in a label with
    /// [`FormXObject::add_image`]
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.document.add_image(image)
    }

    /// Mark label slots on a future page as already used, so that no item is placed in
    /// them. Rows and columns count from 1.
    ///
    /// Fails with [`LabelError::PageAlreadyStarted`] once the layout has reached `page`,
    /// with [`LabelError::InvalidPageNumber`] for page 0, and with
    /// [`LabelError::IndexOutOfRange`] if any slot lies outside of the grid, in which
    /// case none of the slots are marked.
    pub fn mark_used<I, S>(&mut self, page: usize, slots: I) -> Result<(), LabelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Slot>,
    {
        self.registry.mark(page, slots, self.cursor.page())
    }

    /// Place `count` copies of an item in the next free label slots. The renderer is
    /// called at most once for the item, and not at all if `count` is zero or every copy
    /// lands on a page that is not drawn.
    ///
    /// A background that cannot be loaded fails the call before anything is placed.
    pub fn add_label(&mut self, item: &T, count: usize) -> Result<Vec<Placement>, LabelError> {
        if count > 0 {
            self.load_background()?;
        }

        let index = self.items_added;
        self.items_added += 1;

        let mut rendered: Option<Id<FormXObject>> = None;
        let mut placements = Vec::new();
        for _ in 0..count {
            let advance = self.cursor.advance_unused(&mut self.registry);
            for skipped in advance.skipped {
                self.start_pages_through(skipped.page);
                self.shade(skipped);
            }

            let Position { page, slot } = advance.position;
            self.start_pages_through(page);
            let rect = rectangle_for(&self.spec, slot);
            let drawn = self.options.draws(page);

            if drawn {
                let xobj_id = match rendered {
                    Some(id) => id,
                    None => {
                        let id = self.render(item, index);
                        rendered = Some(id);
                        id
                    }
                };
                let layout = self.label_layout(rect.label, Some(xobj_id), None);
                self.document.pages[page - 1].add_label(layout);
            }

            log::trace!(
                "placed item {} at row {}, column {} on page {}",
                index,
                slot.row,
                slot.column,
                page
            );
            self.labels_placed += 1;
            placements.push(Placement {
                page,
                slot,
                item: index,
                label: rect.label,
                drawable: rect.drawable,
                drawn,
            });
        }

        Ok(placements)
    }

    /// Add every item, repeated as given, returning the number of labels placed
    ///
    /// ```
    /// use pdf_labels::{Mm, Repeat, Sheet, SheetOptions, SheetSpec, FormXObject, Pt};
    /// use pdf_labels::pagesize::A4;
    ///
    /// let spec = SheetSpec::builder(A4, 2, 8, Mm(90.0), Mm(25.0)).build()?;
    /// let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &&str| {};
    /// let mut sheet = Sheet::new(spec, renderer, SheetOptions::new());
    ///
    /// assert_eq!(sheet.add_labels(["a", "b", "c"], Repeat::per_item([2, 1]))?, 3);
    /// assert_eq!(sheet.items_added(), 2);
    /// # Ok::<(), pdf_labels::LabelError>(())
    /// ```
    pub fn add_labels<I, C>(&mut self, items: I, count: Repeat<C>) -> Result<usize, LabelError>
    where
        I: IntoIterator<Item = T>,
        C: Iterator<Item = usize>,
    {
        let mut placed = 0;
        for (item, n) in count.expand(items.into_iter()) {
            placed += self.add_label(&item, n)?.len();
        }
        Ok(placed)
    }

    /// The number of labels placed so far, repeats included
    pub fn labels_placed(&self) -> usize {
        self.labels_placed
    }

    /// The number of items added so far
    pub fn items_added(&self) -> usize {
        self.items_added
    }

    /// The number of pages started so far
    pub fn pages_used(&self) -> usize {
        self.cursor.page()
    }

    /// A page laid out so far, counting from 1
    pub fn page(&self, page: usize) -> Result<&Page, LabelError> {
        page.checked_sub(1)
            .and_then(|index| self.document.pages.get(index))
            .ok_or(LabelError::InvalidPageNumber(page))
    }

    /// Write a document holding only the given page (counting from 1) as laid out so
    /// far. Used slots still pending on the current page are not shaded yet.
    pub fn preview_page<W: Write>(&self, page: usize, w: W) -> Result<(), LabelError> {
        self.page(page)?;
        self.document.write_pages(&[page - 1], w)
    }

    /// Finish the layout and hand over the document. Slots marked as used on the last
    /// page that the layout never reached are shaded here.
    pub fn finish(mut self) -> Result<Document, LabelError> {
        let page = self.cursor.page();
        if page > 0 {
            for slot in self.registry.remaining(page) {
                self.registry.take(page, slot);
                self.shade(Position { page, slot });
            }
        }
        log::debug!(
            "finished {} labels for {} items on {} pages",
            self.labels_placed,
            self.items_added,
            page
        );
        Ok(self.document)
    }

    /// Finish the layout and write the PDF
    pub fn save<W: Write>(self, w: W) -> Result<(), LabelError> {
        self.finish()?.write(w)
    }

    fn render(&mut self, item: &T, index: usize) -> Id<FormXObject> {
        let outline = self.spec.drawable_outline();
        let mut form = FormXObject::new(outline.width, outline.height);
        self.renderer.draw(&mut form, outline.width, outline.height, item);
        log::debug!("rendered item {}", index);
        self.document.add_form_xobject(form)
    }

    fn label_layout(
        &self,
        label: Rect,
        xobj_id: Option<Id<FormXObject>>,
        fill: Option<Colour>,
    ) -> LabelLayout {
        LabelLayout {
            origin: (label.x1, label.y1),
            outline: self.spec.label_outline(),
            drawable: self.spec.drawable_outline(),
            xobj_id,
            fill,
            border: self.options.border,
        }
    }

    fn shade(&mut self, position: Position) {
        let Some(colour) = self.options.shade_missing else {
            return;
        };
        if !self.options.draws(position.page) {
            return;
        }
        let rect = rectangle_for(&self.spec, position.slot);
        let layout = self.label_layout(rect.label, None, Some(colour));
        if let Some(page) = self.document.pages.get_mut(position.page - 1) {
            page.add_label(layout);
        }
    }

    fn start_pages_through(&mut self, page: usize) {
        while self.document.pages.len() < page {
            let number = self.document.pages.len() + 1;
            let width: Pt = self.spec.sheet_width().into();
            let height: Pt = self.spec.sheet_height().into();
            let mut new_page = Page::new(width, height);
            if self.options.draws(number) {
                self.draw_background(&mut new_page);
            }
            self.document.add_page(new_page);
            log::debug!("started page {}", number);
        }
    }

    /// Load the background into the document the first time it is needed
    fn load_background(&mut self) -> Result<(), LabelError> {
        let loaded = match (self.background, self.spec.background()) {
            (_, None) | (Some(_), _) => return Ok(()),
            (None, Some(Background::File(path))) => {
                let image = Image::new_from_disk(path)?;
                LoadedBackground::Image(self.document.add_image(image))
            }
            (
                None,
                Some(Background::Drawing {
                    width,
                    height,
                    content,
                }),
            ) => {
                let mut form = FormXObject::new(Pt(*width), Pt(*height));
                form.add_raw_content(content.iter().copied());
                LoadedBackground::Drawing {
                    xobj_id: self.document.add_form_xobject(form),
                    width: *width,
                    height: *height,
                }
            }
        };
        log::debug!("loaded sheet background");
        self.background = Some(loaded);
        Ok(())
    }

    fn draw_background(&self, page: &mut Page) {
        match self.background {
            None => {}
            Some(LoadedBackground::Image(image_id)) => page.add_image(ImageLayout {
                image_id,
                position: page.media_box,
            }),
            Some(LoadedBackground::Drawing {
                xobj_id,
                width,
                height,
            }) => page.add_form_xobject(FormXObjectLayout {
                xobj_id,
                transform: Transform::scale(
                    *page.media_box.width() / width,
                    *page.media_box.height() / height,
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::pagesize::A4;
    use crate::page::PageContents;

    fn a4_2x8() -> SheetSpec {
        SheetSpec::builder(A4, 2, 8, Mm(90.0), Mm(25.0))
            .build()
            .unwrap()
    }

    #[test]
    fn repeats_are_rendered_once() {
        let mut calls = Vec::new();
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, item: &u32| calls.push(*item);
        let mut sheet = Sheet::new(a4_2x8(), renderer, SheetOptions::new());

        let placements = sheet.add_label(&7, 3).unwrap();
        let slots: Vec<Slot> = placements.iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![Slot::new(1, 1), Slot::new(1, 2), Slot::new(2, 1)]);
        assert!(!placements[0].label.overlaps(&placements[1].label));
        assert!(!placements[1].label.overlaps(&placements[2].label));
        assert_eq!(sheet.labels_placed(), 3);

        let page = sheet.page(1).unwrap();
        let forms: Vec<_> = page.labels().filter_map(|l| l.xobj_id).collect();
        assert_eq!(forms.len(), 3);
        assert!(forms.iter().all(|id| *id == forms[0]));

        drop(sheet);
        assert_eq!(calls, vec![7]);
    }

    #[test]
    fn repeats_larger_than_a_page_spill_over() {
        let spec = SheetSpec::builder(A4, 1, 1, Mm(90.0), Mm(25.0))
            .build()
            .unwrap();
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &u32| {};
        let mut sheet = Sheet::new(spec, renderer, SheetOptions::new());

        let placements = sheet.add_label(&1, 5).unwrap();
        let pages: Vec<usize> = placements.iter().map(|p| p.page).collect();
        assert_eq!(pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(sheet.pages_used(), 5);
    }

    #[test]
    fn zero_repeats_place_nothing() {
        let mut calls = 0;
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &u32| calls += 1;
        let mut sheet = Sheet::new(a4_2x8(), renderer, SheetOptions::new());

        assert!(sheet.add_label(&1, 0).unwrap().is_empty());
        assert_eq!(sheet.items_added(), 1);
        assert_eq!(sheet.pages_used(), 0);
        drop(sheet);
        assert_eq!(calls, 0);
    }

    #[test]
    fn per_item_counts_stop_at_the_shorter_side() {
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &char| {};
        let mut sheet = Sheet::new(a4_2x8(), renderer, SheetOptions::new());

        let placed = sheet
            .add_labels(['a', 'b', 'c'], Repeat::per_item([2, 1]))
            .unwrap();
        assert_eq!(placed, 3);
        assert_eq!(sheet.items_added(), 2);
    }

    #[test]
    fn layout_continues_onto_new_pages() {
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &usize| {};
        let mut sheet = Sheet::new(a4_2x8(), renderer, SheetOptions::new());

        let placed = sheet.add_labels(0..18, Repeat::once()).unwrap();
        assert_eq!(placed, 18);
        assert_eq!(sheet.labels_placed(), 18);
        assert_eq!(sheet.pages_used(), 2);
        assert_eq!(sheet.page(2).unwrap().labels().count(), 2);
        assert!(matches!(sheet.page(3), Err(LabelError::InvalidPageNumber(3))));
        assert!(matches!(sheet.page(0), Err(LabelError::InvalidPageNumber(0))));
    }

    #[test]
    fn used_slots_are_skipped() {
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &usize| {};
        let options = SheetOptions::new().shade_missing(colours::LIGHT_GREY);
        let mut sheet = Sheet::new(a4_2x8(), renderer, options);
        sheet.mark_used(1, [(1, 1), (1, 2), (8, 2)]).unwrap();

        let placements = sheet.add_label(&0, 1).unwrap();
        assert_eq!(placements[0].slot, Slot::new(2, 1));

        let shaded = sheet
            .page(1)
            .unwrap()
            .labels()
            .filter(|l| l.fill == Some(colours::LIGHT_GREY))
            .count();
        assert_eq!(shaded, 2);

        // the slot the layout never reached is shaded when the sheet is finished
        let doc = sheet.finish().unwrap();
        let shaded = doc.pages[0]
            .labels()
            .filter(|l| l.fill.is_some() && l.xobj_id.is_none())
            .count();
        assert_eq!(shaded, 3);
    }

    #[test]
    fn marking_a_started_page_fails() {
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &usize| {};
        let mut sheet = Sheet::new(a4_2x8(), renderer, SheetOptions::new());
        sheet.mark_used(2, [(1, 1)]).unwrap();
        sheet.add_label(&0, 1).unwrap();

        assert!(matches!(
            sheet.mark_used(1, [(3, 1)]),
            Err(LabelError::PageAlreadyStarted(1))
        ));
        assert!(matches!(
            sheet.mark_used(2, [(9, 1)]),
            Err(LabelError::IndexOutOfRange { row: 9, column: 1 })
        ));
        assert!(matches!(
            sheet.mark_used(0, [(1, 1)]),
            Err(LabelError::InvalidPageNumber(0))
        ));
    }

    #[test]
    fn pages_not_drawn_are_blank_but_counted() {
        let mut calls = Vec::new();
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, item: &usize| calls.push(*item);
        let options = SheetOptions::new().pages_to_draw([2]);
        let mut sheet = Sheet::new(a4_2x8(), renderer, options);

        let placed = sheet.add_labels(0..18, Repeat::once()).unwrap();
        assert_eq!(placed, 18);
        assert_eq!(sheet.pages_used(), 2);
        assert!(sheet.page(1).unwrap().contents.is_empty());
        assert_eq!(sheet.page(2).unwrap().labels().count(), 2);

        drop(sheet);
        assert_eq!(calls, vec![16, 17]);
    }

    #[test]
    fn drawings_fill_the_background() {
        let spec = SheetSpec::builder(A4, 2, 8, Mm(90.0), Mm(25.0))
            .background(Background::Drawing {
                width: 100.0,
                height: 100.0,
                content: b"0 0 100 100 re f".to_vec(),
            })
            .build()
            .unwrap();
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &usize| {};
        let mut sheet = Sheet::new(spec, renderer, SheetOptions::new());
        sheet.add_labels(0..17, Repeat::once()).unwrap();

        let doc = sheet.finish().unwrap();
        // one background form shared by both pages, plus the 17 rendered labels
        assert_eq!(doc.form_xobjects.len(), 18);
        for page in doc.pages.iter() {
            assert!(matches!(
                page.contents.first(),
                Some(PageContents::FormXObject(_))
            ));
        }
    }

    #[test]
    fn borders_are_drawn_on_every_label() {
        let renderer = |_: &mut FormXObject, _: Pt, _: Pt, _: &usize| {};
        let options = SheetOptions::new().border(colours::BLACK);
        let mut sheet = Sheet::new(a4_2x8(), renderer, options);
        sheet.add_label(&0, 2).unwrap();

        let mut out = Vec::new();
        sheet.preview_page(1, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).starts_with("%PDF-"));
        assert!(sheet
            .page(1)
            .unwrap()
            .labels()
            .all(|l| l.border == Some(colours::BLACK)));
        assert!(matches!(
            sheet.preview_page(2, Vec::new()),
            Err(LabelError::InvalidPageNumber(2))
        ));
    }
}
