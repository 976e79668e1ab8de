use crate::form_xobject::FormXObject;
use crate::units::Pt;

/// Draws the content of one label.
///
/// `label` is a fresh [`FormXObject`] the size of the drawable (padded) area of a label,
/// `width` by `height` points with the origin at its bottom-left corner. Content that
/// strays outside of it is clipped when the label is placed on the sheet.
///
/// A renderer is called at most once per item added to a [`Sheet`](crate::Sheet), no
/// matter how many copies of the item are placed; the copies all show the content drawn
/// by that single call. Items that land only on pages excluded from drawing are never
/// rendered at all, so any state a renderer keeps between calls (a random number
/// generator picking colours, say) will differ between a full run and a run that draws
/// only some pages.
///
/// Any closure taking the same arguments is a renderer:
///
/// ```
/// use pdf_labels::{FormXObject, LabelRenderer, Pt};
/// use pdf_labels::pdf_writer::Content;
///
/// let mut boxes = |label: &mut FormXObject, width: Pt, height: Pt, _item: &u32| {
///     let mut content = Content::new();
///     content.rect(0.0, 0.0, *width, *height);
///     content.stroke();
///     label.add_content(content);
/// };
///
/// let mut form = FormXObject::new(Pt(100.0), Pt(50.0));
/// boxes.draw(&mut form, Pt(100.0), Pt(50.0), &7);
/// assert!(!form.is_empty());
/// ```
pub trait LabelRenderer<T> {
    fn draw(&mut self, label: &mut FormXObject, width: Pt, height: Pt, item: &T);
}

impl<T, F> LabelRenderer<T> for F
where
    F: FnMut(&mut FormXObject, Pt, Pt, &T),
{
    fn draw(&mut self, label: &mut FormXObject, width: Pt, height: Pt, item: &T) {
        self(label, width, height, item)
    }
}
