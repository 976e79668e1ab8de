//! Shared content rendering logic for pages and form XObjects.

use crate::page::{LabelLayout, PageContents};
use crate::transform::Transform;
use std::io::Write;

/// Renders page contents to a PDF content stream.
///
/// This is the shared implementation used by both pages and form XObjects to
/// convert high-level content items into low-level PDF operators.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(contents: &[PageContents]) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for item in contents.iter() {
        match item {
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width().0,
                    image.position.height().0,
                    image.position.x1.0,
                    image.position.y1.0
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::RawContent(c) => {
                write!(&mut content, "q\n")?;
                content.write_all(c.as_slice())?;
                write!(&mut content, "\nQ\n")?;
            }
            PageContents::FormXObject(layout) => {
                write!(&mut content, "q\n")?;
                layout.transform.write(&mut content)?;
                write!(&mut content, "/X{} Do\n", layout.xobj_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Label(label) => render_label(&mut content, label)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_label(content: &mut Vec<u8>, label: &LabelLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    Transform::translate(label.origin.0, label.origin.1).write(content)?;

    if let Some(fill) = label.fill {
        fill.write_fill(content)?;
        label.outline.write_path(content)?;
        write!(content, "f\n")?;
    }

    if let Some(xobj_id) = label.xobj_id {
        // anything the renderer drew outside the label or its padding is cut away
        write!(content, "q\n")?;
        label.outline.write_path(content)?;
        write!(content, "W n\n")?;
        label.drawable.write_path(content)?;
        write!(content, "W n\n")?;
        Transform::translate(label.drawable.x, label.drawable.y).write(content)?;
        write!(content, "/X{} Do\n", xobj_id.index())?;
        write!(content, "Q\n")?;
    }

    if let Some(border) = label.border {
        border.write_stroke(content)?;
        write!(content, "1 w\n")?;
        label.outline.write_path(content)?;
        write!(content, "S\n")?;
    }

    write!(content, "Q\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::form_xobject::FormXObject;
    use crate::outline::RoundedRect;
    use crate::units::Pt;
    use id_arena::Arena;

    fn label(xobj: bool) -> LabelLayout {
        let mut forms: Arena<FormXObject> = Arena::new();
        let id = forms.alloc(FormXObject::new(Pt(10.0), Pt(10.0)));
        LabelLayout {
            origin: (Pt(100.0), Pt(50.0)),
            outline: RoundedRect::new(Pt(0.0), Pt(0.0), Pt(20.0), Pt(10.0), Pt(0.0)),
            drawable: RoundedRect::new(Pt(2.0), Pt(1.0), Pt(16.0), Pt(8.0), Pt(0.0)),
            xobj_id: xobj.then_some(id),
            fill: None,
            border: None,
        }
    }

    #[test]
    fn labels_are_clipped_and_positioned() {
        let rendered = render_contents(&[PageContents::Label(label(true))]).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.starts_with("q\n1 0 0 1 100 50 cm\n"));
        assert!(rendered.contains("0 0 20 10 re\nW n\n2 1 16 8 re\nW n\n1 0 0 1 2 1 cm\n/X0 Do\n"));
        assert!(!rendered.contains(" S\n"));
    }

    #[test]
    fn shaded_labels_fill_their_outline() {
        let mut shaded = label(false);
        shaded.fill = Some(colours::LIGHT_GREY);
        shaded.border = Some(colours::BLACK);
        let rendered = render_contents(&[PageContents::Label(shaded)]).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.contains("0.85 g\n0 0 20 10 re\nf\n"));
        assert!(rendered.contains("0 G\n1 w\n0 0 20 10 re\nS\n"));
        assert!(!rendered.contains("Do"));
    }
}
