use pdf_writer::Ref;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Image(usize),
    ImageMask(usize),
    FormXObject(usize),
}

/// Allocates PDF object ids while a document is being written. Ids are handed out
/// lazily, so objects can refer to each other regardless of the order they are
/// written in.
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    /// The id of the object, allocating one the first time it is asked for
    pub fn get(&mut self, ref_type: RefType) -> Ref {
        let next_id = &mut self.next_id;
        *self.refs.entry(ref_type).or_insert_with(|| {
            let id = Ref::new(*next_id);
            *next_id += 1;
            id
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_and_unique() {
        let mut refs = ObjectReferences::new();
        let catalog = refs.get(RefType::Catalog);
        let page = refs.get(RefType::Page(0));
        assert_ne!(catalog, page);
        assert_eq!(refs.get(RefType::Catalog), catalog);
        assert_eq!(refs.get(RefType::Page(0)), page);
    }
}
