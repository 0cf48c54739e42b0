use pdf_writer::Ref;
use std::collections::HashMap;

/// Every indirect object a text document can contain. A document carries at
/// most one font, so the font objects are not indexed.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font,
    CidFont,
    ToUnicode,
    FontDescriptor,
    FontData,
}

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

    /// Look up a reference that was generated earlier
    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Allocate the next object id for `ref_type`, replacing any earlier one
    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }

    /// Get the reference for `ref_type`, generating it on first use
    pub fn get_or_gen(&mut self, ref_type: RefType) -> Ref {
        match self.get(ref_type) {
            Some(id) => id,
            None => self.gen(ref_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_stable() {
        let mut refs = ObjectReferences::new();
        let catalog = refs.gen(RefType::Catalog);
        let tree = refs.gen(RefType::PageTree);
        assert_eq!(catalog, Ref::new(1));
        assert_eq!(tree, Ref::new(2));
        assert_eq!(refs.get_or_gen(RefType::Catalog), catalog);
        assert_eq!(refs.get_or_gen(RefType::Page(0)), Ref::new(3));
        assert_eq!(refs.get(RefType::Font), None);
    }
}
