use indexmap::IndexMap;
use serde::Serialize;

/// A spot in the image the linker must patch with an external address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reloc {
    pub location: usize,
    pub size: usize,
}

/// Relocations grouped by external symbol, in first-use order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relocations(IndexMap<String, Vec<Reloc>>);

impl Relocations {
    pub fn new() -> Self {
        Relocations(IndexMap::new())
    }

    pub fn add(&mut self, name: &str, location: usize, size: usize) {
        self.0
            .entry(name.to_string())
            .or_default()
            .push(Reloc { location, size });
    }

    /// Record a relocation only for values tied to an external symbol.
    pub fn maybe_add(&mut self, symbol: Option<&str>, location: usize, size: usize) {
        if let Some(name) = symbol {
            self.add(name, location, size);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Reloc]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Reloc>)> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &IndexMap<String, Vec<Reloc>> {
        &self.0
    }
}

#[test]
fn test() {
    let mut relocs = Relocations::new();
    relocs.add("foo", 1, 2);
    relocs.maybe_add(None, 5, 2);
    relocs.maybe_add(Some("bar"), 4, 1);
    relocs.add("foo", 8, 4);

    let names: Vec<_> = relocs.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["foo", "bar"]);
    assert_eq!(
        relocs.get("foo"),
        Some(
            &[
                Reloc {
                    location: 1,
                    size: 2
                },
                Reloc {
                    location: 8,
                    size: 4
                }
            ][..]
        )
    );
    relocs.clear();
    assert!(relocs.is_empty());
}
