use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Defined in this file. `global` symbols are exported to the linker.
    Local { value: i64, global: bool },
    /// Declared with `extern`; resolved by the linker.
    Extern,
}

impl Symbol {
    pub fn local(value: i64) -> Self {
        Symbol::Local {
            value,
            global: false,
        }
    }
}

/// Flat symbol table, keyed by lower-cased name in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable(IndexMap<String, Symbol>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    /// Insert or overwrite, returning the previous entry.
    pub fn register(&mut self, name: &str, symbol: Symbol) -> Option<Symbol> {
        self.0.insert(name.to_string(), symbol)
    }

    /// Bind a local value, keeping the export flag of an earlier binding.
    pub fn define_label(&mut self, name: &str, value: i64) -> Option<Symbol> {
        let global = matches!(self.0.get(name), Some(Symbol::Local { global: true, .. }));
        self.register(name, Symbol::Local { value, global })
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.0.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exported locals with their values.
    pub fn globals(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().filter_map(|(name, sym)| match sym {
            Symbol::Local {
                value,
                global: true,
            } => Some((name.as_str(), *value)),
            _ => None,
        })
    }

    pub fn externs(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, sym)| **sym == Symbol::Extern)
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_returns_previous() {
        let mut table = SymbolTable::new();
        assert_eq!(table.register("foo", Symbol::local(1)), None);
        assert_eq!(
            table.register("foo", Symbol::Extern),
            Some(Symbol::local(1))
        );
        assert_eq!(table.get("foo"), Some(&Symbol::Extern));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn define_label_keeps_export() {
        let mut table = SymbolTable::new();
        table.define_label("start", 0x10);
        if let Some(Symbol::Local { global, .. }) = table.get_mut("start") {
            *global = true;
        }
        table.define_label("start", 0x20);
        assert_eq!(table.globals().collect::<Vec<_>>(), vec![("start", 0x20)]);
    }

    #[test]
    fn globals_and_externs() {
        let mut table = SymbolTable::new();
        table.register("a", Symbol::local(1));
        table.register("b", Symbol::Extern);
        table.register(
            "c",
            Symbol::Local {
                value: 3,
                global: true,
            },
        );
        assert_eq!(table.globals().collect::<Vec<_>>(), vec![("c", 3)]);
        assert_eq!(table.externs().collect::<Vec<_>>(), vec!["b"]);
    }
}
