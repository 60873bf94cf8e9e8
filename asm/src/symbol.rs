use arch::mem::BUILTINS;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Builtin,
    /// Declared by `(name)`; the address is a ROM address.
    Label,
    /// Allocated on first `@name`; the address is a RAM address.
    Variable,
}

#[derive(Debug, Clone, Serialize)]
pub struct Symbol {
    pub address: u16,
    pub origin: Origin,
    /// Line index of the declaration or first reference.
    #[serde(skip)]
    pub line_idx: Option<usize>,
    #[serde(skip)]
    pub used: bool,
}

/// Name to address map of one assembly run.
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    /// A fresh table holding only the predefined symbols.
    pub fn new() -> Self {
        let symbols = BUILTINS
            .iter()
            .map(|(name, address)| {
                let symbol = Symbol {
                    address: *address,
                    origin: Origin::Builtin,
                    line_idx: None,
                    used: false,
                };
                (name.clone(), symbol)
            })
            .collect();
        SymbolTable { symbols }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn address_of(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).map(|symbol| symbol.address)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Bind a new name. Names are never rebound.
    pub fn bind(
        &mut self,
        name: &str,
        address: u16,
        origin: Origin,
        line_idx: usize,
    ) -> Result<(), Error> {
        if let Some(prev) = self.symbols.get(name) {
            return Err(match prev.line_idx {
                Some(prev_idx) => Error::DuplicateLabel(name.to_string(), prev_idx),
                None => Error::ReservedSymbol(name.to_string()),
            });
        }
        let symbol = Symbol {
            address,
            origin,
            line_idx: Some(line_idx),
            used: false,
        };
        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    /// Look up a name and mark it as referenced.
    pub fn lookup(&mut self, name: &str) -> Option<u16> {
        self.symbols.get_mut(name).map(|symbol| {
            symbol.used = true;
            symbol.address
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols
            .iter()
            .map(|(name, symbol)| (name.as_str(), symbol))
    }

    /// Labels and variables, in the order they were bound.
    pub fn user_symbols(&self) -> IndexMap<&str, &Symbol> {
        self.iter()
            .filter(|(_, symbol)| symbol.origin != Origin::Builtin)
            .collect()
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.user_symbols())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let table = SymbolTable::new();
        for n in 0..16 {
            assert_eq!(table.address_of(&format!("R{n}")), Some(n));
        }
        assert_eq!(table.address_of("SP"), Some(0));
        assert_eq!(table.address_of("THAT"), Some(4));
        assert_eq!(table.address_of("SCREEN"), Some(16384));
        assert_eq!(table.address_of("KBD"), Some(24576));
        assert!(!table.contains("r0"));
        assert!(table.user_symbols().is_empty());
    }

    #[test]
    fn test_bind() {
        let mut table = SymbolTable::new();
        table.bind("LOOP", 4, Origin::Label, 7).unwrap();
        assert!(table.contains("LOOP"));
        assert_eq!(table.address_of("LOOP"), Some(4));
        assert!(!table.get("LOOP").unwrap().used);
        assert_eq!(table.lookup("LOOP"), Some(4));
        assert!(table.get("LOOP").unwrap().used);
        assert_eq!(table.lookup("END"), None);
    }

    #[test]
    fn test_no_rebind() {
        let mut table = SymbolTable::new();
        table.bind("LOOP", 4, Origin::Label, 7).unwrap();
        assert!(matches!(
            table.bind("LOOP", 9, Origin::Label, 12),
            Err(Error::DuplicateLabel(name, 7)) if name == "LOOP"
        ));
        assert_eq!(table.address_of("LOOP"), Some(4));
        assert!(matches!(
            table.bind("SCREEN", 0, Origin::Label, 1),
            Err(Error::ReservedSymbol(_))
        ));
    }

    #[test]
    fn test_fresh_tables_are_independent() {
        let mut first = SymbolTable::new();
        first.bind("x", 16, Origin::Variable, 0).unwrap();
        assert!(!SymbolTable::new().contains("x"));
    }

    #[test]
    fn test_yaml() {
        let mut table = SymbolTable::new();
        table.bind("LOOP", 2, Origin::Label, 3).unwrap();
        table.bind("i", 16, Origin::Variable, 0).unwrap();
        let yaml = table.to_yaml().unwrap();
        assert_eq!(
            yaml,
            "LOOP:\n  address: 2\n  origin: label\ni:\n  address: 16\n  origin: variable\n"
        );
    }
}
