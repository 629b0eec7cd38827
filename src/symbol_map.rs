use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymID(u32);

/// Reserved id, never handed out for a real name.
pub const NO_SYM: SymID = SymID(0);

impl SymID {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Storage class of a name, fixed by its first character.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    Object,
    Function,
}

impl Scope {
    pub fn of(name: &str) -> Option<Scope> {
        match name.chars().next()? {
            c if c.is_ascii_uppercase() => Some(Scope::Global),
            c if c.is_ascii_lowercase() => Some(Scope::Object),
            '_' => Some(Scope::Function),
            _ => None,
        }
    }
}

/// Append-only interning table. Ids are dense, so every per-name storage
/// area (globals, instance fields, frame locals) is a plain vector indexed
/// by `SymID::index`.
#[derive(Debug, Clone)]
pub struct SymbolMap {
    ids: HashMap<String, SymID>,
    names: Vec<String>,
    scopes: Vec<Option<Scope>>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            names: vec![String::new()],
            scopes: vec![None],
        }
    }

    pub fn get_id(&mut self, name: &str) -> SymID {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }

        let id = SymID(self.names.len() as u32);

        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        self.scopes.push(Scope::of(name));

        id
    }

    pub fn lookup(&self, name: &str) -> Option<SymID> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: SymID) -> Option<&str> {
        if id == NO_SYM {
            return None;
        }

        self.names.get(id.index()).map(String::as_str)
    }

    pub fn scope(&self, id: SymID) -> Option<Scope> {
        self.scopes.get(id.index()).copied().flatten()
    }

    /// Number of ids handed out, counting the sentinel.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.len() == 1
    }

    pub fn display(&self, id: SymID) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => id.to_string(),
        }
    }
}

impl Default for SymbolMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_stable_and_dense() {
        let mut syms = SymbolMap::new();

        let a = syms.get_id("a");
        let b = syms.get_id("Bee");
        let again = syms.get_id("a");

        assert_eq!(a, again);
        assert_eq!(a.index(), 1);
        assert_eq!(b.index(), 2);
        assert_eq!(syms.len(), 3);
        assert_eq!(syms.name(b), Some("Bee"));
    }

    #[test]
    fn sentinel_is_never_a_name() {
        let mut syms = SymbolMap::new();

        assert!(syms.is_empty());
        assert_eq!(syms.name(NO_SYM), None);
        assert_eq!(syms.scope(NO_SYM), None);
        assert_ne!(syms.get_id("x"), NO_SYM);
    }

    #[test]
    fn scope_follows_first_character() {
        assert_eq!(Scope::of("Counter"), Some(Scope::Global));
        assert_eq!(Scope::of("x"), Some(Scope::Object));
        assert_eq!(Scope::of("_tmp"), Some(Scope::Function));
        assert_eq!(Scope::of("9lives"), None);
        assert_eq!(Scope::of(""), None);

        let mut syms = SymbolMap::new();
        let local = syms.get_id("_i");
        let field = syms.get_id("count");
        let global = syms.get_id("N");

        assert_eq!(syms.scope(local), Some(Scope::Function));
        assert_eq!(syms.scope(field), Some(Scope::Object));
        assert_eq!(syms.scope(global), Some(Scope::Global));
    }
}
