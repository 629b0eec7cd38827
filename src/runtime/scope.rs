use crate::symbol_map::{Scope, SymID, SymbolMap};

use super::error::{RuntimeError, RuntimeErrorKind};
use super::value::Value;

/// Routes `name` to its storage slot: the global table, the receiver's
/// fields or the current activation's locals, by the name's scope.
///
/// Every variable read and write in the engine goes through here.
pub fn resolve<'a>(
    syms: &SymbolMap,
    name: SymID,
    globals: &'a mut [Value],
    receiver: &'a mut [Value],
    locals: &'a mut [Value],
) -> Result<&'a mut Value, RuntimeError> {
    let slots = match syms.scope(name) {
        Some(Scope::Global) => globals,
        Some(Scope::Object) => receiver,
        Some(Scope::Function) => locals,
        None => {
            return Err(RuntimeError::new(
                RuntimeErrorKind::BadScope,
                format!("`{}` does not start with a letter or `_`", syms.display(name)),
            ))
        }
    };

    slots.get_mut(name.index()).ok_or_else(|| {
        RuntimeError::new(
            RuntimeErrorKind::UnresolvedName,
            format!("{name} is not in the name table"),
        )
    })
}
