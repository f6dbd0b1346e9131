//! Function values.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use patch_ir::FunctionDef;

use super::Value;
use crate::context::Captured;
use crate::library::NativeFunction;

/// Something a script can call.
pub enum PatchFunction {
    /// Declared in a script; runs in the context it was created in.
    Defined(DefinedFunction),
    /// Implemented by the host.
    Native(NativeFunction),
    /// `target` with `receiver` passed as its first argument.
    Bound {
        target: Rc<PatchFunction>,
        receiver: Value,
    },
}

impl PatchFunction {
    /// A function that calls `self` with `receiver` prepended to the
    /// arguments.
    pub fn bind(self: &Rc<Self>, receiver: Value) -> PatchFunction {
        PatchFunction::Bound {
            target: Rc::clone(self),
            receiver,
        }
    }
}

impl fmt::Debug for PatchFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchFunction::Defined(function) => {
                write!(f, "<function {} params>", function.def.params.len())
            }
            PatchFunction::Native(native) => write!(f, "<builtin {}>", native.name()),
            PatchFunction::Bound { target, .. } => write!(f, "<bound {target:?}>"),
        }
    }
}

/// A script function together with the scope it closes over.
pub struct DefinedFunction {
    pub(crate) def: Arc<FunctionDef>,
    pub(crate) captured: Captured,
}

impl DefinedFunction {
    #[inline]
    pub fn definition(&self) -> &FunctionDef {
        &self.def
    }
}
