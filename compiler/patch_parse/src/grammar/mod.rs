//! Grammar productions, implemented as methods on [`Parser`].

mod expr;
mod stmt;

use crate::Parser;

impl Parser<'_> {
    /// Run `f` with one more enclosing loop.
    fn in_loop<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.loop_depth += 1;
        let result = f(self);
        self.loop_depth -= 1;
        result
    }

    /// Run `f` as a function body: loops of the enclosing code do not count.
    fn in_function_body<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let outer = std::mem::replace(&mut self.loop_depth, 0);
        let result = f(self);
        self.loop_depth = outer;
        result
    }
}
