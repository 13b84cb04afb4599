//! Print expression trees as s-expression text.
//!
//! Three layouts are available:
//!
//! - [`to_string`] writes everything on one line.
//! - [`to_string_indented`] starts every non-empty nested list on a new line,
//!   indented by two spaces per nesting level.
//! - [`to_string_pretty`] fits lists into a given line width and only breaks
//!   the ones that do not fit.
//!
//! Atoms are written verbatim, without quoting or escaping.
mod indented;
mod pretty;
mod simple;
pub use indented::to_string_indented;
pub use pretty::to_string_pretty;
pub use simple::to_string;

/// Trait for types that can print s-expressions.
pub trait Printer: Sized {
    type Error;

    /// Print an atom.
    fn atom(&mut self, atom: &str) -> Result<(), Self::Error>;

    /// Print a list given a function that prints the contents.
    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print a printable value.
    fn print(&mut self, value: impl Print) -> Result<(), Self::Error> {
        value.print(self)
    }
}

/// Trait for types that can be printed as an s-expression.
pub trait Print {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error>;
}

impl<T: Print + Sized> Print for &T {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        (*self).print(printer)
    }
}

impl<T: Print> Print for Box<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_ref())
    }
}

impl<T: Print> Print for Vec<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        for item in self {
            printer.print(item)?;
        }
        Ok(())
    }
}
