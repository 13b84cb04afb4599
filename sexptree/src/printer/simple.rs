use std::convert::Infallible;

use super::{Print, Printer};

/// Printer that puts the whole expression on a single line.
struct SimplePrinter {
    needs_whitespace: bool,
    string: String,
}

impl SimplePrinter {
    pub fn new() -> Self {
        Self {
            needs_whitespace: false,
            string: String::new(),
        }
    }
}

impl Printer for SimplePrinter {
    type Error = Infallible;

    fn atom(&mut self, atom: &str) -> Result<(), Self::Error> {
        if self.needs_whitespace {
            self.string.push(' ');
        }

        self.needs_whitespace = true;
        self.string.push_str(atom);
        Ok(())
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        if self.needs_whitespace {
            self.string.push(' ');
        }

        self.string.push('(');
        self.needs_whitespace = false;
        f(self)?;
        self.string.push(')');
        self.needs_whitespace = true;

        Ok(())
    }
}

/// Print a `T` into a compact s-expression string.
///
/// Children are separated by a single space and no line breaks are produced.
/// Where human readability is a concern, consider [`to_string_indented`] or
/// [`to_string_pretty`] instead.
///
/// [`to_string_indented`]: `crate::printer::to_string_indented`
/// [`to_string_pretty`]: `crate::printer::to_string_pretty`
pub fn to_string<T: Print>(value: T) -> String {
    let mut printer = SimplePrinter::new();
    let _ = value.print(&mut printer);
    printer.string
}
