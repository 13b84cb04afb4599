use std::convert::Infallible;

use super::{Print, Printer};

const INDENT: &str = "  ";

/// Printer that starts every non-empty nested list on its own line.
struct IndentedPrinter {
    string: String,
    level: usize,
    /// Number of items printed so far into the innermost open list.
    items: usize,
}

impl IndentedPrinter {
    pub fn new() -> Self {
        Self {
            string: String::new(),
            level: 0,
            items: 0,
        }
    }

    #[inline]
    fn separate(&mut self) {
        if self.items > 0 {
            self.string.push(' ');
        }
    }
}

impl Printer for IndentedPrinter {
    type Error = Infallible;

    fn atom(&mut self, atom: &str) -> Result<(), Self::Error> {
        self.separate();
        self.items += 1;
        self.string.push_str(atom);
        Ok(())
    }

    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.separate();

        // Assume the list has children; the line break is taken back below
        // when it turns out to be empty, which leaves it at the end of the
        // string.
        let open = self.string.len();
        self.string.push('\n');
        for _ in 0..self.level {
            self.string.push_str(INDENT);
        }
        self.string.push('(');

        let outer = std::mem::replace(&mut self.items, 0);
        self.level += 1;
        f(self)?;
        self.level -= 1;
        let inner = std::mem::replace(&mut self.items, outer + 1);

        if inner == 0 {
            self.string.truncate(open);
            self.string.push('(');
        }

        self.string.push(')');
        Ok(())
    }
}

/// Print a `T` into an indented s-expression string.
///
/// Every non-empty list is placed on a new line, indented by two spaces for
/// each list that encloses it. Empty lists are printed inline as `()`.
/// Siblings are separated by a single space, also when the following sibling
/// starts a new line. Leading and trailing whitespace is trimmed.
pub fn to_string_indented<T: Print>(value: T) -> String {
    let mut printer = IndentedPrinter::new();
    let _ = value.print(&mut printer);
    printer.string.trim().to_string()
}
