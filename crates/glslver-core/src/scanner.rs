//! Input scanner association
//!
//! The checker never owns or advances a scanner. It only reads the current
//! location for diagnostics, and forwards `#line`-style adjustments.
use std::cell::RefCell;
use std::rc::Rc;

use crate::data_model::SourceLoc;

/// The low-level text cursor currently supplying source locations
pub trait InputScanner {
    fn source_loc(&self) -> SourceLoc;
    fn set_line(&mut self, line: i32);
    fn set_column(&mut self, column: i32);
    fn set_file(&mut self, name: &str);
    fn set_string(&mut self, string: i32);
}

/// Shared handle to the active scanner. Compilation is single threaded, so a
/// reference-counted cell is enough; swapping the handle swaps the scanner.
pub type ScannerHandle = Rc<RefCell<dyn InputScanner>>;

/// A scanner that only tracks a location. Used by hosts that drive their own
/// lexer and by tests.
#[derive(Debug, Clone, Default)]
pub struct SourceCursor {
    loc: SourceLoc,
}

impl SourceCursor {
    pub fn new(string: i32) -> Self {
        Self {
            loc: SourceLoc::new(string, 1, 0),
        }
    }

    /// Wrap into a handle suitable for `CompilationContext::set_scanner`
    pub fn into_handle(self) -> ScannerHandle {
        Rc::new(RefCell::new(self))
    }
}

impl InputScanner for SourceCursor {
    fn source_loc(&self) -> SourceLoc {
        self.loc.clone()
    }

    fn set_line(&mut self, line: i32) {
        self.loc.line = line;
    }

    fn set_column(&mut self, column: i32) {
        self.loc.column = column;
    }

    fn set_file(&mut self, name: &str) {
        self.loc.name = Some(name.to_string());
    }

    fn set_string(&mut self, string: i32) {
        self.loc.string = string;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_tracks_location() {
        let mut cursor = SourceCursor::new(2);
        cursor.set_line(40);
        cursor.set_column(7);
        cursor.set_file("common.glsl");

        let loc = cursor.source_loc();
        assert_eq!(loc.string, 2);
        assert_eq!(loc.line, 40);
        assert_eq!(loc.column, 7);
        assert_eq!(loc.name.as_deref(), Some("common.glsl"));
    }

    #[test]
    fn test_handle_shares_state() {
        let handle = SourceCursor::new(0).into_handle();
        let alias = handle.clone();
        alias.borrow_mut().set_line(9);
        assert_eq!(handle.borrow().source_loc().line, 9);
    }
}
