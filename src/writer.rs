use std::fmt::{self, Write};

/// Text buffer that prefixes every write with one tab per indent level.
///
/// Callers supply their own newlines; the indent is applied once per call, so
/// each `printf`/`writeln!` is expected to carry exactly one line.
#[derive(Debug, Default)]
pub struct GraphWriter {
    buf: String,
    depth: usize,
    indent: String,
}

impl GraphWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `indent + args` to the buffer.
    pub fn printf(&mut self, args: fmt::Arguments<'_>) {
        self.buf.push_str(&self.indent);
        // Writing into a String cannot fail.
        let _ = self.buf.write_fmt(args);
    }

    /// Lets `write!` and `writeln!` target the writer directly.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.printf(args);
    }

    /// Write a bare line break, without indentation.
    pub fn newline(&mut self) {
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
        self.refresh_indent();
    }

    /// Step back one level. Unbalanced calls stay at depth zero.
    pub fn unindent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.refresh_indent();
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn result(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn refresh_indent(&mut self) {
        self.indent = "\t".repeat(self.depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_without_indent_at_depth_zero() {
        let mut w = GraphWriter::new();
        w.printf(format_args!("graph {{\n"));
        assert_eq!(w.result(), "graph {\n");
    }

    #[test]
    fn prefixes_one_tab_per_level() {
        let mut w = GraphWriter::new();
        w.indent();
        writeln!(w, "\"a\"");
        w.indent();
        writeln!(w, "\"b\"");
        w.unindent();
        writeln!(w, "\"c\"");
        assert_eq!(w.result(), "\t\"a\"\n\t\t\"b\"\n\t\"c\"\n");
    }

    #[test]
    fn newline_is_not_indented() {
        let mut w = GraphWriter::new();
        w.indent();
        w.newline();
        assert_eq!(w.result(), "\n");
    }

    #[test]
    fn unbalanced_unindent_saturates() {
        let mut w = GraphWriter::new();
        w.unindent();
        assert_eq!(w.depth(), 0);
        writeln!(w, "}}");
        assert_eq!(w.into_string(), "}\n");
    }
}
