//! Emission sink for generated declarations
//!
//! Renderers decide *what* to emit and drive a [`CodeWriter`] with ordered
//! instructions. [`KotlinWriter`] turns those into indented Kotlin source and
//! tracks the imports and runtime dependencies the referenced symbols need.

use smithy_sdk_generator_common::{Symbol, SymbolDependency};
use std::collections::BTreeSet;

const INDENT: &str = "    ";

/// Ordered emission instructions
#[cfg_attr(test, mockall::automock)]
pub trait CodeWriter {
    /// Writes `header` and indents everything up to the matching `close_block`.
    ///
    /// Continuation lines of a multi-line header keep their own relative
    /// indentation.
    fn open_block(&mut self, header: &str);

    /// Dedents and writes `footer`
    fn close_block(&mut self, footer: &str);

    /// Writes one line of literal text
    fn write(&mut self, line: &str);

    /// Writes a documentation comment
    fn write_doc(&mut self, doc: &str);

    fn blank_line(&mut self);

    /// Records what `symbol` needs and returns the text to interpolate for it
    fn reference(&mut self, symbol: &Symbol) -> String;

    /// Like [`CodeWriter::reference`], but always fully qualified and never imported
    fn qualified_reference(&mut self, symbol: &Symbol) -> String;
}

/// Runs `body` between `open_block(header)` and `close_block(footer)`
pub fn with_block<W, F>(writer: &mut W, header: &str, footer: &str, body: F)
where
    W: CodeWriter + ?Sized,
    F: FnOnce(&mut W),
{
    writer.open_block(header);
    body(writer);
    writer.close_block(footer);
}

/// Kotlin source sink for a single file
#[derive(Debug, Clone)]
pub struct KotlinWriter {
    package: String,
    lines: Vec<String>,
    indent: usize,
    imports: BTreeSet<String>,
    dependencies: BTreeSet<SymbolDependency>,
}

impl KotlinWriter {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            lines: Vec::new(),
            indent: 0,
            imports: BTreeSet::new(),
            dependencies: BTreeSet::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn imports(&self) -> Vec<String> {
        self.imports.iter().cloned().collect()
    }

    pub fn dependencies(&self) -> Vec<SymbolDependency> {
        self.dependencies.iter().cloned().collect()
    }

    /// File body without package and imports
    pub fn body(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn push_line(&mut self, text: &str) {
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", INDENT.repeat(self.indent), text));
        }
    }
}

impl CodeWriter for KotlinWriter {
    fn open_block(&mut self, header: &str) {
        self.write(header);
        self.indent += 1;
    }

    fn close_block(&mut self, footer: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.write(footer);
    }

    fn write(&mut self, line: &str) {
        for part in line.split('\n') {
            self.push_line(part);
        }
    }

    fn write_doc(&mut self, doc: &str) {
        self.push_line("/**");
        for line in doc.trim().lines() {
            // Never let documentation close the comment early
            let escaped = line.trim_end().replace("*/", "*&#47;");
            if escaped.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", escaped));
            }
        }
        self.push_line(" */");
    }

    fn blank_line(&mut self) {
        self.lines.push(String::new());
    }

    fn reference(&mut self, symbol: &Symbol) -> String {
        self.dependencies
            .extend(symbol.dependencies.iter().cloned());

        // kotlin.* stays qualified so model names like `String` cannot shadow it
        let text = if symbol.namespace.is_empty() || symbol.namespace.starts_with("kotlin") {
            symbol.fully_qualified_name()
        } else if symbol.namespace == self.package {
            symbol.name.clone()
        } else {
            if let Some(path) = symbol.import_path() {
                self.imports.insert(path);
            }
            symbol.name.clone()
        };

        if symbol.nullable {
            format!("{}?", text)
        } else {
            text
        }
    }

    fn qualified_reference(&mut self, symbol: &Symbol) -> String {
        self.dependencies
            .extend(symbol.dependencies.iter().cloned());

        let text = symbol.fully_qualified_name();
        if symbol.nullable {
            format!("{}?", text)
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_indent() {
        let mut writer = KotlinWriter::new("com.example.model");
        with_block(&mut writer, "public class Foo {", "}", |w| {
            w.write("val a = 1");
            with_block(w, "fun b() {", "}", |w| w.write("return"));
        });

        assert_eq!(
            writer.body(),
            "public class Foo {\n    val a = 1\n    fun b() {\n        return\n    }\n}\n"
        );
    }

    #[test]
    fn test_multi_line_header() {
        let mut writer = KotlinWriter::new("p");
        with_block(&mut writer, "object A {", "}", |w| {
            with_block(w, "class B(\n    val c: Int,\n) {", "}", |w| w.write("fun d() = c"));
        });

        assert_eq!(
            writer.body(),
            "object A {\n    class B(\n        val c: Int,\n    ) {\n        fun d() = c\n    }\n}\n"
        );
    }

    #[test]
    fn test_reference_imports_runtime_symbols() {
        let mut writer = KotlinWriter::new("com.example.model");
        let instant = Symbol::new("aws.smithy.kotlin.runtime.time", "Instant")
            .with_dependency(SymbolDependency::new("aws.smithy.kotlin:runtime-core", "1.0.0"));

        assert_eq!(writer.reference(&instant), "Instant");
        assert_eq!(writer.reference(&instant.clone().into_nullable(false)), "Instant?");
        assert_eq!(
            writer.imports(),
            vec!["aws.smithy.kotlin.runtime.time.Instant".to_string()]
        );
        assert_eq!(writer.dependencies().len(), 1);
    }

    #[test]
    fn test_reference_builtins_and_local_types() {
        let mut writer = KotlinWriter::new("com.example.model");
        let int = Symbol::new("kotlin", "Int").into_nullable(true);
        let local = Symbol::new("com.example.model", "Forecast");

        assert_eq!(writer.reference(&int), "kotlin.Int?");
        assert_eq!(writer.reference(&local), "Forecast");
        assert!(writer.imports().is_empty());
    }

    #[test]
    fn test_qualified_reference_skips_import() {
        let mut writer = KotlinWriter::new("com.example.model");
        let alert = Symbol::new("com.example.alerts", "Alert")
            .with_dependency(SymbolDependency::new("com.example:alerts", "2.0.0"));

        assert_eq!(writer.qualified_reference(&alert), "com.example.alerts.Alert");
        assert_eq!(
            writer.qualified_reference(&alert.clone().into_nullable(false)),
            "com.example.alerts.Alert?"
        );
        assert!(writer.imports().is_empty());
        assert_eq!(writer.dependencies().len(), 1);
    }

    #[test]
    fn test_doc_comment_escaping() {
        let mut writer = KotlinWriter::new("p");
        writer.write_doc("Ends */ early\n\nSecond paragraph");
        assert_eq!(
            writer.body(),
            "/**\n * Ends *&#47; early\n *\n * Second paragraph\n */\n"
        );
    }

    #[test]
    fn test_with_block_on_mock_preserves_order() {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockCodeWriter::new();
        mock.expect_open_block()
            .withf(|h| h.to_string() == "a {")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        mock.expect_write()
            .withf(|l| l.to_string() == "x")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        mock.expect_close_block()
            .withf(|f| f.to_string() == "}")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        with_block(&mut mock, "a {", "}", |w| w.write("x"));
    }
}
