//! File conversion: single documents, stdin, and parallel batches.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use multimark_core::{DispatchTable, MultimarkError};
use multimark_render::{Options, Renderer};
use rayon::prelude::*;

/// How the input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full Markdown document.
    Document,
    /// One inline run: code spans and smartened text, no block structure.
    Inline,
}

/// Outcome of a batch conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Inputs converted successfully, in input order.
    pub converted: Vec<PathBuf>,
    /// Inputs that failed, with their errors.
    pub failed: Vec<(PathBuf, MultimarkError)>,
}

/// Converts documents with one configuration.
///
/// Every document gets its own renderer, hence its own quote state, but all of
/// them share a single dispatch table.
#[derive(Debug, Clone)]
pub struct Converter {
    options: Options,
    table: Arc<DispatchTable>,
    mode: Mode,
}

impl Converter {
    /// Builds the shared dispatch table from `options.flags`.
    pub fn new(options: Options, mode: Mode) -> Self {
        let table = Arc::new(DispatchTable::new(options.flags));
        Self {
            options,
            table,
            mode,
        }
    }

    /// Converts one document held in memory.
    pub fn convert_str(&self, source: &str) -> Result<String, MultimarkError> {
        let mut renderer = Renderer::with_table(self.options.clone(), Arc::clone(&self.table));
        match self.mode {
            Mode::Document => renderer.render(source),
            Mode::Inline => Ok(renderer.render_inline(source)),
        }
    }

    /// Converts `input` (`-` for stdin) and writes to `output`, or stdout.
    ///
    /// Errors name the file they concern.
    pub fn convert_file(&self, input: &Path, output: Option<&Path>) -> Result<(), MultimarkError> {
        let name = display_name(input);
        let source = read_input(input).map_err(|e| e.in_file(&name))?;
        let html = self.convert_str(&source).map_err(|e| e.in_file(&name))?;

        match output {
            Some(path) => {
                fs::write(path, html + "\n")
                    .map_err(|e| MultimarkError::from(e).in_file(path.display().to_string()))?;
                log::info!("{} -> {}", name, path.display());
            }
            None => {
                write_html(&mut io::stdout().lock(), &html)
                    .map_err(|e| e.in_file("<stdout>"))?;
                log::info!("{} -> <stdout>", name);
            }
        }
        Ok(())
    }

    /// Converts every input in parallel, writing `<stem>.html` next to each.
    ///
    /// A failing input does not stop the others. Stdin and inputs that would
    /// be overwritten by their own output are refused.
    pub fn convert_batch(&self, inputs: &[PathBuf]) -> BatchReport {
        let results: Vec<(PathBuf, Result<(), MultimarkError>)> = inputs
            .par_iter()
            .map(|input| (input.clone(), self.convert_batch_input(input)))
            .collect();

        let mut report = BatchReport::default();
        for (input, result) in results {
            match result {
                Ok(()) => report.converted.push(input),
                Err(e) => report.failed.push((input, e)),
            }
        }
        report
    }

    fn convert_batch_input(&self, input: &Path) -> Result<(), MultimarkError> {
        if input == Path::new("-") {
            return Err(MultimarkError::InvalidInput {
                path: display_name(input),
                reason: "stdin cannot be part of a batch".to_string(),
            });
        }
        let output = html_path(input);
        if output == input {
            return Err(MultimarkError::InvalidInput {
                path: display_name(input),
                reason: "its output would overwrite it".to_string(),
            });
        }
        self.convert_file(input, Some(&output))
    }
}

/// Output path for a batch input: same directory, `.html` extension.
pub fn html_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

fn display_name(input: &Path) -> String {
    if input == Path::new("-") {
        "<stdin>".to_string()
    } else {
        input.display().to_string()
    }
}

fn write_html(out: &mut impl Write, html: &str) -> Result<(), MultimarkError> {
    out.write_all(html.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

fn read_input(input: &Path) -> Result<String, MultimarkError> {
    let bytes = if input == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input)?
    };
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use multimark_core::{Flags, QuoteStyle};

    #[test]
    fn html_paths() {
        assert_eq!(html_path(Path::new("docs/a.md")), PathBuf::from("docs/a.html"));
        assert_eq!(html_path(Path::new("notes")), PathBuf::from("notes.html"));
    }

    #[test]
    fn converts_in_both_modes() {
        let document = Converter::new(Options::default(), Mode::Document);
        assert_eq!(
            document.convert_str("a -- `b -- c`").unwrap(),
            "<p>a &mdash; <code>b -- c</code></p>"
        );

        let inline = Converter::new(Options::default(), Mode::Inline);
        assert_eq!(
            inline.convert_str("# a -- `b -- c`").unwrap(),
            "# a &mdash; <code>b -- c</code>"
        );
    }

    #[test]
    fn documents_do_not_share_quote_state() {
        let converter = Converter::new(Options::default(), Mode::Inline);
        assert_eq!(converter.convert_str("\"").unwrap(), "&ldquo;");
        assert_eq!(converter.convert_str("\"").unwrap(), "&ldquo;");
    }

    #[test]
    fn converts_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        let output = dir.path().join("out.html");
        fs::write(&input, "It's \"here\"...").unwrap();

        let options = Options {
            flags: Flags::new().with_quotes(QuoteStyle::Angled),
            ..Default::default()
        };
        Converter::new(options, Mode::Document)
            .convert_file(&input, Some(&output))
            .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<p>It&rsquo;s &laquo;here&raquo;&hellip;</p>\n"
        );
    }

    #[test]
    fn batch_reports_failures_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.md");
        let bad = dir.path().join("bad.md");
        let missing = dir.path().join("missing.md");
        fs::write(&good, "(c) 2024").unwrap();
        fs::write(&bad, [0xff, 0xfe, b'x']).unwrap();

        let converter = Converter::new(Options::default(), Mode::Document);
        let report = converter.convert_batch(&[good.clone(), bad.clone(), missing.clone()]);

        assert_eq!(report.converted, vec![good]);
        assert_eq!(report.failed.len(), 2);
        assert!(matches!(report.failed[0], (ref p, MultimarkError::FileEncoding { .. }) if *p == bad));
        assert!(matches!(report.failed[1], (ref p, MultimarkError::FileIo { .. }) if *p == missing));
        assert_eq!(
            fs::read_to_string(dir.path().join("good.html")).unwrap(),
            "<p>&copy; 2024</p>\n"
        );
    }

    #[test]
    fn batch_refuses_to_overwrite_its_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        fs::write(&page, "# Title\n\n\"keep me\"").unwrap();

        let converter = Converter::new(Options::default(), Mode::Document);
        let report = converter.convert_batch(&[page.clone(), PathBuf::from("-")]);

        assert!(report.converted.is_empty());
        assert!(matches!(
            report.failed[0],
            (ref p, MultimarkError::InvalidInput { .. }) if *p == page
        ));
        assert!(matches!(
            report.failed[1],
            (_, MultimarkError::InvalidInput { ref path, .. }) if path == "<stdin>"
        ));
        assert_eq!(fs::read_to_string(&page).unwrap(), "# Title\n\n\"keep me\"");
    }

    #[test]
    fn read_errors_name_the_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.md");

        let converter = Converter::new(Options::default(), Mode::Document);
        let err = converter.convert_file(&missing, None).unwrap_err();
        assert!(
            err.to_string()
                .starts_with(&format!("IO error on {}: ", missing.display()))
        );
    }

    #[test]
    fn html_is_written_with_a_trailing_newline() {
        let mut out = Vec::new();
        write_html(&mut out, "<p>&hellip;</p>").unwrap();
        assert_eq!(out, b"<p>&hellip;</p>\n");
    }
}
