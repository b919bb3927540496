//! multimark - Markdown to HTML with smart punctuation

mod convert;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use multimark_core::{DashStyle, FractionScope, MultimarkError, QuoteStyle};
use multimark_render::Options;

use convert::{Converter, Mode};

#[derive(Parser, Debug)]
#[command(name = "multimark")]
#[command(version, about = "Markdown to HTML with smart punctuation", long_about = None)]
#[command(after_help = "EXAMPLES:
    multimark notes.md                  Print HTML to stdout
    multimark notes.md notes.html       Write HTML to a file
    multimark --batch docs/*.md         Convert many files in parallel
    echo '\"Hi\" -- there' | multimark --inline -")]
struct Cli {
    /// Input Markdown file, or - for stdin
    #[arg(value_name = "INPUT", required_unless_present = "batch")]
    input: Option<PathBuf>,

    /// Output HTML file (stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Convert every file in parallel, writing <name>.html next to each
    #[arg(long, value_name = "INPUT", num_args = 1.., conflicts_with_all = ["input", "output"])]
    batch: Vec<PathBuf>,

    /// Treat the input as a single inline run (code spans only, no blocks)
    #[arg(long)]
    inline: bool,

    /// Disable smart punctuation
    #[arg(long)]
    no_smartypants: bool,

    /// Use angled quotes (guillemets)
    #[arg(long)]
    angled: bool,

    /// Pad double quotes with non-breaking spaces
    #[arg(long)]
    nbsp: bool,

    /// LaTeX dashes: --- em dash, -- en dash
    #[arg(long, conflicts_with = "no_dashes")]
    latex_dashes: bool,

    /// Leave dashes alone
    #[arg(long)]
    no_dashes: bool,

    /// Convert any digits/digits to a fraction
    #[arg(long)]
    fractions: bool,

    /// Pass raw HTML through instead of escaping it
    #[arg(long)]
    raw_html: bool,

    /// JSON file with rendering options; switches override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> Result<Options, MultimarkError> {
        let mut options = match &self.config {
            Some(path) => Options::from_json(&fs::read_to_string(path)?)?,
            None => Options::default(),
        };

        if self.no_smartypants {
            options.smartypants = false;
        }
        if self.angled {
            options.flags.quotes = QuoteStyle::Angled;
        }
        if self.nbsp {
            options.flags.quotes_nbsp = true;
        }
        if self.latex_dashes {
            options.flags.dashes = DashStyle::Latex;
        }
        if self.no_dashes {
            options.flags.dashes = DashStyle::Off;
        }
        if self.fractions {
            options.flags.fractions = FractionScope::Any;
        }
        if self.raw_html {
            options.allow_raw_html = true;
        }
        Ok(options)
    }

    fn mode(&self) -> Mode {
        if self.inline { Mode::Inline } else { Mode::Document }
    }
}

fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, MultimarkError> {
    let converter = Converter::new(cli.options()?, cli.mode());

    if !cli.batch.is_empty() {
        let report = converter.convert_batch(&cli.batch);
        // Every batch error already names its file.
        for (_, e) in &report.failed {
            eprintln!("error: {e}");
        }
        log::info!(
            "converted {} of {} file(s)",
            report.converted.len(),
            cli.batch.len()
        );
        return Ok(if report.failed.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let Some(input) = &cli.input else {
        return Err(MultimarkError::InternalError("no input given".to_string()));
    };
    converter.convert_file(input, cli.output.as_deref())?;
    Ok(ExitCode::SUCCESS)
}
