//! sheetgallery command-line tool
//!
//! Converts an Excel or CSV file into an HTML page with image thumbnails.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use log::debug;
use sheetgallery::{
    ConverterBuilder, DateFormat, ExportArtifact, ProcessingError, SheetSelector,
    EXPORT_FILE_NAME,
};

/// What to produce from the converted document
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    /// The HTML document itself
    Html,
    /// An `<a download>` element embedding the document as a data URI
    Link,
    /// The export artifact as JSON (file name, MIME type, base64 data)
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sheetgallery")]
#[command(about = "Convert an Excel/CSV file into an HTML page that shows image URLs as thumbnails")]
#[command(version)]
struct CliArgs {
    /// Input file (.xlsx, .xls or .csv)
    input: PathBuf,

    /// Output path ("-" for stdout). Defaults to output.html for --emit html, stdout otherwise
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output kind
    #[arg(long, value_enum, default_value = "html")]
    emit: Emit,

    /// Select the spreadsheet sheet by index (0-based)
    #[arg(long, value_name = "N", conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Select the spreadsheet sheet by name
    #[arg(long, value_name = "NAME")]
    sheet_name: Option<String>,

    /// Date format for spreadsheet date cells ("iso8601" or a strftime pattern)
    #[arg(long, value_name = "FMT", default_value = "iso8601")]
    date_format: String,

    /// Regex for placeholder column names to drop
    #[arg(long, value_name = "REGEX", default_value = sheetgallery::DEFAULT_PLACEHOLDER_PATTERN)]
    placeholder_pattern: String,

    /// Suppress progress and success messages
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() {
    env_logger::init();

    let args = CliArgs::parse();

    if !args.quiet {
        eprintln!("⏳ 正在处理文件，请稍候...");
    }

    match run(&args) {
        Ok(()) => {
            if !args.quiet {
                eprintln!("✅ 文件已成功转换！");
            }
        }
        Err(e) => {
            eprintln!("❌ 处理失败: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &CliArgs) -> Result<(), ProcessingError> {
    let mut builder = ConverterBuilder::new()
        .with_date_format(parse_date_format(&args.date_format))
        .with_placeholder_pattern(args.placeholder_pattern.as_str());

    if let Some(index) = args.sheet_index {
        builder = builder.with_sheet_selector(SheetSelector::Index(index));
    } else if let Some(ref name) = args.sheet_name {
        builder = builder.with_sheet_selector(SheetSelector::Name(name.clone()));
    }

    let converter = builder.build()?;
    let document = converter.convert_file(&args.input)?;

    let payload = match args.emit {
        Emit::Html => document.into_string(),
        Emit::Link => {
            let mut link = ExportArtifact::encode(&document).download_link();
            link.push('\n');
            link
        }
        Emit::Json => {
            let artifact = ExportArtifact::encode(&document);
            let mut json = serde_json::to_string_pretty(&artifact).map_err(|e| {
                ProcessingError::Io(io::Error::new(io::ErrorKind::InvalidData, e))
            })?;
            json.push('\n');
            json
        }
    };

    let destination = match (&args.output, args.emit) {
        (Some(path), _) => Some(path.clone()),
        (None, Emit::Html) => Some(PathBuf::from(EXPORT_FILE_NAME)),
        (None, _) => None,
    };

    match destination {
        Some(path) if path != Path::new("-") => {
            debug!("Writing {} bytes to {}", payload.len(), path.display());
            let mut file = File::create(&path)?;
            file.write_all(payload.as_bytes())?;
            file.flush()?;
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(payload.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}

fn parse_date_format(value: &str) -> DateFormat {
    if value.eq_ignore_ascii_case("iso8601") {
        DateFormat::Iso8601
    } else {
        DateFormat::Custom(value.to_string())
    }
}
