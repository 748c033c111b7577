use clap::Parser;
use folio::{AnchorOptions, PipelineBuilder, PipelineError, RenderOptions};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Render a JSON report template to PDF
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Render band-based JSON templates to PDF", long_about = None)]
struct Args {
    /// Path to the template JSON file
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// Path to the data JSON file. An empty object is used when omitted.
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Where to write the PDF
    #[arg(short, long, value_name = "FILE", default_value = "out.pdf")]
    output: PathBuf,

    /// Directory relative image paths resolve against. Defaults to the
    /// template's directory.
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Exit with an error if any warning is reported
    #[arg(long)]
    strict: bool,

    /// Report anchor ids declared more than once
    #[arg(long)]
    warn_duplicate_anchors: bool,

    /// Write uncompressed content streams
    #[arg(long)]
    no_compress: bool,

    /// Print the page count and diagnostics as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        if let PipelineError::Strict { diagnostics } = &e {
            for diagnostic in diagnostics {
                eprintln!("  {}", diagnostic);
            }
        }
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), PipelineError> {
    let args = Args::parse();

    let data: Value = match &args.data {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Value::Object(Default::default()),
    };

    let mut builder = PipelineBuilder::new();
    if let Some(dir) = &args.base_dir {
        builder = builder.with_base_path(dir);
    }
    let pipeline = builder
        .with_template_file(&args.template)?
        .with_anchor_options(AnchorOptions {
            warn_on_duplicates: args.warn_duplicate_anchors,
        })
        .build()?;

    let options = RenderOptions {
        strict: args.strict,
        compress: !args.no_compress,
    };
    let output = pipeline.render_sync(data, &options)?;
    fs::write(&args.output, &output.bytes)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    println!("Wrote {} page(s) to {}", output.page_count, args.output.display());
    for diagnostic in output.warnings() {
        println!("  {}", diagnostic);
    }
    Ok(())
}
