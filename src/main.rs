use std::fmt::Write as _;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser as ClapParser, ValueEnum};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use xml2tree::{
    error::{IOError, ParseError, Result},
    utils::{read_file, write_file},
    FormatConfig, Node, Parser, ParserConfig,
};

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output rendering
    #[arg(short, long, value_enum, default_value_t = FormatArg::Encoded)]
    format: FormatArg,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum element nesting depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Log parser progress at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Compact JSON on one line
    Encoded,
    /// Indented JSON
    Pretty,
    /// One indented line per element
    Outline,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let content = read_input(args.input.as_ref())?;

    let mut config = ParserConfig::default();
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    debug!("Parser configuration: {}", config);

    let root = Parser::with_config(config).parse(&content)?;
    let rendered = render(&root, args.format);

    if let Some(output_path) = args.output {
        info!("Writing output to {}", output_path.display());
        write_file(&output_path, &rendered)?;
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading file: {}", path.display());
            read_file(path)
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(|e| {
                ParseError::from(IOError::ReadError("stdin".to_string())).with_source(e)
            })?;
            Ok(buffer)
        }
    }
}

fn render(root: &Node, format: FormatArg) -> String {
    match format {
        FormatArg::Encoded => root.to_encoded_text(),
        FormatArg::Pretty => root.to_encoded_text_with(&FormatConfig::pretty()),
        FormatArg::Outline => {
            let mut out = String::new();
            write_outline(root, 0, &mut out);
            out.trim_end().to_string()
        }
    }
}

fn write_outline(node: &Node, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(node.name());
    for (key, value) in node.attributes() {
        let _ = write!(out, " {}={:?}", key, value);
    }
    if let Some(content) = node.content() {
        let _ = write!(out, ": {:?}", content.trim());
    }
    out.push('\n');
    for child in node.children() {
        write_outline(child, depth.saturating_add(1), out);
    }
}
