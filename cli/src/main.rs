use std::io::{self, IsTerminal};
use std::path::PathBuf;

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;
use wordindex::{EngineConfig, FileSource, Session};
use wordindex_cli::{OutputFormat, Renderer, Repl, Result};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "wordindex",
    about = "Build an in-memory inverted index over text files and query it"
)]
struct Opt {
    /// Run a menu command and exit instead of starting the interactive menu (repeatable)
    #[structopt(short = "e", long = "exec", number_of_values = 1)]
    exec: Vec<String>,

    /// Output format for results
    #[structopt(
        long,
        possible_values = &OutputFormat::variants(),
        case_insensitive = true,
        default_value = "text"
    )]
    format: OutputFormat,

    /// Maximum number of documents [env: WORDINDEX_MAX_DOCS]
    #[structopt(long = "max-docs")]
    max_docs: Option<usize>,

    /// Bucket count reported by stats [env: WORDINDEX_BUCKETS]
    #[structopt(long)]
    buckets: Option<usize>,

    /// Default K for the top terms report [env: WORDINDEX_TOP_TERMS]
    #[structopt(long)]
    top: Option<usize>,

    /// Log more (-v info, -vv debug); RUST_LOG is used otherwise
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Files to index at start-up
    #[structopt(parse(from_os_str))]
    files: Vec<PathBuf>,
}

impl Opt {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        if let Some(max_docs) = self.max_docs.filter(|v| *v > 0) {
            config.max_documents = max_docs;
        }
        if let Some(buckets) = self.buckets.filter(|v| *v > 0) {
            config.bucket_count = buckets;
        }
        if let Some(top) = self.top.filter(|v| *v > 0) {
            config.top_terms = top;
        }
        config
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        _ => Some("debug"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(format!("wordindex={0},wordindex_cli={0}", level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("wordindex=warn,wordindex_cli=warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    init_logging(opt.verbose);

    let mut session = Session::new(opt.engine_config());
    let renderer = Renderer::new(opt.format);

    if !opt.files.is_empty() {
        let report = session.build(opt.files.iter().map(FileSource::new));
        println!("{}", renderer.build_report(&report)?);
    }

    let mut repl = Repl::new(&mut session, renderer);
    if !opt.exec.is_empty() {
        for line in &opt.exec {
            let (reply, flow) = repl.execute_line(line);
            if let Some(reply) = reply {
                println!("{}", reply);
            }
            if flow == wordindex_cli::Flow::Quit {
                break;
            }
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    repl.run(stdin.lock(), io::stdout().lock(), interactive)
}
