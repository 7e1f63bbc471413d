mod cli;
mod error;
mod format;
mod io;

use clap::Parser as _;
use modit_core::{DELTA_UNBOUNDED, MotifSolver, parse_graph};

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;

/// Seed interval between `--verbose` progress lines.
const PROGRESS_EVERY: usize = 1000;

fn main() {
    #[cfg(unix)]
    install_sigpipe_default();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and must exit 0; real
            // argument problems exit 1 per the tool's contract.
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print().unwrap_or_default();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Reads the graph, mines it, and writes the report to stdout.
///
/// # Errors
///
/// Returns a [`CliError`] for unreadable input, a malformed graph file,
/// bounds that admit nothing, or a stdout write failure.
fn run(cli: &Cli) -> Result<(), CliError> {
    let text = io::read_input(&cli.target)?;
    let directed = !cli.undirected;
    let graph = parse_graph(&text, directed).map_err(|error| CliError::Parse {
        source: cli.target.label(),
        error,
    })?;

    if cli.verbose {
        eprintln!(
            "graph: {} nodes, {} edges, {}",
            graph.num_nodes(),
            graph.num_edges(),
            if directed { "directed" } else { "undirected" }
        );
    }

    let solver = MotifSolver::new(&graph, cli.max_nodes, cli.max_edges)
        .map_err(|error| CliError::Bounds { error })?;
    let delta = cli.delta.unwrap_or(DELTA_UNBOUNDED);

    let counts = if cli.verbose {
        solver.find_motifs_with_progress(delta, |p| {
            if p.seeds_done > 0 && p.seeds_done % PROGRESS_EVERY == 0 {
                eprintln!(
                    "seeds {}/{}: {} classes, {} occurrences",
                    p.seeds_done, p.seed_total, p.classes, p.occurrences
                );
            }
            true
        })
    } else {
        solver.find_motifs(delta)
    };

    if cli.verbose {
        let occurrences: u64 = counts.values().sum();
        eprintln!(
            "mined {} motif classes from {} occurrences",
            counts.len(),
            occurrences
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Human => format::write_human(&mut out, &counts, cli.quiet),
        OutputFormat::Json => format::write_json(&mut out, &counts),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

/// Resets `SIGPIPE` to its default disposition (`SIG_DFL`).
///
/// Rust's runtime ignores `SIGPIPE` by default, so a pipeline like
/// `modit -t graph.txt | head` would surface as a write error instead of
/// the conventional silent termination. Restoring the default disposition
/// lets the kernel end the process the standard Unix way when the read end
/// of the pipe closes.
#[cfg(unix)]
fn install_sigpipe_default() {
    // SAFETY: signal() is called during single-threaded startup before any
    // other threads exist, and SIG_DFL is a valid disposition for SIGPIPE.
    // The previous handler is intentionally discarded.
    //
    // The workspace denies `unsafe_code`; this is the one unavoidable libc
    // call, so the allow is scoped to exactly this block.
    #[allow(unsafe_code)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
}
