use bindery_driver::Driver;
use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bindery")]
#[command(author, version, about = "Wrapper-glue generator for the Helio toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate wrapper variable declarations from parsed header records
    Generate {
        /// Declaration records (JSON) produced by the header parser
        records: PathBuf,

        /// Class hierarchy file; heuristics apply when omitted
        #[arg(long)]
        hierarchy: Option<PathBuf>,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the parsed records or the rendered declarations
    Dump {
        /// Declaration records to inspect
        records: PathBuf,

        /// What to print
        #[arg(long, default_value = "records")]
        format: DumpFormat,

        /// Class hierarchy file; heuristics apply when omitted
        #[arg(long)]
        hierarchy: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DumpFormat {
    /// Dump the parsed declaration records
    Records,
    /// Dump the rendered declaration stream
    Decls,
}

/// Install the tracing subscriber, but only when the environment asks for
/// it; `BINDERY_LOG` takes precedence over `RUST_LOG`.
fn init_tracing() {
    let filter = std::env::var("BINDERY_LOG").or_else(|_| std::env::var("RUST_LOG"));
    let Ok(filter) = filter else { return };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn make_driver(hierarchy: Option<PathBuf>) -> Result<Driver> {
    match hierarchy {
        Some(path) => {
            let table = bindery_hierarchy::load(&path)
                .map_err(|e| miette::miette!("Failed to load hierarchy {}: {}", path.display(), e))?;
            Ok(Driver::with_hierarchy(table))
        }
        None => Ok(Driver::new()),
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            records,
            hierarchy,
            output,
        } => {
            let driver = make_driver(hierarchy)?;
            let mut classes = driver.parse_records(&records)?;
            let text = driver.render(&mut classes);

            match output {
                Some(ref path) => {
                    std::fs::write(path, &text)
                        .map_err(|e| miette::miette!("Failed to write declarations: {}", e))?;
                    println!("Wrote declarations to {}", path.display());
                }
                None => print!("{}", text),
            }
        }

        Commands::Dump {
            records,
            format,
            hierarchy,
        } => {
            let driver = make_driver(hierarchy)?;
            let mut classes = driver.parse_records(&records)?;

            match format {
                DumpFormat::Records => println!("{:#?}", classes),
                DumpFormat::Decls => print!("{}", driver.render(&mut classes)),
            }
        }
    }

    Ok(())
}
