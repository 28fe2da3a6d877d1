//! Scene CLI - build, inspect and edit scene documents from the shell.
//!
//! Documents are read from and written to KDL files. Edits are JSON
//! commands and queries, the same messages `api::process_message` accepts.

mod tree;

use anyhow::{Context, Result};
use api::{execute_query, process_message, Query};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use scene_graph::Document;
use script::BuiltinScript;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Scene CLI - build and inspect scene documents
#[derive(Parser)]
#[command(name = "scene")]
#[command(about = "Command-line interface for scene documents")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a built-in script (first-draw, second-draw, another-script,
    /// selected-layers, pagebot-demo)
    Run {
        script: BuiltinScript,
        /// Document to run against (default: a new document)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Where to save the result (default: print the tree)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Select layers by name and print the selected layers report
    Selection {
        file: PathBuf,
        /// Name of a layer to select (repeatable)
        #[arg(short, long = "select")]
        select: Vec<String>,
    },

    /// Apply a JSON command or query to a document
    Exec {
        file: PathBuf,
        /// JSON command to execute
        json: String,
        /// Where to save the result
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a JSON query against a document
    Query {
        file: PathBuf,
        /// JSON query to execute
        json: String,
    },

    /// Print the layer tree of a document
    Tree { file: PathBuf },

    /// Start an interactive session reading JSON messages from stdin
    Session {
        /// Document to start from (default: a new document)
        file: Option<PathBuf>,
        /// Where `save` writes the document (default: FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            script,
            input,
            output,
        } => run_script(script, input.as_deref(), output.as_deref()),
        Commands::Selection { file, select } => print_selection(&file, &select),
        Commands::Exec { file, json, output } => exec_message(&file, &json, output.as_deref()),
        Commands::Query { file, json } => run_query(&file, &json),
        Commands::Tree { file } => {
            let doc = load(&file)?;
            print!("{}", tree::render(&doc));
            Ok(())
        }
        Commands::Session { file, output } => session(file.as_deref(), output.or(file.clone())),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load(path: &Path) -> Result<Document> {
    interchange::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn save(doc: &Document, path: &Path) -> Result<()> {
    interchange::save(doc, path).with_context(|| format!("Failed to save {}", path.display()))
}

fn load_or_new(path: Option<&Path>) -> Result<Document> {
    match path {
        Some(path) => load(path),
        None => Ok(Document::default()),
    }
}

/// Run a built-in script and save or print the result.
fn run_script(script: BuiltinScript, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let mut doc = load_or_new(input)?;
    let lines = script
        .run(&mut doc)
        .with_context(|| format!("Script {} failed", script))?;
    for line in lines {
        println!("{}", line);
    }

    match output {
        Some(path) => save(&doc, path),
        None => {
            print!("{}", tree::render(&doc));
            Ok(())
        }
    }
}

/// Select layers by name, then report the selection.
fn print_selection(file: &Path, names: &[String]) -> Result<()> {
    let mut doc = load(file)?;
    for name in names {
        let ids = doc.find_by_name(name);
        if ids.is_empty() {
            anyhow::bail!("No layer named {:?} in {}", name, file.display());
        }
        doc.select(ids)?;
    }
    for line in script::selected_layers_report(&doc) {
        println!("{}", line);
    }
    Ok(())
}

/// Apply a single message and save the document if asked to.
fn exec_message(file: &Path, json: &str, output: Option<&Path>) -> Result<()> {
    let mut doc = load(file)?;
    print_response(&process_message(&mut doc, json))?;
    if let Some(path) = output {
        save(&doc, path)?;
    }
    Ok(())
}

/// Run a single query.
fn run_query(file: &Path, json: &str) -> Result<()> {
    let doc = load(file)?;
    let query: Query = serde_json::from_str(json).with_context(|| "Invalid query JSON")?;
    let result = execute_query(&doc, query);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn print_response(response: &str) -> Result<()> {
    // Pretty print the response
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(response) {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", response.trim());
    }
    Ok(())
}

/// Interactive session: one JSON message per line.
fn session(file: Option<&Path>, output: Option<PathBuf>) -> Result<()> {
    let mut doc = load_or_new(file)?;
    println!("Editing {:?}. Enter commands (JSON) or 'help' for usage. Ctrl+D to exit.\n", doc.name());

    let stdin = std::io::stdin();
    loop {
        print!("scene> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "help" | "?" => print_help(),
            "quit" | "exit" => break,
            "tree" => print!("{}", tree::render(&doc)),
            "selection" => {
                for line in script::selected_layers_report(&doc) {
                    println!("{}", line);
                }
            }
            "pages" => {
                let query = Query::GetPages;
                print_response(&process_message(&mut doc, &serde_json::to_string(&query)?))?;
            }
            "count" => {
                let query = Query::GetNodeCount;
                print_response(&process_message(&mut doc, &serde_json::to_string(&query)?))?;
            }
            "save" => match &output {
                Some(path) => {
                    save(&doc, path)?;
                    println!("Saved {}", path.display());
                }
                None => println!("No file to save to. Start the session with --output FILE."),
            },
            _ => {
                if let Some(name) = input.strip_prefix("run ") {
                    match name.trim().parse::<BuiltinScript>() {
                        Ok(script) => match script.run(&mut doc) {
                            Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
                            Err(e) => println!("Script {} failed: {}", script, e),
                        },
                        Err(_) => println!("Unknown script {:?}", name.trim()),
                    }
                } else {
                    // Try to parse as command or query
                    print_response(&process_message(&mut doc, input))?;
                }
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("Scene CLI Interactive Mode");
    println!("==========================");
    println!();
    println!("Built-in commands:");
    println!("  tree        - Print the layer tree");
    println!("  selection   - Print the selected layers");
    println!("  pages       - List pages");
    println!("  count       - Get node count");
    println!("  run SCRIPT  - Run a built-in script");
    println!("  save        - Save to the output file");
    println!("  help, ?     - Show this help");
    println!("  quit, exit  - Exit interactive mode");
    println!();
    println!("JSON Commands (examples):");
    println!("  {{\"type\": \"create_artboard\", \"frame\": {{\"x\": 0, \"y\": 0, \"width\": 400, \"height\": 400}}}}");
    println!("  {{\"type\": \"create_shape\", \"shape_type\": \"Oval\", \"frame\": {{\"x\": 253, \"y\": 213, \"width\": 122, \"height\": 122}}, \"fills\": [\"#FF0000\"]}}");
    println!("  {{\"type\": \"select\", \"target\": {{\"query\": {{\"by_name\": \"square1\"}}}}}}");
    println!("  {{\"type\": \"move\", \"target\": \"selection\", \"delta\": [10, 0]}}");
    println!("  {{\"type\": \"delete\", \"target\": \"selection\"}}");
    println!();
    println!("JSON Queries:");
    println!("  {{\"type\": \"get_selection\"}}");
    println!("  {{\"type\": \"get_selected_layers\"}}");
    println!("  {{\"type\": \"get_children\"}}");
    println!("  {{\"type\": \"get_bounds\"}}");
}
