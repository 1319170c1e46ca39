use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use mdminutes::{
    ClockTime,
    FootnoteTable,
    Phrase,
    Session,
    annotate,
    export_file_name,
    relink_document,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Link meeting-minute timestamps to the meeting recording")]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Link `[HH:MM:SS]` stamps to their offset in the recording
    Link {
        #[command(flatten)]
        recording: RecordingOpts,
        #[command(flatten)]
        files: FileOpts,
    },
    /// Footnote the first use of each known acronym
    Footnotes {
        #[command(flatten)]
        table: TableOpts,
        #[command(flatten)]
        files: FileOpts,
    },
    /// Emit the minutes with a metadata header and acronym footnotes
    Export {
        /// Meeting title
        #[arg(long = "title", default_value = "")]
        title: String,
        #[command(flatten)]
        recording: RecordingOpts,
        /// Link timestamps before exporting
        #[arg(long = "link")]
        link: bool,
        #[command(flatten)]
        table: TableOpts,
        /// Write `<title>_<date>.md` into this directory instead of stdout
        #[arg(long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Minutes to export; standard input when omitted
        file: Option<PathBuf>,
    },
    /// Regenerate links in exported documents from their own header
    Relink {
        #[command(flatten)]
        files: FileOpts,
    },
    /// Print a timestamp line for the current time
    Stamp {
        /// Follow the timestamp with a stock phrase
        #[arg(long = "phrase", conflicts_with = "agenda")]
        phrase: Option<Phrase>,
        /// Print the standard agenda instead
        #[arg(long = "agenda")]
        agenda: bool,
    },
}

#[derive(clap::Args)]
struct FileOpts {
    /// Rewrite files in place
    #[arg(long = "in-place", requires = "files")]
    in_place: bool,
    /// Markdown files to process; standard input when omitted
    files: Vec<PathBuf>,
}

#[derive(clap::Args)]
struct RecordingOpts {
    /// Meeting start time as `HH:MM[:SS]` or `YYYY-MM-DDTHH:MM`
    #[arg(long = "start", env = "MDMINUTES_START_TIME")]
    start: Option<String>,
    /// Recording URL; any query string is dropped from generated links
    #[arg(long = "url", env = "MDMINUTES_RECORDING_URL")]
    url: Option<String>,
}

#[derive(clap::Args)]
struct TableOpts {
    /// Define an acronym as `ACRONYM|Definition`
    #[arg(long = "define", value_name = "ENTRY")]
    define: Vec<String>,
    /// Read `ACRONYM|Definition` lines from a file
    #[arg(long = "definitions", value_name = "FILE")]
    definitions: Option<PathBuf>,
    /// Start from an empty acronym table instead of the built-in one
    #[arg(long = "no-defaults")]
    no_defaults: bool,
}

impl TableOpts {
    fn table(&self) -> anyhow::Result<FootnoteTable> {
        let mut table = if self.no_defaults {
            FootnoteTable::empty()
        } else {
            FootnoteTable::default()
        };
        if let Some(path) = &self.definitions {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            table
                .add_definitions(&source)
                .with_context(|| format!("in {}", path.display()))?;
        }
        for entry in &self.define {
            table.add_entry(entry)?;
        }
        Ok(table)
    }
}

impl RecordingOpts {
    fn session(&self, text: String) -> Session {
        Session::with_text(text).with_recording(self.start.clone(), self.url.clone())
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Apply `transform` to every input, printing the result or rewriting the
/// file. Inputs are only written once their transformation has succeeded.
fn run_files<F>(opts: &FileOpts, mut transform: F) -> anyhow::Result<()>
where
    F: FnMut(String) -> anyhow::Result<String>,
{
    if opts.files.is_empty() {
        print!("{}", transform(read_input(None)?)?);
        return Ok(());
    }

    for path in &opts.files {
        let fixed = transform(read_input(Some(path))?)
            .with_context(|| format!("failed to process {}", path.display()))?;
        if opts.in_place {
            fs::write(path, fixed).with_context(|| format!("failed to write {}", path.display()))?;
        } else {
            print!("{fixed}");
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Entry point for the command-line tool that links minute timestamps to a
/// recording.
///
/// # Examples
///
/// ```sh
/// # Link stamps and print the result
/// mdminutes link --start 18:30 --url 'https://video.test/watch?v=abc' minutes.md
///
/// # Re-link an exported document in place after fixing its header
/// mdminutes relink --in-place Board_Meeting_2024-05-01.md
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Link { recording, files } => run_files(&files, |text| {
            let mut session = recording.session(text);
            session.process_timestamps()?;
            Ok(session.text)
        }),
        Command::Footnotes { table, files } => {
            let table = table.table()?;
            run_files(&files, |text| Ok(annotate(&text, &table)))
        }
        Command::Export {
            title,
            recording,
            link,
            table,
            out_dir,
            file,
        } => {
            let mut session = recording.session(read_input(file.as_deref())?);
            session.title = title;
            session.footnotes = table.table()?;
            if link {
                session.process_timestamps()?;
            }
            let document = session.export();
            match out_dir {
                Some(dir) => {
                    let path = dir.join(export_file_name(&session.title, Local::now().date_naive()));
                    fs::write(&path, document)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "exported minutes");
                    println!("{}", path.display());
                }
                None => print!("{document}"),
            }
            Ok(())
        }
        Command::Relink { files } => run_files(&files, |text| Ok(relink_document(&text)?.text)),
        Command::Stamp { phrase, agenda } => {
            let mut session = Session::new();
            let now = ClockTime::now();
            if agenda {
                session.insert_agenda(0)?;
                print!("{}", session.text);
            } else {
                match phrase {
                    Some(phrase) => session.insert_phrase(0, phrase, now)?,
                    None => session.insert_timestamp(0, 0, now)?,
                };
                println!("{}", session.text.trim_end());
            }
            Ok(())
        }
    }
}
