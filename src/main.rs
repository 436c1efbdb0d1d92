use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use spellsweep::cli::output::{self, OutputFormat};
use spellsweep::cli::prompt::{self, Console};
use spellsweep::config::Overrides;
use spellsweep::review::correction::DiskUpdater;
use spellsweep::review::ReviewSession;
use spellsweep::scan::progress::{ConsoleReporter, Silent, StatusReporter};
use spellsweep::{dict, scan, Config, Error, SpellChecker};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "spellsweep")]
#[command(version, about = "Find recurring misspellings in a source tree and fix them interactively", long_about = None)]
struct Cli {
    /// Directory to sweep before prompting for more
    #[arg(value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Config file (defaults to ./.spellsweep.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Language/dictionary to use (e.g., en_US, en_GB)
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Word list or compiled .dict file to use instead of the installed dictionary
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Personal dictionary file
    #[arg(long, global = true)]
    personal_dict: Option<PathBuf>,

    /// File extensions to scan (comma separated)
    #[arg(short = 'e', long = "ext", value_delimiter = ',', global = true)]
    extensions: Vec<String>,

    /// Files handed to each scan worker
    #[arg(long, global = true)]
    files_per_worker: Option<usize>,

    /// Scan threads (defaults to the number of CPUs)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Groups shown per review page
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Minimum occurrences for a word to be reported
    #[arg(long, global = true)]
    threshold: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Sweep a directory and print the recurring suspects without prompting
    Report {
        /// Directory to sweep
        directory: PathBuf,

        /// Output format (text, json)
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,

        /// Exit with code 0 even if suspects remain
        #[arg(long)]
        no_fail: bool,
    },
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Download a dictionary
    Download {
        /// Language code (e.g., en_US, en_GB)
        language: String,
    },
    /// Update all dictionaries
    Update,
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config.clone(),
            language: self.language.clone(),
            dictionary: self.dictionary.clone(),
            personal_dictionary: self.personal_dict.clone(),
            files_per_worker: self.files_per_worker,
            worker_threads: self.threads,
            review_page_size: self.page_size,
            noise_threshold: self.threshold,
            extensions: self.extensions.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellsweep", &mut io::stdout());
        return Ok(());
    }

    let colored = !cli.no_color;
    if !colored {
        colored::control::set_override(false);
    }

    match &cli.command {
        Some(Commands::Dict { action }) => handle_dict(action),
        Some(Commands::Report {
            directory,
            format,
            no_fail,
        }) => {
            let found = report(directory, *format, &cli.overrides(), colored)?;
            if found > 0 && !no_fail {
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            let mut console = prompt::stdio(colored);
            if let Err(err) = interactive(&mut console, cli.directory.clone(), cli.overrides()) {
                // Ctrl-D mid-review ends the session like 'q' does
                if !matches!(err.downcast_ref::<Error>(), Some(Error::InputClosed)) {
                    output::print_error(&err, colored);
                }
            }
            println!("\nExiting now...\n");
            Ok(())
        }
    }
}

fn handle_dict(action: &DictCommands) -> Result<()> {
    match action {
        DictCommands::List => dict::manager::list_dictionaries(),
        DictCommands::Download { language } => dict::manager::download_dictionary(language),
        DictCommands::Update => dict::manager::update_dictionaries(),
        DictCommands::Info { language } => dict::manager::show_info(language),
    }
}

/// Returns the number of groups that survived filtering.
fn report(directory: &Path, format: OutputFormat, overrides: &Overrides, colored: bool) -> Result<usize> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let config = Config::load(overrides.clone())?;
    let checker = SpellChecker::from_config(&config)?;

    let console_reporter = ConsoleReporter { colored };
    let reporter: &dyn StatusReporter = match format {
        OutputFormat::Json => &Silent,
        OutputFormat::Text => &console_reporter,
    };

    let sweep = scan::sweep(directory, &checker, reporter, &config)?;
    println!(
        "{}",
        output::render_report(sweep.files_checked, &sweep.result, colored, format)
    );

    Ok(sweep.result.groups.len())
}

/// Prompt for directories until the operator quits. Each valid directory is
/// swept and its suspects reviewed.
fn interactive<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    first: Option<PathBuf>,
    overrides: Overrides,
) -> Result<()> {
    let config = Config::load(overrides)?;
    let mut checker: Option<SpellChecker> = None;
    let mut pending = first.map(|p| p.display().to_string());

    loop {
        let answer = match pending.take() {
            Some(dir) => dir,
            None => match console.ask("\nEnter directory or 'q' to quit. >> ") {
                Ok(answer) => answer,
                Err(Error::InputClosed) => return Ok(()),
                Err(e) => return Err(e.into()),
            },
        };

        if answer.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let directory = Path::new(&answer);
        if !directory.is_dir() {
            console.say(format!(
                "\nI couldn't find the directory: {}. Try again.",
                output::display_path(directory)
            ))?;
            continue;
        }

        console.say(format!("\nYou entered: {}\n", output::display_path(directory)))?;

        if checker.is_none() {
            checker = Some(SpellChecker::from_config(&config)?);
        }
        if let Some(checker) = &checker {
            review_directory(console, directory, checker, &config)?;
        }
    }
}

fn review_directory<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    directory: &Path,
    checker: &SpellChecker,
    config: &Config,
) -> Result<()> {
    let colored = console.colored;
    let reporter = ConsoleReporter { colored };
    let mut sweep = scan::sweep(directory, checker, &reporter, config)?;

    console.say(output::consolidation_header(sweep.result.total_suspects))?;
    console.say(output::consolidation_summary(sweep.result.groups.len(), colored))?;

    let mut session = ReviewSession::new(console, &DiskUpdater, config.review_page_size);
    let fixed = session.review(&mut sweep.result.groups)?;
    console.say(output::fix_summary(fixed, colored))?;

    Ok(())
}
