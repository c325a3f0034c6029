//! # malo CLI Entry Point
//!
//! Parses arguments with clap and routes each command to its handler in
//! [`malo::commands`].
//!
//! ## Exit codes
//!
//! - `1` - missing arguments, unknown command, or no command at all
//! - `0` - everything else; a failing command prints its error but does not
//!   change the exit code

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;
use std::process;

use malo::commands::{self, Session};
use malo::process::SystemRunner;
use malo::project::Project;
use malo::store::DiskStore;
use malo::ui;

#[derive(Parser)]
#[command(name = "malo")]
#[command(about = "A small helper for Python projects", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Print every external command before running it
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory [default: current directory]
    #[arg(short = 'C', long = "project", global = true, value_name = "DIR")]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project with a virtual environment
    #[command(visible_alias = "c")]
    Create {
        /// Project (and directory) name
        name: String,
        /// Scaffold a FastAPI app with run.sh and requirements.txt
        #[arg(long)]
        api: bool,
    },
    /// Run a script, or every .py file in the project if none is given
    #[command(visible_alias = "r")]
    Run {
        /// Script followed by the arguments passed to it
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Install packages and add them to requirements.txt
    Add {
        /// Package names
        #[arg(required = true, num_args = 1..)]
        packages: Vec<String>,
    },
    /// Uninstall packages and remove them from requirements.txt
    #[command(visible_alias = "rm")]
    Remove {
        /// Package names
        #[arg(required = true, num_args = 1..)]
        packages: Vec<String>,
    },
    /// Set up requirements.txt and the venv from the entry file's imports
    Init,
    /// Install everything listed in requirements.txt
    Install,
    /// Remove __pycache__ and .pyc files
    Clean,
    /// Show the packages listed in requirements.txt
    #[command(visible_alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Diagnose the Python setup of the project
    Doctor,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    let Some(command) = cli.command else {
        print_splash();
        process::exit(1);
    };

    if let Err(e) = dispatch(command, cli.verbose, cli.project) {
        println!("{} {:#}", "x".red(), e);
    }
}

fn dispatch(command: Commands, verbose: bool, project_dir: Option<PathBuf>) -> Result<()> {
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    let root = match project_dir {
        Some(dir) => std::path::absolute(&dir)
            .with_context(|| format!("Invalid project directory {}", dir.display()))?,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let project = Project::load(root)?;
    let runner = SystemRunner::new(verbose);
    let store = DiskStore;
    let session = Session::new(&project, &runner, &store);

    match command {
        Commands::Create { name, api } => commands::create::create_project(&session, &name, api),
        Commands::Run { args } => {
            let (file, script_args) = match args.split_first() {
                Some((file, rest)) => (Some(file.as_str()), rest),
                None => (None, &args[..]),
            };
            commands::run::run_scripts(&session, file, script_args)
        }
        Commands::Add { packages } => commands::add::add_packages(&session, &packages),
        Commands::Remove { packages } => commands::remove::remove_packages(&session, &packages),
        Commands::Init => commands::init::init_project(&session),
        Commands::Install => commands::install::install_requirements(&session),
        Commands::Clean => commands::clean::clean(&session),
        Commands::List { json } => commands::list::list_packages(&session, json),
        Commands::Doctor => commands::doctor::run_doctor(&session),
        Commands::Completion { .. } => Ok(()),
    }
}

fn print_splash() {
    println!();
    println!("   {}", "malo".bold().cyan());
    println!("   {}", "A small helper for Python projects".dimmed().italic());
    println!("   {}", format!("v{}", env!("CARGO_PKG_VERSION")).green());
    println!();

    let mut table = ui::Table::new(&["Category", "Commands"]);
    table.add_row(vec![
        "Start".bold().green().to_string(),
        format!("{}, {}", "create".cyan(), "init".cyan()),
    ]);
    table.add_row(vec![
        "Run".bold().yellow().to_string(),
        format!("{}, {}", "run".cyan(), "clean".cyan()),
    ]);
    table.add_row(vec![
        "Deps".bold().blue().to_string(),
        format!(
            "{}, {}, {}, {}",
            "add".cyan(),
            "remove".cyan(),
            "install".cyan(),
            "list".cyan()
        ),
    ]);
    table.add_row(vec![
        "Tools".bold().magenta().to_string(),
        format!("{}, {}", "doctor".cyan(), "completion".cyan()),
    ]);
    table.print();

    println!();
    println!("   Run {} for detailed usage.", "malo --help".white().bold());
    println!();
}
