use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "solution-rename")]
#[command(version)]
#[command(about = "Rename a solution across file names, folder names and file contents")]
#[command(long_about = "Recursively renames every file and folder whose name contains OLD_NAME and replaces OLD_NAME with NEW_NAME inside every text file. Version control and IDE folders (.git, .idea, .vs) are skipped. Any failure rolls back the changes made so far.")]
pub struct Cli {
    #[arg(help = "Current solution name (longer than 3 characters)")]
    pub old_name: String,

    #[arg(help = "New solution name (longer than 3 characters)")]
    pub new_name: String,

    #[arg(help = "Solution root directory (defaults to current directory)")]
    pub path: Option<PathBuf>,

    #[arg(long, help = "Show what would change without touching the filesystem")]
    pub dry_run: bool,

    #[arg(
        short = 'x',
        long = "exclude",
        value_name = "NAME",
        help = "Additional directory marker to skip (repeatable)"
    )]
    pub exclude: Vec<String>,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
