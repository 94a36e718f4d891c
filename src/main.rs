use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use is_terminal::IsTerminal;
use opendiff::artifacts::comparison::options::{CompareOptions, DisplayMode, MAX_CONTEXT_LINES};
use opendiff::artifacts::content::loaded_content::DEFAULT_MAX_FILE_BYTES;
use opendiff::artifacts::core::ReportOutput;
use opendiff::commands::report::Report;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "opendiff",
    version,
    author = "Sami Barbut-Dica",
    about = "Compare two files or two directory trees side by side",
    long_about = "Compares either a pair of files or a pair of directories. \
    Directories are paired by relative path, and every changed file is shown \
    line by line with character-level highlighting of modified lines.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(index = 1, help = "The original file or directory")]
    left: PathBuf,
    #[arg(index = 2, help = "The modified file or directory")]
    right: PathBuf,
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = DisplayMode::Split,
        help = "Layout of the line listing"
    )]
    mode: DisplayMode,
    #[arg(
        short,
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u16).range(0..=i64::from(MAX_CONTEXT_LINES)),
        help = "Unchanged lines kept around each change in unified mode"
    )]
    context: u16,
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_FILE_BYTES,
        help = "Files larger than this many bytes are not loaded"
    )]
    max_file_bytes: u64,
    #[arg(short, long, help = "Files compared at the same time")]
    jobs: Option<usize>,
}

impl Cli {
    fn options(&self) -> CompareOptions {
        let options = CompareOptions::new(self.left.clone(), self.right.clone())
            .with_display_mode(self.mode)
            .with_context_lines(self.context)
            .with_max_file_bytes(self.max_file_bytes);

        match self.jobs {
            Some(jobs) => options.with_concurrency(jobs),
            None => options,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    let result = opendiff::build(cli.options()).await?;

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let output = ReportOutput::detect();
    log::debug!("Paging output: {}", output.is_paged());

    Report::new(&result, output.writer()).render()?;
    output.finish()?;

    Ok(())
}
