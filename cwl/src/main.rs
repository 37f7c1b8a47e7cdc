mod client;
mod models;
mod option;
mod printer;
mod tail;

use std::{fs::File, io::stdout, path::PathBuf};

use anyhow::{anyhow, Result};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::{
    client::Client,
    models::{QueryDescriptor, ResolveError},
    printer::Printer,
    tail::Tailer,
};

// Non-standard status reserved for usage errors.
const USAGE_EXIT_CODE: i32 = 255;

fn setup_logging() -> Result<()> {
    let mut path = get_app_cache_path()?;
    path.push("cwl.log");
    let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?);
    Ok(())
}

fn get_app_cache_path() -> Result<PathBuf> {
    let mut path = dirs_next::cache_dir().ok_or_else(|| anyhow!("failed to find os cache dir."))?;
    path.push("cwl");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// What to print for a resolution failure, and the status to exit with.
fn usage_exit(err: &ResolveError) -> (Option<String>, i32) {
    match err {
        // clap has already printed the version.
        ResolveError::Version => (None, 0),
        ResolveError::Help => (Some(option::usage()), USAGE_EXIT_CODE),
        err => (
            Some(format!("{}\n\n{}", err, option::usage())),
            USAGE_EXIT_CODE,
        ),
    }
}

fn exit_with_usage(err: ResolveError) -> ! {
    log::debug!("failed to resolve query: {:?}", err);
    let (text, code) = usage_exit(&err);
    if let Some(text) = text {
        print!("{}", text);
    }
    std::process::exit(code)
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let query = QueryDescriptor::from_env().unwrap_or_else(|e| exit_with_usage(e));
    log::debug!("resolved query is {:?}", query);

    let client = Client::from_query(&query).await;
    let mut tailer = Tailer::new(client, Printer::new(stdout()));
    tailer.run(&query).await
}
