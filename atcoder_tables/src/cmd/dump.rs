use crate::{
    cmd::{base_url, primary_user, rival_users},
    modules::service::TableService,
};
use anyhow::{Context, Result};
use atcoder_tables_libs::resource::client::AtcoderProblemsClient;
use clap::Args;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Primary user id. Falls back to the TABLE_USER environment variable.
    #[arg(long)]
    user: Option<String>,
    /// Comma separated rival user ids. Falls back to TABLE_RIVALS.
    #[arg(long)]
    rivals: Option<String>,
    /// Write the snapshot to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

pub async fn run(args: DumpArgs) -> Result<()> {
    let client = AtcoderProblemsClient::new(&base_url()).with_context(|| {
        let message = "couldn't create AtCoder Problems client. check the value of ATCODER_PROBLEMS_URL environment variable.";
        tracing::error!(message);
        format!("{}", message)
    })?;
    let service = TableService::new(client);

    let user = primary_user(args.user);
    let rivals = rival_users(args.rivals);

    let snapshot = service.build_snapshot(&user, &rivals).await?;

    match args.output {
        Some(path) => {
            tracing::info!("Write table snapshot to {}", path.display());
            let file = File::create(&path)
                .with_context(|| format!("failed to create file {}", path.display()))?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &snapshot)
                .context("failed to write table snapshot")?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, &snapshot)
                .context("failed to write table snapshot")?;
            writeln!(writer)?;
        }
    }

    Ok(())
}
