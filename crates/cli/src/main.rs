use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pphoto_zipper_core::{load_run_config, run, RunLog, RunSummary};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pphoto-zipper-cli")]
#[command(about = "商品IDごとに画像をリネームしてzipにまとめます")]
struct Cli {
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

const RESULT_DIR: &str = "result";
const LOG_FILE: &str = "actions.log";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result_root = PathBuf::from(RESULT_DIR);
    fs::create_dir_all(&result_root).with_context(|| {
        format!(
            "resultフォルダを作成できませんでした: {}",
            result_root.display()
        )
    })?;

    let mut log = RunLog::to_file("pphoto-zipper", &result_root.join(LOG_FILE))?;

    let config = match load_run_config(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            log.error(format!("{err}"));
            return Err(err.into());
        }
    };

    let summary = match run(&config, &result_root, &mut log) {
        Ok(summary) => summary,
        Err(err) => {
            log.error(format!("{err:#}"));
            return Err(err);
        }
    };

    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => print_table(&summary),
    }

    Ok(())
}

fn print_table(summary: &RunSummary) {
    for job in &summary.jobs {
        println!(
            "{} -> {} (追加 {} / 画像以外 {} / 権限エラー {})",
            job.directory.display(),
            job.archive.archive_path.display(),
            job.archive.stats.written,
            job.archive.stats.skipped_non_image,
            job.archive.stats.permission_denied
        );
    }

    let written: usize = summary.jobs.iter().map(|j| j.archive.stats.written).sum();
    let non_image: usize = summary
        .jobs
        .iter()
        .map(|j| j.archive.stats.skipped_non_image)
        .sum();
    let denied: usize = summary
        .jobs
        .iter()
        .map(|j| j.archive.stats.permission_denied)
        .sum();

    println!(
        "\n集計: jobs={} written={} non_image_skip={} permission_skip={} dir_skip={}",
        summary.jobs.len(),
        written,
        non_image,
        denied,
        summary.skipped_dirs
    );
}
