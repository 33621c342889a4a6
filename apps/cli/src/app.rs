//! Command handlers: wires the VK source, the disk and the transfer pipeline.

use std::io::Write;

use albumshift_source::AlbumDescriptor;
use albumshift_transfer::{
    BatchState, ItemStatus, Selection, TransferEvent, TransferOrchestrator, TransferSummary,
    select_album,
};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::sync::mpsc;

use crate::cli::Command;
use crate::config::Config;

/// Runs one command to completion.
pub async fn run(config: Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Transfer { album } => transfer(&config, album).await,
        Command::Albums => albums(&config).await,
        Command::Whoami => whoami(&config).await,
    }
}

async fn whoami(config: &Config) -> anyhow::Result<()> {
    let source = albumshift_source::Client::new(config.source_config()?)?;
    let user = source.user_info().await.context("looking up VK user")?;
    println!("{} (id{})", user.display_name(), user.id);
    Ok(())
}

async fn albums(config: &Config) -> anyhow::Result<()> {
    let source = albumshift_source::Client::new(config.source_config()?)?;
    let albums = source.list_albums().await.context("listing albums")?;
    for album in &albums {
        println!("{:>12}  {}", album.id, album.title);
    }
    Ok(())
}

async fn transfer(config: &Config, album: Option<String>) -> anyhow::Result<()> {
    let source = albumshift_source::Client::new(config.source_config()?)?;
    let store = albumshift_disk::Client::new(config.disk_config()?)?;

    let albums = source.list_albums().await.context("listing albums")?;
    let album = match album {
        Some(title) => select_album(&albums, &title).into_result()?,
        None => prompt_album(&albums).await?,
    };
    tracing::info!(album = %album.title, id = album.id, "album selected");

    let mut orchestrator = TransferOrchestrator::new();
    let events = orchestrator
        .take_events()
        .context("transfer events already taken")?;
    let progress = tokio::spawn(show_progress(events));

    let result = orchestrator
        .run(&source, &store, &album, &config.transfer_config())
        .await;

    // Closing the channel ends the progress task.
    drop(orchestrator);
    progress.await?;

    let summary = result?;
    println!("{}", summary_line(&summary));
    if let Some(path) = &summary.log_path {
        println!("Log written to {}", path.display());
    }
    if let Some(err) = &summary.log_error {
        eprintln!("Log not written: {err}");
    }
    Ok(())
}

/// Asks for an album title until one matches. EOF aborts.
async fn prompt_album(albums: &[AlbumDescriptor]) -> anyhow::Result<AlbumDescriptor> {
    println!("Albums:");
    for album in albums {
        println!("  {}", album.title);
    }

    loop {
        let Some(answer) = tokio::task::spawn_blocking(read_answer).await?? else {
            anyhow::bail!("no album selected");
        };

        match select_album(albums, &answer) {
            Selection::Found(album) => return Ok(album),
            Selection::Retry { requested } if requested.is_empty() => {
                println!("No profile photos album, type a title.");
            }
            Selection::Retry { requested } => {
                println!("No album titled {requested:?}, try again.");
            }
        }
    }
}

fn read_answer() -> std::io::Result<Option<String>> {
    print!("Album title (empty for profile photos): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Renders transfer events as a progress bar on stdout.
async fn show_progress(mut events: mpsc::UnboundedReceiver<TransferEvent>) {
    let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout());
    let style = ProgressStyle::with_template("[{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);

    while let Some(event) = events.recv().await {
        match event {
            TransferEvent::State(BatchState::Uploading { total, .. }) => {
                bar.set_length(total as u64);
            }
            TransferEvent::State(state) => {
                bar.set_message(format!("{state:?}"));
            }
            TransferEvent::Item { report, .. } => {
                match &report.status {
                    ItemStatus::Uploaded => {}
                    ItemStatus::UploadFailed { reason } => {
                        bar.println(format!("failed  {}: {reason}", report.file_name));
                    }
                    ItemStatus::Skipped { reason } => {
                        bar.println(format!("skipped {}: {reason}", report.file_name));
                    }
                }
                bar.set_message(report.file_name);
                bar.inc(1);
            }
            TransferEvent::Completed { .. } => {
                bar.finish_and_clear();
            }
        }
    }
}

fn summary_line(summary: &TransferSummary) -> String {
    format!(
        "{}: {} of {} uploaded to {} ({} failed, {} skipped)",
        summary.album_title,
        summary.uploaded(),
        summary.total(),
        summary.album_folder,
        summary.failed(),
        summary.skipped()
    )
}
