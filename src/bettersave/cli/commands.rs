use super::print::{print_items, print_messages};
use super::setup::{init_logging, Cli, Commands, SAVE_DIR_ENV};
use bettersave::api::SaveApi;
use bettersave::commands::{CmdMessage, CmdResult};
use bettersave::error::{Result, SaveError};
use bettersave::system::{SaveSystem, StartupReport};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

struct AppContext {
    api: SaveApi,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let report = ctx.api.startup()?;
    print_messages(&startup_messages(&report));

    match cli.command {
        Some(Commands::List { trash }) => handle_list(&mut ctx, trash),
        Some(Commands::Trash { ids }) => handle_trash(&mut ctx, ids),
        Some(Commands::Restore { ids }) => handle_restore(&mut ctx, ids),
        Some(Commands::Purge { ids }) => handle_purge(&mut ctx, ids),
        Some(Commands::Clear) => handle_clear(&mut ctx),
        Some(Commands::Import { paths }) => handle_import(&mut ctx, paths),
        Some(Commands::Status) => handle_status(&mut ctx),
        None => handle_list(&mut ctx, false),
    }?;

    ctx.api.persist()
}

fn resolve_save_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.save_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(SAVE_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "bettersave", "bettersave")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SaveError::Api("Could not determine a save directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let save_dir = resolve_save_dir(cli)?;
    tracing::debug!(save_dir = %save_dir.display(), "Opening save directory");
    let system = SaveSystem::open(save_dir)?;
    Ok(AppContext {
        api: SaveApi::new(system),
    })
}

fn startup_messages(report: &StartupReport) -> Vec<CmdMessage> {
    let mut messages = Vec::new();
    let failed = report.created.failed + report.trashed.failed;
    if failed > 0 {
        messages.push(CmdMessage::warning(format!(
            "{} saved entries could not be loaded (run with -v for details)",
            failed
        )));
    }
    if let Some(recovery) = &report.recovery {
        if recovery.recovered() > 0 {
            messages.push(CmdMessage::info(format!(
                "Recovered {} items from the old item store",
                recovery.recovered()
            )));
        }
    }
    if let Some(migration) = &report.migration {
        if migration.migrated > 0 || migration.duplicates > 0 {
            messages.push(CmdMessage::success(format!(
                "Migrated {} items from the legacy save ({} duplicates discarded)",
                migration.migrated, migration.duplicates
            )));
        }
        for backup in &migration.backups {
            messages.push(CmdMessage::info(format!(
                "Legacy save backed up to {}",
                backup.display()
            )));
        }
    }
    messages
}

fn print_result(result: &CmdResult) {
    print_items(&result.listed);
    print_messages(&result.messages);
}

fn handle_list(ctx: &mut AppContext, trash: bool) -> Result<()> {
    let result = ctx.api.list(trash)?;
    print_result(&result);
    Ok(())
}

fn handle_trash(ctx: &mut AppContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.trash(&ids)?;
    print_result(&result);
    Ok(())
}

fn handle_restore(ctx: &mut AppContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.restore(&ids)?;
    print_result(&result);
    Ok(())
}

fn handle_purge(ctx: &mut AppContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.purge(&ids)?;
    print_result(&result);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.clear_trash()?;
    print_result(&result);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, paths: Vec<PathBuf>) -> Result<()> {
    let result = ctx.api.import(&paths)?;
    print_result(&result);
    Ok(())
}

fn handle_status(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    print_result(&result);
    Ok(())
}
