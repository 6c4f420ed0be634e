use clap::Parser;
use passage::api::{CmdMessage, CmdResult, PassageApi, SectionUpdate};
use passage::commands::config::ConfigAction;
use passage::commands::convert::{self, Direction};
use passage::config::{store_root, PassageConfig};
use passage::editor::{edit_content, EditorContent};
use passage::error::{PassageError, Result};
use passage::grading::parse_submission;
use passage::model::ModuleKind;
use passage::store::fs::FileStore;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod cli;

use args::{AnswerAction, Cli, Commands};
use cli::print::{
    print_coverage, print_full_sections, print_grade, print_messages, print_refs, print_sections,
};

const LOG_ENV: &str = "PASSAGE_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(result) if result.has_errors() => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "passage=debug" } else { "passage=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct AppContext {
    api: PassageApi<FileStore>,
}

fn init_context() -> Result<AppContext> {
    let root = store_root()?;
    let config = PassageConfig::load(&root)?;

    let store = FileStore::new(root.clone()).with_file_ext(&config.file_ext);
    tracing::debug!(root = %store.root().display(), "using store");
    Ok(AppContext {
        api: PassageApi::new(store, root, config),
    })
}

fn run(cli: Cli) -> Result<CmdResult> {
    let command = cli.command.unwrap_or(Commands::List { module: None });

    // Conversion is pure text work and needs no store
    if let Commands::Convert { direction, file } = &command {
        return handle_convert(*direction, file.as_deref());
    }

    let mut ctx = init_context()?;

    match command {
        Commands::Create {
            title,
            content,
            module,
            no_editor,
        } => handle_create(&mut ctx, title, content, module, no_editor),
        Commands::List { module } => handle_list(&ctx, module),
        Commands::View { indexes, display } => handle_view(&ctx, indexes, display),
        Commands::Edit { indexes } => handle_edit(&mut ctx, indexes),
        Commands::Delete { indexes } => {
            let result = ctx.api.delete_sections(&indexes)?;
            print_messages(&result.messages);
            Ok(result)
        }
        Commands::Refs { indexes, json } => handle_refs(&ctx, indexes, json),
        Commands::Answer { action } => handle_answer(&mut ctx, action),
        Commands::Check { indexes, json } => handle_check(&ctx, indexes, json),
        Commands::Grade { index, file, json } => handle_grade(&ctx, index, file, json),
        Commands::Convert { direction, file } => handle_convert(direction, file.as_deref()),
        Commands::Import { paths, module } => {
            let result = ctx.api.import_sections(paths, module)?;
            print_messages(&result.messages);
            Ok(result)
        }
        Commands::Export { indexes, output } => {
            let result = ctx.api.export_sections(&indexes, output)?;
            print_messages(&result.messages);
            Ok(result)
        }
        Commands::Path { indexes } => {
            let result = ctx.api.section_paths(&indexes)?;
            for path in &result.section_paths {
                println!("{}", path.display());
            }
            Ok(result)
        }
        Commands::Config { key, value } => handle_config(&mut ctx, key, value),
    }
}

fn handle_convert(direction: Direction, file: Option<&Path>) -> Result<CmdResult> {
    let text = read_input(file)?;
    let result = convert::run(&text, direction)?;
    if let Some(output) = &result.output {
        print!("{}", output);
    }
    Ok(result)
}

fn handle_create(
    ctx: &mut AppContext,
    title: Option<String>,
    content: Option<String>,
    module: ModuleKind,
    no_editor: bool,
) -> Result<CmdResult> {
    let (final_title, final_content) = if no_editor {
        (title.unwrap_or_default(), content.unwrap_or_default())
    } else {
        let initial = EditorContent::new(title.unwrap_or_default(), content.unwrap_or_default());
        let edited = edit_content(&initial, &ctx.api.config().file_ext)?;
        (edited.title, edited.content)
    };

    let result = ctx.api.create_section(final_title, module, final_content)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_list(ctx: &AppContext, module: Option<ModuleKind>) -> Result<CmdResult> {
    let result = ctx.api.list_sections(module)?;
    print_sections(&result.listed_metadata);
    print_messages(&result.messages);
    Ok(result)
}

fn handle_view(ctx: &AppContext, indexes: Vec<String>, display: bool) -> Result<CmdResult> {
    let result = ctx.api.view_sections(&indexes, display)?;
    print_full_sections(&result.listed_sections);
    print_messages(&result.messages);
    Ok(result)
}

fn handle_edit(ctx: &mut AppContext, indexes: Vec<String>) -> Result<CmdResult> {
    let viewed = ctx.api.view_sections(&indexes, false)?;
    let file_ext = ctx.api.config().file_ext.clone();

    let mut updates = Vec::new();
    for ds in &viewed.listed_sections {
        let initial = EditorContent::for_editing(&ds.section.metadata.title, &ds.section.content);
        let edited = edit_content(&initial, &file_ext)?;
        if edited.title.is_empty() {
            return Err(PassageError::Api("Title cannot be empty".into()));
        }
        if edited == initial.normalized() {
            continue;
        }
        updates.push(
            SectionUpdate::new(ds.index)
                .with_title(edited.title)
                .with_content(edited.content),
        );
    }

    if updates.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No changes."));
        print_messages(&result.messages);
        return Ok(result);
    }

    let result = ctx.api.update_sections(&updates)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_refs(ctx: &AppContext, indexes: Vec<String>, as_json: bool) -> Result<CmdResult> {
    let result = ctx.api.question_refs(&indexes)?;
    if as_json {
        let value: Vec<_> = result
            .refs
            .iter()
            .map(|r| json!({ "index": r.index.0, "title": r.title, "refs": r.refs }))
            .collect();
        print_json(&value)?;
    } else {
        print_refs(&result.refs);
    }
    Ok(result)
}

fn handle_answer(ctx: &mut AppContext, action: AnswerAction) -> Result<CmdResult> {
    let result = match action {
        AnswerAction::Set {
            index,
            number,
            answer,
        } => ctx.api.set_answer(&index, &number, &answer)?,
        AnswerAction::Clear { index, number } => ctx.api.clear_answer(&index, &number)?,
    };
    print_messages(&result.messages);
    Ok(result)
}

fn handle_check(ctx: &AppContext, indexes: Vec<String>, as_json: bool) -> Result<CmdResult> {
    let result = ctx.api.check_answers(&indexes)?;
    if as_json {
        let value: Vec<_> = result
            .coverage
            .iter()
            .map(|c| json!({ "index": c.index.0, "title": c.title, "coverage": c.coverage }))
            .collect();
        print_json(&value)?;
    } else {
        print_coverage(&result.coverage);
        print_messages(&result.messages);
    }
    Ok(result)
}

fn handle_grade(
    ctx: &AppContext,
    index: String,
    file: Option<PathBuf>,
    as_json: bool,
) -> Result<CmdResult> {
    let submission = parse_submission(&read_input(file.as_deref())?)?;
    let result = ctx.api.grade(&index, &submission)?;
    match (&result.grade, as_json) {
        (Some(report), true) => print_json(report)?,
        (Some(report), false) => {
            print_grade(report);
            print_messages(&result.messages);
        }
        (None, _) => print_messages(&result.messages),
    }
    Ok(result)
}

fn handle_config(
    ctx: &mut AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<CmdResult> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::Get(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config_action(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in passage::config::CONFIG_KEYS {
                println!("{}: {}", key, config.get(key)?);
            }
        }
    }
    print_messages(&result.messages);
    Ok(result)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(PassageError::Io)
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(PassageError::Io)?;
            Ok(buf)
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).map_err(PassageError::Serialization)?;
    println!("{}", out);
    Ok(())
}
