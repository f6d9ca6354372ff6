//! Chartroom CLI library
//!
//! Hosts an editor session in the terminal: opens diagrams from a folder
//! store, lists them and imports JSON documents into it.

pub mod error_adapter;

mod args;
mod config;
mod terminal;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
};

use log::{info, warn};

use chartroom::{
    ChartroomError,
    bootstrap::BootstrapSource,
    diagram::{Diagram, DiagramSummary, Table},
    identifier::DiagramId,
    resolver::Resolution,
    route::DiagramRoute,
    session::EditorSession,
    store::{DiagramStore, FolderStore},
    ui::Dialog,
};
use chartroom_import::import_diagram;

use terminal::TerminalUi;

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    /// `open` ended in a dialog: the user still has to pick or create a
    /// diagram.
    NoDiagramOpened,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Done => ExitCode::SUCCESS,
            Status::NoDiagramOpened => ExitCode::from(2),
        }
    }
}

/// Diagram id given on the command line, either bare or as a
/// `/diagrams/{id}` route.
fn requested_id(arg: &str) -> Result<DiagramId, ChartroomError> {
    if arg.starts_with('/') {
        return DiagramRoute::parse(arg)
            .map(DiagramRoute::into_id)
            .ok_or_else(|| ChartroomError::InvalidRoute(arg.to_string()));
    }
    Ok(DiagramId::new(arg)?)
}

/// Run the Chartroom CLI application, reporting to standard output.
///
/// # Errors
///
/// Returns `ChartroomError` for:
/// - Configuration loading errors
/// - Invalid diagram ids or routes
/// - Store and file I/O errors
/// - Import errors
pub fn run(args: &Args) -> Result<Status, ChartroomError> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the Chartroom CLI application, reporting to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output(args: &Args, out: &mut dyn Write) -> Result<Status, ChartroomError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let store = FolderStore::new(config::storage_dir(args.store.as_deref(), &app_config)?);
    info!(store = store.root().display().to_string(); "Using diagram store");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match args.command() {
        Command::Open { id } => {
            let id = id.as_deref().map(requested_id).transpose()?;
            let bootstrap = config::bootstrap_source(args.bootstrap.as_deref(), &app_config);
            let mut session = EditorSession::new(store, bootstrap, TerminalUi::default());
            session.set_config(app_config);
            session.navigate_to(id);
            runtime.block_on(open(&mut session, out))
        }
        Command::List => runtime.block_on(list(&store, out)).map(|()| Status::Done),
        Command::Import { file } => {
            runtime.block_on(import(&store, &file, out)).map(|()| Status::Done)
        }
    }
}

async fn open<B>(
    session: &mut EditorSession<FolderStore, B, TerminalUi>,
    out: &mut dyn Write,
) -> Result<Status, ChartroomError>
where
    B: BootstrapSource,
{
    let trail = session.settle().await?;

    for resolution in &trail {
        match resolution {
            Resolution::Redirected(route) => writeln!(out, "Redirected to {route}")?,
            Resolution::DialogRequested {
                cause: Some(cause), ..
            } => writeln!(out, "note: {cause}")?,
            _ => {}
        }
    }

    if let Some(diagram) = session.current() {
        writeln!(
            out,
            "Opened diagram {} \"{}\" ({}, {} tables, {} relationships) at {}",
            diagram.id,
            diagram.name,
            diagram.database_type,
            diagram.tables.len(),
            diagram.relationships.len(),
            session.route_path(),
        )?;
        write_relationships(diagram, out)?;
        return Ok(Status::Done);
    }

    match session.ui().last_dialog() {
        Some(Dialog::OpenDiagram { .. }) => {
            writeln!(out, "Select a diagram to open:")?;
            match session.store().list().await {
                Ok(summaries) => write_summaries(&summaries, out)?,
                Err(err) => warn!("{err}"),
            }
            writeln!(out, "Run `chartroom open DIAGRAM_ID` to open one.")?;
        }
        Some(Dialog::CreateDiagram) => {
            writeln!(out, "No diagrams yet.")?;
            writeln!(out, "Run `chartroom import FILE` to add one.")?;
        }
        None => {}
    }

    Ok(Status::NoDiagramOpened)
}

async fn list(store: &FolderStore, out: &mut dyn Write) -> Result<(), ChartroomError> {
    let summaries = store.list().await?;
    if summaries.is_empty() {
        writeln!(out, "No diagrams stored.")?;
    } else {
        write_summaries(&summaries, out)?;
    }
    Ok(())
}

async fn import(store: &FolderStore, file: &str, out: &mut dyn Write) -> Result<(), ChartroomError> {
    info!(input_path = file; "Importing diagram");

    let source = fs::read_to_string(file)?;
    let imported = match import_diagram(&source) {
        Ok(imported) => imported,
        Err(err) => return Err(ChartroomError::new_import_error(err, source)),
    };
    for warning in &imported.warnings {
        warn!(input_path = file; "{warning}");
    }

    store.add(&imported.diagram).await?;

    let route = DiagramRoute::new(imported.diagram.id.clone());
    writeln!(out, "Imported diagram {} at {route}", imported.diagram.id)?;
    Ok(())
}

fn write_relationships(diagram: &Diagram, out: &mut dyn Write) -> io::Result<()> {
    fn column<'a>(table: &'a Table, field_id: &'a str) -> &'a str {
        table.field(field_id).map_or(field_id, |field| field.name.as_str())
    }

    for relationship in &diagram.relationships {
        let (Some(source), Some(target)) = (
            diagram.table(&relationship.source_table_id),
            diagram.table(&relationship.target_table_id),
        ) else {
            continue;
        };
        writeln!(
            out,
            "  {}.{} -> {}.{}",
            source.name,
            column(source, &relationship.source_field_id),
            target.name,
            column(target, &relationship.target_field_id),
        )?;
    }
    Ok(())
}

fn write_summaries(summaries: &[DiagramSummary], out: &mut dyn Write) -> io::Result<()> {
    for summary in summaries {
        writeln!(
            out,
            "  {}\t{}\t{}\t{} tables",
            summary.id, summary.name, summary.database_type, summary.table_count
        )?;
    }
    Ok(())
}
