use clap::{Parser, Subcommand};
use rfcmap::catalog;
use rfcmap::prelude::*;
use rfcmap::validation::check_structure;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Inspect, author and try out web-to-RFC interface definitions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding one `<ID>.json` file per definition
    #[arg(short, long, default_value = "definitions", global = true)]
    store: PathBuf,

    /// User id placed in projected payloads
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Refuse to save definitions that contain table blocks without fields
    #[arg(long, global = true)]
    reject_empty_tables: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all stored definitions
    List,
    /// Print one definition in detail
    Show { id: String },
    /// Create a definition seeded with the reserved export rows
    New {
        id: String,
        /// Remote function the definition calls
        #[arg(long)]
        rfc: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the invocation payload of a definition
    Project {
        id: String,
        /// Project even if the definition is not marked executable
        #[arg(long)]
        force: bool,
    },
    /// Check a definition file without saving it
    Validate { file: PathBuf },
    /// Normalize a definition file and save it to the store
    Import {
        file: PathBuf,
        /// Replace an existing definition with the same id
        #[arg(long)]
        overwrite: bool,
    },
    /// Delete a stored definition
    Delete { id: String },
    /// Search the remote type catalog
    Types { query: Option<String> },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut builder = MapperConfig::builder();
    if let Some(user) = &cli.user {
        builder = builder.with_default_user_id(user.as_str());
    }
    if cli.reject_empty_tables {
        builder = builder.with_empty_table_policy(EmptyTablePolicy::Reject);
    }
    let service = InterfaceService::new(FileStore::new(&cli.store), builder.build());

    match cli.command {
        Command::List => run_list(&service).await,
        Command::Show { id } => run_show(&service, &id).await,
        Command::New { id, rfc, name } => run_new(&service, id, rfc, name).await,
        Command::Project { id, force } => run_project(&service, &id, force).await,
        Command::Validate { file } => run_validate(&service, &file),
        Command::Import { file, overwrite } => run_import(&service, &file, overwrite).await,
        Command::Delete { id } => {
            service
                .delete(&id)
                .await
                .unwrap_or_else(|e| exit_with_error(&format!("Delete failed: {}", e)));
            println!("Deleted '{}'.", id);
        }
        Command::Types { query } => {
            for ty in catalog::search(query.as_deref().unwrap_or("")) {
                println!("{}", ty);
            }
        }
    }
}

async fn run_list(service: &InterfaceService<FileStore>) {
    let defs = service
        .list()
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to list definitions: {}", e)));
    if defs.is_empty() {
        println!("No definitions in '{}'.", service.store().root().display());
        return;
    }
    for def in defs {
        let marker = if def.executable { "*" } else { " " };
        println!(
            "{} {:<24} {:<28} {}",
            marker, def.id, def.rfc_function, def.name
        );
    }
}

async fn run_show(service: &InterfaceService<FileStore>, id: &str) {
    let def = load_or_exit(service, id).await;

    println!("--- {} ---", def.id);
    println!("Name:         {}", def.name);
    println!("Description:  {}", def.description);
    println!("SAP module:   {}", def.sap_module);
    println!("RFC function: {}", def.rfc_function);
    println!("Executable:   {}", def.executable);

    println!("\nImport parameters:");
    for f in &def.import_mapping {
        println!(
            "  {:<20} -> {:<20} {:<8} {:>4} {}",
            f.web_field,
            f.sap_name,
            f.data_type,
            f.size,
            if f.required { "required" } else { "" }
        );
    }

    println!("\nInput tables:");
    for t in &def.table_mapping {
        print_table(&t.web_list, &t.sap_table, t.is_incomplete(), &t.fields);
    }

    println!("\nExport parameters:");
    for f in &def.export_mapping {
        println!(
            "  {:<20} <- {:<20} {:<8} {:>4}",
            f.web_field, f.sap_name, f.data_type, f.size
        );
    }

    println!("\nReturn tables:");
    for t in &def.return_table_mapping {
        print_table(&t.web_list, &t.sap_table, t.is_incomplete(), &t.fields);
    }
}

fn print_table(web: &str, sap: &str, incomplete: bool, fields: &[TableField]) {
    let status = if incomplete { "  [INCOMPLETE: no fields]" } else { "" };
    println!("  {} <-> {}{}", web, sap, status);
    for f in fields {
        println!(
            "      {:<18} {:<18} {:<8} {:>4}",
            f.web_field, f.sap_name, f.data_type, f.size
        );
    }
}

async fn run_new(
    service: &InterfaceService<FileStore>,
    id: String,
    rfc: String,
    name: Option<String>,
) {
    let mut editor = Editor::create(id, service.config().clone());
    let edits = [
        Some(HeaderEdit::RfcFunction(rfc)),
        name.map(HeaderEdit::Name),
    ];
    for edit in edits.into_iter().flatten() {
        editor
            .edit_header(edit)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    }

    let saved = service
        .save(editor.definition(), true)
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Save failed: {}", e)));
    println!(
        "Created '{}' with {} reserved export rows.",
        saved.id,
        saved.export_mapping.len()
    );
}

async fn run_project(service: &InterfaceService<FileStore>, id: &str, force: bool) {
    let def = load_or_exit(service, id).await;
    let editor = Editor::open(&def, service.config().clone());
    let payload = if force {
        editor.preview(None)
    } else {
        editor
            .execute(None)
            .unwrap_or_else(|e| exit_with_error(&format!("{} (use --force to preview)", e)))
    };
    println!("{}", payload.to_pretty_json());
}

fn run_validate(service: &InterfaceService<FileStore>, file: &Path) {
    let def = read_definition(file);
    match check_structure(&def, service.config().empty_table_policy) {
        Ok(()) => {
            println!("'{}' is valid.", def.id);
            for (kind, index) in def.incomplete_tables() {
                println!("  warning: table block {} in {} has no fields", index, kind);
            }
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

async fn run_import(service: &InterfaceService<FileStore>, file: &Path, overwrite: bool) {
    let def = read_definition(file);
    let saved = service
        .save(&def, !overwrite)
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
    println!(
        "Imported '{}' into '{}'.",
        saved.id,
        service.store().root().display()
    );
}

async fn load_or_exit(service: &InterfaceService<FileStore>, id: &str) -> InterfaceDefinition {
    service
        .load(id)
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load '{}': {}", id, e)))
}

fn read_definition(file: &Path) -> InterfaceDefinition {
    let text = fs::read_to_string(file).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read file '{}': {}", file.display(), e))
    });
    text.as_str().normalize()
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
