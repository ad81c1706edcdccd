use clap::Parser;
use rand::rngs::ThreadRng;
use rand::Rng;
use rfcmap::catalog::SapType;
use rfcmap::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// A CLI tool to generate random interface definitions for manual testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory to write the generated definitions to
    #[arg(short, long, default_value = "definitions")]
    output: PathBuf,

    /// How many definitions to generate
    #[arg(short, long, default_value_t = 10)]
    count: usize,

    /// The maximum number of rows per collection and columns per table
    #[arg(long, default_value_t = 6)]
    max_rows: usize,
}

const WEB_WORDS: [&str; 12] = [
    "plant", "material", "quantity", "unit", "vendor", "order", "batch", "date", "price",
    "currency", "location", "status",
];
const SAP_WORDS: [&str; 12] = [
    "WERKS", "MATNR", "MENGE", "MEINS", "LIFNR", "AUFNR", "CHARG", "BUDAT", "NETPR", "WAERS",
    "LGORT", "STATU",
];
const MODULES: [&str; 5] = ["MM", "PP", "SD", "FI", "QM"];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.max_rows == 0 {
        eprintln!("Error: --max-rows must be at least 1");
        std::process::exit(1);
    }

    let mut rng = rand::rng();
    let store = FileStore::new(&cli.output);
    let config = MapperConfig::default();

    println!(
        "Generating {} definition(s) into '{}'...",
        cli.count,
        cli.output.display()
    );

    for n in 0..cli.count {
        let def = generate_definition(&mut rng, &config, n, cli.max_rows);
        store.save(&def, SaveMode::Overwrite).await?;
        println!(
            "-> {} ({} import, {} tables, {} export)",
            def.id,
            def.import_mapping.len(),
            def.table_mapping.len(),
            def.export_mapping.len()
        );
    }

    println!("Successfully generated {} definition(s).", cli.count);
    Ok(())
}

fn generate_definition(
    rng: &mut ThreadRng,
    config: &MapperConfig,
    n: usize,
    max_rows: usize,
) -> InterfaceDefinition {
    let module = MODULES[rng.random_range(0..MODULES.len())];
    let mut def = config.new_definition(format!("GEN_{}_{:03}", module, n));
    def.name = format!("Generated {} interface {}", module, n);
    def.sap_module = module.to_string();
    def.rfc_function = format!("Z_{}_GEN_{:03}", module, n);
    def.executable = rng.random_bool(0.5);

    for _ in 0..rng.random_range(1..=max_rows) {
        def.import_mapping.push(random_field(rng));
    }
    for _ in 0..rng.random_range(0..=max_rows) {
        def.export_mapping.push(random_field(rng).with_required(false));
    }
    for t in 0..rng.random_range(0..=2) {
        let mut block = InputTable::new()
            .with_web(format!("items{}", t))
            .with_sap(format!("IT_ITEMS{}", t))
            .with_required(rng.random_bool(0.3))
            .with_single_value(rng.random_bool(0.2));
        // Leave some blocks empty so incomplete tables show up in the editor.
        for _ in 0..rng.random_range(0..=max_rows) {
            block.fields.push(random_field(rng).with_required(rng.random_bool(0.2)));
        }
        def.table_mapping.push(block);
    }
    if rng.random_bool(0.5) {
        let mut block = ReturnTable::new().with_web("results").with_sap("ET_RESULT");
        for _ in 0..rng.random_range(1..=max_rows) {
            block.fields.push(random_field(rng));
        }
        def.return_table_mapping.push(block);
    }
    def.normalized()
}

fn random_field<R: rfcmap::model::FieldRole>(rng: &mut ThreadRng) -> Field<R> {
    let word = rng.random_range(0..WEB_WORDS.len());
    let ty = SapType::ALL[rng.random_range(0..SapType::ALL.len())];
    let mut field = Field::new()
        .with_web(WEB_WORDS[word])
        .with_sap(SAP_WORDS[word])
        .with_type(ty.as_str())
        .with_size(rng.random_range(1..=40));
    if rng.random_bool(0.4) {
        field = field.with_example(format!("{}-{}", WEB_WORDS[word], rng.random_range(1..100)));
    }
    if rng.random_bool(0.2) {
        field = field.with_default(SAP_WORDS[word]);
    }
    field
}
