#[macro_use]
extern crate log;
extern crate env_logger;
extern crate serde_json;

use env_logger::{Builder, Target};

extern crate squad_common;
extern crate squad_party_ms;

use squad_common::api::{self, CategoryResult};
use squad_common::errors::*;
use squad_common::roster::{self, RosterEntry};

use squad_party_ms::config::{OutputFormat, ServiceConfig};
use squad_party_ms::engine::{self, RunRegistry};

use std::env;
use std::fs::File;
use std::io::Write;
use std::process;
use std::sync::Arc;

fn load_roster(path: &str) -> Result<Vec<RosterEntry>>
{
    let file = File::open(path)
        .chain_err(|| format!("Failed to open roster: {}", path))?;
    let entries: Vec<RosterEntry> = serde_json::from_reader(file)?;

    Ok(entries)
}

fn write_results(path: &str, format: OutputFormat, results: &[CategoryResult]) -> Result<()>
{
    let serialized = match format
    {
        OutputFormat::Json => api::party_table::to_json(results)?,
        OutputFormat::MsgPack => api::party_table::to_msgpack(results)?,
    };

    let mut file = File::create(path)
        .chain_err(|| format!("Failed to create output: {}", path))?;
    file.write_all(&serialized)?;

    Ok(())
}

fn run() -> Result<()>
{
    let config = ServiceConfig::from_env()?;
    debug!("Config: {:?}", config);

    let mut entries = load_roster(&config.roster_path)?;
    info!("Loaded {} roster entries from {}", entries.len(), config.roster_path);

    if config.auto_place
    {
        let placed = roster::auto_place(&mut entries, &config.party.tiers);
        info!("Auto placed {} entries", placed);
    }

    /* Reject a bad snapshot once instead of failing every category */
    roster::validate(&entries)?;

    let registry = Arc::new(RunRegistry::new());
    let results = engine::run_categories(registry, Arc::new(entries), &config.categories, Arc::new(config.party.clone()), config.workers);

    let mut finished = Vec::with_capacity(results.len());
    for (category, result) in results
    {
        match result
        {
            Ok(result) =>
            {
                println!("{}", engine::report::format_report(&result));
                finished.push(result);
            },
            Err(error) => error!("Failed to build parties for {} because {}", category, error),
        }
    }

    write_results(&config.output_path, config.output_format, &finished)?;
    info!("Wrote {} categories to {}", finished.len(), config.output_path);

    Ok(())
}

fn main() {
    /* Log */
    let mut builder = Builder::new();
    builder.target(Target::Stdout);
    if let Ok(filter) = env::var("RUST_LOG") {
        builder.parse(&filter);
    }
    builder.init();

    if let Err(error) = run()
    {
        error!("{}", error);
        for cause in error.iter().skip(1)
        {
            error!("caused by: {}", cause);
        }
        process::exit(1);
    }
}
