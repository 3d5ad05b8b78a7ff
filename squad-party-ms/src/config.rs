use squad_common::config::PartyConfig;
use squad_common::errors::*;
use squad_common::roster::Category;

use std::env;
use std::fs::File;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat
{
    Json,
    MsgPack,
}

impl FromStr for OutputFormat
{
    type Err = Error;

    fn from_str(raw: &str) -> Result<OutputFormat>
    {
        match raw.trim().to_lowercase().as_str()
        {
            "json" => Ok(OutputFormat::Json),
            "msgpack" | "rmp" => Ok(OutputFormat::MsgPack),
            _ => bail!("Unknown output format: {}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig
{
    pub roster_path: String,
    pub output_path: String,
    pub output_format: OutputFormat,
    pub categories: Vec<Category>,
    pub workers: usize,
    pub auto_place: bool,
    pub party: PartyConfig,
}

impl ServiceConfig
{
    pub fn from_env() -> Result<ServiceConfig>
    {
        ServiceConfig::from_vars(|key| env::var(key).ok())
    }

    /// Same as `from_env` but with the variables coming from `lookup`
    pub fn from_vars<F>(lookup: F) -> Result<ServiceConfig>
        where F: Fn(&str) -> Option<String>
    {
        let roster_path = lookup("ROSTER_PATH")
            .unwrap_or(String::from("roster.json"));
        let output_path = lookup("OUTPUT_PATH")
            .unwrap_or(String::from("parties.json"));

        let output_format = match lookup("OUTPUT_FORMAT")
        {
            Some(format) => format.parse::<OutputFormat>()?,
            None => OutputFormat::Json,
        };

        let categories = match lookup("PARTY_CATEGORIES")
        {
            Some(categories) => Category::parse_list(&categories)?,
            None => Category::all(),
        };

        let workers = match lookup("PARTY_WORKERS")
        {
            Some(workers) => workers.parse::<usize>()?,
            None => 4,
        };

        let auto_place = match lookup("PARTY_AUTO_PLACE")
        {
            Some(flag) => flag == "1" || flag.eq_ignore_ascii_case("true"),
            None => false,
        };

        let mut party = match lookup("PARTY_CONFIG")
        {
            Some(path) =>
            {
                let file = File::open(&path)
                    .chain_err(|| format!("Failed to open party config: {}", path))?;
                ::serde_json::from_reader(file)?
            },
            None => PartyConfig::default(),
        };

        if let Some(max_passes) = lookup("PARTY_MAX_PASSES")
        {
            party.max_passes = max_passes.parse::<usize>()?;
        }

        party.validate()?;

        Ok(
            ServiceConfig {
                roster_path,
                output_path,
                output_format,
                categories,
                workers: workers.max(1),
                auto_place,
                party,
            }
        )
    }
}
