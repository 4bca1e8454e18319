use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use kafka_file_config::Config;
use kafka_file_engine::parsing::snapshot::outline;
use kafka_file_engine::{BlockCommand, DocumentCache, Position, io};

#[derive(Parser)]
#[command(name = "kafka-file", version, about = "Inspect parsed kafka files")]
struct Cli {
    /// A .kafka file, or a directory to scan; defaults to `kafka_files_path` from the config
    path: Option<PathBuf>,

    /// Print the node path found before LINE:CHARACTER (zero-based)
    #[arg(long, value_name = "LINE:CHARACTER", value_parser = parse_position)]
    at: Option<Position>,

    /// Print the parsed tree as JSON
    #[arg(long, conflicts_with = "commands")]
    json: bool,

    /// Print the produce / consume commands each block describes, as JSON
    #[arg(long)]
    commands: bool,

    /// Config file to use instead of ~/.config/kafka-file/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (line, character) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:CHARACTER, got {s:?}"))?;
    let line = line
        .trim()
        .parse()
        .map_err(|e| format!("invalid line {line:?}: {e}"))?;
    let character = character
        .trim()
        .parse()
        .map_err(|e| format!("invalid character {character:?}: {e}"))?;
    Ok(Position::new(line, character))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from_path(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?
        .unwrap_or_default();
    log::debug!("Config path: {}", config_path.display());

    let Some(path) = cli.path.clone().or_else(|| config.kafka_files_path.clone()) else {
        bail!(
            "no file given and no kafka_files_path in {}",
            config_path.display()
        );
    };

    let files = if path.is_dir() {
        io::scan_kafka_files(&path)?
    } else {
        vec![path]
    };
    if files.is_empty() {
        log::info!("No .kafka files found");
        return Ok(());
    }

    let cache = DocumentCache::for_kafka_files(config.cache_options(), config.catalog());
    let show_names = files.len() > 1;
    for file in &files {
        if show_names {
            println!("== {}", file.display());
        }
        print_file(&cache, file, &cli)?;
    }
    Ok(())
}

fn print_file(cache: &DocumentCache, file: &Path, cli: &Cli) -> Result<()> {
    let doc = io::read_document(file).with_context(|| format!("reading {}", file.display()))?;
    let tree = cache.get(&doc);

    if let Some(pos) = cli.at {
        let path = tree.find_node_before(pos);
        if cli.json {
            let kinds: Vec<_> = path
                .nodes()
                .iter()
                .map(|n| serde_json::json!({ "kind": n.kind(), "range": n.range() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&kinds)?);
        } else {
            print!("{}", outline::render_path(&path));
        }
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(tree.as_ref())?);
    } else if cli.commands {
        let commands: Vec<BlockCommand> = tree.blocks().iter().map(BlockCommand::from).collect();
        println!("{}", serde_json::to_string_pretty(&commands)?);
    } else {
        print!("{}", outline::render(&tree));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positions() {
        assert_eq!(parse_position("3:14"), Ok(Position::new(3, 14)));
        assert_eq!(parse_position(" 0 : 0 "), Ok(Position::new(0, 0)));
    }

    #[test]
    fn rejects_malformed_positions() {
        assert!(parse_position("3").is_err());
        assert!(parse_position("a:1").is_err());
        assert!(parse_position("1:-2").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn json_and_commands_conflict() {
        assert!(Cli::try_parse_from(["kafka-file", "a.kafka", "--json", "--commands"]).is_err());
        let cli = Cli::try_parse_from(["kafka-file", "a.kafka", "--at", "2:5"]).unwrap();
        assert_eq!(cli.at, Some(Position::new(2, 5)));
    }
}
