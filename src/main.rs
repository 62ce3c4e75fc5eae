//! deckgen - seeded deck generator
//!
//! Generates a reproducible 40-card deck from a seed word and a set of card
//! pack JSON files.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use deckgen::{
    core::{Leader, Rarity},
    generator::{
        generate_deck, render, render_json_batch, DeckFormat, GenLogger, GenerateOptions,
        GeneratorConfig, LeaderChoice, RngAlgorithm, SelectionStrategy, VerbosityLevel,
    },
    loader::{CardPool, PackCatalog},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Selection strategy preset
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Weighted coin flip between neutral and leader pools (default)
    CoinFlip,
    /// Per-card weights over the combined pool
    Weighted,
    /// Fixed number of distinct cards per rarity
    Quota,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RngArg {
    Chacha8,
    Xoshiro,
}

impl From<RngArg> for RngAlgorithm {
    fn from(arg: RngArg) -> Self {
        match arg {
            RngArg::Chacha8 => RngAlgorithm::ChaCha8,
            RngArg::Xoshiro => RngAlgorithm::Xoshiro256PlusPlus,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// `cost：name（count）` rows under a leader header
    Text,
    /// `cost：name：count` rows
    Plain,
    Json,
}

impl From<FormatArg> for DeckFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => DeckFormat::Text,
            FormatArg::Plain => DeckFormat::Plain,
            FormatArg::Json => DeckFormat::Json,
        }
    }
}

/// Verbosity level (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "deckgen")]
#[command(about = "Seeded deck generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that builds a config
#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON config file (any field may be omitted)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Selection strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Neutral card rate in percent (coin-flip strategy)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    neutral_rate: Option<u8>,

    /// Weight of a leader card relative to a neutral card (weighted strategy)
    #[arg(long)]
    leader_weight: Option<f64>,

    /// Chance of preferring a leader card, 0 to 1 (quota strategy)
    #[arg(long)]
    leader_priority: Option<f64>,

    /// Maximum bronze copies
    #[arg(long)]
    bronze: Option<u32>,

    /// Maximum silver copies
    #[arg(long)]
    silver: Option<u32>,

    /// Maximum gold copies
    #[arg(long)]
    gold: Option<u32>,

    /// Maximum legend copies
    #[arg(long)]
    legend: Option<u32>,

    /// Target deck size
    #[arg(long)]
    deck_size: Option<u32>,
}

impl ConfigArgs {
    /// Config file (or strategy preset), then flag overrides
    fn resolve(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match (&self.config, self.strategy) {
            (Some(path), _) => GeneratorConfig::load_from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            (None, Some(StrategyArg::Weighted)) => GeneratorConfig::weighted_preset(),
            (None, Some(StrategyArg::Quota)) => GeneratorConfig::quota_preset(),
            (None, _) => GeneratorConfig::default(),
        };

        if self.config.is_some() {
            match self.strategy {
                Some(StrategyArg::CoinFlip) => config.strategy = SelectionStrategy::coin_flip(),
                Some(StrategyArg::Weighted) => config.strategy = SelectionStrategy::weighted(),
                Some(StrategyArg::Quota) => config.strategy = SelectionStrategy::quota(),
                None => {}
            }
        }

        match &mut config.strategy {
            SelectionStrategy::PoolCoinFlip { neutral_rate } => {
                if let Some(percent) = self.neutral_rate {
                    *neutral_rate = f64::from(percent) / 100.0;
                }
            }
            SelectionStrategy::WeightedCards { leader_weight } => {
                if let Some(weight) = self.leader_weight {
                    *leader_weight = weight;
                }
            }
            SelectionStrategy::RarityQuota {
                leader_priority, ..
            } => {
                if let Some(priority) = self.leader_priority {
                    *leader_priority = priority;
                }
            }
        }

        for (rarity, value) in [
            (Rarity::Bronze, self.bronze),
            (Rarity::Silver, self.silver),
            (Rarity::Gold, self.gold),
            (Rarity::Legend, self.legend),
        ] {
            if let Some(value) = value {
                config.rarity_caps.set(rarity, value);
            }
        }
        if let Some(size) = self.deck_size {
            config.deck_size = size;
        }
        Ok(config)
    }
}

/// Options for locating card packs
#[derive(Args, Debug)]
struct PackArgs {
    /// Directory holding the pack files
    #[arg(long, default_value = "card_list")]
    dir: PathBuf,

    /// Pack to use, by display name or file name (repeatable; default: all)
    #[arg(long = "pack", value_name = "PACK")]
    packs: Vec<String>,
}

impl PackArgs {
    fn selected_files(&self, catalog: &PackCatalog) -> anyhow::Result<Vec<String>> {
        if self.packs.is_empty() {
            Ok(catalog.files())
        } else {
            Ok(catalog.resolve_all(&self.packs)?)
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one deck per seed word
    Generate {
        /// Seed words (read from stdin when omitted)
        #[arg(value_name = "SEED")]
        seeds: Vec<String>,

        #[command(flatten)]
        packs: PackArgs,

        #[command(flatten)]
        config: ConfigArgs,

        /// Pin the leader instead of drawing it (Japanese or English name)
        #[arg(long)]
        leader: Option<String>,

        /// Random generator fed by the seed digest
        #[arg(long, value_enum, default_value = "chacha8")]
        rng: RngArg,

        /// Output format (json with several seeds prints one array)
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Refuse to generate when the config cannot fill a deck
        #[arg(long)]
        strict: bool,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "minimal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// List known packs and whether they are present
    Packs {
        #[command(flatten)]
        packs: PackArgs,
    },

    /// Validate a configuration without generating
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            seeds,
            packs,
            config,
            leader,
            rng,
            format,
            strict,
            verbosity,
        } => run_generate(
            seeds,
            &packs,
            &config,
            leader,
            rng.into(),
            format.into(),
            strict,
            verbosity.into(),
        ),
        Commands::Packs { packs } => run_packs(&packs),
        Commands::Check { config } => run_check(&config),
    }
}

/// Read one seed word from stdin
fn prompt_seed() -> anyhow::Result<String> {
    print!("適当な単語を入力してください：");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading seed word")?;
    Ok(line.trim().to_string())
}

#[allow(clippy::too_many_arguments)] // CLI parameters naturally map to function args
fn run_generate(
    seeds: Vec<String>,
    pack_args: &PackArgs,
    config_args: &ConfigArgs,
    leader: Option<String>,
    algorithm: RngAlgorithm,
    format: DeckFormat,
    strict: bool,
    verbosity: VerbosityLevel,
) -> anyhow::Result<()> {
    let logger = GenLogger::with_verbosity(verbosity);
    let config = config_args.resolve()?;

    let warnings = config.validate()?;
    if strict && !warnings.is_empty() {
        for warning in &warnings {
            logger.warning(&warning.to_string());
        }
        bail!("configuration cannot produce a full deck (--strict)");
    }

    let leader = match leader {
        Some(name) => LeaderChoice::Fixed(name.parse::<Leader>()?),
        None => LeaderChoice::Random,
    };
    let options = GenerateOptions { leader, algorithm };

    let catalog = PackCatalog::standard();
    let files = pack_args.selected_files(&catalog)?;
    let pool = CardPool::load(&pack_args.dir, &files, &logger)
        .with_context(|| format!("loading packs from {}", pack_args.dir.display()))?;
    if pool.is_empty() {
        logger.warning("no cards loaded; every deck will be empty");
    }

    let seeds = if seeds.is_empty() {
        vec![prompt_seed()?]
    } else {
        seeds
    };

    let mut stdout = io::stdout().lock();
    if format == DeckFormat::Json && seeds.len() > 1 {
        let decks = seeds
            .iter()
            .map(|seed| generate_deck(seed, &pool, &config, options, &logger))
            .collect::<deckgen::Result<Vec<_>>>()?;
        let batch = decks.iter().map(|g| (g.seed_word.as_str(), &g.deck));
        write!(stdout, "{}", render_json_batch(batch)?)?;
        return Ok(());
    }

    for (i, seed) in seeds.iter().enumerate() {
        let generated = generate_deck(seed, &pool, &config, options, &logger)?;
        if i > 0 {
            writeln!(stdout)?;
        }
        if seeds.len() > 1 {
            writeln!(stdout, "# {seed}")?;
        }
        write!(stdout, "{}", render(&generated.deck, format)?)?;
    }

    Ok(())
}

fn run_packs(pack_args: &PackArgs) -> anyhow::Result<()> {
    let catalog = PackCatalog::standard();
    let selected = pack_args.selected_files(&catalog)?;

    println!("Packs in {}:", pack_args.dir.display());
    for file in &selected {
        let display = catalog
            .entries()
            .iter()
            .find(|e| &e.file_name == file)
            .map(|e| e.display_name.as_str())
            .unwrap_or("(custom)");
        let status = if pack_args.dir.join(file).exists() {
            "ok"
        } else {
            "missing"
        };
        println!("  {display:<24} {file:<28} {status}");
    }
    Ok(())
}

fn run_check(config_args: &ConfigArgs) -> anyhow::Result<()> {
    let config = config_args.resolve()?;
    let warnings = config.validate()?;

    println!("Strategy: {}", config.strategy.name());
    println!("Deck size: {}", config.deck_size);
    for rarity in Rarity::ALL {
        println!("  {:<7} {}", rarity.as_str(), config.rarity_caps.get(rarity));
    }
    println!("  total   {}", config.rarity_caps.total());

    if warnings.is_empty() {
        println!("OK");
    } else {
        for warning in &warnings {
            println!("warning: {warning}");
        }
    }
    Ok(())
}
