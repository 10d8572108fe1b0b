use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use texmatch_core::{
    AssignConfig, ChannelKind, ChannelProgress, DEFAULT_MARKER, DEFAULT_THRESHOLD, SuffixTable, TraceProgress,
};
use texmatch_io::{BatchRequest, MatchStatus, MaterialReport, clear_batch, run_batch};

/// Assign exported textures to materials by name
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Material files or folders of materials
    #[arg(required = true)]
    selection: Vec<PathBuf>,

    /// Texture folder; defaults to the folder of the first selected path
    #[arg(long)]
    textures: Option<PathBuf>,

    /// Also assign textures whose names are only similar to the material's
    #[arg(long)]
    aggressive: bool,

    /// Largest edit distance accepted by --aggressive
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: usize,

    /// Bind this texture to materials that found no textures
    #[arg(long)]
    placeholder: Option<PathBuf>,

    /// Trailing token of every texture name
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Override a channel's suffix pattern, e.g. `normal=_nrm_$h`
    #[arg(long = "suffix", value_parser = parse_override)]
    suffixes: Vec<(ChannelKind, String)>,

    /// Override a channel's shader property, e.g. `roughness=_Glossiness`
    #[arg(long = "property", value_parser = parse_override)]
    properties: Vec<(ChannelKind, String)>,

    /// Reset the texture bindings of the selected materials instead of assigning
    #[arg(long, conflicts_with_all = ["textures", "aggressive", "placeholder"])]
    clear: bool,

    /// Print batch progress to stderr
    #[arg(long)]
    progress: bool,

    /// More output; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_override(value: &str) -> Result<(ChannelKind, String), String> {
    let (channel, setting) = value
        .split_once('=')
        .ok_or_else(|| format!("expected CHANNEL=VALUE, got `{value}`"))?;
    let channel = channel.parse::<ChannelKind>().map_err(|err| err.to_string())?;
    Ok((channel, setting.to_string()))
}

impl Args {
    fn config(&self) -> Result<AssignConfig> {
        let mut patterns = SuffixTable::default().patterns().clone();
        if self.marker != DEFAULT_MARKER {
            // keep the default segments but move them onto the new marker
            patterns = patterns.map(|_, pattern| {
                let segment = pattern.strip_suffix(DEFAULT_MARKER).unwrap_or(pattern);
                format!("{segment}{}", self.marker)
            });
        }
        for (channel, pattern) in &self.suffixes {
            patterns.set(*channel, pattern.clone());
        }
        let suffixes =
            SuffixTable::new(self.marker.as_str(), patterns).context("Invalid suffix patterns")?;

        let mut config = AssignConfig::default()
            .with_suffixes(suffixes)
            .with_highlight_missing(self.placeholder.is_some());
        if self.aggressive {
            config = config.with_aggressive_assign(self.threshold);
        }
        for (channel, property) in &self.properties {
            config.properties.set(*channel, property.clone());
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.clear {
        for material in clear_batch(&args.selection)? {
            println!("{} [cleared]", material.path.display());
        }
        return Ok(());
    }

    let config = args.config()?;
    let request = BatchRequest {
        selection: args.selection.clone(),
        texture_dir: args.textures.clone(),
        placeholder: args.placeholder.clone(),
    };
    let reports = if args.progress {
        run_with_progress_bar(&request, &config)?
    } else {
        run_batch(&request, &config, &mut TraceProgress)?
    };

    for report in &reports {
        let status = match &report.status {
            MatchStatus::Exact => "exact".to_string(),
            MatchStatus::Fuzzy { matched, distance } => format!("~{matched} ({distance})"),
            MatchStatus::Unmatched => "unmatched".to_string(),
        };
        println!("{} [{status}]", report.material.path.display());
        for (property, texture) in report.slots.iter() {
            println!("    {property} <- {}", texture.path.display());
        }
    }

    let matched = reports
        .iter()
        .filter(|report| report.status != MatchStatus::Unmatched)
        .count();
    println!("{matched} / {} materials assigned", reports.len());
    Ok(())
}

/// Run the batch on a worker thread while this thread prints its progress
fn run_with_progress_bar(request: &BatchRequest, config: &AssignConfig) -> Result<Vec<MaterialReport>> {
    let (sender, receiver) = crossbeam_channel::unbounded();
    std::thread::scope(|scope| {
        let worker = scope.spawn(move || run_batch(request, config, &mut ChannelProgress::new(sender)));
        // ends once the worker drops its sender
        for event in receiver.iter() {
            eprintln!("[{:>3.0}%] {}", event.fraction * 100.0, event.label);
        }
        match worker.join() {
            Ok(result) => Ok(result?),
            Err(_) => Err(anyhow::anyhow!("Batch worker panicked")),
        }
    })
}
