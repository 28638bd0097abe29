use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use irrigation::cfg::EngineCfg;
use irrigation::fittings::count_fittings;
use irrigation::model::Snapshot;
use irrigation::flow::PlotPipeProfile;
use irrigation::report::{analyze, water_inputs, NetworkReport, WaterRequirement};
use polars::df;
use polars::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "irrigation")]
#[command(about = "Greenhouse irrigation network analysis")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Analyze a snapshot and write the network report
    Analyze {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Per-plot table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Water requirement figures (JSON array) to merge per plot
        #[arg(long)]
        water: Option<PathBuf>,
        /// Engine config JSON; missing fields keep defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// Sprinkler discharge (L/min), overrides the config
        #[arg(long)]
        sprinkler_rate: Option<f64>,
        /// Drip emitter discharge (L/min), overrides the config
        #[arg(long)]
        drip_rate: Option<f64>,
    },
    /// Print fitting counts as JSON
    Fittings {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the plot geometry the water requirement engine consumes
    WaterInputs {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Analyze {
            input,
            out,
            csv,
            water,
            config,
            sprinkler_rate,
            drip_rate,
        } => {
            let cfg = load_cfg(config.as_deref(), sprinkler_rate, drip_rate)?;
            run_analyze(&input, &out, csv.as_deref(), water.as_deref(), &cfg)
        }
        Action::Fittings { input, config } => {
            let cfg = load_cfg(config.as_deref(), None, None)?;
            fittings(&input, &cfg)
        }
        Action::WaterInputs { input } => print_water_inputs(&input),
        Action::Report => report(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Config file (or defaults) with flag overrides applied on top.
fn load_cfg(
    path: Option<&Path>,
    sprinkler_rate: Option<f64>,
    drip_rate: Option<f64>,
) -> Result<EngineCfg> {
    let mut cfg = match path {
        Some(p) => read_json::<EngineCfg>(p)?,
        None => EngineCfg::default(),
    };
    if let Some(rate) = sprinkler_rate {
        cfg.flow.sprinkler_flow_rate = rate;
    }
    if let Some(rate) = drip_rate {
        cfg.flow.drip_emitter_flow_rate = rate;
    }
    Ok(cfg)
}

fn run_analyze(
    input: &Path,
    out: &Path,
    csv: Option<&Path>,
    water: Option<&Path>,
    cfg: &EngineCfg,
) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "analyze");
    let snapshot: Snapshot = read_json(input)?;
    let mut report = analyze(&snapshot, cfg);

    let mut merged = 0;
    if let Some(path) = water {
        let reqs: Vec<WaterRequirement> = read_json(path)?;
        merged = report.merge_water(&reqs);
        tracing::info!(requirements = reqs.len(), merged, "water_merged");
    }

    ensure_parent(out)?;
    fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let mut prov = provenance::Provenance::new(*cfg);
    prov.water_merged = merged;
    prov.input(input);
    if let Some(path) = water {
        prov.input(path);
    }
    prov.output(out);
    if let Some(path) = csv {
        let rows = write_plots_csv(path, &report)?;
        tracing::info!(rows, csv = %path.display(), "plots_csv");
        prov.output(path);
    }
    let sidecar = prov.write_beside(out)?;
    tracing::info!(
        plots = report.totals.plot_count,
        total_flow = report.summary.total_flow_rate,
        sidecar = %sidecar.display(),
        "analyze_done"
    );
    Ok(())
}

/// One row per plot, in report order. Returns the row count.
fn write_plots_csv(path: &Path, report: &NetworkReport) -> Result<usize> {
    let profiles: Vec<&PlotPipeProfile> = report.plots.iter().map(|p| &p.profile).collect();
    let daily: Vec<Option<f64>> = report
        .plots
        .iter()
        .map(|p| p.water.as_ref().map(|w| w.daily_liters))
        .collect();
    let mut df = df!(
        "plotId" => profiles.iter().map(|p| p.plot_id.clone()).collect::<Vec<_>>(),
        "plotName" => profiles.iter().map(|p| p.plot_name.clone()).collect::<Vec<_>>(),
        "cropType" => profiles.iter().map(|p| p.crop_type.clone()).collect::<Vec<_>>(),
        "areaM2" => profiles.iter().map(|p| p.area_m2).collect::<Vec<_>>(),
        "maxMainPipeLength" => profiles.iter().map(|p| p.max_main_pipe_length).collect::<Vec<_>>(),
        "totalMainPipeLength" => profiles.iter().map(|p| p.total_main_pipe_length).collect::<Vec<_>>(),
        "maxSubPipeLength" => profiles.iter().map(|p| p.max_sub_pipe_length).collect::<Vec<_>>(),
        "totalSubPipeLength" => profiles.iter().map(|p| p.total_sub_pipe_length).collect::<Vec<_>>(),
        "subPipeCount" => profiles.iter().map(|p| p.sub_pipe_count as u64).collect::<Vec<_>>(),
        "sprinklerCount" => profiles.iter().map(|p| p.sprinkler_count as u64).collect::<Vec<_>>(),
        "dripEmitterCount" => profiles.iter().map(|p| p.drip_emitter_count as u64).collect::<Vec<_>>(),
        "flowRate" => profiles.iter().map(|p| p.flow_rate).collect::<Vec<_>>(),
        "dailyLiters" => daily,
    )?;
    ensure_parent(path)?;
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(df.height())
}

fn fittings(input: &Path, cfg: &EngineCfg) -> Result<()> {
    tracing::info!(input = %input.display(), "fittings");
    let snapshot: Snapshot = read_json(input)?;
    let counts = count_fittings(&snapshot, &cfg.proximity);
    println!("{}", serde_json::to_string_pretty(&counts)?);
    Ok(())
}

fn print_water_inputs(input: &Path) -> Result<()> {
    tracing::info!(input = %input.display(), "water_inputs");
    let snapshot: Snapshot = read_json(input)?;
    println!("{}", serde_json::to_string_pretty(&water_inputs(&snapshot.shapes))?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "engine_version": irrigation::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
