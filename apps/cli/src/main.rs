#![deny(warnings)]

//! Headless CLI: run a what-if scenario for one catalog entity and print the
//! current vs. simulated comparison as JSON.

use anyhow::{anyhow, bail, Context, Result};
use catalog::InMemoryCatalog;
use scenario_core::{EntityCategory, ScenarioDelta, ScenarioParams, ScenarioResult};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: scenario [--catalog FILE | --generate SEED] [--list]
                [--category kpi|product|zone] --id ID [--params FILE]
                [--growth PCT] [--price-change PCT] [--promo MULT]
                [--lead-time DAYS] [--stock UNITS] [--pretty] [--version]";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    catalog: Option<PathBuf>,
    generate: Option<u64>,
    list: bool,
    category: Option<EntityCategory>,
    id: Option<String>,
    params_file: Option<PathBuf>,
    growth: Option<f64>,
    price_change: Option<f64>,
    promo: Option<f64>,
    lead_time: Option<f64>,
    stock: Option<f64>,
    pretty: bool,
    version: bool,
}

fn value<I: Iterator<Item = String>>(it: &mut I, flag: &str) -> Result<String> {
    it.next().ok_or_else(|| anyhow!("{flag} expects a value"))
}

fn number<I: Iterator<Item = String>>(it: &mut I, flag: &str) -> Result<f64> {
    let raw = value(it, flag)?;
    raw.parse::<f64>()
        .with_context(|| format!("{flag}: '{raw}' is not a number"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--catalog" => out.catalog = Some(value(&mut it, "--catalog")?.into()),
            "--generate" => {
                let raw = value(&mut it, "--generate")?;
                out.generate = Some(raw.parse::<u64>().with_context(|| format!("bad seed '{raw}'"))?);
            }
            "--list" => out.list = true,
            "--category" => out.category = Some(value(&mut it, "--category")?.parse::<EntityCategory>()?),
            "--id" => out.id = Some(value(&mut it, "--id")?),
            "--params" => out.params_file = Some(value(&mut it, "--params")?.into()),
            "--growth" => out.growth = Some(number(&mut it, "--growth")?),
            "--price-change" => out.price_change = Some(number(&mut it, "--price-change")?),
            "--promo" => out.promo = Some(number(&mut it, "--promo")?),
            "--lead-time" => out.lead_time = Some(number(&mut it, "--lead-time")?),
            "--stock" => out.stock = Some(number(&mut it, "--stock")?),
            "--pretty" => out.pretty = true,
            "--version" | "-V" => out.version = true,
            "--help" | "-h" => bail!("{USAGE}"),
            other => bail!("unknown argument '{other}'\n{USAGE}"),
        }
    }
    Ok(out)
}

/// Parameters from `--params` (YAML or JSON) with flag overrides on top.
fn scenario_params(args: &CliArgs) -> Result<ScenarioParams> {
    let mut params: ScenarioParams = match &args.params_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ScenarioParams::default(),
    };
    if let Some(v) = args.growth {
        params.demand_growth_pct = v;
    }
    if let Some(v) = args.price_change {
        params.price_change_pct = v;
    }
    if let Some(v) = args.promo {
        params.promo_multiplier = v;
    }
    if let Some(v) = args.lead_time {
        params.lead_time_days = v;
    }
    if let Some(v) = args.stock {
        params.stock_available = v;
    }
    Ok(params)
}

fn load_catalog(args: &CliArgs) -> Result<InMemoryCatalog> {
    match (&args.catalog, args.generate) {
        (Some(_), Some(_)) => bail!("--catalog and --generate are mutually exclusive"),
        (Some(path), None) => InMemoryCatalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display())),
        (None, seed) => {
            let seed = seed.unwrap_or(42);
            info!(seed, "using generated demo catalog");
            Ok(catalog::fixtures::demo_catalog(seed)?)
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    category: EntityCategory,
    id: &'a str,
    params: &'a ScenarioParams,
    result: &'a ScenarioResult,
    delta: ScenarioDelta,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.version {
        println!(
            "scenario {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        return Ok(());
    }

    let catalog = load_catalog(&args)?;
    if args.list {
        for category in EntityCategory::ALL {
            for id in catalog.ids(category) {
                println!("{category}\t{id}");
            }
        }
        return Ok(());
    }

    let category = args.category.unwrap_or(EntityCategory::Product);
    let id = args
        .id
        .as_deref()
        .ok_or_else(|| anyhow!("--id is required\n{USAGE}"))?;
    let params = scenario_params(&args)?;
    info!(%category, id, ?params, "running scenario");

    let result = scenario_runtime::simulate_entity(&catalog, category, id, &params);
    let delta = result.delta();
    info!(
        revenue = %result.simulated.metrics.revenue,
        revenue_delta = %delta.revenue,
        service_level = result.simulated.metrics.service_level,
        "scenario complete"
    );

    let report = Report {
        category,
        id,
        params: &params,
        result: &result,
        delta,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
