use clap::{Parser, Subcommand};
use roadimpact_core::model::{
    Coordinate, CorridorRuleSet, RoadInfoHint, RoadNetwork, SeverityTimeline,
};
use roadimpact_osm::{
    config::{read_config_file, ImpactConfiguration},
    model::{
        fetch::{FetchOutcome, FetchToken, OverpassClient, RoadGraphFetcher},
        render::{DisruptionLocation, ImpactRenderCoordinator},
        OsmCliError,
    },
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ImpactAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// classify the road network around a disruption and print it as JSON
    Network {
        #[arg(long, allow_negative_numbers = true, help = "latitude of the disruption")]
        lat: f64,
        #[arg(long, allow_negative_numbers = true, help = "longitude of the disruption")]
        lng: f64,
        #[arg(long, help = "name of the disrupted road, if known")]
        road_name: Option<String>,
        #[arg(long, help = "path to .toml or .json file with roadimpact parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "path to .toml or .json file with corridor rules")]
        corridor_file: Option<String>,
    },
    /// classify the road network and print the render frame for one or all hours
    Render {
        #[arg(long, allow_negative_numbers = true, help = "latitude of the disruption")]
        lat: f64,
        #[arg(long, allow_negative_numbers = true, help = "longitude of the disruption")]
        lng: f64,
        #[arg(long, help = "path to .json file with the hourly severity timeline")]
        timeline_file: String,
        #[arg(long, help = "render only this index of the timeline")]
        hour_index: Option<usize>,
        #[arg(long, help = "name of the disrupted road, if known")]
        road_name: Option<String>,
        #[arg(long, help = "path to .toml or .json file with roadimpact parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "path to .toml or .json file with corridor rules")]
        corridor_file: Option<String>,
    },
}

#[derive(Serialize)]
struct NetworkReport<'a> {
    area: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
    #[serde(flatten)]
    network: &'a RoadNetwork,
}

fn read_configuration(f: &Option<String>) -> Result<ImpactConfiguration, OsmCliError> {
    match f {
        None => Ok(ImpactConfiguration::default()),
        Some(f) => {
            log::info!("reading roadimpact configuration from {f}");
            ImpactConfiguration::try_from(f)
        }
    }
}

fn read_corridors(f: &Option<String>) -> Result<CorridorRuleSet, OsmCliError> {
    match f {
        None => Ok(CorridorRuleSet::default()),
        Some(f) => {
            log::info!("reading corridor rules from {f}");
            read_config_file(f)
        }
    }
}

fn disruption_location(
    lat: f64,
    lng: f64,
    road_name: &Option<String>,
) -> Result<DisruptionLocation, OsmCliError> {
    let center = Coordinate::new(lat, lng);
    if !center.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
        return Err(OsmCliError::ConfigurationError(format!(
            "invalid disruption location {center}"
        )));
    }
    let hint = road_name.as_deref().map(RoadInfoHint::named);
    Ok(DisruptionLocation::new(center, hint))
}

fn build_runtime() -> Result<tokio::runtime::Runtime, OsmCliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(OsmCliError::from)
}

pub fn run(app: &App) -> Result<(), OsmCliError> {
    env_logger::init();
    match app {
        App::Network {
            lat,
            lng,
            road_name,
            configuration_file,
            corridor_file,
        } => {
            let conf = read_configuration(configuration_file)?;
            let corridors = read_corridors(corridor_file)?;
            let location = disruption_location(*lat, *lng, road_name)?;
            let client = OverpassClient::new(&conf.fetch)?;
            let mut fetcher =
                RoadGraphFetcher::new(client, conf.fetch.clone(), conf.road_classifier());
            let runtime = build_runtime()?;
            let outcome = runtime.block_on(fetcher.fetch(
                &location.center,
                location.hint.as_ref(),
                &corridors,
                &FetchToken::detached(),
            ))?;
            let warning = match &outcome {
                FetchOutcome::Degraded { cause, .. } => Some(cause.to_string()),
                _ => None,
            };
            let report = NetworkReport {
                area: conf.areas.area_name(&location.center),
                warning,
                network: outcome.network(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        App::Render {
            lat,
            lng,
            timeline_file,
            hour_index,
            road_name,
            configuration_file,
            corridor_file,
        } => {
            let conf = read_configuration(configuration_file)?;
            let corridors = read_corridors(corridor_file)?;
            let location = disruption_location(*lat, *lng, road_name)?;
            let timeline: SeverityTimeline =
                serde_json::from_str(&std::fs::read_to_string(timeline_file)?)?;
            timeline.validate()?;

            let client = OverpassClient::new(&conf.fetch)?;
            let fetcher =
                RoadGraphFetcher::new(client, conf.fetch.clone(), conf.road_classifier());
            let mut coordinator = ImpactRenderCoordinator::new(
                fetcher,
                corridors,
                conf.color_model(),
                conf.extent_calculator(),
                conf.areas.clone(),
            );
            let runtime = build_runtime()?;
            let status = runtime.block_on(coordinator.load(location));
            log::info!("road network status: {status:?}");

            let frames = match hour_index {
                Some(idx) => vec![coordinator.render_hour(&timeline, *idx)?],
                None => (0..timeline.len())
                    .map(|idx| coordinator.render_hour(&timeline, idx))
                    .collect::<Result<Vec<_>, _>>()?,
            };
            println!("{}", serde_json::to_string_pretty(&frames)?);
            Ok(())
        }
    }
}

fn main() {
    let args = ImpactAppArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("roadimpact failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
