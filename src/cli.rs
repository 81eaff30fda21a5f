use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use festmap_application::prelude as flows;
use festmap_core::{
    editor::{BoothDraft, Editor, Submission, TapOutcome},
    entities::*,
    render::OverlayRenderer,
    style::MapMode,
    usecases,
};
use festmap_db_jfs::JsonFileStore;
use festmap_gateways::geojson_surface::GeoJsonSurface;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "festmap", version, about = "Manage and render the booths of a festival map")]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all booths, the newest first
    List,
    /// Find the booth at a position or the nearest one
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Also consider inactive booths
        #[arg(long)]
        all: bool,
    },
    /// Create booths from a JSON file with an array of booths
    Import { file: PathBuf },
    /// Create a new booth from at least three vertices
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "info")]
        category: String,
        #[arg(long)]
        description: Option<String>,
        /// Vertex as `lat,lng`, repeat for every vertex in drawing order
        #[arg(long = "point", value_name = "LAT,LNG", value_parser = parse_point, required = true)]
        points: Vec<MapPoint>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Replace the area of a booth
    Reshape {
        id: String,
        #[arg(long = "point", value_name = "LAT,LNG", value_parser = parse_point, required = true)]
        points: Vec<MapPoint>,
    },
    /// Change single fields of a booth with a partial JSON booth
    Patch {
        id: String,
        /// JSON file with the changed fields, stdin if omitted
        file: Option<PathBuf>,
    },
    /// Open or close a booth
    Toggle { id: String },
    /// Report the congestion of a booth
    Congestion {
        id: String,
        #[arg(value_parser = parse_congestion)]
        level: CongestionLevel,
        /// Estimated waiting time in minutes
        #[arg(long)]
        waiting: Option<u32>,
    },
    Delete { id: String },
    /// Search active booths
    Search {
        #[arg(long)]
        text: Option<String>,
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long, value_parser = parse_congestion)]
        congestion: Option<CongestionLevel>,
        /// Include inactive booths
        #[arg(long)]
        all: bool,
    },
    /// Render all booths as a GeoJSON feature collection
    Render {
        /// Map level, the configured level if omitted
        #[arg(long)]
        level: Option<u8>,
        /// Show inactive booths faded
        #[arg(long)]
        admin: bool,
        /// Center the map on a booth
        #[arg(long, value_name = "ID")]
        focus: Option<String>,
        /// Output file, stdout if omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print every change of the booths until interrupted
    Watch,
}

fn parse_point(s: &str) -> std::result::Result<MapPoint, String> {
    s.parse().map_err(|err: MapPointParseError| err.to_string())
}

fn parse_congestion(s: &str) -> std::result::Result<CongestionLevel, String> {
    s.parse()
        .map_err(|_| format!("Unknown congestion level '{s}'"))
}

fn print_booths<'a>(booths: impl IntoIterator<Item = &'a Booth>) {
    let mut count = 0;
    for booth in booths {
        let congestion = booth
            .congestion()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<34} {:<11} {:<8} {:<10} {}",
            booth.id,
            booth.category,
            if booth.is_active { "active" } else { "inactive" },
            congestion,
            booth.name
        );
        count += 1;
    }
    println!("\n{count} booth(s)");
}

fn collect_vertices(editor: &mut Editor, points: &[MapPoint], booths: &[Booth]) -> Result<()> {
    for point in points {
        let (lat, lng) = point.to_lat_lng_deg();
        match editor.tap(*point, booths) {
            TapOutcome::VertexAdded(_) => {}
            TapOutcome::BoothHit(id) => bail!("Vertex {lat},{lng} lies within booth {id}"),
            TapOutcome::Ignored => bail!("Vertex {lat},{lng} has been ignored"),
        }
    }
    Ok(())
}

pub async fn run(args: Args) -> Result<()> {
    let Args { config, command } = args;
    let cfg = Config::try_load_from_file_or_default(config.as_ref())?;
    let db = Arc::new(JsonFileStore::open(&cfg.db.dir)?);
    let feed = flows::BoothFeed::new(usecases::load_booths(&*db)?);

    match command {
        Command::List => {
            print_booths(feed.current().iter());
        }
        Command::Locate { lat, lng, all } => {
            let point = MapPoint::try_from_lat_lng_deg(lat, lng)
                .ok_or_else(|| anyhow!("Invalid position {lat},{lng}"))?;
            match flows::locate_booth(&feed.current(), point, all) {
                Some(located) => println!("{}", serde_json::to_string_pretty(&located)?),
                None => println!("No booth found"),
            }
        }
        Command::Import { file } => {
            let reader = BufReader::new(File::open(&file)?);
            let report = flows::import_booths(&*db, &feed, reader)?;
            for (index, err) in &report.rejected {
                println!("Rejected booth #{index}: {err}");
            }
            println!("Imported {} booth(s)", report.created.len());
        }
        Command::Create {
            name,
            category,
            description,
            points,
            tags,
        } => {
            let mut editor = Editor::new(cfg.editor);
            editor.begin_new();
            collect_vertices(&mut editor, &points, &feed.current())?;
            let draft = BoothDraft {
                name,
                category: BoothCategory::from_key(&category),
                description: description.unwrap_or_default(),
                tags,
                ..Default::default()
            };
            let Submission::Create(new_booth) = editor.submit(draft)? else {
                bail!("Expected a new booth");
            };
            let booth = flows::create_booth(&*db, &feed, new_booth)?;
            println!("{}", booth.id);
        }
        Command::Reshape { id, points } => {
            let booth = usecases::get_booth(&*db, &id)?;
            let mut editor = Editor::new(cfg.editor);
            editor.begin_edit(&booth);
            editor.reset();
            collect_vertices(&mut editor, &points, &feed.current())?;
            let Submission::Update(id, patch) = editor.submit(BoothDraft::from(&booth))? else {
                bail!("Expected an update of booth {id}");
            };
            let booth = flows::update_booth(&*db, &feed, id.as_str(), patch)?;
            println!("Booth {} has {} vertices", booth.id, booth.area.len());
        }
        Command::Patch { id, file } => {
            let booth = match file {
                Some(file) => {
                    flows::patch_booth(&*db, &feed, &id, BufReader::new(File::open(&file)?))?
                }
                None => flows::patch_booth(&*db, &feed, &id, io::stdin().lock())?,
            };
            print_booths([&booth]);
        }
        Command::Toggle { id } => {
            let booth = flows::toggle_booth_active(&*db, &feed, &id)?;
            print_booths([&booth]);
        }
        Command::Congestion { id, level, waiting } => {
            let booth = flows::set_booth_congestion(&*db, &feed, &id, level, waiting)?;
            print_booths([&booth]);
        }
        Command::Delete { id } => {
            flows::delete_booth(&*db, &feed, &id)?;
        }
        Command::Search {
            text,
            categories,
            congestion,
            all,
        } => {
            let filter = usecases::BoothFilter {
                text,
                categories: categories
                    .iter()
                    .map(|c| BoothCategory::from_key(c))
                    .collect(),
                congestion,
                only_active: !all,
            };
            let booths = feed.current();
            print_booths(usecases::filter_booths(&booths, &filter));
        }
        Command::Render {
            level,
            admin,
            focus,
            out,
        } => {
            let mode = if admin { MapMode::Admin } else { cfg.map.mode };
            let mut surface =
                GeoJsonSurface::new(cfg.map.center, level.unwrap_or(cfg.map.level));
            let mut renderer = OverlayRenderer::new(mode);
            let booths = feed.current();
            if let Some(id) = focus {
                let booth = booths
                    .iter()
                    .find(|b| b.id.as_str() == id)
                    .ok_or_else(|| anyhow!("Booth {id} not found"))?;
                if !renderer.focus_booth(&mut surface, booth) {
                    log::warn!("Booth {id} has no area to focus on");
                }
            }
            let count = renderer.render(&mut surface, &booths);
            log::info!("Rendered {count} of {} booths", booths.len());
            match out {
                Some(path) => surface.save(&path)?,
                None => println!(
                    "{}",
                    serde_json::to_string_pretty(&surface.to_feature_collection())?
                ),
            }
        }
        Command::Watch => {
            let subscription = feed.subscribe_with(|snapshot| {
                let active = snapshot.iter().filter(|b| b.is_active).count();
                let crowded = snapshot
                    .iter()
                    .filter(|b| b.congestion() >= Some(CongestionLevel::High))
                    .count();
                println!(
                    "{} booths, {active} active, {crowded} crowded",
                    snapshot.len()
                );
            });
            let refresher =
                flows::PollingRefresher::new(cfg.feed.poll_interval).spawn(Arc::clone(&db), feed);
            tokio::signal::ctrl_c().await?;
            subscription.unsubscribe();
            refresher.abort();
        }
    }
    Ok(())
}
