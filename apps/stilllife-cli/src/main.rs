use anyhow::bail;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stilllife_assets::{DecodedImage, MemoryBackend, MemoryTexture};
use stilllife_input::ViewKey;
use stilllife_render::RecordingStage;
use stilllife_scene::{DEFAULT_TEXTURE_DIR, MATERIALS, TABLEAU, TEXTURES, Tableau};
use stilllife_view::ViewManager;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stilllife-cli", about = "CLI tool for the still-life scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and scene contents
    Info,
    /// Record one frame of the scene and print its uniform writes and draws
    DrawList {
        /// Only draw the named object
        #[arg(short, long)]
        object: Option<String>,
        /// Emit the recorded frame as JSON
        #[arg(long)]
        json: bool,
        /// Load textures from this directory; without it every part draws untextured
        #[arg(long)]
        textures: Option<PathBuf>,
    },
    /// Decode every scene texture and report size and channel layout
    Textures {
        /// Directory holding the scene textures
        #[arg(short, long, default_value = DEFAULT_TEXTURE_DIR)]
        dir: PathBuf,
    },
}

const NO_KEYS: [ViewKey; 0] = [];

fn record_frame(
    object: Option<&str>,
    texture_dir: Option<&PathBuf>,
) -> anyhow::Result<RecordingStage> {
    let mut tableau: Tableau<MemoryTexture> = Tableau::new();
    let mut backend = MemoryBackend::new();
    let mut stage = RecordingStage::new();

    if let Some(dir) = texture_dir {
        tableau.load_textures(dir, &mut backend);
    }
    tableau.define_materials()?;
    tableau.setup_lights(&mut stage);
    tableau.load_meshes(&mut stage);

    let mut view = ViewManager::default();
    view.prepare_frame(0.0, &NO_KEYS, &mut stage);

    match object {
        Some(name) => {
            if tableau.render_object(&mut stage, name).is_none() {
                let known: Vec<_> = TABLEAU.iter().map(|p| p.object.name).collect();
                bail!("unknown object {name:?} (expected one of: {})", known.join(", "));
            }
        }
        None => {
            tableau.render(&mut stage);
        }
    }
    Ok(stage)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("stilllife-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", stilllife_common::crate_info());
            println!("input: {}", stilllife_input::crate_info());
            println!("view: {}", stilllife_view::crate_info());
            println!("assets: {}", stilllife_assets::crate_info());
            println!("render: {}", stilllife_render::crate_info());
            println!("scene: {}", stilllife_scene::crate_info());
            println!();
            println!("textures: {}", TEXTURES.len());
            println!("materials: {}", MATERIALS.len());
            for placed in &TABLEAU {
                let o = placed.origin;
                println!(
                    "  {:<10} {:>2} parts at ({}, {}, {})",
                    placed.object.name,
                    placed.object.parts.len(),
                    o.x,
                    o.y,
                    o.z
                );
            }
        }
        Commands::DrawList {
            object,
            json,
            textures,
        } => {
            let stage = record_frame(object.as_deref(), textures.as_ref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stage)?);
            } else {
                print!("{stage}");
            }
        }
        Commands::Textures { dir } => {
            println!("Textures in {}", dir.display());
            let mut failed = 0;
            for spec in &TEXTURES {
                let path = dir.join(spec.file);
                match DecodedImage::from_file(&path) {
                    Ok(image) if matches!(image.channels, 3 | 4) => {
                        println!(
                            "  {:<16} {:<28} {}x{}, {} channels",
                            spec.tag, spec.file, image.width, image.height, image.channels
                        );
                    }
                    Ok(image) => {
                        failed += 1;
                        println!(
                            "  {:<16} {:<28} unsupported: {} channels",
                            spec.tag, spec.file, image.channels
                        );
                    }
                    Err(e) => {
                        failed += 1;
                        println!("  {:<16} {:<28} FAILED: {e}", spec.tag, spec.file);
                    }
                }
            }
            if failed > 0 {
                bail!("{failed} of {} textures failed to load", TEXTURES.len());
            }
            println!("All {} textures OK", TEXTURES.len());
        }
    }

    Ok(())
}
