use anyhow::Context;
use bigday_render::{DisplayContext, ProgramState, RecordingRenderer, Scratchpad};
use bigday_scene::{DrawPlan, DrawableScene, MiffyScene};
use bigday_tools::SceneInspector;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bigday-cli", about = "Headless tools for the big day scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List the scene registry
    Registry {
        /// Emit the registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every object's composed transform
    Transforms,
    /// Compose frames against a recording renderer and print the draw log
    Frames {
        /// Number of frames to compose
        #[arg(short, long, default_value = "3")]
        count: u32,
        /// Animation time advanced before each frame, in milliseconds
        #[arg(short, long, default_value = "16")]
        step_ms: f64,
        /// Also draw sky, grass and sun
        #[arg(long)]
        background: bool,
        /// Also draw the title while it is on screen
        #[arg(long)]
        title: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            let scene = MiffyScene::new();
            println!("bigday-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", SceneInspector::summary(&scene));
            println!("scene: {}", bigday_scene::crate_info());
            println!("render: {}", bigday_render::crate_info());
            println!("tools: {}", bigday_tools::crate_info());
        }
        Commands::Registry { json } => {
            let scene = MiffyScene::new();
            if json {
                let out = serde_json::to_string_pretty(scene.registry())
                    .context("serializing scene registry")?;
                println!("{out}");
            } else {
                for (name, entry) in scene.registry().iter() {
                    let m = &entry.material;
                    println!(
                        "{name:<13} {:<36} {:?} {} ambient={} diffusivity={} specularity={}",
                        entry.shape.to_string(),
                        m.shading,
                        m.color.to_hex_string(),
                        m.ambient,
                        m.diffusivity,
                        m.specularity,
                    );
                }
            }
        }
        Commands::Transforms => {
            let scene = MiffyScene::new();
            for info in SceneInspector::list(&scene) {
                println!("{info}");
            }
        }
        Commands::Frames {
            count,
            step_ms,
            background,
            title,
        } => {
            let plan = DrawPlan {
                house: true,
                background,
                title,
            };
            run_frames(plan, count, step_ms)?;
        }
    }

    Ok(())
}

fn run_frames(plan: DrawPlan, count: u32, step_ms: f64) -> anyhow::Result<()> {
    let mut scene = MiffyScene::with_plan(plan);
    let mut renderer = RecordingRenderer::new();
    let mut scratchpad = Scratchpad::new();
    let mut state = ProgramState::new();

    for frame in 0..count {
        state.advance_clock(step_ms);
        scratchpad.update_controls(&mut state);
        let mut ctx = DisplayContext::new(&mut renderer, &mut scratchpad, 1080, 600);
        scene
            .display(&mut ctx, &mut state)
            .with_context(|| format!("composing frame {frame}"))?;

        println!(
            "frame {frame} t={:.3}s draws={}",
            state.clock().time_sec(),
            renderer.records().len()
        );
        print!("{}", renderer.log());
        renderer.take();
    }

    println!("controls registrations: {}", scratchpad.registrations());
    Ok(())
}
