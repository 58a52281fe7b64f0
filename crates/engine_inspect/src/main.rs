//! # engine_inspect
//!
//! Inspects the process-wide component registry and loads JSON scene files
//! through it.
//!
//! ```text
//! engine_inspect list
//! engine_inspect load scene.json
//! engine_inspect dump scene.json --output scene.msgpack
//! ```

mod scene;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine_component::ComponentFactory;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scene::Scene;

#[derive(Parser)]
#[command(name = "engine_inspect", about = "Inspect registered ECS components and scenes")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every registered component with its wire id and Rust type.
    List,
    /// Decode a scene file and print its components.
    Load {
        /// Path to a JSON scene file
        scene: PathBuf,
    },
    /// Decode a scene file and print each component's serialized bytes.
    Dump {
        /// Path to a JSON scene file
        scene: PathBuf,

        /// Also write the records, MessagePack-encoded, to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("engine_inspect=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let factory = ComponentFactory::global();
    info!(
        components = factory.len(),
        builtins = engine_components::names::ALL.len(),
        "component registry ready"
    );

    match args.command {
        Command::List => list(factory),
        Command::Load { scene } => load(factory, &scene),
        Command::Dump { scene, output } => dump(factory, &scene, output.as_deref()),
    }
}

fn list(factory: &ComponentFactory) -> Result<()> {
    for descriptor in factory.descriptors() {
        println!(
            "{:<24} {}  {}",
            descriptor.name(),
            descriptor.id(),
            descriptor.type_name()
        );
    }
    Ok(())
}

fn read_scene(factory: &ComponentFactory, path: &Path) -> Result<Scene> {
    info!(file = %path.display(), "loading scene");
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read scene file {}", path.display()))?;
    let scene = Scene::load(factory, &json)
        .with_context(|| format!("cannot load scene file {}", path.display()))?;
    info!(
        entities = scene.entities.len(),
        components = scene.component_count(),
        "scene loaded"
    );
    Ok(scene)
}

fn load(factory: &ComponentFactory, path: &Path) -> Result<()> {
    let scene = read_scene(factory, path)?;
    for scene_entity in &scene.entities {
        println!("{}", scene_entity.entity);
        for component in &scene_entity.components {
            let name = factory.name_of_component(component.as_ref())?;
            println!("  {name}: {component:?}");
        }
    }
    Ok(())
}

fn dump(factory: &ComponentFactory, path: &Path, output: Option<&Path>) -> Result<()> {
    let scene = read_scene(factory, path)?;
    let records = scene.records(factory)?;
    for record in &records {
        let name = factory.name_of_id(record.component)?;
        println!("{} {name} {}", record.entity, to_hex(&record.data));
    }

    if let Some(output) = output {
        let bytes = engine_msgs::encode(&records)?;
        std::fs::write(output, &bytes)
            .with_context(|| format!("cannot write {}", output.display()))?;
        info!(file = %output.display(), bytes = bytes.len(), "records written");
    }
    Ok(())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
