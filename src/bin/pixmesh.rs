use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glam::{Quat, Vec3};

use pixmesh::{CameraFrustum, ColorBuffer, DepthBuffer, ProjectionConfig, ViewFrame};

#[derive(Parser, Debug)]
#[command(name = "pixmesh", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a depth/color capture into a pixel-quad mesh and write it as PLY.
    Project(ProjectArgs),
}

#[derive(Parser, Debug)]
struct ProjectArgs {
    /// Aligned RGBA color image (any format the `image` crate decodes).
    #[arg(long)]
    color: PathBuf,

    /// Depth map image, read as 32-bit float luma (e.g. OpenEXR).
    #[arg(long)]
    depth: PathBuf,

    /// Camera description JSON.
    #[arg(long)]
    camera: PathBuf,

    /// Projection parameter JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PLY path.
    #[arg(long)]
    out: PathBuf,

    /// Worker threads; runs the sequential pass when omitted.
    #[arg(long)]
    threads: Option<usize>,
}

/// Camera file schema: pose plus either explicit view-frame corners or a
/// symmetric lens (vertical fov, aspect taken from the images).
#[derive(serde::Deserialize, Debug)]
struct CameraSpec {
    position: [f32; 3],
    /// Quaternion as [x, y, z, w]; identity when omitted.
    #[serde(default = "identity_rotation")]
    rotation: [f32; 4],
    #[serde(default)]
    frame: Option<ViewFrame>,
    #[serde(default = "default_fov_y_deg")]
    fov_y_deg: f32,
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn default_fov_y_deg() -> f32 {
    60.0
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Project(args) => cmd_project(args),
    }
}

fn cmd_project(args: ProjectArgs) -> anyhow::Result<()> {
    // image decodes the top row first; the projector expects row 0 at the
    // bottom of the frame
    let color_img = image::open(&args.color)
        .with_context(|| format!("open color image '{}'", args.color.display()))?
        .flipv();
    let depth_img = image::open(&args.depth)
        .with_context(|| format!("open depth map '{}'", args.depth.display()))?
        .flipv();

    let (width, height) = (color_img.width(), color_img.height());
    if depth_img.width() != width || depth_img.height() != height {
        anyhow::bail!(
            "depth map {}x{} does not match color image {}x{}",
            depth_img.width(),
            depth_img.height(),
            width,
            height
        );
    }

    let rgba = color_img.to_rgba32f();
    let color = ColorBuffer::new(width, height, rgba.pixels().map(|p| p.0).collect())?;
    let depth = DepthBuffer::new(width, height, depth_img.to_luma32f().into_raw())?;

    let frustum = read_camera_json(&args.camera, width, height)?;
    let cfg = match &args.config {
        Some(path) => read_config_json(path)?,
        None => ProjectionConfig::default(),
    };
    cfg.validate()?;

    let (mesh, stats) = match args.threads {
        Some(threads) => {
            pixmesh::project_parallel(&depth, &color, &frustum, &cfg, Some(threads))?
        }
        None => pixmesh::project_with_observer(&depth, &color, &frustum, &cfg, &mut |done, total| {
            if done.is_multiple_of(100_000) {
                eprintln!("projected {done}/{total} pixels");
            }
            true
        })?,
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    pixmesh::export::write_ply(&mesh, BufWriter::new(file))?;

    println!(
        "wrote {} quads ({} skipped by max depth, {} degenerate) to '{}'",
        stats.quads_emitted,
        stats.skipped_max_depth,
        stats.degenerate_pixels,
        args.out.display()
    );
    Ok(())
}

fn read_camera_json(path: &Path, width: u32, height: u32) -> anyhow::Result<CameraFrustum> {
    let f = File::open(path).with_context(|| format!("open camera '{}'", path.display()))?;
    let spec: CameraSpec =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse camera JSON")?;

    let position = Vec3::from(spec.position);
    let [x, y, z, w] = spec.rotation;
    let rotation = Quat::from_xyzw(x, y, z, w).normalize();

    Ok(match spec.frame {
        Some(frame) => CameraFrustum::new(position, rotation, frame),
        None => CameraFrustum::from_fov(
            position,
            rotation,
            spec.fov_y_deg.to_radians(),
            width as f32 / height as f32,
        ),
    })
}

fn read_config_json(path: &Path) -> anyhow::Result<ProjectionConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg: ProjectionConfig =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse projection JSON")?;
    Ok(cfg)
}
