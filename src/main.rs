use {
    clap::Parser,
    rand::{SeedableRng, rngs::StdRng},
    std::{path::PathBuf, time::Instant},
    terrain_noise::{Palette, TerrainBuilder, colorize, generate_terrain, save},
};

#[derive(Parser)]
#[command(name = "terrain_noise")]
#[command(about = "Generate a terrain heightmap from layered gradient noise")]
struct Args {
    #[arg(long, default_value_t = 600)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Random seed; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 3)]
    octaves: usize,

    /// Lattice spacing in pixels.
    #[arg(long, default_value_t = 100.0)]
    stretch: f64,

    /// Frequency factor between octaves.
    #[arg(long, default_value_t = 2.0)]
    lacunarity: f64,

    /// Amplitude factor between octaves.
    #[arg(long, default_value_t = 0.5)]
    persistence: f64,

    #[arg(long, default_value_t = 0.72)]
    redistribution: f64,

    #[arg(long, default_value_t = 0.1)]
    water_level: f64,

    #[arg(long, value_enum, default_value_t = Palette::Grayscale)]
    palette: Palette,

    /// `.ppm` is written as plain-text PPM, anything else by extension.
    #[arg(short, long, default_value = "output.ppm")]
    output: PathBuf,
}

fn run(args: &Args) -> terrain_noise::Result<()> {
    let config = TerrainBuilder::new()
        .size(args.width, args.height)
        .octave_series(args.octaves, args.stretch, args.lacunarity, args.persistence)
        .redistribution(args.redistribution)
        .water_level(args.water_level)
        .build()?;

    if args.palette == Palette::Terrain && config.water_level == 0.0 {
        log::warn!("water level is 0, the terrain palette will show no sea");
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let field = generate_terrain(&config, &mut rng)?;
    let colors = colorize(&field, args.palette, config.water_level);
    save(&args.output, field.width(), field.height(), &colors)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let start = Instant::now();
    if let Err(err) = run(&args) {
        log::error!("{err}");
        std::process::exit(1);
    }
    log::info!("elapsed time {:.3} seconds", start.elapsed().as_secs_f64());
}
