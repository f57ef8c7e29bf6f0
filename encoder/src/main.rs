use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gif2bit_lib::{
    discover, load_bundle, Animation, CArray, DirSink, Layout, MemorySink, Params, Player, Stats,
};
use indicatif::ParallelProgressIterator;
use log::{error, info};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::path::{Path, PathBuf};

/// Compiles GIF animations into bit-packed, frame-differenced blobs.
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encodes every GIF inside given directory.
    Encode {
        /// Directory to look for GIFs in
        #[arg(short, long, default_value = "./menu_gifs")]
        input: PathBuf,

        /// Directory to write encoded animations into
        #[arg(short, long, default_value = "./bins")]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = LayoutArg::PerFrame)]
        layout: LayoutArg,

        /// Additionally write all animations as `<NAME>.c` and `<NAME>.h`
        #[arg(long, value_name = "NAME")]
        c_array: Option<String>,
    },

    /// Prints what's inside encoded animations (`<name>.bin` or `<name>_0.bin`).
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// One file per frame
    PerFrame,

    /// One file per animation
    PerAnimation,
}

impl From<LayoutArg> for Layout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::PerFrame => Layout::PerFrame,
            LayoutArg::PerAnimation => Layout::PerAnimation,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Encode {
            input,
            output,
            layout,
            c_array,
        } => encode(input, Params::new(output, layout.into()), c_array),

        Command::Inspect { files } => files.iter().try_for_each(|file| inspect(file)),
    }
}

fn encode(input: PathBuf, params: Params, c_array: Option<String>) -> Result<()> {
    let paths = discover(&input)?;

    if paths.is_empty() {
        bail!("No animations found in: {}", input.display());
    }

    info!("Encoding {} animation(s) from {}", paths.len(), input.display());

    let results = perform_encodings(paths, &params);
    let mut total = Stats::default();
    let mut failed = 0;
    let mut array = c_array.map(CArray::new);

    for (path, result) in &results {
        match result {
            Ok((name, stats, bundle)) => {
                info!(
                    "{}: {} frame(s), {} byte(s), {} pixel(s) changed",
                    name, stats.frames, stats.bytes, stats.changed_pixels
                );

                total += stats.clone();

                if let Some(array) = &mut array {
                    array.push(name, bundle.clone());
                }
            }

            Err(err) => {
                error!("{}: {:#}", path.display(), err);
                failed += 1;
            }
        }
    }

    if let Some(array) = array {
        array.save(params.out_dir())?;
    }

    info!("Encoded {} frame(s) into {} byte(s)", total.frames, total.bytes);

    if failed > 0 {
        bail!("{} out of {} animation(s) failed", failed, results.len());
    }

    Ok(())
}

fn perform_encodings(
    paths: Vec<PathBuf>,
    params: &Params,
) -> Vec<(PathBuf, Result<(String, Stats, Vec<u8>)>)> {
    let len = paths.len();

    paths
        .into_par_iter()
        .progress_count(len as u64)
        .map(|path| {
            let result = perform_encoding(&path, params);

            (path, result)
        })
        .collect()
}

fn perform_encoding(path: &Path, params: &Params) -> Result<(String, Stats, Vec<u8>)> {
    let animation = Animation::open(path)?;
    let mut sink = (DirSink::new(params.clone())?, MemorySink::default());
    let stats = animation.encode(&mut sink)?;
    let bundle = sink.1.bundle(animation.name());

    Ok((animation.name().to_owned(), stats, bundle))
}

fn inspect(path: &Path) -> Result<()> {
    let bytes = load_bundle(path)?;

    let (mut player, units) = Player::from_bundle(&bytes)
        .with_context(|| format!("Couldn't parse: {}", path.display()))?;

    let header = *player.header();

    println!("{}", path.display());
    println!(
        "  {}x{}, {} frame(s), duration = {}",
        header.width, header.height, header.frame_count, header.duration
    );
    println!("  frame 0: {} ink pixel(s)", player.plane().ink());

    for unit in units {
        let ink = player.apply(unit)?.ink();

        println!("  frame {}: {} ink pixel(s)", player.frame(), ink);
    }

    Ok(())
}
