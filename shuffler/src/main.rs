mod parallel;

use clap::Parser;
use log::{info, warn};
use parallel::{ParallelConfig, Supervisor};
use shuffler_core::{Face, Seed, Shuffle, ShuffleGenerator};
use shuffler_format::{
    format_instructions, format_oneline, format_report, Permalink, PrintFormat, ReportOptions,
};
use shufflerandom::{OsEntropy, RandomSource, Xoshiro256PlusPlus};

#[derive(Parser)]
#[command(name = "shuffler")]
#[command(
    about = "Perfect shuffle generator with pile-dealing instructions",
    long_about = None
)]
struct Args {
    /// Number of cards or tokens to shuffle (2-100)
    #[arg(
        short = 'n',
        long = "number",
        default_value_t = 52,
        value_parser = clap::value_parser!(u64).range(2..=100)
    )]
    number: u64,

    /// How items are shown: card or number
    #[arg(short = 'f', long = "face", default_value = "card")]
    face: Face,

    /// Rebuild the shuffle from a decimal seed instead of drawing a new one
    #[arg(short = 's', long = "seed", conflicts_with = "permalink")]
    seed: Option<Seed>,

    /// Rebuild the shuffle from a permalink URL or fragment
    #[arg(long = "permalink")]
    permalink: Option<String>,

    /// Number of fresh shuffles to produce
    #[arg(
        short = 'p',
        long = "produce",
        default_value_t = 1,
        conflicts_with_all = ["seed", "permalink"]
    )]
    produce: usize,

    /// Draw seeds from a deterministic generator seeded with this value
    #[arg(long = "rng-seed")]
    rng_seed: Option<u64>,

    /// Leave the shuffled order out of the report
    #[arg(long = "hide-cards")]
    hide_cards: bool,

    /// Output format: report, instructions or oneline
    #[arg(long = "format", default_value = "report")]
    format: PrintFormat,

    /// Page URL the permalink fragment is attached to
    #[arg(long = "base-url")]
    base_url: Option<String>,

    /// Worker threads (0 = auto-detect)
    #[arg(short = 't', long = "threads", default_value_t = 0)]
    threads: usize,

    /// Deal an ordered deck through the instructions and check the result
    #[arg(long = "verify")]
    verify: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

/// The shuffle named by a permalink, or `None` when there is no usable one.
fn from_permalink(args: &Args) -> Option<(Shuffle, Face)> {
    let text = args.permalink.as_deref()?;
    let shuffle = Permalink::parse(text).and_then(|link| Ok((link.to_shuffle()?, link.face)));
    match shuffle {
        Ok(found) => Some(found),
        Err(e) => {
            warn!("ignoring permalink ({}), drawing a fresh shuffle", e);
            None
        }
    }
}

fn fresh_shuffles(args: &Args, count: usize) -> Vec<Shuffle> {
    let source: Box<dyn RandomSource> = match args.rng_seed {
        Some(rng_seed) => {
            warn!(
                "using deterministic generator (rng seed {}); shuffles are predictable",
                rng_seed
            );
            Box::new(Xoshiro256PlusPlus::seed_from_u64(rng_seed))
        }
        None => Box::new(OsEntropy::new()),
    };

    let generator = ShuffleGenerator::new(count, source).unwrap_or_else(|e| fail(e));
    let mut supervisor = Supervisor::new(
        generator,
        ParallelConfig {
            num_threads: args.threads,
        },
    );
    supervisor
        .produce(args.produce)
        .unwrap_or_else(|e| fail(e))
}

/// The shuffles to print and the face to print them with: the permalink's
/// shuffle, the `--seed` shuffle, or freshly drawn ones of `--number` items.
fn select_shuffles(args: &Args) -> (Vec<Shuffle>, Face) {
    let count = args.number as usize;

    if let Some((shuffle, face)) = from_permalink(args) {
        info!("rebuilt shuffle of {} items from permalink", shuffle.count());
        (vec![shuffle], face)
    } else if let Some(seed) = args.seed.clone() {
        let shuffle = Shuffle::from_seed(count, seed).unwrap_or_else(|e| fail(e));
        (vec![shuffle], args.face)
    } else {
        (fresh_shuffles(args, count), args.face)
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let (shuffles, face) = select_shuffles(&args);

    let options = ReportOptions {
        face,
        show_items: !args.hide_cards,
        base_url: args.base_url.clone(),
    };

    for (i, shuffle) in shuffles.iter().enumerate() {
        if args.verify && !shuffle.verify() {
            fail(format!(
                "instructions for seed {} do not reproduce the shuffle",
                shuffle.seed()
            ));
        }

        match args.format {
            PrintFormat::Report => {
                if i > 0 {
                    println!();
                }
                print!("{}", format_report(shuffle, &options));
            }
            PrintFormat::Instructions => print!("{}", format_instructions(shuffle.algorithm())),
            PrintFormat::OneLine => println!("{}", format_oneline(shuffle, face)),
        }
    }

    info!("produced {} shuffles", shuffles.len());
    if args.verify {
        eprintln!("Verified {} shuffles", shuffles.len());
    }
}
