use crate::Permalink;
use chrono::{Datelike, Local};
use log::warn;
use shuffler_core::{Algorithm, Face, Pass, Permutation, Shuffle};
use std::str::FromStr;

/// Labels per group on an instruction line
pub const GROUP_SIZE: usize = 6;

/// Print format for outputting shuffles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintFormat {
    /// Dated report with seed, permalink, instructions and items (default)
    #[default]
    Report,
    /// Instruction lines only
    Instructions,
    /// Count, seed and items on one line
    OneLine,
}

impl FromStr for PrintFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(PrintFormat::Report),
            "instructions" => Ok(PrintFormat::Instructions),
            "oneline" => Ok(PrintFormat::OneLine),
            _ => Err(format!(
                "unknown format {:?}: expected report, instructions or oneline",
                s
            )),
        }
    }
}

/// Options for [`format_report`]
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub face: Face,
    /// Print the shuffled items after the instructions
    pub show_items: bool,
    /// Page the permalink fragment is appended to; bare fragment when absent
    /// or not an absolute URL
    pub base_url: Option<String>,
}

/// Format one pass as a line of pile numbers
///
/// Example output:
/// ```text
/// 4 3 3 2 1 4 - 3 2 1 1 4 3 - 1 4 /
/// ```
/// Pile numbers are grouped by six to make the place easy to keep while
/// dealing; the trailing `/` marks the end of the pass.
pub fn format_pass(pass: &Pass) -> String {
    let mut result = String::new();

    for (i, pile) in pass.piles().iter().enumerate() {
        if i > 0 {
            if i % GROUP_SIZE == 0 {
                result.push_str(" -");
            }
            result.push(' ');
        }
        result.push_str(&pile.to_string());
    }
    result.push_str(" /");

    result
}

/// Format every pass, one per line
pub fn format_instructions(algorithm: &Algorithm) -> String {
    let mut result = String::new();
    for pass in algorithm.passes() {
        result.push_str(&format_pass(pass));
        result.push('\n');
    }
    result
}

/// Format the items in shuffled order, space separated
pub fn format_items(permutation: &Permutation, face: Face) -> String {
    permutation
        .iter()
        .map(|&item| face.label(item))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a shuffle on a single line
///
/// Output: "COUNT SEED | ITEMS"
pub fn format_oneline(shuffle: &Shuffle, face: Face) -> String {
    format!(
        "{} {} | {}",
        shuffle.count(),
        shuffle.seed(),
        format_items(shuffle.permutation(), face)
    )
}

/// Format a shuffle as a full report
///
/// Example output:
/// ```text
/// Date: 2026.10.16
/// Items: 4 (card)
/// Seed: 17
/// Permalink: #number=4&face=card&seed=17
///
///   1: 3 2 1 4 /
///
/// Order: 2♠ 3♠ 4♠ A♠
/// ```
pub fn format_report(shuffle: &Shuffle, options: &ReportOptions) -> String {
    let mut result = String::new();

    let now = Local::now();
    result.push_str(&format!(
        "Date: {:04}.{:02}.{:02}\n",
        now.year(),
        now.month(),
        now.day()
    ));
    result.push_str(&format!(
        "Items: {} ({})\n",
        shuffle.count(),
        options.face
    ));
    result.push_str(&format!("Seed: {}\n", shuffle.seed()));

    let permalink = Permalink::new(shuffle, options.face);
    let fragment = format!("#{}", permalink.to_fragment());
    let link = match &options.base_url {
        Some(base) => permalink.to_url(base).unwrap_or_else(|e| {
            warn!("{}; printing the bare fragment", e);
            fragment
        }),
        None => fragment,
    };
    result.push_str(&format!("Permalink: {}\n", link));
    result.push('\n');

    for (i, pass) in shuffle.algorithm().passes().iter().enumerate() {
        result.push_str(&format!("{:3}: {}\n", i + 1, format_pass(pass)));
    }

    if options.show_items {
        result.push('\n');
        result.push_str(&format!(
            "Order: {}\n",
            format_items(shuffle.permutation(), options.face)
        ));
    }

    result
}
