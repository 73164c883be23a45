#![deny(unsafe_code)]
pub mod commands;
mod version;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());
use commands::command::Command;
use commands::depth::Depth;
use commands::expand::Expand;
use commands::join::Join;
use commands::pipeline::Pipeline;
use commands::prepare::Prepare;
use commands::remap::Remap;
use commands::vcf::{Bed2Vcf, Vcf2Bed};
use enum_dispatch::enum_dispatch;
use env_logger::Env;
use log::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(styles = STYLES)]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[enum_dispatch(Command)]
#[derive(Parser, Debug)]
#[command(version)]
enum Subcommand {
    // Conversion stages
    #[command(display_order = 1)]
    Expand(Expand),
    #[command(display_order = 2)]
    Depth(Depth),
    #[command(display_order = 3)]
    Remap(Remap),
    #[command(name = "vcf2bed", display_order = 4)]
    Vcf2Bed(Vcf2Bed),
    #[command(name = "bed2vcf", display_order = 5)]
    Bed2Vcf(Bed2Vcf),

    // Interval operations
    #[command(display_order = 6)]
    Prepare(Prepare),
    #[command(display_order = 7)]
    Join(Join),

    // Orchestration
    #[command(display_order = 8)]
    Pipeline(Pipeline),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    info!("Running stlift version {}", version::VERSION);
    args.subcommand.execute()
}
