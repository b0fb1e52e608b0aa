use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gk_core::{BorderPolicy, Grid};
use gk_filters::{box_blur_u8, filter2d_f32, to_f32, to_u8_clamped};
use image::GrayImage;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "gk_gallery")]
#[command(about = "Run grid-kernel filters on external image files")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "box-blur")]
    BoxBlur(BoxBlurArgs),
    #[command(name = "sharpen")]
    Sharpen(SharpenArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

#[derive(Args, Debug, Clone)]
struct BoxBlurArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 2)]
    half: usize,
}

#[derive(Args, Debug, Clone)]
struct SharpenArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 1.0)]
    amount: f32,
    #[arg(long, value_enum, default_value = "replicate")]
    border: BorderArg,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum BorderArg {
    Replicate,
    Circular,
}

impl From<BorderArg> for BorderPolicy {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::Replicate => BorderPolicy::Replicate,
            BorderArg::Circular => BorderPolicy::Circular,
        }
    }
}

#[derive(Serialize, Debug)]
struct Report {
    input: String,
    output: String,
    filter: String,
    rows: usize,
    cols: usize,
    threads: usize,
    min: u8,
    max: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::BoxBlur(args) => run_box_blur(&args),
        Command::Sharpen(args) => run_sharpen(&args),
    }
}

fn load_gray(path: &Path) -> Result<Grid<u8>> {
    let img = image::open(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .into_luma8();
    let (width, height) = img.dimensions();

    Grid::from_vec(height as usize, width as usize, img.into_raw())
        .context("image buffer does not match its dimensions")
}

fn save_gray(grid: &Grid<u8>, path: &Path) -> Result<()> {
    let img = GrayImage::from_raw(grid.cols() as u32, grid.rows() as u32, grid.data().to_vec())
        .context("grid does not fit an image buffer")?;
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn write_report(report: &Report, out_dir: &Path, stem: &str) -> Result<()> {
    let path = out_dir.join(format!("{stem}.json"));
    let text = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn finish(common: &CommonArgs, filter: String, result: &Grid<u8>, stem: &str) -> Result<()> {
    fs::create_dir_all(&common.out)
        .with_context(|| format!("failed to create {}", common.out.display()))?;

    let out_path = common.out.join(format!("{stem}.png"));
    save_gray(result, &out_path)?;

    let (min, max) = result
        .data()
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let report = Report {
        input: common.input.display().to_string(),
        output: out_path.display().to_string(),
        filter,
        rows: result.rows(),
        cols: result.cols(),
        threads: common.threads,
        min,
        max,
    };
    write_report(&report, &common.out, stem)?;

    println!("{stem}: wrote {}", out_path.display());
    Ok(())
}

fn run_box_blur(args: &BoxBlurArgs) -> Result<()> {
    let src = load_gray(&args.common.input)?;
    let out = box_blur_u8(&src, args.half, args.common.threads)
        .with_context(|| format!("box blur with half size {} failed", args.half))?;

    finish(
        &args.common,
        format!("box-blur half={}", args.half),
        &out,
        "box_blur",
    )
}

fn run_sharpen(args: &SharpenArgs) -> Result<()> {
    if args.amount < 0.0 {
        bail!("sharpen amount must be non-negative, got {}", args.amount);
    }

    let src = load_gray(&args.common.input)?;
    let a = args.amount;
    let weights = Grid::from_vec(
        3,
        3,
        vec![0.0, -a, 0.0, -a, 1.0 + 4.0 * a, -a, 0.0, -a, 0.0],
    )
    .expect("3x3 weight grid");

    let out = filter2d_f32(
        &to_f32(&src),
        &weights,
        args.border.into(),
        args.common.threads,
    )
    .context("sharpen filter failed")?;

    finish(
        &args.common,
        format!("sharpen amount={a}"),
        &to_u8_clamped(&out),
        "sharpen",
    )
}
