use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use flexi_logger::Logger;
use jt_engine::{ColorMode, EnvelopeVersion, Frame, JT_EXTENSION, JtFile, SaveOptions, export_frame, import_image};

#[derive(Parser)]
#[command(about = "Shows and converts JT pixel panel files in the terminal.")]
struct Cli {
    #[arg(help = "File to play/show/convert.", required = true)]
    path: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    #[command(about = "Plays the animation (default)")]
    Play {
        #[arg(help = "Number of repetitions, 0 repeats until interrupted.", long, default_value_t = 1)]
        loops: u32,
    },

    #[command(about = "Show a specific frame of the animation")]
    ShowFrame { frame: usize },

    #[command(about = "Print the document metadata")]
    Info,

    #[command(about = "Convert between JT files and images")]
    Convert {
        #[arg(help = "Output file; a .jt path writes an envelope, anything else an image.")]
        output: PathBuf,

        #[arg(help = "Color mode used when writing a .jt file.", long, value_enum, default_value = "indexed")]
        mode: ModeArg,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum ModeArg {
    Indexed,
    Rgb,
}

impl From<ModeArg> for ColorMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Indexed => ColorMode::Indexed3Bit,
            ModeArg::Rgb => ColorMode::Rgb24Bit,
        }
    }
}

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("warn")?.start()?;
    let args = Cli::parse();

    match args.command.unwrap_or(Commands::Play { loops: 1 }) {
        Commands::Play { loops } => play(&args.path, loops),
        Commands::ShowFrame { frame } => show_frame(&args.path, frame),
        Commands::Info => info(&args.path),
        Commands::Convert { output, mode } => convert(&args.path, &output, mode.into()),
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}

fn load_jt(path: &Path) -> Result<JtFile> {
    if !has_extension(path, JT_EXTENSION) {
        bail!("{} is not a .{JT_EXTENSION} file", path.display());
    }
    JtFile::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Two pixel rows per text line with the upper half block, foreground
/// colored by the top pixel and background by the bottom one.
fn render_frame(frame: &Frame) -> String {
    let mut out = String::new();
    let mut y = 0;
    while y < frame.get_height() {
        for x in 0..frame.get_width() {
            let top = frame.get_pixel(x, y);
            out.push_str(&format!("\x1b[38;2;{};{};{}m", top.r, top.g, top.b));
            if y + 1 < frame.get_height() {
                let bottom = frame.get_pixel(x, y + 1);
                out.push_str(&format!("\x1b[48;2;{};{};{}m", bottom.r, bottom.g, bottom.b));
            }
            out.push('\u{2580}');
        }
        out.push_str("\x1b[0m\n");
        y += 2;
    }
    out
}

fn text_rows(frame: &Frame) -> i32 {
    (frame.get_height() + 1) / 2
}

fn play(path: &Path, loops: u32) -> Result<()> {
    let file = load_jt(path)?;
    let document = &file.document;
    if !document.is_animation() {
        print!("{}", render_frame(&document.frames[0]));
        return Ok(());
    }

    let delay = Duration::from_millis(u64::from(document.frame_delay_ms));
    let rows = text_rows(&document.frames[0]);
    let mut iteration = 0;
    let mut first = true;
    while loops == 0 || iteration < loops {
        for frame in &document.frames {
            if !first {
                print!("\x1b[{rows}A");
            }
            first = false;
            print!("{}", render_frame(frame));
            thread::sleep(delay);
        }
        iteration += 1;
    }
    Ok(())
}

fn show_frame(path: &Path, frame: usize) -> Result<()> {
    let file = load_jt(path)?;
    let Some(frame) = file.document.frames.get(frame) else {
        bail!("frame {frame} out of range, the file has {} frames", file.document.frame_count());
    };
    print!("{}", render_frame(frame));
    Ok(())
}

fn info(path: &Path) -> Result<()> {
    let file = load_jt(path)?;
    let document = &file.document;
    println!("size:        {}x{}", document.get_width(), document.get_height());
    println!("color mode:  {}", document.color_mode);
    println!("frames:      {}", document.frame_count());
    if document.is_animation() {
        println!("frame delay: {} ms", document.frame_delay_ms);
    }
    println!(
        "hints:       speed {}, mode {}, stay time {}",
        file.options.speed, file.options.mode, file.options.stay_time
    );
    Ok(())
}

fn convert(input: &Path, output: &Path, color_mode: ColorMode) -> Result<()> {
    match (has_extension(input, JT_EXTENSION), has_extension(output, JT_EXTENSION)) {
        (true, false) => {
            let file = load_jt(input)?;
            log::info!("exporting frame 0 of {} to {}", input.display(), output.display());
            export_frame(&file.document.frames[0])
                .save(output)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        (false, true) => {
            let data = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
            let document = import_image(&data, color_mode)?;
            let mut options = SaveOptions::new();
            options.version = EnvelopeVersion::for_size(document.size());
            log::info!("importing {} as a {} document", input.display(), document.color_mode);
            let file = JtFile { document, options };
            file.save(output).with_context(|| format!("failed to write {}", output.display()))?;
        }
        (true, true) => {
            let file = load_jt(input)?;
            file.save(output).with_context(|| format!("failed to write {}", output.display()))?;
        }
        (false, false) => bail!("either the input or the output must be a .{JT_EXTENSION} file"),
    }
    Ok(())
}
