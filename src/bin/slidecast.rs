use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use slidecast::{
    CandidatePaths, ExplicitFonts, Fps, FontResolver, Project, RenderConfig, RenderOpts,
    RenderVariant,
};

#[derive(Parser, Debug)]
#[command(name = "slidecast", version, about)]
struct Cli {
    /// Log layout decisions and ffmpeg invocations.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the narrated MP4 of a project (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Render a single slide as a PNG. No audio is needed.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct ProjectArgs {
    /// Presentation id (names `json/<id>.json`, `images/<id>/`, `audio/<id>.*`).
    #[arg(long)]
    id: String,

    /// Project root containing `json/`, `images/` and `audio/`.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Render config JSON; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base font size in px (auto-fit only shrinks from here).
    #[arg(long = "font_size", alias = "font-size")]
    font_size: Option<u32>,

    /// Use the staged fade/slide-in variant.
    #[arg(long, default_value_t = false)]
    animated: bool,

    /// Regular font file; system candidates are searched when absent.
    #[arg(long)]
    font_regular: Option<PathBuf>,

    /// Bold font file (falls back to the regular face).
    #[arg(long, requires = "font_regular")]
    font_bold: Option<PathBuf>,

    /// Italic font file (falls back to the regular face).
    #[arg(long, requires = "font_regular")]
    font_italic: Option<PathBuf>,
}

impl ProjectArgs {
    fn project(&self) -> Project {
        Project::new(&self.root, &self.id)
    }

    fn variant(&self) -> RenderVariant {
        if self.animated {
            RenderVariant::Animated
        } else {
            RenderVariant::Static
        }
    }

    fn config(&self, fps: Option<u32>) -> anyhow::Result<RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => RenderConfig::from_path(path)?,
            None => RenderConfig::default(),
        };
        if let Some(fps) = fps {
            cfg.fps = Fps::new(fps, 1)?;
        }
        if let Some(size) = self.font_size {
            cfg.base_font_size = size;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    fn fonts(&self) -> Box<dyn FontResolver> {
        match &self.font_regular {
            Some(regular) => Box::new(ExplicitFonts {
                regular: regular.clone(),
                bold: self.font_bold.clone(),
                italic: self.font_italic.clone(),
            }),
            None => Box::new(CandidatePaths::system()),
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output MP4 path.
    #[arg(long, default_value = "out.mp4")]
    out: PathBuf,

    /// Output frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Overwrite the output if it already exists.
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Slide number (1-based, script input order).
    #[arg(long)]
    slide: usize,

    /// Time in seconds since the slide started (animated variant).
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = RenderOpts {
        config: args.project.config(args.fps)?,
        variant: args.project.variant(),
        out_path: args.out.clone(),
        overwrite: args.overwrite,
    };
    let fonts = args.project.fonts();
    let report = slidecast::render_video(&args.project.project(), &opts, fonts.as_ref())?;

    for s in &report.slides {
        eprintln!(
            "slide {:>3}  start {:>7.2}s  {:>6.2}s  {:>5} frames  font {}/{}{}{}",
            s.slide,
            s.start,
            s.duration,
            s.frames,
            s.explanation_font_size,
            s.lines_font_size,
            if s.overflow { "  overflow" } else { "" },
            if s.has_image { "" } else { "  no image" },
        );
    }
    eprintln!(
        "wrote {} ({} frames, {:.2}s)",
        args.out.display(),
        report.frames,
        report.duration_sec
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.project.config(None)?;
    let fonts = args.project.fonts();
    let report = slidecast::render_slide_png(
        &args.project.project(),
        args.slide,
        args.t,
        &cfg,
        args.project.variant(),
        fonts.as_ref(),
        &args.out,
    )?;
    eprintln!(
        "wrote {} (slide {}, font {}/{})",
        args.out.display(),
        report.slide,
        report.explanation_font_size,
        report.lines_font_size
    );
    Ok(())
}
