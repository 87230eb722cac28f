use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use dtree::app::App;
use dtree::config::{AppConfig, DisplayConfig, GeneralConfig};
use dtree::error::Result;
use dtree::event::{EventSource, Input};
use dtree::export::{self, ExportFormat};
use dtree::fs::walker::{WalkOptions, Walker};
use dtree::render::{self, sort_tree, Annotate, RenderOptions, SortKey};
use dtree::theme::{self, AnsiTheme};
use dtree::tui::{install_panic_hook, Tui};
use dtree::{handler, logging, ui};

/// Print a directory tree, or browse it interactively.
#[derive(Parser, Debug)]
#[command(name = "dtree", version, about)]
struct Cli {
    /// Directory to display (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show hidden files
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Maximum depth to display (0 = unlimited)
    #[arg(short = 'd', long = "depth")]
    depth: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Show file sizes
    #[arg(short = 's', long = "size")]
    size: bool,

    /// Show modification dates
    #[arg(short = 't', long = "date")]
    date: bool,

    /// Long format: sizes and full timestamps
    #[arg(short = 'l', long = "long")]
    long: bool,

    /// Sort entries by name, size or date
    #[arg(long, value_name = "KEY")]
    sort: Option<SortKey>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Output as Markdown
    #[arg(long)]
    md: bool,

    /// Output as plain indented text
    #[arg(long)]
    plain: bool,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Browse the tree in an interactive terminal view
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Path to a config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Partial config holding only the flags that were actually given.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                show_hidden: self.all.then_some(true),
                max_depth: self.depth,
            },
            display: DisplayConfig {
                size: self.size.then_some(true),
                date: self.date.then_some(true),
                long: self.long.then_some(true),
                sort: self.sort.map(|key| key.to_string()),
                color: self.no_color.then_some(false),
                summary: None,
            },
            ..Default::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dtree: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    logging::init(&config.log, cli.interactive)?;

    let walker = Walker::new(WalkOptions {
        show_hidden: config.show_hidden(),
        max_depth: config.max_depth(),
    });
    let (mut root, issues) = walker.walk_with_issues(&cli.path)?;
    if !issues.is_empty() {
        tracing::info!(count = issues.len(), "some entries could not be read");
    }

    let annotate = Annotate {
        size: config.show_size(),
        date: config.show_date(),
        long_date: config.long(),
    };
    let sort = config.sort_key();

    if cli.interactive {
        if let Some(key) = sort {
            sort_tree(&mut root, key);
        }
        let app = App::new(root, annotate, theme::resolve_theme(&config.theme));
        return browse(app);
    }

    if let Some(format) = ExportFormat::select(cli.json, cli.md, cli.plain) {
        if let Some(key) = sort {
            sort_tree(&mut root, key);
        }
        return match &cli.output {
            Some(path) => {
                let mut out = export::create_output(path)?;
                export::export(format, &root, &annotate, &mut out)?;
                out.flush()?;
                Ok(())
            }
            None => {
                let mut out = io::stdout().lock();
                export::export(format, &root, &annotate, &mut out)
            }
        };
    }

    let color = config.color()
        && std::env::var_os("NO_COLOR").is_none()
        && io::stdout().is_terminal()
        && cli.output.is_none();
    let options = RenderOptions {
        show_root: true,
        annotate,
        summary: annotate.any() || sort.is_some() || config.summary(),
        ..Default::default()
    };
    let lines = render::render(&mut root, &options, sort, &AnsiTheme::new(color));

    match &cli.output {
        Some(path) => {
            let mut out = export::create_output(path)?;
            write_lines(&mut out, &lines)?;
            out.flush()?;
        }
        None => write_lines(&mut io::stdout().lock(), &lines)?,
    }
    Ok(())
}

fn write_lines<W: Write>(writer: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Run the browser until the user quits. The terminal is restored even when
/// drawing or reading input fails.
fn browse(mut app: App) -> Result<()> {
    install_panic_hook();
    let mut tui = Tui::new()?;
    let result = event_loop(&mut tui, &mut app);
    tui.restore()?;
    result
}

fn event_loop(tui: &mut Tui, app: &mut App) -> Result<()> {
    let (width, height) = tui.size()?;
    app.handle(Input::Resize { width, height });

    let mut events = EventSource::new();
    while !app.should_quit {
        tui.terminal_mut().draw(|frame| ui::render(app, frame))?;
        handler::handle_event(app, events.next()?);
    }
    Ok(())
}
