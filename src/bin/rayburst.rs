use std::io::{BufRead as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayburst::{EditorSession, Field, FileStore, SurfaceSize};

#[derive(Parser, Debug)]
#[command(name = "rayburst", version)]
struct Cli {
    /// Directory holding the persisted settings (default: $RAYBURST_STORE_DIR, then the
    /// platform config dir).
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the persisted settings as JSON.
    Show,
    /// Change one setting and persist it.
    Set(SetArgs),
    /// Render at the export size and write `{fileName}.png`.
    Export(ExportArgs),
    /// Render the preview surface to a PNG.
    Preview(PreviewArgs),
    /// Edit settings interactively from stdin, rewriting the preview PNG after every change.
    Session(SessionArgs),
}

#[derive(Parser, Debug)]
struct SetArgs {
    /// Field name (`rayCount`) or control id (`ray-count`).
    field: String,

    /// New value.
    #[arg(allow_hyphen_values = true)]
    value: String,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug, Clone, Copy)]
struct ViewportArgs {
    /// Preview width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Preview height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
}

impl ViewportArgs {
    fn size(self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    viewport: ViewportArgs,
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Where the live preview PNG is written.
    #[arg(long, default_value = "rayburst-preview.png")]
    preview: PathBuf,

    #[command(flatten)]
    viewport: ViewportArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let store = open_store(cli.store_dir.as_deref())?;
    match cli.cmd {
        Command::Show => cmd_show(store),
        Command::Set(args) => cmd_set(store, args),
        Command::Export(args) => cmd_export(store, args),
        Command::Preview(args) => cmd_preview(store, args),
        Command::Session(args) => cmd_session(store, args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(dir: Option<&Path>) -> anyhow::Result<FileStore> {
    match dir {
        Some(d) => Ok(FileStore::new(d)),
        None => FileStore::from_env().context("locate settings store"),
    }
}

fn cmd_show(store: FileStore) -> anyhow::Result<()> {
    let settings = rayburst::store::load_settings(&store);
    println!("{}", settings.to_json()?);
    Ok(())
}

fn cmd_set(store: FileStore, args: SetArgs) -> anyhow::Result<()> {
    let field: Field = args.field.parse()?;
    let mut session = EditorSession::open(store, SurfaceSize::new(1, 1))?;
    session
        .edit(field, &args.value)
        .with_context(|| format!("set {field}"))?;
    eprintln!("{field} = {}", args.value);
    Ok(())
}

fn cmd_export(store: FileStore, args: ExportArgs) -> anyhow::Result<()> {
    let mut session = EditorSession::open(store, SurfaceSize::new(1, 1))?;
    let exported = session.export()?;
    let path = exported
        .write_to_dir(&args.out_dir)
        .with_context(|| format!("write export into '{}'", args.out_dir.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_preview(store: FileStore, args: PreviewArgs) -> anyhow::Result<()> {
    let session = EditorSession::open(store, args.viewport.size())?;
    write_preview(&session, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_session(store: FileStore, args: SessionArgs) -> anyhow::Result<()> {
    let mut session = EditorSession::open(store, args.viewport.size())?;
    write_preview(&session, &args.preview)?;
    eprintln!(
        "preview at {} ({}); type `help` for commands",
        args.preview.display(),
        session.viewport()
    );

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match run_session_line(&mut session, line) {
            Ok(LineOutcome::Rendered) => write_preview(&session, &args.preview)?,
            Ok(LineOutcome::Unchanged) => {}
            Ok(LineOutcome::Quit) => break,
            Err(e) => eprintln!("error: {e:#}"),
        }
        std::io::stderr().flush().ok();
    }
    Ok(())
}

enum LineOutcome {
    Rendered,
    Unchanged,
    Quit,
}

fn run_session_line(
    session: &mut EditorSession<FileStore>,
    line: &str,
) -> anyhow::Result<LineOutcome> {
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match cmd {
        "quit" | "exit" => Ok(LineOutcome::Quit),
        "help" => {
            eprintln!("commands:");
            eprintln!("  <field> <value>   edit a setting");
            eprintln!("  resize <w> <h>    resize the preview");
            eprintln!("  export [dir]      write {{fileName}}.png at the export size");
            eprintln!("  show              print settings");
            eprintln!("  quit");
            eprintln!("fields:");
            for f in Field::ALL {
                eprintln!("  {:<20} {}", f.name(), f.control_id());
            }
            Ok(LineOutcome::Unchanged)
        }
        "show" => {
            println!("{}", session.settings().to_json()?);
            Ok(LineOutcome::Unchanged)
        }
        "resize" => {
            let mut parts = rest.split_whitespace();
            let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
                anyhow::bail!("usage: resize <width> <height>");
            };
            let w: u32 = w.parse().with_context(|| format!("invalid width '{w}'"))?;
            let h: u32 = h.parse().with_context(|| format!("invalid height '{h}'"))?;
            session.resize_viewport(SurfaceSize::new(w, h))?;
            Ok(LineOutcome::Rendered)
        }
        "export" => {
            let dir = if rest.is_empty() { Path::new(".") } else { Path::new(rest) };
            let path = session.export()?.write_to_dir(dir)?;
            eprintln!("wrote {}", path.display());
            Ok(LineOutcome::Unchanged)
        }
        field => {
            let field: Field = field.parse()?;
            session.edit(field, rest)?;
            Ok(LineOutcome::Rendered)
        }
    }
}

fn write_preview(session: &EditorSession<FileStore>, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create preview dir '{}'", parent.display()))?;
    }
    let png = session.preview_png()?;
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
