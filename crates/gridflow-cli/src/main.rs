use gridflow::{DragSession, Layout, LayoutDescriptor, LayoutSnapshot, PointerSample};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GRIDFLOW_LOG";

/// Everything that can stop a command before it prints a layout.
#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    /// The descriptor could not be read from disk or stdin.
    Io(std::io::Error),
    /// The descriptor parsed but describes an invalid grid or item.
    Layout(gridflow::Error),
    /// The descriptor is not valid JSON or misses required keys.
    Json(serde_json::Error),
    UnknownItem(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::UnknownItem(_) => 3,
            CliError::Io(_) | CliError::Layout(_) | CliError::Json(_) => 1,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => f.write_str(msg),
            CliError::Io(err) => write!(f, "cannot read layout descriptor: {err}"),
            CliError::Layout(err) => match err.field() {
                gridflow::Field::ItemId
                | gridflow::Field::ItemStartColumn
                | gridflow::Field::ItemStartRow
                | gridflow::Field::ItemFilledColumns
                | gridflow::Field::ItemFilledRows
                | gridflow::Field::ItemMinFilledColumns
                | gridflow::Field::ItemMinFilledRows
                | gridflow::Field::ItemMaxFilledColumns
                | gridflow::Field::ItemMaxFilledRows => write!(f, "rejected item: {err}"),
                _ => write!(f, "rejected grid: {err}"),
            },
            CliError::Json(err) => write!(f, "malformed layout descriptor: {err}"),
            CliError::UnknownItem(id) => write!(f, "layout has no item `{id}`"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<gridflow::Error> for CliError {
    fn from(value: gridflow::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Layout,
    Slot,
    Move,
    Drag,
    Resize,
    Remove,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    id: Option<String>,
    columns: Option<i64>,
    rows: Option<i64>,
    dx: Option<f64>,
    dy: Option<f64>,
}

#[derive(Serialize)]
struct MutationOut<'a> {
    changed: bool,
    layout: LayoutSnapshot<'a>,
}

fn usage() -> &'static str {
    "gridflow-cli\n\
\n\
USAGE:\n\
  gridflow-cli [layout] [--pretty] [<path>|-]\n\
  gridflow-cli slot --columns <n> --rows <n> [--pretty] [<path>|-]\n\
  gridflow-cli move --id <id> --columns <dx> --rows <dy> [--pretty] [<path>|-]\n\
  gridflow-cli drag --id <id> --dx <px> --dy <px> [--pretty] [<path>|-]\n\
  gridflow-cli resize --id <id> --columns <w> --rows <h> [--pretty] [<path>|-]\n\
  gridflow-cli remove --id <id> [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the layout descriptor is read from stdin.\n\
  - layout prints the placed layout; slot prints the first free position for a size.\n\
  - move, drag, resize and remove print {\"changed\": bool, \"layout\": ...}.\n\
  - Set GRIDFLOW_LOG (e.g. GRIDFLOW_LOG=debug) to see why a change was rejected.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "slot" => args.command = Command::Slot,
            "move" => args.command = Command::Move,
            "drag" => args.command = Command::Drag,
            "resize" => args.command = Command::Resize,
            "remove" => args.command = Command::Remove,
            "--pretty" => args.pretty = true,
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.id = Some(id.clone());
            }
            "--columns" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.columns = Some(n.parse::<i64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--rows" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.rows = Some(n.parse::<i64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--dx" => {
                let Some(px) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.dx = Some(parse_pixels(px)?);
            }
            "--dy" => {
                let Some(px) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.dy = Some(parse_pixels(px)?);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn parse_pixels(raw: &str) -> Result<f64, CliError> {
    raw.parse::<f64>()
        .ok()
        .filter(|px| px.is_finite())
        .ok_or(CliError::Usage(usage()))
}

fn required<T>(value: Option<T>) -> Result<T, CliError> {
    value.ok_or(CliError::Usage(usage()))
}

fn required_size(value: Option<i64>) -> Result<u32, CliError> {
    u32::try_from(required(value)?).map_err(|_| CliError::Usage(usage()))
}

fn required_offset(value: Option<i64>) -> Result<i32, CliError> {
    i32::try_from(required(value)?).map_err(|_| CliError::Usage(usage()))
}

/// Reads a descriptor from `input` (a path, or stdin for `None`/`-`) and places its items.
fn load_layout(input: Option<&str>) -> Result<Layout, CliError> {
    let text = match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)?,
    };
    let layout = LayoutDescriptor::from_json(&text)?.build()?;
    tracing::debug!(
        items = layout.len(),
        columns = layout.total_columns(),
        rows = layout.total_rows(),
        "layout loaded"
    );
    Ok(layout)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_mutation(before: &Layout, after: &Layout, pretty: bool) -> Result<(), CliError> {
    let out = MutationOut {
        changed: before != after,
        layout: after.snapshot(),
    };
    write_json(&out, pretty)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignored when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let layout = load_layout(args.input.as_deref())?;

    match args.command {
        Command::Layout => write_json(&layout.snapshot(), args.pretty),
        Command::Slot => {
            let columns = required_size(args.columns)?;
            let rows = required_size(args.rows)?;
            if columns == 0 || rows == 0 {
                return Err(CliError::Usage(usage()));
            }
            write_json(&layout.available_slice(columns, rows), args.pretty)
        }
        Command::Move => {
            let id = required(args.id)?;
            let columns = required_offset(args.columns)?;
            let rows = required_offset(args.rows)?;
            let item = layout.item(&id).ok_or(CliError::UnknownItem(id.clone()))?;
            let next = layout.move_item(item, columns, rows);
            write_mutation(&layout, &next, args.pretty)
        }
        Command::Drag => {
            let id = required(args.id)?;
            let dx = required(args.dx)?;
            let dy = required(args.dy)?;
            let mut session = DragSession::default();
            if !session.start(&layout, &id, PointerSample::new(0.0, 0.0)) {
                return Err(CliError::UnknownItem(id));
            }
            let next = session.drag(&layout, PointerSample::new(dx, dy));
            session.end();
            write_mutation(&layout, &next, args.pretty)
        }
        Command::Resize => {
            let id = required(args.id)?;
            let columns = required_size(args.columns)?;
            let rows = required_size(args.rows)?;
            if !layout.contains(&id) {
                return Err(CliError::UnknownItem(id));
            }
            let next = layout.resize_item(&id, columns, rows);
            write_mutation(&layout, &next, args.pretty)
        }
        Command::Remove => {
            let id = required(args.id)?;
            if !layout.contains(&id) {
                return Err(CliError::UnknownItem(id));
            }
            let next = layout.remove_item(&id);
            write_mutation(&layout, &next, args.pretty)
        }
    }
}

fn main() {
    init_tracing();

    let result = parse_args(&std::env::args().collect::<Vec<_>>()).and_then(|args| {
        tracing::debug!(command = ?args.command, "running");
        run(args)
    });
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
