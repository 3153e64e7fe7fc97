//! Output formatting for CLI commands.
//!
//! Renders command results in human-readable text or JSON. Text mode
//! uses semantic colors (cyan ids, yellow in-progress, red blockers,
//! green all-clear), Unicode icons with an ASCII fallback, and wraps
//! long titles to the terminal width.

use crate::domain::{IssueType, Task, TaskId, TaskStatus};
use crate::source::SnapshotWarning;
use colored::Colorize;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::env;
use std::io::{self, Write};

const DEFAULT_TERMINAL_WIDTH: usize = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Text,
    /// JSON for programmatic use.
    Json,
}

/// Settings that control text rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for wrapping.
    pub max_width: usize,
    /// Use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Emit ANSI colors.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Explicit settings.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Read settings from the environment.
    ///
    /// - `TRELLIS_MAX_WIDTH`: maximum content width (default 80)
    /// - `TRELLIS_ASCII`: "1"/"true" switches to ASCII icons
    /// - `NO_COLOR`: any value disables colors (<https://no-color.org/>)
    /// - `TRELLIS_COLOR`: "0"/"false" disables colors
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match lookup("TRELLIS_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse::<usize>() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "TRELLIS_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match lookup("TRELLIS_ASCII").as_deref() {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "TRELLIS_ASCII",
                    value = %v,
                    "invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("TRELLIS_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

// ===== Reports =====

/// Payload of the `deps` command.
#[derive(Debug, Clone, Serialize)]
pub struct DepsReport {
    /// The inspected task.
    pub task_id: TaskId,
    /// Every transitive blocking prerequisite, sorted.
    pub transitive_deps: Vec<TaskId>,
    /// The subset whose status is not closed, sorted.
    pub blocking_deps: Vec<TaskId>,
}

/// Payload of the `stats` command.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Usable tasks in the snapshot.
    pub tasks: usize,
    /// Tasks touched by no visible edge.
    pub isolates: usize,
    /// Task counts per status, in status order.
    pub by_status: Vec<StatusCount>,
    /// Visible edge counts per dependency type.
    pub edges_by_type: Vec<EdgeTypeCount>,
    /// Non-fatal problems met while loading.
    pub warnings: Vec<SnapshotWarning>,
}

/// One row of the status table.
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    /// The status.
    pub status: TaskStatus,
    /// How many tasks carry it.
    pub count: usize,
}

/// One row of the edge table.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeTypeCount {
    /// The dependency type.
    pub dep_type: crate::domain::DependencyType,
    /// How many visible edges carry it.
    pub count: usize,
}

// ===== Public dispatch =====

/// Print a dependency report. Text mode resolves titles and statuses
/// from the snapshot and flags the entries that still block.
///
/// # Errors
///
/// Returns an error when stdout cannot be written.
pub fn print_deps(report: &DepsReport, tasks: &[Task], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => print_deps_text(&mut handle, report, tasks, &OutputConfig::from_env()),
        OutputMode::Json => print_json_to(&mut handle, report),
    }
}

/// Print a snapshot statistics report.
///
/// # Errors
///
/// Returns an error when stdout cannot be written.
pub fn print_stats(report: &StatsReport, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => print_stats_text(&mut handle, report, &OutputConfig::from_env()),
        OutputMode::Json => print_json_to(&mut handle, report),
    }
}

/// Print any serializable value as pretty JSON.
///
/// # Errors
///
/// Returns an error when serialization or stdout writing fails.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    print_json_to(&mut handle, value)
}

/// Print a plain message line.
///
/// # Errors
///
/// Returns an error when stdout cannot be written.
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

fn print_json_to<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ===== Text rendering =====

fn print_deps_text<W: Write>(
    w: &mut W,
    report: &DepsReport,
    tasks: &[Task],
    config: &OutputConfig,
) -> io::Result<()> {
    if report.transitive_deps.is_empty() {
        writeln!(
            w,
            "{} has no blocking dependencies.",
            colorize_id(report.task_id.as_str(), config)
        )?;
        return Ok(());
    }

    writeln!(
        w,
        "{} depends on {} task(s), {} still blocking:",
        colorize_id(report.task_id.as_str(), config),
        report.transitive_deps.len(),
        report.blocking_deps.len()
    )?;
    writeln!(w)?;

    let by_id: HashMap<&TaskId, &Task> = tasks.iter().map(|t| (&t.id, t)).collect();
    let blocking: HashSet<&TaskId> = report.blocking_deps.iter().collect();
    let width = get_terminal_width().min(config.max_width);

    for id in &report.transitive_deps {
        let flag = if blocking.contains(id) {
            format!("  {}", error("[blocking]", config))
        } else {
            String::new()
        };
        if let Some(task) = by_id.get(id) {
            let title = wrap_text(&task.title, width.saturating_sub(10));
            writeln!(
                w,
                "  {} {} {}  {}{}",
                colored_status_icon(task.status, config),
                colored_type_icon(task.issue_type, config),
                colorize_id(id.as_str(), config),
                title.first().map_or("", String::as_str),
                flag
            )?;
            for line in title.iter().skip(1) {
                writeln!(w, "          {line}")?;
            }
        } else {
            writeln!(w, "  ? {}{}", colorize_id(id.as_str(), config), flag)?;
        }
    }

    if report.blocking_deps.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", success("All prerequisites are closed.", config))?;
    }
    Ok(())
}

fn print_stats_text<W: Write>(
    w: &mut W,
    report: &StatsReport,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} task(s), {} isolated",
        report.tasks, report.isolates
    )?;

    writeln!(w)?;
    writeln!(w, "{}", bold("Status:", config))?;
    for row in &report.by_status {
        let label = format!("{:<12}", row.status);
        writeln!(
            w,
            "  {} {} {:>5}",
            colored_status_icon(row.status, config),
            paint_status(&label, row.status, config),
            row.count
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Visible edges:", config))?;
    if report.edges_by_type.is_empty() {
        writeln!(w, "  {}", dimmed("none", config))?;
    }
    for row in &report.edges_by_type {
        writeln!(w, "  {:<16} {:>5}", row.dep_type, row.count)?;
    }

    if !report.warnings.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({}):",
            bold("Warnings", config),
            report.warnings.len()
        )?;
        for entry in &report.warnings {
            writeln!(w, "  {} {entry}", warning("!", config))?;
        }
    }
    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line
/// breaks. textwrap handles long unbreakable words such as URLs.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(|s| s.into_owned())
                    .collect()
            }
        })
        .collect()
}

// ===== Color helpers =====

/// Green, for all-clear summaries.
#[must_use]
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Red, for blockers and failures.
#[must_use]
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Yellow, for warnings.
#[must_use]
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

fn paint_status(text: &str, status: TaskStatus, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    match status {
        TaskStatus::Open => text.white().to_string(),
        TaskStatus::InProgress => text.yellow().to_string(),
        TaskStatus::Blocked => text.red().to_string(),
        TaskStatus::Closed => text.green().to_string(),
    }
}

fn colored_status_icon(status: TaskStatus, config: &OutputConfig) -> String {
    let icon = if config.use_ascii {
        match status {
            TaskStatus::Open => "o",
            TaskStatus::InProgress => ">",
            TaskStatus::Blocked => "x",
            TaskStatus::Closed => "+",
        }
    } else {
        match status {
            TaskStatus::Open => "○",
            TaskStatus::InProgress => "▶",
            TaskStatus::Blocked => "✗",
            TaskStatus::Closed => "✓",
        }
    };
    paint_status(icon, status, config)
}

fn colored_type_icon(issue_type: IssueType, config: &OutputConfig) -> String {
    let icon = if config.use_ascii {
        match issue_type {
            IssueType::Task => "-",
            IssueType::Bug => "*",
            IssueType::Feature => "+",
            IssueType::Epic => "#",
            IssueType::Chore => ".",
        }
    } else {
        match issue_type {
            IssueType::Task => "◇",
            IssueType::Bug => "●",
            IssueType::Feature => "★",
            IssueType::Epic => "◆",
            IssueType::Chore => "○",
        }
    };
    if !config.use_colors {
        return icon.to_string();
    }
    match issue_type {
        IssueType::Bug => icon.red().to_string(),
        IssueType::Feature => icon.green().to_string(),
        IssueType::Epic => icon.magenta().bold().to_string(),
        IssueType::Task => icon.blue().to_string(),
        IssueType::Chore => icon.dimmed().to_string(),
    }
}
