//! Presentation context: what the terminal supports and how a command's
//! output should look.
//!
//! Everything that decides "how do we show this list" is resolved here, once
//! per command: the output mode (json, plain, pretty) and the list layout
//! (grid cards or a year/title table). Handlers read the result and never
//! re-derive either from raw flags.

use std::io::IsTerminal;

use crate::config::ViewMode;
use crate::helpers::OutputFormat;

/// How results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One JSON document on stdout, nothing else
    Json,
    /// Stable `key=value` / tab-separated text for scripts
    #[default]
    Plain,
    /// Colors, borders and cards; stdout must be a TTY
    Pretty,
}

impl OutputMode {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Facts about the process's terminal, read once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub stdin_tty: bool,
    /// `TERM=dumb`
    pub dumb: bool,
    /// `NO_COLOR` is set
    pub no_color: bool,
    pub columns: Option<usize>,
}

impl Terminal {
    pub fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stdin_tty: std::io::stdin().is_terminal(),
            dumb: std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: terminal_width(),
        }
    }
}

/// Output-related flags of one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputRequest {
    pub json: bool,
    pub format: Option<OutputFormat>,
    /// Explicit `--view`
    pub view: Option<ViewMode>,
    pub no_color: bool,
    pub ascii: bool,
}

/// Resolved presentation for one command.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    pub width: usize,
    pub mode: OutputMode,
    /// Layout for event lists
    pub view: ViewMode,
    /// Prompts may be shown (stdin and stdout are both terminals)
    pub interactive: bool,
}

impl UiContext {
    /// Resolve against the real terminal.
    pub fn from_env(request: OutputRequest, preferred_view: ViewMode) -> Self {
        Self::resolve(&Terminal::detect(), request, preferred_view)
    }

    /// Resolve mode and layout.
    ///
    /// Mode: `--json` wins, then `--format plain` or `TERM=dumb` force plain,
    /// otherwise pretty on a TTY and plain elsewhere.
    /// Layout: `--view`, then `--format table`, then the saved preference.
    /// Plain mode keeps the requested layout so `--format plain --view table`
    /// still prints one row per event.
    pub fn resolve(term: &Terminal, request: OutputRequest, preferred_view: ViewMode) -> Self {
        let mode = if request.json {
            OutputMode::Json
        } else if request.format == Some(OutputFormat::Plain) || term.dumb || !term.stdout_tty {
            OutputMode::Plain
        } else {
            OutputMode::Pretty
        };

        let view = match (request.view, request.format) {
            (Some(view), _) => view,
            (None, Some(OutputFormat::Table)) => ViewMode::Table,
            (None, _) => preferred_view,
        };

        Self {
            is_tty: term.stdout_tty,
            color: mode.is_pretty() && !request.no_color && !term.no_color,
            unicode: !request.ascii,
            width: term.columns.unwrap_or(80),
            mode,
            view,
            interactive: term.stdout_tty && term.stdin_tty,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Spinners only draw on a pretty TTY.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty()
    }
}

fn terminal_width() -> Option<usize> {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse::<usize>().ok())
        .filter(|width| *width > 0)
    {
        return Some(width);
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ only writes into the provided winsize
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(ws.ws_col as usize);
            }
        }
    }

    None
}
