//! `rv browse`: a line-driven session over the rule list.
//!
//! Each input line maps to one controller transition. The resulting
//! effects are carried out against a virtual viewport, then the visible
//! window is printed.

use std::fmt::Write as _;

use rv_client::TelemetryReporter;
use rv_core::RecordId;
use rv_view::render::render_list;
use rv_view::{Effect, Key, ScrollBehavior, ViewController};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BrowseArgs;
use crate::context::AppContext;
use crate::screen::paint::{PaintStyle, paint};
use crate::screen::{Painted, Screen};
use crate::ui;

const HELP: &str = "\
keys:  j/down  k/up  g/home  G/end  enter  space   move, expand, open
       /        focus search (next line is the term), /term sets it directly
       esc      clear search
       n / p / f  next, previous, first search result
       t <id>   select subtheme (t alone clears)
       open <id>, c  open a rule, close the open rule
       <n>      focus row n
       q        quit";

const DEFAULT_ROWS: usize = 24;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Key(Key),
    Search(String),
    Subtheme(Option<String>),
    Open(String),
    Close,
    Next,
    Prev,
    First,
    Focus(usize),
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

fn parse_input(line: &str, search_focused: bool) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    if search_focused {
        return Input::Search(line.to_string());
    }
    if line == " " {
        return Input::Key(Key::Space);
    }

    let trimmed = line.trim();
    if let Some(term) = trimmed.strip_prefix('/').filter(|t| !t.is_empty()) {
        return Input::Search(term.to_string());
    }
    let (command, rest) = trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(c, r)| (c, r.trim()));

    match command {
        "" => Input::Nothing,
        "q" | "quit" => Input::Quit,
        "?" | "h" | "help" => Input::Help,
        "/" => Input::Key(Key::Slash),
        "esc" => Input::Key(Key::Escape),
        "j" | "down" => Input::Key(Key::Down),
        "k" | "up" => Input::Key(Key::Up),
        "g" | "home" => Input::Key(Key::Home),
        "G" | "end" => Input::Key(Key::End),
        "enter" => Input::Key(Key::Enter),
        "space" => Input::Key(Key::Space),
        "n" => Input::Next,
        "p" | "N" => Input::Prev,
        "f" => Input::First,
        "c" | "close" => Input::Close,
        "t" => Input::Subtheme((!rest.is_empty()).then(|| rest.to_string())),
        "open" if !rest.is_empty() => Input::Open(rest.to_string()),
        other => match other.parse::<usize>() {
            Ok(row) if row > 0 && rest.is_empty() => Input::Focus(row - 1),
            _ => Input::Unknown(trimmed.to_string()),
        },
    }
}

struct Session<'a> {
    view: ViewController,
    reporter: TelemetryReporter,
    screen: Screen,
    style: PaintStyle,
    ask_path: &'a str,
}

impl Session<'_> {
    fn controls_line(&self) -> String {
        let mut line = format!("search> {}", self.view.search());
        if self.view.is_search_focused() {
            line.push('_');
        }
        if let Some(subtheme) = self.view.subtheme() {
            let _ = write!(line, "   [subtheme {subtheme}]");
        }
        line
    }

    fn repaint(&mut self) {
        let list = render_list(&self.view, self.ask_path);
        let page = paint(&self.controls_line(), &list, &self.style);
        self.screen.repaint(page);
    }

    /// Run one transition: repaint, then carry out its effects against the
    /// new page.
    fn step(&mut self, transition: impl FnOnce(&mut ViewController) -> Vec<Effect>) {
        let before: Painted = self.screen.page().clone();
        let effects = transition(&mut self.view);
        self.repaint();
        self.execute(effects, &before);
    }

    fn execute(&mut self, effects: Vec<Effect>, before: &Painted) {
        let viewport = self.view.viewport();
        for effect in effects {
            match effect {
                Effect::FocusHeader(id) => self.screen.reveal(&id, viewport),
                Effect::FocusSearch => self.screen.focus_controls(true),
                Effect::ScrollToRule {
                    id,
                    behavior: ScrollBehavior::Smooth,
                } => self.screen.follow(&id, before, viewport),
                Effect::ScrollToRule {
                    id,
                    behavior: ScrollBehavior::Instant,
                } => self.screen.snap_to(&id, viewport),
                Effect::CenterFirstMatch(id) => self.screen.center_first_match(&id, viewport),
                Effect::ReportFailedSearch(entry) => self.reporter.report(entry),
                Effect::CancelReport => self.reporter.cancel(),
            }
        }
    }

    fn handle(&mut self, input: Input) {
        match input {
            Input::Key(key) => self.step(|view| view.handle_key(key)),
            Input::Search(term) => {
                self.view.set_search_focus(false);
                self.screen.focus_controls(false);
                self.step(|view| view.set_search(&term));
            }
            Input::Subtheme(subtheme) => self.step(|view| view.set_subtheme(subtheme.as_deref())),
            Input::Open(raw) => {
                let id = RecordId::from(raw.as_str());
                if self.view.filtered().iter().any(|rule| rule.id == id) {
                    self.step(|view| view.activate(&id));
                } else {
                    eprintln!("no displayed rule with id '{raw}'");
                }
            }
            Input::Close => self.step(|view| {
                view.close();
                Vec::new()
            }),
            Input::Next => self.step(ViewController::go_next),
            Input::Prev => self.step(ViewController::go_prev),
            Input::First => self.step(ViewController::go_first),
            Input::Focus(index) => {
                let id = self.view.filtered().get(index).map(|rule| rule.id.clone());
                if let Some(id) = id {
                    self.view.focus(index);
                    self.step(|_| vec![Effect::FocusHeader(id)]);
                }
            }
            Input::Help => println!("{HELP}"),
            Input::Unknown(line) => eprintln!("unknown input '{line}' (? for help)"),
            Input::Quit | Input::Nothing => {}
        }
    }

    fn draw(&self) {
        println!();
        for line in self.screen.frame() {
            println!("{line}");
        }
        println!("-- row {} of {} --", self.screen.top_row() + 1, self.screen.page().lines.len());
    }
}

/// Handle `rv browse`.
pub async fn handle(args: &BrowseArgs, ctx: &AppContext, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let prefs = ui::prefs();
    let rows = args
        .rows
        .or_else(|| (ctx.config.layout.viewport_rows > 0).then_some(ctx.config.layout.viewport_rows))
        .map(usize::from)
        .or(prefs.term_rows.map(|rows| rows.saturating_sub(2)))
        .unwrap_or(DEFAULT_ROWS);

    let mut session = Session {
        view: ctx.controller(),
        reporter: ctx.reporter(),
        screen: Screen::new(rows, &ctx.config.scroll),
        style: PaintStyle::new(prefs.color, prefs.term_width),
        ask_path: &ctx.config.api.ask_path,
    };
    session.repaint();

    let before = session.screen.page().clone();
    let effects = ctx.load_rules(&mut session.view).await;
    session.repaint();
    session.execute(effects, &before);
    if let Some(subtheme) = args.subtheme.as_deref() {
        session.step(|view| view.set_subtheme(Some(subtheme)));
    }
    if let Some(term) = &args.search {
        session.step(|view| view.set_search(term));
    }
    session.draw();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = parse_input(&line, session.view.is_search_focused());
        if input == Input::Quit {
            break;
        }
        let redraw = !matches!(input, Input::Help | Input::Nothing | Input::Unknown(_));
        session.handle(input);
        if redraw {
            session.draw();
        }
    }
    Ok(())
}
