use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::{ContentApi, HttpApi};
use crate::io::session_io::{AuthContext, session_path};
use crate::model::{AppConfig, Project};
use crate::ops::carousel::Carousel;
use crate::ops::detail::{ImpactEditor, ResearchEditor};
use crate::ops::forms::FlowError;
use crate::ops::grid::SectionView;
use crate::ops::page::GridPage;
use crate::ops::selector::SelectorState;

use super::form::FormState;
use super::input;
use super::render;
use super::theme::Theme;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Grid,
    Detail,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Selector,
    Form,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPane {
    Impact,
    Research,
}

/// One project's impact and research records.
#[derive(Debug, Clone)]
pub struct DetailScreen {
    pub project: Project,
    pub impact: ImpactEditor,
    pub research: ResearchEditor,
    pub pane: DetailPane,
    pub impact_cursor: usize,
    pub research_cursor: usize,
}

impl DetailScreen {
    pub fn open(api: &dyn ContentApi, project: Project) -> Result<Self, FlowError> {
        let mut impact = ImpactEditor::new(&project.id)?;
        let mut research = ResearchEditor::new(&project.id)?;
        impact.load(api)?;
        research.load(api)?;
        Ok(DetailScreen {
            project,
            impact,
            research,
            pane: DetailPane::Impact,
            impact_cursor: 0,
            research_cursor: 0,
        })
    }

    /// Keep both cursors inside their lists after a reload.
    pub fn clamp_cursors(&mut self) {
        self.impact_cursor = self
            .impact_cursor
            .min(self.impact.items.len().saturating_sub(1));
        self.research_cursor = self
            .research_cursor
            .min(self.research.items.len().saturating_sub(1));
    }
}

/// A destructive action waiting for y/n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteSection { id: String, name: String },
    DeleteProject { id: String, title: String },
    DeleteImpact { id: i64, title: String },
    DeleteResearch { id: i64, title: String },
}

impl ConfirmAction {
    pub fn prompt(&self) -> String {
        match self {
            ConfirmAction::DeleteSection { name, .. } => {
                format!("Delete section \"{}\" and all its projects?", name)
            }
            ConfirmAction::DeleteProject { title, .. } => {
                format!("Delete project \"{}\"?", title)
            }
            ConfirmAction::DeleteImpact { title, .. } => {
                format!("Delete impact record \"{}\"?", title)
            }
            ConfirmAction::DeleteResearch { title, .. } => {
                format!("Delete research record \"{}\"?", title)
            }
        }
    }
}

/// Main application state
pub struct App {
    pub api: Box<dyn ContentApi>,
    pub auth: AuthContext,
    pub config: AppConfig,
    pub theme: Theme,
    pub page: GridPage,
    pub view: View,
    pub mode: Mode,
    /// Index into the visible sections
    pub section_cursor: usize,
    /// Carousel position per section id
    pub carousels: HashMap<String, Carousel>,
    pub selector: Option<SelectorState>,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmAction>,
    /// Blocking message shown over everything until dismissed
    pub alert: Option<String>,
    pub detail: Option<DetailScreen>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(api: Box<dyn ContentApi>, auth: AuthContext, config: AppConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            api,
            auth,
            config,
            theme,
            page: GridPage::default(),
            view: View::Grid,
            mode: Mode::Navigate,
            section_cursor: 0,
            carousels: HashMap::new(),
            selector: None,
            form: None,
            confirm: None,
            alert: None,
            detail: None,
            status_message: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Sections passing the applied filter, in server order.
    pub fn visible_sections(&self) -> Vec<&SectionView> {
        self.page.visible()
    }

    pub fn current_section(&self) -> Option<&SectionView> {
        self.visible_sections().get(self.section_cursor).copied()
    }

    pub fn carousel(&self, section_id: &str) -> Carousel {
        self.carousels.get(section_id).copied().unwrap_or_default()
    }

    /// The project under the current section's carousel.
    pub fn current_project(&self) -> Option<&Project> {
        let view = self.current_section()?;
        let index = self.carousel(&view.section.id).index();
        view.projects.get(index)
    }

    pub fn is_admin(&self) -> bool {
        self.auth.is_admin()
    }

    /// Re-derive carousels and the cursor after the section list changed.
    pub fn sync_after_refresh(&mut self) {
        let mut carousels = HashMap::new();
        for view in &self.page.sections {
            let mut c = self.carousel(&view.section.id);
            c.set_len(view.projects.len());
            carousels.insert(view.section.id.clone(), c);
        }
        self.carousels = carousels;
        let visible = self.visible_sections().len();
        self.section_cursor = self.section_cursor.min(visible.saturating_sub(1));
    }

    pub fn refresh(&mut self) {
        match self.page.refresh(self.api.as_ref()) {
            Ok(()) => self.status_message = Some("refreshed".into()),
            Err(e) => self.report(e),
        }
        self.sync_after_refresh();
    }

    /// Route a flow error: alerts block, remote failures go to the status row.
    pub fn report(&mut self, err: FlowError) {
        if err.is_alert() {
            self.alert = Some(err.to_string());
        } else {
            self.status_message = Some(format!("error: {}", err));
        }
    }

    /// Refuse an admin-only action for everyone else.
    pub fn require_admin(&mut self) -> bool {
        if self.is_admin() {
            return true;
        }
        self.status_message = Some(match self.auth.session() {
            Some(_) => "admins only".into(),
            None => "log in as an admin first (L)".into(),
        });
        false
    }
}

/// Run the TUI application
pub fn run(config: AppConfig, config_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let api = HttpApi::new(&config)?;
    let auth = AuthContext::load(session_path(&config_dir));
    let mut app = App::new(Box::new(api), auth, config);

    // A server that is down still gets an empty grid and a status message.
    app.refresh();
    if app.status_message.as_deref() == Some("refreshed") {
        app.status_message = None;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
