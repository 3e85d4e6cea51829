mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{self, QuizError};
use crate::loader::Loader;
use crate::models::{PageParams, TopicEntry};
use crate::session::{Advance, QuizSession};

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn first(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(0);
        }
    }

    fn last(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(self.items.len() - 1);
        }
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

pub struct SubjectsPage {
    pub topics: StatefulList<TopicEntry>,
    pub error: Option<String>,
}

impl SubjectsPage {
    fn load(loader: &Loader) -> Self {
        match loader.load_catalog() {
            Ok(catalog) => Self {
                topics: StatefulList::with_items(catalog.entries()),
                error: None,
            },
            Err(e) => Self {
                topics: StatefulList::with_items(Vec::new()),
                error: Some(format!("Error: {}", e)),
            },
        }
    }
}

pub enum PracticeContent {
    Quiz(QuizSession),
    /// Shown in place of the quiz when no session could be started.
    Message(String),
}

pub struct PracticePage {
    pub params: PageParams,
    pub content: PracticeContent,
    /// Highlighted option; only meaningful while a quiz is shown.
    pub cursor: usize,
}

impl PracticePage {
    fn open(loader: &Loader, params: PageParams) -> Self {
        let content = match start_session(loader, &params) {
            Ok(session) => PracticeContent::Quiz(session),
            Err(QuizError::MissingFile) => {
                PracticeContent::Message(QuizError::MissingFile.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not start session");
                PracticeContent::Message(format!("Error: {}", e))
            }
        };

        let mut page = Self {
            params,
            content,
            cursor: 0,
        };
        page.sync_cursor();
        page
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.content {
            PracticeContent::Quiz(session) => Some(session),
            PracticeContent::Message(_) => None,
        }
    }

    fn sync_cursor(&mut self) {
        if let PracticeContent::Quiz(session) = &self.content {
            self.cursor = session.selected().unwrap_or(0);
        }
    }
}

fn start_session(loader: &Loader, params: &PageParams) -> error::Result<QuizSession> {
    let file = params.file.as_deref().ok_or(QuizError::MissingFile)?;
    let questions = loader.load_questions(file)?;
    QuizSession::new(questions)
}

pub enum Page {
    Subjects(SubjectsPage),
    Practice(PracticePage),
}

enum Nav {
    Stay,
    Subjects,
    Practice(PageParams),
}

pub struct App {
    loader: Loader,
    pub page: Page,
    pub should_quit: bool,
}

impl App {
    pub fn with_subjects(loader: Loader) -> Self {
        let page = Page::Subjects(SubjectsPage::load(&loader));
        Self {
            loader,
            page,
            should_quit: false,
        }
    }

    pub fn with_practice(loader: Loader, params: PageParams) -> Self {
        let page = Page::Practice(PracticePage::open(&loader, params));
        Self {
            loader,
            page,
            should_quit: false,
        }
    }

    fn navigate(&mut self, nav: Nav) {
        match nav {
            Nav::Stay => {}
            Nav::Subjects => {
                tracing::debug!("navigating to subjects");
                self.page = Page::Subjects(SubjectsPage::load(&self.loader));
            }
            Nav::Practice(params) => {
                tracing::info!(
                    subject = %params.subject,
                    chapter = %params.chapter,
                    "opening topic"
                );
                self.page = Page::Practice(PracticePage::open(&self.loader, params));
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if key == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        let nav = match &mut self.page {
            Page::Subjects(page) => handle_subjects_key(page, key),
            Page::Practice(page) => handle_practice_key(page, key),
        };
        self.navigate(nav);
    }
}

fn handle_subjects_key(page: &mut SubjectsPage, key: KeyCode) -> Nav {
    match key {
        // List navigation: j/k (vim up/down)
        KeyCode::Char('j') | KeyCode::Down => page.topics.next(),
        KeyCode::Char('k') | KeyCode::Up => page.topics.previous(),

        // Jump to top/bottom: g/G
        KeyCode::Char('g') => page.topics.first(),
        KeyCode::Char('G') => page.topics.last(),

        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => {
            if let Some(entry) = page.topics.selected_item() {
                return Nav::Practice(entry.params());
            }
        }

        _ => {}
    }
    Nav::Stay
}

fn handle_practice_key(page: &mut PracticePage, key: KeyCode) -> Nav {
    let PracticeContent::Quiz(session) = &mut page.content else {
        return match key {
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => Nav::Subjects,
            _ => Nav::Stay,
        };
    };

    let option_count = session.current_question().options.len();

    match key {
        KeyCode::Esc => return Nav::Subjects,

        // Option cursor
        KeyCode::Char('j') | KeyCode::Down => {
            page.cursor = (page.cursor + 1).min(option_count - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            page.cursor = page.cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            session.select(page.cursor);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let option = c as usize - '1' as usize;
            if session.select(option) {
                page.cursor = option;
            }
        }

        // Question navigation
        KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => match session.advance() {
            Advance::Moved => page.sync_cursor(),
            Advance::Submitted(result) => {
                tracing::debug!(
                    chapter = %page.params.chapter,
                    score = result.score,
                    "switching to review"
                );
                page.sync_cursor();
            }
            Advance::Exit => return Nav::Subjects,
        },
        KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => {
            if session.retreat() {
                page.sync_cursor();
            }
        }

        _ => {}
    }
    Nav::Stay
}

pub fn run(loader: Loader, params: Option<PageParams>) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = match params {
        Some(params) => App::with_practice(loader, params),
        None => App::with_subjects(loader),
    };

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Mode;
    use std::fs;
    use tempfile::TempDir;

    fn setup_site() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data/physics")).unwrap();
        fs::write(
            dir.path().join("data/index.json"),
            r#"{ "subjects": [
                { "name": "Physics", "topics": [
                    { "name": "Motion", "file": "data/physics/motion.json" },
                    { "name": "Broken", "file": "data/physics/missing.json" }
                ] }
            ] }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("data/physics/motion.json"),
            r#"[
                { "q": "first", "options": ["a", "b"], "answerIndex": 1 },
                { "q": "second", "options": ["c", "d"], "answerIndex": 0, "explanation": "c it is" }
            ]"#,
        )
        .unwrap();
        dir
    }

    fn session(app: &App) -> &QuizSession {
        match &app.page {
            Page::Practice(page) => page.session().expect("quiz should be loaded"),
            Page::Subjects(_) => panic!("Expected practice page"),
        }
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key);
        }
    }

    mod stateful_list_tests {
        use super::*;

        #[test]
        fn empty_list_has_no_selection() {
            let mut list: StatefulList<i32> = StatefulList::with_items(vec![]);
            list.next();
            list.last();
            assert!(list.selected.is_none());
        }

        #[test]
        fn next_and_previous_wrap() {
            let mut list = StatefulList::with_items(vec![1, 2, 3]);
            list.previous();
            assert_eq!(list.selected, Some(2));
            list.next();
            assert_eq!(list.selected, Some(0));
        }

        #[test]
        fn first_and_last() {
            let mut list = StatefulList::with_items(vec![1, 2, 3]);
            list.last();
            assert_eq!(list.selected_item(), Some(&3));
            list.first();
            assert_eq!(list.selected_item(), Some(&1));
        }
    }

    mod subjects_tests {
        use super::*;

        #[test]
        fn loads_catalog_entries() {
            let dir = setup_site();
            let app = App::with_subjects(Loader::new(dir.path()));
            match &app.page {
                Page::Subjects(page) => {
                    assert!(page.error.is_none());
                    assert_eq!(page.topics.items.len(), 2);
                    assert_eq!(page.topics.selected, Some(0));
                }
                Page::Practice(_) => panic!("Expected subjects page"),
            }
        }

        #[test]
        fn missing_catalog_shows_error() {
            let dir = tempfile::tempdir().unwrap();
            let app = App::with_subjects(Loader::new(dir.path()));
            match &app.page {
                Page::Subjects(page) => {
                    let error = page.error.as_deref().unwrap();
                    assert!(error.starts_with("Error: Failed to load"));
                    assert!(page.topics.items.is_empty());
                }
                Page::Practice(_) => panic!("Expected subjects page"),
            }
        }

        #[test]
        fn enter_opens_selected_topic() {
            let dir = setup_site();
            let mut app = App::with_subjects(Loader::new(dir.path()));
            press(&mut app, &[KeyCode::Enter]);

            match &app.page {
                Page::Practice(page) => {
                    assert_eq!(page.params.subject, "Physics");
                    assert_eq!(page.params.chapter, "Motion");
                    assert!(page.session().is_some());
                }
                Page::Subjects(_) => panic!("Expected practice page"),
            }
        }

        #[test]
        fn broken_topic_shows_inline_error() {
            let dir = setup_site();
            let mut app = App::with_subjects(Loader::new(dir.path()));
            press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter]);

            match &app.page {
                Page::Practice(page) => match &page.content {
                    PracticeContent::Message(msg) => assert!(msg.starts_with("Error: ")),
                    PracticeContent::Quiz(_) => panic!("Expected an error message"),
                },
                Page::Subjects(_) => panic!("Expected practice page"),
            }

            press(&mut app, &[KeyCode::Esc]);
            assert!(matches!(app.page, Page::Subjects(_)));
        }

        #[test]
        fn q_quits() {
            let dir = setup_site();
            let mut app = App::with_subjects(Loader::new(dir.path()));
            press(&mut app, &[KeyCode::Char('q')]);
            assert!(app.should_quit);
        }
    }

    mod practice_tests {
        use super::*;

        fn open_motion(dir: &TempDir) -> App {
            App::with_practice(
                Loader::new(dir.path()),
                PageParams::new(
                    Some("data/physics/motion.json".to_string()),
                    Some("Physics".to_string()),
                    Some("Motion".to_string()),
                ),
            )
        }

        #[test]
        fn missing_file_shows_placeholder() {
            let dir = setup_site();
            let app = App::with_practice(Loader::new(dir.path()), PageParams::new(None, None, None));
            match &app.page {
                Page::Practice(page) => match &page.content {
                    PracticeContent::Message(msg) => assert_eq!(msg, "No topic file provided."),
                    PracticeContent::Quiz(_) => panic!("Expected placeholder"),
                },
                Page::Subjects(_) => panic!("Expected practice page"),
            }
        }

        #[test]
        fn empty_question_file_shows_error() {
            let dir = setup_site();
            fs::write(dir.path().join("data/physics/empty.json"), "[]").unwrap();
            let app = App::with_practice(
                Loader::new(dir.path()),
                PageParams::new(Some("data/physics/empty.json".to_string()), None, None),
            );
            match &app.page {
                Page::Practice(page) => assert!(page.session().is_none()),
                Page::Subjects(_) => panic!("Expected practice page"),
            }
        }

        #[test]
        fn cursor_select_and_digit_select() {
            let dir = setup_site();
            let mut app = open_motion(&dir);

            press(&mut app, &[KeyCode::Char('j'), KeyCode::Char(' ')]);
            assert_eq!(session(&app).selected(), Some(1));

            press(&mut app, &[KeyCode::Char('1')]);
            assert_eq!(session(&app).selected(), Some(0));
            assert_eq!(session(&app).answers().len(), 1);
        }

        #[test]
        fn digit_past_options_is_ignored() {
            let dir = setup_site();
            let mut app = open_motion(&dir);
            press(&mut app, &[KeyCode::Char('5')]);
            assert!(session(&app).answers().is_empty());
        }

        #[test]
        fn cursor_stays_within_options() {
            let dir = setup_site();
            let mut app = open_motion(&dir);
            press(
                &mut app,
                &[KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Char('j')],
            );
            match &app.page {
                Page::Practice(page) => assert_eq!(page.cursor, 1),
                Page::Subjects(_) => panic!("Expected practice page"),
            }
        }

        #[test]
        fn full_attempt_then_review_then_exit() {
            let dir = setup_site();
            let mut app = open_motion(&dir);

            press(
                &mut app,
                &[
                    KeyCode::Char('2'),
                    KeyCode::Char('n'),
                    KeyCode::Char('2'),
                    KeyCode::Char('n'),
                ],
            );
            let result = session(&app).result().unwrap();
            assert_eq!((result.score, result.attempted, result.total), (1, 2, 2));
            assert_eq!(session(&app).current_index(), 0);

            // Locked while reviewing
            press(&mut app, &[KeyCode::Char('1')]);
            assert_eq!(session(&app).selected(), Some(1));

            press(&mut app, &[KeyCode::Char('n')]);
            assert!(matches!(session(&app).mode(), Mode::Reviewing(_)));
            press(&mut app, &[KeyCode::Char('n')]);
            assert!(matches!(app.page, Page::Subjects(_)));
        }

        #[test]
        fn previous_at_first_question_stays() {
            let dir = setup_site();
            let mut app = open_motion(&dir);
            press(&mut app, &[KeyCode::Char('p')]);
            assert_eq!(session(&app).current_index(), 0);
        }

        #[test]
        fn esc_abandons_session() {
            let dir = setup_site();
            let mut app = open_motion(&dir);
            press(&mut app, &[KeyCode::Char('1'), KeyCode::Esc]);
            assert!(matches!(app.page, Page::Subjects(_)));
        }
    }
}
