use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use sa_menu::config::Config;
use sa_menu::menu::{Menu, MenuId, MenuPool};
use sa_menu::screen::InsetSafeZone;
use sa_menu::terminal::{REFERENCE_RESOLUTION, TerminalCanvas, TerminalInput};

/// State of the demo application.
pub struct App {
    /// Menus processed every frame.
    pub pool: MenuPool,

    /// Id of the menu built from the config.
    main_menu: MenuId,

    /// Input collected for the current frame.
    input: TerminalInput,

    /// Message shown on the last line, written by item handlers.
    status: Rc<RefCell<Option<String>>>,

    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create the app with the menu described by the config.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut menu = config.menu.build()?;
        menu.set_safe_zone(InsetSafeZone::new(config.safe_zone, REFERENCE_RESOLUTION));

        let status = Rc::new(RefCell::new(None));
        wire_status(&mut menu, &status);

        let mut pool = MenuPool::new();
        let main_menu = pool.add(menu);
        if let Some(menu) = pool.get_mut(main_menu) {
            menu.open();
        }

        Ok(Self {
            pool,
            main_menu,
            input: TerminalInput::new(),
            status,
            should_quit: false,
        })
    }

    /// Run the application main loop.
    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        loop {
            self.input.begin_frame();

            // One event per frame, with a timeout so the menu keeps drawing
            let mut pending = None;
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if !self.input.handle_key(&key) {
                        pending = Some(key);
                    }
                }
            }

            terminal.draw(|frame| {
                let area = frame.area();
                {
                    let mut canvas = TerminalCanvas::new(frame);
                    self.pool.process(&mut canvas, &mut self.input);
                }
                self.render_status(frame, area);
            })?;

            if let Some(key) = pending {
                self.handle_key(key);
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn render_status(&self, frame: &mut ratatui::Frame, area: Rect) {
        let text = match self.status.borrow().as_deref() {
            Some(message) => message.to_string(),
            None if self.pool.are_any_visible() => "↑/↓ move  Enter select  Esc close".to_string(),
            None => "Esc open menu  q quit".to_string(),
        };
        let status_area = Rect {
            x: area.x,
            y: area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        let status = Paragraph::new(text).style(Style::default().fg(Color::Yellow));
        frame.render_widget(status, status_area);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => self.toggle_menu(),
            // A menu with items keeps the rest of the app from seeing keys
            _ if self.input.others_disabled() => {}
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn toggle_menu(&mut self) {
        if let Some(menu) = self.pool.get_mut(self.main_menu) {
            let visible = menu.is_visible();
            menu.set_visible(!visible);
        }
        self.status.borrow_mut().take();
    }
}

/// Report activations and toggles on the status line.
fn wire_status(menu: &mut Menu, status: &Rc<RefCell<Option<String>>>) {
    let ids: Vec<_> = menu.items().iter().map(|item| item.id()).collect();
    for id in ids {
        let Some(item) = menu.item_mut(id) else {
            continue;
        };
        let title = item.title().to_string();
        let target = Rc::clone(status);
        item.on_activated(move |_| {
            log::info!("activated '{title}'");
            *target.borrow_mut() = Some(format!("Selected: {title}"));
        });
    }

    let target = Rc::clone(status);
    menu.on_closed(move |_| {
        *target.borrow_mut() = None;
    });
}
