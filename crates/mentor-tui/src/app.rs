//! Application state and input handling.

use std::path::PathBuf;

use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use mentor_engine::{
    Config, PendingAsk, PendingUpload, Rejected, Reply, Session, Transport, UploadFile,
};
use tracing::{debug, info};

use crate::conversation::{ConversationView, SCROLL_SPEED};
use crate::event::{key_to_action, Action};
use crate::picker;
use crate::theme::{IconMode, IconSet, Theme};
use crate::widgets::TextInputState;

/// What the input bar is currently editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Composing a message.
    #[default]
    Message,
    /// Typing the path of a file to upload.
    PickFile,
}

/// A request produced by user input, ready to be sent off the UI task.
#[derive(Debug)]
pub enum Request {
    Ask(PendingAsk),
    Upload(PendingUpload),
}

impl Request {
    /// Send the request. Never fails; errors become the reply text.
    pub async fn run<T: Transport>(self, transport: &T) -> Reply {
        match self {
            Self::Ask(pending) => pending.run(transport).await,
            Self::Upload(pending) => pending.run(transport).await,
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Conversation and request gate.
    pub session: Session,

    /// Message composer.
    pub input: TextInputState,

    /// File path prompt.
    pub picker: TextInputState,

    /// Which of the two inputs has focus.
    pub mode: InputMode,

    /// Conversation scroll state.
    pub view: ConversationView,

    pub theme: Theme,
    pub icons: IconSet,

    /// Row cap for the growing message input.
    pub input_max_lines: u16,

    /// Whether the terminal reports Shift+Enter.
    pub keyboard_enhanced: bool,

    /// Short notice for the footer, cleared on the next key.
    pub notice: Option<String>,

    /// Tick counter for animations.
    pub tick: usize,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            session: Session::new(),
            input: TextInputState::new(),
            picker: TextInputState::new(),
            mode: InputMode::Message,
            view: ConversationView::new(),
            theme: Theme::from_env(),
            icons: IconSet::new(IconMode::from_env()),
            input_max_lines: config.input_max_lines,
            keyboard_enhanced: false,
            notice: None,
            tick: 0,
        }
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// The input that currently has focus.
    pub fn active_input(&self) -> &TextInputState {
        match self.mode {
            InputMode::Message => &self.input,
            InputMode::PickFile => &self.picker,
        }
    }

    fn active_input_mut(&mut self) -> &mut TextInputState {
        match self.mode {
            InputMode::Message => &mut self.input,
            InputMode::PickFile => &mut self.picker,
        }
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Handle a key press. Returns a request to send, if the key started one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Request> {
        let action = key_to_action(key);
        if action != Action::None {
            self.notice = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Submit => {
                return match self.mode {
                    InputMode::Message => self.submit(),
                    InputMode::PickFile => self.submit_picker(),
                };
            }
            Action::Newline => {
                if self.mode == InputMode::Message {
                    self.input.insert('\n');
                }
            }
            Action::OpenPicker => self.open_picker(),
            Action::Cancel => match self.mode {
                InputMode::Message => self.input.clear(),
                InputMode::PickFile => self.close_picker(),
            },
            Action::HistoryPrev => {
                if self.mode == InputMode::Message {
                    self.input.history_prev();
                }
            }
            Action::HistoryNext => {
                if self.mode == InputMode::Message {
                    self.input.history_next();
                }
            }
            Action::ScrollUp => self.view.scroll_up(1),
            Action::ScrollDown => self.view.scroll_down(1),
            Action::PageUp => self.view.page_up(),
            Action::PageDown => self.view.page_down(),
            Action::Insert(c) => self.active_input_mut().insert(c),
            Action::Backspace => self.active_input_mut().backspace(),
            Action::Delete => self.active_input_mut().delete(),
            Action::Left => self.active_input_mut().move_left(),
            Action::Right => self.active_input_mut().move_right(),
            Action::Home => self.active_input_mut().move_home(),
            Action::End => self.active_input_mut().move_end(),
            Action::None => {}
        }
        None
    }

    /// Handle pasted text. A paste made of existing file paths is a drop.
    pub fn handle_paste(&mut self, text: &str) -> Option<Request> {
        self.notice = None;
        match self.mode {
            InputMode::Message => {
                if let Some(path) = picker::dropped_file(text) {
                    return self.upload(path);
                }
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.input.insert_str(&normalized);
            }
            InputMode::PickFile => {
                let line = text.lines().next().unwrap_or_default().trim();
                self.picker.insert_str(line);
            }
        }
        None
    }

    /// Handle a mouse event (wheel scrolling only).
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.view.scroll_up(SCROLL_SPEED),
            MouseEventKind::ScrollDown => self.view.scroll_down(SCROLL_SPEED),
            _ => {}
        }
    }

    /// Submit the composed message.
    ///
    /// Blank input and input typed while a reply is pending are left alone.
    pub fn submit(&mut self) -> Option<Request> {
        match self.session.begin_ask(self.input.content()) {
            Ok(pending) => {
                self.input.submit();
                self.view.follow_latest();
                info!(chars = pending.message().chars().count(), "message submitted");
                Some(Request::Ask(pending))
            }
            Err(Rejected::Empty) => None,
            Err(Rejected::Busy) => {
                debug!("submit ignored while a reply is pending");
                None
            }
        }
    }

    /// Switch the input bar to the file path prompt.
    pub fn open_picker(&mut self) {
        self.picker.clear();
        self.mode = InputMode::PickFile;
    }

    /// Leave the file path prompt without uploading.
    pub fn close_picker(&mut self) {
        self.picker.clear();
        self.mode = InputMode::Message;
    }

    /// Upload the file named in the path prompt.
    pub fn submit_picker(&mut self) -> Option<Request> {
        if self.is_busy() {
            return None;
        }
        let text = self.picker.take();
        self.mode = InputMode::Message;
        let path = picker::picked_path(&text)?;
        self.upload(path)
    }

    /// Start uploading `path`.
    pub fn upload(&mut self, path: PathBuf) -> Option<Request> {
        if !picker::is_uploadable(&path) {
            self.notice = Some(format!("Hittar ingen fil: {}", path.display()));
            return None;
        }

        match self.session.begin_upload(UploadFile::new(path)) {
            Ok(pending) => {
                self.view.follow_latest();
                info!(file = pending.file().name(), "upload started");
                Some(Request::Upload(pending))
            }
            Err(_) => {
                self.notice = Some("Vänta tills mentorn har svarat.".to_string());
                None
            }
        }
    }

    /// Record a finished request's reply and reopen the gate.
    pub fn apply(&mut self, reply: Reply) {
        self.session.finish(reply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, ctrl, key, ScriptedTransport};
    use crossterm::event::{KeyCode, KeyModifiers, MouseEvent};
    use mentor_engine::{Sender, ASK_FAILED, UPLOAD_FAILED};

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn senders(app: &App) -> Vec<Sender> {
        app.session
            .conversation()
            .messages()
            .iter()
            .map(|m| m.sender)
            .collect()
    }

    #[tokio::test]
    async fn test_enter_sends_message() {
        let mut app = create_test_app();
        type_text(&mut app, "Hej mentor");

        let request = app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.input.is_empty());
        assert!(app.is_busy());
        assert_eq!(senders(&app), vec![Sender::User]);
        assert!(!app.session.conversation().welcome_visible());

        let transport = ScriptedTransport::answering("Hej! Vad vill du prata om?");
        let reply = request.run(&transport).await;
        app.apply(reply);

        assert!(!app.is_busy());
        let last = app.session.conversation().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, "Hej! Vad vill du prata om?");
    }

    #[test]
    fn test_blank_enter_is_ignored() {
        let mut app = create_test_app();
        type_text(&mut app, "   ");

        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert!(app.session.conversation().is_empty());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_enter_while_busy_keeps_text() {
        let mut app = create_test_app();
        type_text(&mut app, "första");
        let _pending = app.handle_key(key(KeyCode::Enter)).unwrap();

        type_text(&mut app, "andra");
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(app.input.content(), "andra");
        assert_eq!(app.session.conversation().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_request_shows_fallback() {
        let mut app = create_test_app();
        type_text(&mut app, "Hallå?");
        let request = app.handle_key(key(KeyCode::Enter)).unwrap();

        app.apply(request.run(&ScriptedTransport::offline()).await);

        assert_eq!(senders(&app), vec![Sender::User, Sender::Bot]);
        assert_eq!(app.session.conversation().last().unwrap().text, ASK_FAILED);
        assert!(!app.is_busy());
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut app = create_test_app();
        type_text(&mut app, "rad ett");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        app.handle_key(ctrl('j'));
        type_text(&mut app, "rad tre");

        assert_eq!(app.input.content(), "rad ett\n\nrad tre");
        assert!(app.session.conversation().is_empty());
    }

    #[test]
    fn test_multiline_message_sent_verbatim() {
        let mut app = create_test_app();
        type_text(&mut app, "a");
        app.handle_key(ctrl('j'));
        type_text(&mut app, "b");

        let request = app.handle_key(key(KeyCode::Enter)).unwrap();
        match request {
            Request::Ask(pending) => assert_eq!(pending.message(), "a\nb"),
            Request::Upload(_) => panic!("expected an ask"),
        }
    }

    #[tokio::test]
    async fn test_picker_uploads_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rapport.pdf");
        std::fs::write(&file, b"%PDF").unwrap();

        let mut app = create_test_app();
        app.handle_key(ctrl('o'));
        assert_eq!(app.mode, InputMode::PickFile);

        type_text(&mut app, &file.display().to_string());
        let request = app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.mode, InputMode::Message);
        assert!(app.is_busy());
        assert_eq!(
            app.session.conversation().last().unwrap().text,
            "Laddar upp: rapport.pdf..."
        );

        app.apply(request.run(&ScriptedTransport::uploads("success")).await);
        assert_eq!(
            app.session.conversation().last().unwrap().text,
            "Analys klar! Jag har nu läst in \"rapport.pdf\"."
        );
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn test_rejected_upload_shows_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.csv");
        std::fs::write(&file, "a,b").unwrap();

        let mut app = create_test_app();
        let request = app.upload(file).unwrap();
        app.apply(request.run(&ScriptedTransport::uploads("error")).await);

        assert_eq!(app.session.conversation().last().unwrap().text, UPLOAD_FAILED);
        assert!(!app.is_busy());
    }

    #[test]
    fn test_picker_missing_file_sets_notice() {
        let mut app = create_test_app();
        app.handle_key(ctrl('o'));
        type_text(&mut app, "/finns/inte.pdf");

        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert!(app.notice.as_deref().unwrap().starts_with("Hittar ingen fil"));
        assert!(app.session.conversation().is_empty());

        // Next key clears the notice
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_escape_cancels_picker() {
        let mut app = create_test_app();
        type_text(&mut app, "utkast");
        app.handle_key(ctrl('o'));
        type_text(&mut app, "/tmp");
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.mode, InputMode::Message);
        assert!(app.picker.is_empty());
        assert_eq!(app.input.content(), "utkast");
    }

    #[test]
    fn test_escape_clears_message() {
        let mut app = create_test_app();
        type_text(&mut app, "utkast");
        app.handle_key(key(KeyCode::Esc));
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_paste_of_file_is_a_drop() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("anteckningar.txt");
        std::fs::write(&file, "hej").unwrap();

        let mut app = create_test_app();
        let request = app.handle_paste(&format!("'{}'", file.display()));

        assert!(matches!(request, Some(Request::Upload(_))));
        assert!(app.input.is_empty());
        assert_eq!(
            app.session.conversation().last().unwrap().text,
            "Laddar upp: anteckningar.txt..."
        );
    }

    #[test]
    fn test_paste_of_text_is_inserted() {
        let mut app = create_test_app();
        let request = app.handle_paste("rad ett\r\nrad två");

        assert!(request.is_none());
        assert_eq!(app.input.content(), "rad ett\nrad två");
        assert!(app.session.conversation().is_empty());
    }

    #[test]
    fn test_drop_while_busy_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "a").unwrap();

        let mut app = create_test_app();
        type_text(&mut app, "fråga");
        let _pending = app.handle_key(key(KeyCode::Enter)).unwrap();

        assert!(app.handle_paste(&file.display().to_string()).is_none());
        assert_eq!(app.session.conversation().len(), 1);
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_history_recall() {
        let mut app = create_test_app();
        type_text(&mut app, "gammal fråga");
        let request = app.handle_key(key(KeyCode::Enter)).unwrap();
        drop(request);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.input.content(), "gammal fråga");
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = create_test_app();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut app = create_test_app();
        // Pretend a render found plenty of history
        app.view.sync(1, 100, 10);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.view.offset(), SCROLL_SPEED);

        app.handle_key(key(KeyCode::PageDown));
        assert!(app.view.is_following());
    }
}
