use ratatui::layout::Rect;
use crate::responder::Responder;

/// Shown in place of a reply when acquiring one fails.
pub const APOLOGY: &str = "Sorry, something went wrong. Please try again later.";

/// The input box grows with its content up to this many text rows.
pub const INPUT_MAX_LINES: u16 = 5;

/// Suggested questions shown on the welcome screen.
pub struct ExampleCard {
    pub title: &'static str,
    pub prompt: &'static str,
}

pub const EXAMPLE_CARDS: [ExampleCard; 3] = [
    ExampleCard {
        title: "Fine motor skills",
        prompt: "How can I help my toddler develop fine motor skills?",
    },
    ExampleCard {
        title: "Biting",
        prompt: "What should I do when my child bites?",
    },
    ExampleCard {
        title: "Prepared environment",
        prompt: "How do I set up a prepared environment at home?",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Chat,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// At most one reply is in flight at a time. The handle resolves to the
/// reply text or the acquisition error.
pub enum ReplyState {
    Idle,
    Awaiting(tokio::task::JoinHandle<anyhow::Result<String>>),
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub messages: Vec<Message>,
    pub reply_state: ReplyState,

    // Input state
    pub input: String,
    pub cursor: usize, // cursor position in input (chars, not bytes)

    // Welcome screen state
    pub selected_example: usize,

    // Transcript viewport
    pub scroll: u16,
    pub transcript_height: u16, // Height of transcript area for scroll calculations
    pub transcript_width: u16,  // Width of transcript area for wrap calculations

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Areas for mouse hit-testing (updated during render)
    pub transcript_area: Option<Rect>,
    pub send_button_area: Option<Rect>,
    pub example_areas: Vec<Rect>,

    // Reply source
    pub responder: Responder,
}

impl App {
    pub fn new(responder: Responder) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Welcome,
            messages: Vec::new(),
            reply_state: ReplyState::Idle,

            input: String::new(),
            cursor: 0,

            selected_example: 0,

            scroll: 0,
            transcript_height: 0,
            transcript_width: 0,

            animation_frame: 0,

            transcript_area: None,
            send_button_area: None,
            example_areas: Vec::new(),

            responder,
        }
    }

    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.reply_state, ReplyState::Awaiting(_))
    }

    /// Sends the current input. Does nothing when the input is blank or a
    /// reply is already in flight.
    pub fn send_message(&mut self) {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.is_awaiting_reply() {
            return;
        }

        self.screen = Screen::Chat;
        self.messages.push(Message {
            role: Role::User,
            text: text.clone(),
        });
        self.input.clear();
        self.cursor = 0;

        tracing::debug!(chars = text.chars().count(), "Sending message");

        let responder = self.responder.clone();
        let task = tokio::spawn(async move { responder.reply(&text).await });
        self.reply_state = ReplyState::Awaiting(task);

        self.scroll_to_bottom();
    }

    /// Copies an example card's prompt into the input and sends it,
    /// replacing any typed draft. The Enter path only reaches this with an
    /// empty input; mouse clicks on a card land here unconditionally.
    pub fn pick_example(&mut self, idx: usize) {
        if self.is_awaiting_reply() {
            return;
        }
        if let Some(card) = EXAMPLE_CARDS.get(idx) {
            self.input = card.prompt.to_string();
            self.send_message();
        }
    }

    pub fn example_nav_down(&mut self) {
        self.selected_example = (self.selected_example + 1).min(EXAMPLE_CARDS.len() - 1);
    }

    pub fn example_nav_up(&mut self) {
        self.selected_example = self.selected_example.saturating_sub(1);
    }

    /// Takes the reply task once it has finished, moving back to Idle.
    /// Returns None while Idle or still in flight.
    pub fn take_finished_reply(
        &mut self,
    ) -> Option<tokio::task::JoinHandle<anyhow::Result<String>>> {
        let finished = matches!(&self.reply_state, ReplyState::Awaiting(task) if task.is_finished());
        if !finished {
            return None;
        }
        match std::mem::replace(&mut self.reply_state, ReplyState::Idle) {
            ReplyState::Awaiting(task) => Some(task),
            ReplyState::Idle => None,
        }
    }

    /// Appends the assistant's reply, or the apology when acquisition failed.
    pub fn resolve_reply(&mut self, result: anyhow::Result<String>) {
        let text = match result {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!("Reply failed: {:#}", err);
                APOLOGY.to_string()
            }
        };
        self.messages.push(Message {
            role: Role::Assistant,
            text,
        });
        self.scroll_to_bottom();
    }

    /// Drops any in-flight reply task. Called on quit.
    pub fn abort_pending(&mut self) {
        if let ReplyState::Awaiting(task) =
            std::mem::replace(&mut self.reply_state, ReplyState::Idle)
        {
            task.abort();
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_awaiting_reply() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Text rows the input box needs right now, capped at INPUT_MAX_LINES.
    pub fn input_height(&self) -> u16 {
        let lines = self.input.split('\n').count() as u16;
        lines.clamp(1, INPUT_MAX_LINES)
    }

    // Transcript scrolling
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let total = self.transcript_line_count();
        if self.scroll < total.saturating_sub(self.transcript_height) {
            self.scroll = self.scroll.saturating_add(1);
        }
    }

    /// Scroll the transcript so the newest message (or the typing
    /// indicator) is visible.
    pub fn scroll_to_bottom(&mut self) {
        let total_lines = self.transcript_line_count();

        let visible_height = if self.transcript_height > 0 {
            self.transcript_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.scroll = total_lines.saturating_sub(visible_height);
        }
    }

    /// Estimate of rendered transcript lines at the current width.
    fn transcript_line_count(&self) -> u16 {
        // Use actual transcript width for wrap calculation, default to 50 if not set
        let wrap_width = if self.transcript_width > 0 {
            self.transcript_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in &self.messages {
            total_lines += 1; // Role line ("You:" or "nido:")
            for line in msg.text.lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1; // Empty line still takes one line
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.is_awaiting_reply() {
            total_lines += 2; // "nido:" + "Typing..."
        }

        total_lines
    }
}
