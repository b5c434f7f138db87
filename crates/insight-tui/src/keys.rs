use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which pane currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    Sidebar,
    Answer,
}

/// All logical actions the TUI can perform, independent of key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // App
    Quit,
    ToggleSidebar,
    FocusNext,
    CloseOverlay,

    // Query input
    InputChar(char),
    InputBackspace,
    Submit,

    // Sidebar
    SidebarUp,
    SidebarDown,
    SelectHistory,
    Revalidate,
    ViewVersions,

    // Answer pane
    ScrollUp,
    ScrollDown,
    NextCitation,
    PrevCitation,
    OpenCitation,
    ChooseLike,
    ChooseDislike,

    // Feedback comment box
    CommentChar(char),
    CommentBackspace,
    SubmitFeedback,
    CancelFeedback,
}

/// Everything the key mapper needs to know about the current UI state.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext {
    pub focus: FocusPane,
    /// The feedback comment box is open and captures typing.
    pub comment_open: bool,
    /// A document preview or version overlay is on top of the layout.
    pub overlay_open: bool,
}

/// Map a raw key event to an [`Action`].
///
/// Overlays and the comment box are modal: while one is up it sees every key
/// except the global Ctrl bindings.
pub fn map_key(event: KeyEvent, ctx: KeyContext) -> Option<Action> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    let plain = !ctrl && !alt;

    // ── Global bindings ───────────────────────────────────────────────────────
    match event.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return Some(Action::Quit),
        KeyCode::Char('b') if ctrl => return Some(Action::ToggleSidebar),
        _ => {}
    }

    if ctx.overlay_open {
        return match event.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseOverlay),
            _ => None,
        };
    }

    if ctx.comment_open {
        return match event.code {
            KeyCode::Enter => Some(Action::SubmitFeedback),
            KeyCode::Esc => Some(Action::CancelFeedback),
            KeyCode::Backspace => Some(Action::CommentBackspace),
            KeyCode::Char(c) if plain => Some(Action::CommentChar(c)),
            _ => None,
        };
    }

    if event.code == KeyCode::Tab {
        return Some(Action::FocusNext);
    }

    match ctx.focus {
        FocusPane::Input => match event.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) if plain => Some(Action::InputChar(c)),
            _ => None,
        },
        FocusPane::Sidebar => match event.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SidebarUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SidebarDown),
            KeyCode::Enter => Some(Action::SelectHistory),
            KeyCode::Char('r') => Some(Action::Revalidate),
            KeyCode::Char('v') => Some(Action::ViewVersions),
            _ => None,
        },
        FocusPane::Answer => match event.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::Right | KeyCode::Char('n') => Some(Action::NextCitation),
            KeyCode::Left | KeyCode::Char('p') => Some(Action::PrevCitation),
            KeyCode::Enter => Some(Action::OpenCitation),
            KeyCode::Char('l') => Some(Action::ChooseLike),
            KeyCode::Char('d') => Some(Action::ChooseDislike),
            _ => None,
        },
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
