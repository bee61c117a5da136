use std::path::PathBuf;

/// Result of processing a slash command in the studio.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Start a new chat.
    NewChat,
    /// Rename the current chat.
    Rename(String),
    /// Switch to another chat by name.
    Switch(String),
    /// List every chat.
    ListChats,
    /// Clear the current chat.
    Clear,
    /// Attach an image file to the next message.
    Attach(PathBuf),
    /// Drop the pending upload.
    Detach,
    /// Show or hide the drawing canvas.
    ToggleDrawing,
    /// Show or hide the attach/draw panel.
    ToggleOptions,
    /// Flip dark mode.
    ToggleDarkMode,
    StrokeWidth(u32),
    StrokeColor(String),
    BackgroundColor(String),
    /// Wipe the canvas strokes.
    ClearCanvas,
    /// Change the theme.
    ThemeChanged(String),
    /// Not a command - treat as regular input.
    NotACommand,
}

const COMMANDS: &[&str] = &[
    "/help",
    "/quit",
    "/exit",
    "/new",
    "/rename",
    "/switch",
    "/chats",
    "/clear",
    "/attach",
    "/detach",
    "/draw",
    "/options",
    "/dark",
    "/stroke",
    "/color",
    "/bg",
    "/wipe",
    "/theme",
    "/version",
];

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,

        // Chats
        "/new" => CommandResult::NewChat,
        "/rename" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /rename <new-name>".into())
            } else {
                CommandResult::Rename(arg.to_string())
            }
        }
        "/switch" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /switch <chat-name>\nUse /chats to list chats.".into())
            } else {
                CommandResult::Switch(arg.to_string())
            }
        }
        "/chats" | "/history" => CommandResult::ListChats,
        "/clear" => CommandResult::Clear,

        // Attachments and canvas
        "/attach" | "/upload" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /attach <path-to-png-or-jpg>".into())
            } else {
                CommandResult::Attach(PathBuf::from(arg))
            }
        }
        "/detach" => CommandResult::Detach,
        "/draw" | "/canvas" => CommandResult::ToggleDrawing,
        "/options" | "/+" => CommandResult::ToggleOptions,
        "/stroke" => match arg.parse::<u32>() {
            Ok(width) if width > 0 => CommandResult::StrokeWidth(width),
            _ => CommandResult::Message("Usage: /stroke <width>  (1-25)".into()),
        },
        "/color" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /color <#rgb|#rrggbb>".into())
            } else {
                CommandResult::StrokeColor(arg.to_string())
            }
        }
        "/bg" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /bg <#rgb|#rrggbb>".into())
            } else {
                CommandResult::BackgroundColor(arg.to_string())
            }
        }
        "/wipe" => CommandResult::ClearCanvas,

        // Display
        "/dark" => CommandResult::ToggleDarkMode,
        "/theme" => {
            if arg.is_empty() {
                let themes = crate::theme::Theme::all_names().join(", ");
                CommandResult::Message(format!("Available themes: {themes}\nUsage: /theme <theme-name>"))
            } else {
                CommandResult::ThemeChanged(arg.to_string())
            }
        }
        "/version" => CommandResult::Message(format!("chatdeck v{}", env!("CARGO_PKG_VERSION"))),

        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

/// Tab completion: the single command starting with `input`, plus a trailing space.
pub fn complete_command(input: &str) -> Option<String> {
    if !input.starts_with('/') || input.contains(' ') {
        return None;
    }
    let matches: Vec<&&str> = COMMANDS.iter().filter(|c| c.starts_with(input)).collect();

    if matches.len() == 1 {
        Some(format!("{} ", matches[0]))
    } else {
        None
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ chatdeck studio commands ─────────────────────────────────────╮

  CHATS
    /new                      Start a new chat            (Ctrl+N)
    /rename <name>            Rename the current chat
    /switch <name>            Switch to another chat      (Alt+1..9)
    /chats, /history          List chats
    /clear                    Clear the current chat      (Ctrl+L)

  ATTACH & DRAW
    /options, /+              Show or hide the attach panel (Ctrl+O)
    /attach <path>            Attach a PNG or JPEG image
    /detach                   Drop the attached image
    /draw, /canvas            Show or hide the canvas     (Ctrl+D)
    /stroke <width>           Stroke width (1-25)
    /color <hex>              Stroke colour, e.g. #ff0000
    /bg <hex>                 Background colour
    /wipe                     Erase the drawing

  DISPLAY
    /dark                     Toggle dark mode            (Ctrl+T)
    /theme <name>             Change colour theme

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit                        (Esc)

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
