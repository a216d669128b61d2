//! CLI argument definitions for the quiz show host.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use quizshow_model::{HiddenKind, QuestionType};

#[derive(Parser)]
#[command(
    name = "quizshow",
    version,
    about = "Author quizzes and host them as a live game show",
    long_about = "Author quizzes made of sections of Minefield, Guess Fusion and Map\n\
                  questions, then run a scored game session from the terminal.\n\n\
                  All changes are saved immediately."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding quiz data (overrides the settings file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create, inspect and remove quizzes.
    #[command(subcommand)]
    Quiz(QuizCommand),

    /// Manage the sections of a quiz.
    #[command(subcommand)]
    Section(SectionCommand),

    /// Add, edit and remove questions.
    #[command(subcommand)]
    Question(QuestionCommand),

    /// Edit minefield cells.
    #[command(subcommand)]
    Cell(CellCommand),

    /// Edit map pins.
    #[command(subcommand)]
    Pin(PinCommand),

    /// Run the live game session.
    #[command(subcommand)]
    Session(SessionCommand),

    /// Host one section of the session's quiz interactively.
    Play(PlayArgs),

    /// Inspect or create the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

// =============================================================================
// CONTENT
// =============================================================================

#[derive(Subcommand)]
pub enum QuizCommand {
    /// List all quizzes.
    List,

    /// Show a quiz with its sections and questions.
    Show {
        #[arg(value_name = "QUIZ")]
        quiz: String,
    },

    /// Create a quiz.
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Change a quiz's title or description.
    Update {
        #[arg(value_name = "QUIZ")]
        quiz: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a quiz with all its sections and questions.
    Delete {
        #[arg(value_name = "QUIZ")]
        quiz: String,
    },

    /// Mark a quiz as the one being edited.
    Activate {
        #[arg(value_name = "QUIZ", required_unless_present = "clear")]
        quiz: Option<String>,
        /// Clear the editor selection instead.
        #[arg(long, conflicts_with = "quiz")]
        clear: bool,
    },
}

#[derive(Subcommand)]
pub enum SectionCommand {
    /// Append a section to a quiz.
    Add {
        #[arg(value_name = "QUIZ")]
        quiz: String,
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Rename a section.
    Rename {
        #[arg(value_name = "QUIZ")]
        quiz: String,
        #[arg(value_name = "SECTION")]
        section: String,
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Delete a section and all of its questions.
    Delete {
        #[arg(value_name = "QUIZ")]
        quiz: String,
        #[arg(value_name = "SECTION")]
        section: String,
    },
}

/// Address of a section inside a quiz.
#[derive(Args, Clone)]
pub struct SectionRef {
    #[arg(value_name = "QUIZ")]
    pub quiz: String,
    #[arg(value_name = "SECTION")]
    pub section: String,
}

/// Address of a question.
#[derive(Args, Clone)]
pub struct QuestionRef {
    #[arg(value_name = "QUIZ")]
    pub quiz: String,
    #[arg(value_name = "SECTION")]
    pub section: String,
    #[arg(value_name = "QUESTION")]
    pub question: String,
}

#[derive(Subcommand)]
pub enum QuestionCommand {
    /// Append a question built from the editor template of its type.
    Add {
        #[command(flatten)]
        target: SectionRef,
        #[arg(long = "type", value_enum)]
        kind: QuestionTypeArg,
        #[arg(long)]
        text: Option<String>,
        /// Seconds allowed to answer.
        #[arg(long = "time-limit", value_name = "SECONDS")]
        time_limit: Option<u32>,
    },

    /// Edit the fields every question has.
    Text {
        #[command(flatten)]
        target: QuestionRef,
        #[arg(long)]
        text: Option<String>,
        #[arg(long = "time-limit", value_name = "SECONDS", conflicts_with = "no_time_limit")]
        time_limit: Option<u32>,
        /// Remove the time limit.
        #[arg(long = "no-time-limit")]
        no_time_limit: bool,
    },

    /// Edit a Guess Fusion question.
    Fusion {
        #[command(flatten)]
        target: QuestionRef,
        #[arg(long = "image", value_name = "URL")]
        image_url: Option<String>,
        #[arg(long)]
        answer1: Option<String>,
        #[arg(long)]
        answer2: Option<String>,
    },

    /// Edit a Map question.
    Map {
        #[command(flatten)]
        target: QuestionRef,
        #[arg(long = "image", value_name = "URL")]
        map_image_url: Option<String>,
        /// Pin diameter in pixels (20-100).
        #[arg(long = "pin-size", value_parser = clap::value_parser!(u32).range(20..=100))]
        pin_size: Option<u32>,
    },

    /// Delete a question.
    Delete {
        #[command(flatten)]
        target: QuestionRef,
    },
}

#[derive(Subcommand)]
pub enum CellCommand {
    /// Edit one cell of a minefield board.
    Set {
        #[command(flatten)]
        target: QuestionRef,
        /// Board position, 0 to 19, row by row.
        #[arg(value_name = "INDEX")]
        index: usize,
        #[arg(long = "cover", value_name = "URL", conflicts_with = "clear_cover")]
        cover_image: Option<String>,
        #[arg(long = "clear-cover")]
        clear_cover: bool,
        #[arg(long = "kind", value_enum)]
        hidden_kind: Option<HiddenKindArg>,
        /// Hidden text, or an image reference for image cells.
        #[arg(long = "content")]
        hidden_content: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PinCommand {
    /// Drop a pin at a position given in percent of the image.
    Add {
        #[command(flatten)]
        target: QuestionRef,
        #[arg(value_name = "X", allow_negative_numbers = true)]
        x: f64,
        #[arg(value_name = "Y", allow_negative_numbers = true)]
        y: f64,
        /// Question shown when the pin is opened.
        #[arg(long = "question", id = "pin_question", value_name = "TEXT")]
        prompt: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },

    /// Move a pin or change its question and answer.
    Update {
        #[command(flatten)]
        target: QuestionRef,
        #[arg(value_name = "PIN")]
        pin: String,
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f64>,
        /// Question shown when the pin is opened.
        #[arg(long = "question", id = "pin_question", value_name = "TEXT")]
        prompt: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },

    /// Remove a pin.
    Delete {
        #[command(flatten)]
        target: QuestionRef,
        #[arg(value_name = "PIN")]
        pin: String,
    },
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Start a game for a quiz. Replaces a running game unless the settings
    /// say otherwise.
    Start {
        #[arg(value_name = "QUIZ")]
        quiz: String,
        /// Player name; repeat for each player.
        #[arg(long = "player", value_name = "NAME", required = true)]
        players: Vec<String>,
    },

    /// Show the running game and its scoreboard.
    Show,

    /// Add points to a player (negative to subtract).
    Score {
        #[arg(value_name = "PLAYER")]
        player: String,
        #[arg(value_name = "DELTA", allow_negative_numbers = true)]
        delta: i64,
    },

    /// End the running game. Scores are discarded.
    End,
}

#[derive(Args)]
pub struct PlayArgs {
    /// Section of the session's quiz to play.
    #[arg(value_name = "SECTION")]
    pub section: String,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the settings file location.
    Path,

    /// Print the effective settings.
    Show,

    /// Write the effective settings to the settings file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// =============================================================================
// VALUE ENUMS
// =============================================================================

#[derive(Clone, Copy, ValueEnum)]
pub enum QuestionTypeArg {
    Minefield,
    GuessFusion,
    Map,
}

impl From<QuestionTypeArg> for QuestionType {
    fn from(arg: QuestionTypeArg) -> Self {
        match arg {
            QuestionTypeArg::Minefield => Self::Minefield,
            QuestionTypeArg::GuessFusion => Self::GuessFusion,
            QuestionTypeArg::Map => Self::Map,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HiddenKindArg {
    Text,
    Image,
}

impl From<HiddenKindArg> for HiddenKind {
    fn from(arg: HiddenKindArg) -> Self {
        match arg {
            HiddenKindArg::Text => Self::Text,
            HiddenKindArg::Image => Self::Image,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
