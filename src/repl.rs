//! The interactive line loop.
//!
//! Reads one line at a time and forwards it, verbatim, to the dispatcher.
//! Every submitted line is treated as syntactically complete; there is no
//! multi-line continuation. The loop prints nothing itself beyond prompts.
//!
//! Line editing and history are best-effort: when stdin is an attended
//! terminal, input goes through dialoguer (arrow-key history, basic
//! editing); otherwise lines are read straight from stdin so piped scripts
//! behave identically.

use std::fmt;
use std::io::{self, BufRead};

use dialoguer::theme::Theme;
use dialoguer::{BasicHistory, Input};

use crate::dispatcher::{CommandDispatcher, RunOutcome};
use crate::error::Result;
use crate::ui::UserInterface;

/// Prompt configuration, fixed before the loop starts.
#[derive(Debug, Clone)]
pub struct ReplOptions {
    /// Primary prompt shown before each line.
    pub prompt: String,

    /// Continuation prompt. The loop is single-line, so this is
    /// configuration surface only; it is never shown.
    pub continuation_prompt: String,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            prompt: "sipsh% ".to_string(),
            continuation_prompt: "... ".to_string(),
        }
    }
}

/// Theme that renders the prompt string verbatim, with no decoration.
struct PromptTheme;

impl Theme for PromptTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{}", prompt)
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(f, "{}{}", prompt, sel)
    }
}

/// Reads input lines and hands them to the dispatcher.
pub struct LineLoop {
    options: ReplOptions,
}

impl LineLoop {
    /// Create a loop with the given prompt configuration.
    pub fn new(options: ReplOptions) -> Self {
        Self { options }
    }

    /// Run until `exit`/`quit` or end of input.
    pub fn run(
        &mut self,
        dispatcher: &mut CommandDispatcher,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        if ui.is_interactive() {
            self.run_interactive(dispatcher, ui)
        } else {
            self.run_piped(dispatcher, ui)
        }
    }

    fn run_interactive(
        &mut self,
        dispatcher: &mut CommandDispatcher,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut history = BasicHistory::new().no_duplicates(true);

        loop {
            let line = match Input::<String>::with_theme(&PromptTheme)
                .with_prompt(self.options.prompt.clone())
                .allow_empty(true)
                .history_with(&mut history)
                .interact_text()
            {
                Ok(line) => line,
                // EOF or interrupt ends the loop like `quit` minus the farewell.
                Err(_) => break,
            };

            if matches!(dispatcher.run(&line, ui), RunOutcome::Exit) {
                break;
            }
        }
        Ok(())
    }

    fn run_piped(
        &mut self,
        dispatcher: &mut CommandDispatcher,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        for line in io::stdin().lock().lines() {
            let line = line?;
            if matches!(dispatcher.run(&line, ui), RunOutcome::Exit) {
                break;
            }
        }
        Ok(())
    }
}
