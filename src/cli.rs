//! Line-oriented REPL over the view router.
//!
//! Screens and notices go to stdout, the prompt to stderr.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error};

use crate::backend::FileHandle;
use crate::error::{CommandError, Error};
use crate::profiles::Role;
use crate::render;
use crate::view::{Screen, ViewAction, ViewKind, ViewRouter};

const HELP: &str = "\
Commands:
  help                      show this list
  show                      redraw the current screen
  buy | sell                start onboarding as a buyer or seller
  fields                    list the onboarding fields and accepted values
  set <field> <value>       fill in an onboarding field
  next | back               move through the wizard (back also leaves screens)
  browse                    potential buyers
  profile <buyer-id>        full buyer profile
  accept <buyer-id>         accept a buyer
  reject <buyer-id>         pass on a buyer
  workflow                  acquisition workflow
  select <step-id>          show a workflow step
  complete <step-id>        mark a workflow step complete
  upload <step-id> <path>   upload a document to a workflow step
  analyzer                  AI document analyzer
  analyze <doc-id>          analyze a document
  add-doc <path>            upload a document to the analyzer
  wait                      wait for running uploads and analyses
  home                      back to the landing page
  quit                      exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Show,
    Fields,
    Wait,
    Quit,
    Action(ViewAction),
    Upload { step_id: String, path: PathBuf },
    AddDocument(PathBuf),
}

/// Parse one line of input. Blank lines redraw the screen.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let args = args.trim();

    let command = match name.to_ascii_lowercase().as_str() {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "fields" => Command::Fields,
        "wait" => Command::Wait,
        "quit" | "exit" | "/quit" => Command::Quit,
        "buy" => Command::Action(ViewAction::ChooseRole(Role::Buyer)),
        "sell" => Command::Action(ViewAction::ChooseRole(Role::Seller)),
        "next" => Command::Action(ViewAction::Next),
        "back" => Command::Action(ViewAction::Back),
        "home" => Command::Action(ViewAction::Home),
        "browse" => Command::Action(ViewAction::OpenDemo(ViewKind::BuyerBrowse)),
        "workflow" => Command::Action(ViewAction::OpenDemo(ViewKind::Acquisition)),
        "analyzer" => Command::Action(ViewAction::OpenDemo(ViewKind::AiAnalyzer)),
        "set" => {
            let (key, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            if key.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "set",
                    argument: "a field name",
                });
            }
            Command::Action(ViewAction::SetField {
                key: key.to_string(),
                value: value.trim().to_string(),
            })
        }
        "profile" => Command::Action(ViewAction::ViewBuyer(required(args, "profile", "a buyer id")?)),
        "accept" => Command::Action(ViewAction::AcceptBuyer(required(args, "accept", "a buyer id")?)),
        "reject" => Command::Action(ViewAction::RejectBuyer(required(args, "reject", "a buyer id")?)),
        "select" => Command::Action(ViewAction::SelectStep(required(args, "select", "a step id")?)),
        "complete" => {
            Command::Action(ViewAction::CompleteStep(required(args, "complete", "a step id")?))
        }
        "analyze" => {
            Command::Action(ViewAction::RequestAnalysis(required(args, "analyze", "a document id")?))
        }
        "upload" => {
            let (step_id, path) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            let step_id = required(step_id, "upload", "a step id")?;
            let path = required(path.trim(), "upload", "a file path")?;
            Command::Upload {
                step_id,
                path: PathBuf::from(path),
            }
        }
        "add-doc" => Command::AddDocument(PathBuf::from(required(args, "add-doc", "a file path")?)),
        other => {
            return Err(CommandError::Unknown {
                name: other.to_string(),
            });
        }
    };
    Ok(command)
}

fn required(
    arg: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(arg.to_string())
    }
}

/// What the REPL should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

pub struct Repl {
    router: ViewRouter,
}

impl Repl {
    pub fn new(router: ViewRouter) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    /// Handle one input line. Errors are reported in the output.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => return Reply::Output(format!("{e}. Type 'help' for commands.")),
        };
        debug!(?command, "REPL command");
        if command == Command::Quit {
            return Reply::Quit;
        }

        let mut lines = self.router.poll();
        match self.execute(command).await {
            Ok(output) => lines.extend(output),
            Err(e) => lines.push(format!("Error: {e}")),
        }
        Reply::Output(lines.join("\n"))
    }

    async fn execute(&mut self, command: Command) -> Result<Vec<String>, Error> {
        let action = match command {
            Command::Help => return Ok(vec![HELP.to_string()]),
            Command::Show | Command::Quit => return Ok(vec![render::render(&self.router)]),
            Command::Fields => {
                let reference = match self.router.screen() {
                    Screen::BuyerOnboarding(wizard) => render::field_reference(wizard),
                    Screen::SellerOnboarding(wizard) => render::field_reference(wizard),
                    _ => "No form on this screen. Use 'buy' or 'sell' first.".to_string(),
                };
                return Ok(vec![reference]);
            }
            Command::Wait => {
                let mut lines = self.router.settle().await;
                lines.push(render::render(&self.router));
                return Ok(lines);
            }
            Command::Action(action) => action,
            Command::Upload { step_id, path } => ViewAction::UploadStepDocument {
                step_id,
                file: open_file(path).await?,
            },
            Command::AddDocument(path) => ViewAction::UploadDocument(open_file(path).await?),
        };

        let from = self.router.view();
        let dispatch = self.router.dispatch(action).await?;
        let mut lines: Vec<String> = dispatch.notice.into_iter().collect();

        let onboarded = matches!(from, ViewKind::BuyerOnboarding | ViewKind::SellerOnboarding)
            && dispatch.view == ViewKind::BuyerBrowse;
        if onboarded {
            if let Some(profile) = self.router.completed_profile() {
                match serde_json::to_string_pretty(profile) {
                    Ok(json) => lines.push(json),
                    Err(e) => error!(error = %e, "Failed to serialize profile"),
                }
            }
        }

        lines.push(render::render(&self.router));
        Ok(lines)
    }

    /// Read commands from stdin until EOF or `quit`.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("{}\n", render::render(&self.router));
        eprint!("> ");

        while let Some(line) = lines.next_line().await? {
            match self.handle_line(&line).await {
                Reply::Output(output) => println!("\n{output}\n"),
                Reply::Quit => break,
            }
            eprint!("> ");
        }
        Ok(())
    }
}

async fn open_file(path: PathBuf) -> Result<FileHandle, CommandError> {
    FileHandle::from_path(&path)
        .await
        .map_err(|e| CommandError::UnreadableFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}
