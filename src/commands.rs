//! Terminal command surface.
//!
//! Each input line maps onto the UI action surface: the parser produces a
//! [`Command`] and `execute` translates it into input edits and a click on
//! the corresponding button node. All state-machine logic stays in the
//! controller.

use crate::controller::EventController;
use crate::error::AppResult;
use crate::model::{EventId, ROW_MARKER_PREFIX};
use crate::view::tree::{Action, CellRole, RowState};

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current table
    Show,
    /// Open a blank new-event row
    Add,
    /// Discard the open new-event row
    Cancel,
    /// Fill and save the open new-event row
    SaveNew {
        name: String,
        start: String,
        end: String,
    },
    /// Switch an event's row into edit mode
    Edit { id: EventId },
    /// Fill and save an editing row
    SaveEdit {
        id: EventId,
        name: String,
        start: String,
        end: String,
    },
    /// Delete an event
    Delete { id: EventId },
    Help,
    Quit,
}

/// What the run loop should do after executing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Usage text printed by `help`
pub fn help_text() -> &'static str {
    "commands:\n\
     \x20 show                                print the event table\n\
     \x20 add                                 open a blank new-event row\n\
     \x20 save <name..> <start> <end>         save the new-event row\n\
     \x20 cancel                              discard the new-event row\n\
     \x20 edit <id>                           switch a row into edit mode\n\
     \x20 save <id> <name..> <start> <end>    save an editing row\n\
     \x20 delete <id>                         delete an event\n\
     \x20 help                                show this text\n\
     \x20 quit                                exit"
}

/// Parse one input line.
///
/// `save` is shared between the add and edit flows: a leading numeric token
/// targets the editing row with that id, anything else fills the new-event
/// row. The last two tokens are always the dates, so names may contain
/// spaces.
pub fn parse(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&keyword, args)) = tokens.split_first() else {
        return Err("empty command; try 'help'".to_string());
    };

    match keyword {
        "show" | "list" => Ok(Command::Show),
        "add" => Ok(Command::Add),
        "cancel" => Ok(Command::Cancel),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "edit" => match args {
            [id] => parse_id(id).map(|id| Command::Edit { id }),
            _ => Err("usage: edit <id>".to_string()),
        },
        "delete" => match args {
            [id] => parse_id(id).map(|id| Command::Delete { id }),
            _ => Err("usage: delete <id>".to_string()),
        },
        "save" => parse_save(args),
        other => Err(format!("unknown command '{}'; try 'help'", other)),
    }
}

fn parse_id(token: &str) -> Result<EventId, String> {
    token
        .parse::<EventId>()
        .map_err(|_| format!("'{}' is not an event id", token))
}

fn parse_save(args: &[&str]) -> Result<Command, String> {
    // With four or more tokens and a numeric lead, the save targets an
    // editing row; otherwise it fills the new-event row.
    if args.len() >= 4 {
        if let Ok(id) = args[0].parse::<EventId>() {
            let (dates, name) = split_name_and_dates(&args[1..])?;
            return Ok(Command::SaveEdit {
                id,
                name,
                start: dates.0,
                end: dates.1,
            });
        }
    }
    if args.len() >= 3 {
        let (dates, name) = split_name_and_dates(args)?;
        return Ok(Command::SaveNew {
            name,
            start: dates.0,
            end: dates.1,
        });
    }
    Err("usage: save <name..> <start> <end>  or  save <id> <name..> <start> <end>".to_string())
}

fn split_name_and_dates(args: &[&str]) -> Result<((String, String), String), String> {
    let (end, rest) = args.split_last().ok_or("missing end date")?;
    let (start, name_tokens) = rest.split_last().ok_or("missing start date")?;
    if name_tokens.is_empty() {
        return Err("missing event name".to_string());
    }
    Ok((
        (start.to_string(), end.to_string()),
        name_tokens.join(" "),
    ))
}

/// Execute one command against the controller.
///
/// Errors returned here are the ones the controller does not contain (the
/// create path); the run loop routes them to the unhandled sink.
pub async fn execute(controller: &mut EventController, command: Command) -> AppResult<Outcome> {
    match command {
        Command::Show => {}
        Command::Help => println!("{}", help_text()),
        Command::Quit => return Ok(Outcome::Quit),
        Command::Add => {
            let button = controller.renderer().add_event_button();
            controller.handle_click(button).await?;
        }
        Command::Cancel => {
            match find_button_in_state(controller, RowState::AddingNew, Action::CancelAdd) {
                Some(button) => controller.handle_click(button).await?,
                None => println!("no new-event row to cancel"),
            }
        }
        Command::SaveNew { name, start, end } => {
            let row = controller
                .renderer()
                .tree()
                .find_row_in_state(RowState::AddingNew);
            let Some(row) = row else {
                println!("no new-event row; 'add' one first");
                return Ok(Outcome::Continue);
            };
            fill_row(controller, row, &name, &start, &end);
            let button = controller.renderer().tree().find_button(row, Action::SaveAdd);
            if let Some(button) = button {
                controller.handle_click(button).await?;
            }
        }
        Command::Edit { id } => match find_row_button(controller, id, Action::Edit) {
            Ok(button) => controller.handle_click(button).await?,
            Err(message) => println!("{}", message),
        },
        Command::SaveEdit {
            id,
            name,
            start,
            end,
        } => {
            let marker = marker_for(id);
            let row = controller.renderer().tree().find_row(&marker);
            let Some(row) = row else {
                println!("no event with id {}", id);
                return Ok(Outcome::Continue);
            };
            if controller.renderer().tree().row_state(row) != Some(RowState::Editing) {
                println!("event {} is not being edited; 'edit {}' first", id, id);
                return Ok(Outcome::Continue);
            }
            fill_row(controller, row, &name, &start, &end);
            let button = controller
                .renderer()
                .tree()
                .find_button(row, Action::SaveEdit);
            if let Some(button) = button {
                controller.handle_click(button).await?;
            }
        }
        Command::Delete { id } => match find_row_button(controller, id, Action::Delete) {
            Ok(button) => controller.handle_click(button).await?,
            Err(message) => println!("{}", message),
        },
    }
    Ok(Outcome::Continue)
}

fn marker_for(id: EventId) -> String {
    format!("{}{}", ROW_MARKER_PREFIX, id)
}

fn fill_row(controller: &mut EventController, row: usize, name: &str, start: &str, end: &str) {
    let renderer = controller.renderer_mut();
    renderer.set_field(row, CellRole::EventName, name);
    renderer.set_field(row, CellRole::StartDate, start);
    renderer.set_field(row, CellRole::EndDate, end);
}

fn find_button_in_state(
    controller: &EventController,
    state: RowState,
    action: Action,
) -> Option<usize> {
    let tree = controller.renderer().tree();
    let row = tree.find_row_in_state(state)?;
    tree.find_button(row, action)
}

fn find_row_button(
    controller: &EventController,
    id: EventId,
    action: Action,
) -> Result<usize, String> {
    let tree = controller.renderer().tree();
    let row = tree
        .find_row(&marker_for(id))
        .ok_or_else(|| format!("no event with id {}", id))?;
    tree.find_button(row, action)
        .ok_or_else(|| format!("event {} has no '{:?}' action right now", id, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse("show"), Ok(Command::Show));
        assert_eq!(parse("add"), Ok(Command::Add));
        assert_eq!(parse("cancel"), Ok(Command::Cancel));
        assert_eq!(parse("quit"), Ok(Command::Quit));
        assert_eq!(parse("edit 5"), Ok(Command::Edit { id: 5 }));
        assert_eq!(parse("delete 9"), Ok(Command::Delete { id: 9 }));
    }

    #[test]
    fn parses_save_for_new_row() {
        assert_eq!(
            parse("save Standup 2024-01-01 2024-01-01"),
            Ok(Command::SaveNew {
                name: "Standup".to_string(),
                start: "2024-01-01".to_string(),
                end: "2024-01-01".to_string(),
            })
        );
    }

    /// Multi-word names are kept; the last two tokens are the dates
    #[test]
    fn parses_save_with_spaced_name() {
        assert_eq!(
            parse("save Team Standup 2024-01-01 2024-01-02"),
            Ok(Command::SaveNew {
                name: "Team Standup".to_string(),
                start: "2024-01-01".to_string(),
                end: "2024-01-02".to_string(),
            })
        );
    }

    #[test]
    fn parses_save_for_editing_row() {
        assert_eq!(
            parse("save 5 Retro 2024-02-01 2024-02-01"),
            Ok(Command::SaveEdit {
                id: 5,
                name: "Retro".to_string(),
                start: "2024-02-01".to_string(),
                end: "2024-02-01".to_string(),
            })
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse("").is_err());
        assert!(parse("edit five").is_err());
        assert!(parse("save onlyname").is_err());
        assert!(parse("frobnicate").is_err());
    }
}
