//! Line commands typed at the terminal front end.

use crate::models::InputField;

use super::controller::UiAction;

pub const HELP: &str = "\
Commands:
  item <id>            set the item id (e.g. item v1|123456|0)
  category <name>      filter by category, empty to clear
  condition <name>     filter by condition, empty to clear
  min <price>          minimum price, empty to clear
  max <price>          maximum price, empty to clear
  recommend            get recommendations
  cluster              get items from the same cluster
  dismiss              dismiss the current error
  show                 print the form and results
  help                 this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(UiAction),
    Show,
    Help,
    Quit,
}

/// Parses one input line.
///
/// The value of an edit command is everything after the first space,
/// kept verbatim so padded ids reach the form as typed.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let line = line.trim_start();
    let (word, rest) = match line.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "recommend" | "r" => Command::Action(UiAction::FetchRecommendations),
        "cluster" | "c" => Command::Action(UiAction::FetchClusterItems),
        "dismiss" => Command::Action(UiAction::DismissError),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            let field = other
                .parse::<InputField>()
                .map_err(|e| format!("{}; type 'help' for commands", e))?;
            Command::Action(UiAction::Edit {
                field,
                value: rest.to_string(),
            })
        }
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_ignored() {
        assert_eq!(parse_command("   \n"), Ok(None));
    }

    #[test]
    fn test_edit_keeps_value_verbatim() {
        assert_eq!(
            parse_command("item   v1|1|0  \n"),
            Ok(Some(Command::Action(UiAction::Edit {
                field: InputField::ItemId,
                value: "  v1|1|0  ".to_string(),
            })))
        );
    }

    #[test]
    fn test_edit_without_value_clears() {
        assert_eq!(
            parse_command("min"),
            Ok(Some(Command::Action(UiAction::Edit {
                field: InputField::MinPrice,
                value: String::new(),
            })))
        );
    }

    #[test]
    fn test_actions() {
        assert_eq!(
            parse_command("recommend"),
            Ok(Some(Command::Action(UiAction::FetchRecommendations)))
        );
        assert_eq!(
            parse_command("CLUSTER"),
            Ok(Some(Command::Action(UiAction::FetchClusterItems)))
        );
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("colour red").unwrap_err();
        assert!(err.contains("unknown field 'colour'"));
    }
}
