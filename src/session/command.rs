//! Line-oriented operator commands
//!
//! Each line typed at the prompt maps to one [`Command`]:
//!
//! ```text
//! type dashboard              select embed type
//! mode create                 select report mode
//! page-view fullFit           select dashboard page view
//! set accessToken eyJ0...     assign a form field (value may contain spaces)
//! toggle-headers              flip visual headers
//! run | save | show | options | help | quit
//! ```

use super::UserAction;
use crate::embed::{FieldEdit, FieldName, SecondaryOption};
use crate::error::{HarnessError, Result};
use crate::types::{EmbedType, PageView, ReportMode};

/// A parsed operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Something for the state machine
    Action(UserAction),
    /// Print the current record and descriptor
    Show,
    /// Print the dropdown options for the active type
    Options,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  type <report|dashboard|tile>
  mode <view|create>
  page-view <fitToWidth|oneColumn|actualSize|fullFit>
  set <field> <value>
  toggle-headers
  run
  save
  show
  options
  quit";

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "type" => {
            let embed_type = EmbedType::parse(rest).ok_or_else(|| {
                HarnessError::Command(format!("unknown embed type '{}'", rest))
            })?;
            Command::Action(UserAction::SelectEmbedType(embed_type))
        }
        "mode" => {
            let mode = ReportMode::parse(rest)
                .ok_or_else(|| HarnessError::Command(format!("unknown report mode '{}'", rest)))?;
            Command::Action(UserAction::SelectOption(SecondaryOption::ReportMode(mode)))
        }
        "page-view" => {
            let view = PageView::parse(rest)
                .ok_or_else(|| HarnessError::Command(format!("unknown page view '{}'", rest)))?;
            Command::Action(UserAction::SelectOption(SecondaryOption::PageView(view)))
        }
        "set" => Command::Action(UserAction::SetField(parse_field(rest)?)),
        "toggle-headers" => Command::Action(UserAction::ToggleVisualHeaders),
        "run" => Command::Action(UserAction::Run),
        "save" => Command::Action(UserAction::Save),
        "show" => Command::Show,
        "options" => Command::Options,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => return Err(HarnessError::Command("empty command".to_string())),
        other => return Err(HarnessError::Command(format!("unknown command '{}'", other))),
    };

    Ok(command)
}

fn parse_field(args: &str) -> Result<FieldEdit> {
    let (name, value) = match args.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (args, ""),
    };

    if FieldName::parse(name).is_none() {
        return Err(HarnessError::Command(format!("unknown field '{}'", name)));
    }

    FieldEdit::parse(name, value)
        .ok_or_else(|| HarnessError::Command(format!("invalid value '{}' for {}", value, name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaneFlag;

    #[test]
    fn test_parse_type() {
        assert_eq!(
            parse_command("type Dashboard").unwrap(),
            Command::Action(UserAction::SelectEmbedType(EmbedType::Dashboard))
        );
        assert!(parse_command("type paginated").is_err());
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(
            parse_command("mode create").unwrap(),
            Command::Action(UserAction::SelectOption(SecondaryOption::ReportMode(
                ReportMode::Create
            )))
        );
        assert_eq!(
            parse_command("page-view fullFit").unwrap(),
            Command::Action(UserAction::SelectOption(SecondaryOption::PageView(
                PageView::FullFit
            )))
        );
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            parse_command("set pageName Sales Overview").unwrap(),
            Command::Action(UserAction::SetField(FieldEdit::PageName(
                "Sales Overview".into()
            )))
        );
        assert_eq!(
            parse_command("set filterPaneEnabled filter-false").unwrap(),
            Command::Action(UserAction::SetField(FieldEdit::FilterPane(
                PaneFlag::Disabled
            )))
        );
    }

    #[test]
    fn test_parse_set_clears_with_no_value() {
        assert_eq!(
            parse_command("set embedId").unwrap(),
            Command::Action(UserAction::SetField(FieldEdit::EmbedId(String::new())))
        );
    }

    #[test]
    fn test_parse_set_errors() {
        let err = parse_command("set colour red").unwrap_err();
        assert!(err.to_string().contains("unknown field 'colour'"));
        let err = parse_command("set navContentPaneEnabled sideways").unwrap_err();
        assert!(err.to_string().contains("invalid value"));
    }

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!(parse_command("  run ").unwrap(), Command::Action(UserAction::Run));
        assert_eq!(parse_command("save").unwrap(), Command::Action(UserAction::Save));
        assert_eq!(
            parse_command("toggle-headers").unwrap(),
            Command::Action(UserAction::ToggleVisualHeaders)
        );
        assert_eq!(parse_command("show").unwrap(), Command::Show);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert!(parse_command("").is_err());
        assert!(parse_command("launch").is_err());
    }
}
