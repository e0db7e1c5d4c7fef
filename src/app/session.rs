//! Line-driven interactive session: each line is one budget interaction,
//! answered with a fresh render of the comparison.

use crate::app::render::{render, OutputFormat};
use crate::core::budget::BudgetInput;
use crate::core::controller::ComparisonController;
use crate::domain::model::Budget;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{CompareError, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "Commands: + / up / right (step up), - / down / left (step down), \
home (minimum), end (maximum), <amount> (set budget), reload, help, quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Budget(BudgetInput),
    Reload,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let input = line.trim();
    let command = match input.to_ascii_lowercase().as_str() {
        "" | "show" => Command::Show,
        "+" | "up" | "right" => Command::Budget(BudgetInput::StepUp),
        "-" | "down" | "left" => Command::Budget(BudgetInput::StepDown),
        "home" => Command::Budget(BudgetInput::JumpToMin),
        "end" => Command::Budget(BudgetInput::JumpToMax),
        "reload" | "r" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Budget(BudgetInput::Set(input.parse::<Budget>()?)),
    };
    Ok(command)
}

/// Runs until `quit` or end of input, then closes the controller's session.
pub async fn run_session<S, R, W>(
    controller: &mut ComparisonController<S>,
    input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<()>
where
    S: CatalogSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    write_view(controller, output, format)?;
    writeln!(output, "{}", HELP)?;

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(output, "{}", HELP)?,
            Ok(Command::Show) => write_view(controller, output, format)?,
            Ok(Command::Reload) => {
                controller.reload().await;
                write_view(controller, output, format)?;
            }
            Ok(Command::Budget(change)) => {
                let before = controller.budget();
                let after = controller.apply(change);
                tracing::debug!("Budget {} -> {}", before, after);
                write_view(controller, output, format)?;
            }
            Err(e @ CompareError::InvalidArgument { .. }) => {
                tracing::warn!("Rejected input '{}': {}", line.trim(), e);
                writeln!(output, "⚠️  {}", e.user_friendly_message())?;
            }
            Err(e) => return Err(e),
        }
        output.flush()?;
    }

    controller.close();
    Ok(())
}

fn write_view<S: CatalogSource, W: Write>(
    controller: &ComparisonController<S>,
    output: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let rendered = render(&controller.view(), controller.range(), format)?;
    output.write_all(rendered.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyboard_style_commands() {
        assert_eq!(parse_command("+").unwrap(), Command::Budget(BudgetInput::StepUp));
        assert_eq!(parse_command(" Right ").unwrap(), Command::Budget(BudgetInput::StepUp));
        assert_eq!(parse_command("-").unwrap(), Command::Budget(BudgetInput::StepDown));
        assert_eq!(parse_command("down").unwrap(), Command::Budget(BudgetInput::StepDown));
        assert_eq!(parse_command("HOME").unwrap(), Command::Budget(BudgetInput::JumpToMin));
        assert_eq!(parse_command("end").unwrap(), Command::Budget(BudgetInput::JumpToMax));
        assert_eq!(parse_command("").unwrap(), Command::Show);
        assert_eq!(parse_command("reload").unwrap(), Command::Reload);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!(
            parse_command("$40").unwrap(),
            Command::Budget(BudgetInput::Set(Budget::new(40)))
        );
        assert!(matches!(
            parse_command("-40"),
            Err(CompareError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_command("lots"),
            Err(CompareError::InvalidArgument { .. })
        ));
    }
}
