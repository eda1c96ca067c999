use crate::error::{QtspError, QtspResult};

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Exit,
    Default,
    Weights(Vec<f64>),
}

/// Interprets one console line. Count checks are left to the driver.
pub fn parse_command(line: &str) -> QtspResult<ShellCommand> {
    match line.trim() {
        "exit" => Ok(ShellCommand::Exit),
        "default" => Ok(ShellCommand::Default),
        other => parse_weights(other).map(ShellCommand::Weights),
    }
}

/// Whitespace separated weights. Stops at the first token that is not a
/// finite number; nothing parsed so far is returned in that case.
pub fn parse_weights(line: &str) -> QtspResult<Vec<f64>> {
    line.split_whitespace()
        .enumerate()
        .map(|(i, token)| match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(QtspError::MalformedNumericInput {
                token: token.to_string(),
                position: i + 1,
            }),
        })
        .collect()
}
