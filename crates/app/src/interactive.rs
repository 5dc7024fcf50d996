use std::str::FromStr;

use algo_visualiser_core::{SpeedPreset, VisualiserError};

pub const HELP: &str = "commands: n next | b back | p play | s pause | g <i> seek | r reset \
                        | x <speed> speed | ? status | q quit";

/// One transport command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Next,
    Back,
    Play,
    Pause,
    Seek(isize),
    Reset,
    Speed(SpeedPreset),
    Status,
    Quit,
}

impl FromStr for Control {
    type Err = VisualiserError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();

        let control = match (command, argument) {
            ("n", None) | ("next", None) => Control::Next,
            ("b", None) | ("back", None) => Control::Back,
            ("p", None) | ("play", None) => Control::Play,
            ("s", None) | ("pause", None) => Control::Pause,
            ("r", None) | ("reset", None) => Control::Reset,
            ("?", None) | ("status", None) => Control::Status,
            ("q", None) | ("quit", None) => Control::Quit,
            ("g", Some(index)) | ("seek", Some(index)) => {
                let index = index
                    .parse()
                    .map_err(|_| VisualiserError::msg(format!("`{index}` is not a frame index")))?;
                Control::Seek(index)
            }
            ("x", Some(speed)) | ("speed", Some(speed)) => Control::Speed(speed.parse()?),
            _ => return Err(VisualiserError::msg(format!("unknown command `{}`", line.trim()))),
        };
        Ok(control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!("n".parse::<Control>().unwrap(), Control::Next);
        assert_eq!(" pause ".parse::<Control>().unwrap(), Control::Pause);
        assert_eq!("g -1".parse::<Control>().unwrap(), Control::Seek(-1));
        assert_eq!(
            "speed 2x".parse::<Control>().unwrap(),
            Control::Speed(SpeedPreset::Double)
        );
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!("g".parse::<Control>().is_err());
        assert!("g two".parse::<Control>().is_err());
        assert!("x 9x".parse::<Control>().is_err());
        assert!("jump".parse::<Control>().is_err());
        assert!("".parse::<Control>().is_err());
    }
}
