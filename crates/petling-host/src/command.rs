//! Player command parsing.
//!
//! One command per line. The first word picks the command (case does not
//! matter); the rest of the line is its argument.

/// A parsed player command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Hatch a new pet, optionally named.
    New(Option<String>),
    /// Feed, optionally with a custom amount.
    Feed(Option<f64>),
    /// Play with the pet.
    Play,
    /// Put the pet to sleep or wake it.
    Sleep,
    /// Clean the pet.
    Clean,
    /// Revive a dead pet.
    Revive,
    /// Tap for coins.
    Tap,
    /// Buy a catalog item by name.
    Buy(String),
    /// List the catalog.
    Shop,
    /// Show the pet.
    Status,
    /// Print the renderer view as JSON.
    View,
    /// Save now.
    Save,
    /// List commands.
    Help,
    /// Save and exit.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command `{0}` (type `help` for a list)")]
    Unknown(String),

    /// The feed amount is not a number.
    #[error("`{0}` is not an amount")]
    BadAmount(String),

    /// `buy` without an item name.
    #[error("buy what? (type `shop` to see the items)")]
    MissingItem,
}

/// One line per command, shown by `help`.
pub const HELP: &str = "\
new <name>      hatch a new pet
feed [amount]   feed your pet
play            play with your pet
sleep           put your pet to bed, or wake it up
clean           give your pet a bath
revive          bring your pet back to life
tap             earn a few coins (limited per day)
buy <item>      buy something from the shop
shop            list the shop
status          show your pet
view            show your pet as JSON
save            save now
quit            save and exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));
    let argument = (!rest.is_empty()).then(|| rest.to_owned());

    let command = match word.to_ascii_lowercase().as_str() {
        "new" | "hatch" => Command::New(argument),
        "feed" | "eat" => match argument {
            Some(text) => Command::Feed(Some(
                text.parse::<f64>()
                    .ok()
                    .filter(|amount| amount.is_finite())
                    .ok_or(CommandError::BadAmount(text))?,
            )),
            None => Command::Feed(None),
        },
        "play" => Command::Play,
        "sleep" | "wake" => Command::Sleep,
        "clean" | "bath" => Command::Clean,
        "revive" => Command::Revive,
        "tap" => Command::Tap,
        "buy" => Command::Buy(argument.ok_or(CommandError::MissingItem)?),
        "shop" => Command::Shop,
        "status" | "look" => Command::Status,
        "view" => Command::View,
        "save" => Command::Save,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_owned())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn words_and_arguments() {
        assert_eq!(parse("new Mochi"), Ok(Some(Command::New(Some("Mochi".to_owned())))));
        assert_eq!(parse("NEW"), Ok(Some(Command::New(None))));
        assert_eq!(parse("feed"), Ok(Some(Command::Feed(None))));
        assert_eq!(parse("feed 12.5"), Ok(Some(Command::Feed(Some(12.5)))));
        assert_eq!(
            parse("buy  golden egg "),
            Ok(Some(Command::Buy("golden egg".to_owned())))
        );
        assert_eq!(parse("Quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn bad_input_is_explained() {
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".to_owned())));
        assert_eq!(parse("feed lots"), Err(CommandError::BadAmount("lots".to_owned())));
        assert_eq!(parse("feed inf"), Err(CommandError::BadAmount("inf".to_owned())));
        assert_eq!(parse("buy"), Err(CommandError::MissingItem));
    }
}
