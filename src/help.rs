//! Help screen and key catalog text

use crate::keyboard::{ORDINARY_KEYS, SPECIAL_KEYS};

/// Width of the `NAME:` column in the key catalog
const NAME_COLUMN: usize = 16;

/// Full help screen, ending with a newline
pub fn help_text() -> String {
    let banner = format!(
        "KeyboardPing Ver {} - Send echo requests to the keyboard.",
        env!("CARGO_PKG_VERSION")
    );

    let lines = vec![
        "",
        "======================================================",
        banner.as_str(),
        "",
        "This project is licensed under The MIT License.",
        "======================================================",
        "",
        "keyboard-ping [-c command] [-n count] [-h] [-i interval] [-k key] [-l] [-r]",
        "    -c command  The command which is executed after exceed counts.",
        "    -n count    Maximum counts of the sending failure. Ping until terminated if zero or lower is passed.",
        "                The default value is 4.",
        "                Type Control + C to terminate the program.",
        "    -h          Display this help.",
        "    -i interval Interval of pings in milliseconds. The default value is 1000.",
        "    -k key      The key what you want to send. The default value is {NUMLOCK}.",
        "    -l          List available keys.",
        "    -r          Use the sending success for counts instead of the sending failure.",
        "",
        "Examples",
        "    Example 1: Send an echo request with a 'A' key four times.",
        "    $ keyboard-ping -k 'A'",
        "",
        "    Example 2: Shutdown the computer after failed to send ten times. This is useful when the keyboard does not work.",
        "    $ keyboard-ping -c 'shutdown -h now' -n 10",
        "",
        "    Example 3: Keep pinging infinitely. You need to terminate the program by yourself.",
        "    $ keyboard-ping -n 0",
        "",
        "    Example 4: Type 'Hello' repeatedly.",
        "    $ keyboard-ping -k 'Hello'",
        "",
        "    Example 5: Type a 'A' key rapidly. Strongly recommend use this option with the '-n' option and the '-r' option.",
        "    $ keyboard-ping -i 10 -k 'A' -n 100 -r",
        "",
    ];

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Ordinary and special key listing printed by `-l`
pub fn catalog_text() -> String {
    let mut text = String::new();
    text.push_str("---Ordinary Keys---\n");
    text.push_str(ORDINARY_KEYS);
    text.push('\n');
    text.push_str("---Special Keys---\n");

    for info in SPECIAL_KEYS {
        let label = format!("{}:", info.name);
        text.push_str(&format!("{:<width$}{}\n", label, info.descriptor, width = NAME_COLUMN));
    }

    text
}
