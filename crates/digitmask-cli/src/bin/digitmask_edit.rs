// digitmask-edit: Replay a keystroke script against a masked field.
//
// Reads keys from stdin, one line at a time, and prints the field after each
// key:
//   A: +7 (9__)___-__-__    [9]
//   R: non-digit 'x' at position 1    [9]
//
// Script lines:
//   <bs> | backspace     delete the last digit
//   <clear> | clear      delete every digit
//   paste:TEXT           paste TEXT after the current digits
//   anything else        typed one character at a time
//
// Usage:
//   digitmask-edit [-p CODE | -f PATTERN] [--initial DIGITS] [OPTIONS]

use std::io::{self, BufRead, Write};

use digitmask_engine::handle::MaskedInput;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if digitmask_cli::wants_help(&args) {
        println!("digitmask-edit: Replay a keystroke script against a masked field.");
        println!();
        println!("Usage: digitmask-edit [OPTIONS] [--initial DIGITS]");
        println!();
        println!("Reads keys from stdin (one script line at a time). Prints after each key:");
        println!("  A: display    [value]    (accepted)");
        println!("  R: reason     [value]    (rejected, value unchanged)");
        println!();
        println!("Script lines: <bs>, <clear>, paste:TEXT, or characters to type.");
        println!();
        println!("Options:");
        println!("  --initial DIGITS        Starting value (default: empty)");
        println!("{}", digitmask_cli::COMMON_OPTIONS_HELP);
        return;
    }

    let opts = digitmask_cli::parse_common_args(&args).unwrap_or_else(|e| digitmask_cli::fatal(&e));
    digitmask_cli::init_logging(opts.verbose);

    let mut initial = String::new();
    let mut rest = opts.rest.iter();
    while let Some(arg) = rest.next() {
        if arg == "--initial" {
            initial = rest
                .next()
                .cloned()
                .unwrap_or_else(|| digitmask_cli::fatal("--initial requires a value"));
        } else if let Some(val) = arg.strip_prefix("--initial=") {
            initial = val.to_string();
        } else {
            digitmask_cli::fatal(&format!("unexpected argument: {arg}"));
        }
    }

    let format = digitmask_cli::resolve_format(&opts).unwrap_or_else(|e| digitmask_cli::fatal(&e));
    let policy = digitmask_cli::resolve_policy(&opts).unwrap_or_else(|e| digitmask_cli::fatal(&e));
    let mut input = MaskedInput::with_value(format, &initial)
        .unwrap_or_else(|e| digitmask_cli::fatal(&format!("invalid --initial: {e}")))
        .with_policy(policy);
    input.set_focused(true);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let _ = writeln!(out, "   {}\t[{}]", input.text(opts.placeholder), input.value());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        for key in digitmask_cli::parse_keys(&line) {
            match input.press(&key) {
                Ok(_) => {
                    let _ = writeln!(out, "A: {}\t[{}]", input.text(opts.placeholder), input.value());
                }
                Err(reason) => {
                    let _ = writeln!(out, "R: {reason}\t[{}]", input.value());
                }
            }
        }
    }
}
