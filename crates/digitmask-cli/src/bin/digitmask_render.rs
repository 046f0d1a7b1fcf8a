// digitmask-render: Render raw digit values through a format.
//
// Reads raw values from the arguments, or from stdin (one per line), and
// prints the formatted display for each:
//   R: 9991    +7 (999)1__-__-__    cursor=6
//   E: 99a     non-digit character 'a' at position 2
//
// Usage:
//   digitmask-render [-p CODE | -f PATTERN] [OPTIONS] [VALUE...]

use std::io::{self, BufRead, Write};

use digitmask_core::format::Format;
use digitmask_core::value::RawValue;
use digitmask_engine::render::derive_render_plan;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if digitmask_cli::wants_help(&args) {
        println!("digitmask-render: Render raw digit values through a format.");
        println!();
        println!("Usage: digitmask-render [OPTIONS] [VALUE...]");
        println!();
        println!("If VALUE arguments are given, renders each one.");
        println!("Otherwise reads values from stdin (one per line). Prints:");
        println!("  R: value    display    cursor=N|none");
        println!("  E: value    reason the value cannot be shown");
        println!();
        println!("Options:");
        println!("{}", digitmask_cli::COMMON_OPTIONS_HELP);
        return;
    }

    let opts = digitmask_cli::parse_common_args(&args).unwrap_or_else(|e| digitmask_cli::fatal(&e));
    digitmask_cli::init_logging(opts.verbose);
    let format = digitmask_cli::resolve_format(&opts).unwrap_or_else(|e| digitmask_cli::fatal(&e));
    tracing::info!(format = %format, capacity = format.capacity(), "rendering");

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let render_one = |raw: &str, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        let _ = writeln!(out, "{}", render_line(&format, raw, opts.placeholder));
    };

    if opts.rest.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            render_one(line.trim(), &mut out);
        }
    } else {
        for raw in &opts.rest {
            render_one(raw, &mut out);
        }
    }
}

fn render_line(format: &Format, raw: &str, placeholder: char) -> String {
    match RawValue::new(raw, format) {
        Ok(value) => {
            let plan = derive_render_plan(format, &value);
            let cursor = plan
                .cursor_slot()
                .map_or_else(|| "none".to_string(), |i| i.to_string());
            format!("R: {raw}\t{}\tcursor={cursor}", plan.to_text(placeholder))
        }
        Err(e) => format!("E: {raw}\t{e}"),
    }
}
