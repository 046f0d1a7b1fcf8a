// digitmask-presets: List the built-in formats.
//
// Output, one preset per line:
//   code    capacity    pattern    name
//
// Usage:
//   digitmask-presets [--sample]

use std::io::{self, Write};

use digitmask_core::preset::Preset;
use digitmask_core::value::RawValue;
use digitmask_engine::render::render_text;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if digitmask_cli::wants_help(&args) {
        println!("digitmask-presets: List the built-in formats.");
        println!();
        println!("Usage: digitmask-presets [--sample]");
        println!();
        println!("Options:");
        println!("  --sample                Also show each format filled with sample digits");
        println!("  -h, --help              Print this help");
        return;
    }

    let show_sample = args.iter().any(|a| a == "--sample");
    let verbose = args.iter().filter(|a| *a == "-v" || *a == "--verbose").count();
    digitmask_cli::init_logging(u8::try_from(verbose).unwrap_or(u8::MAX));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for preset in Preset::ALL {
        let format = preset.format();
        let _ = write!(
            out,
            "{}\t{}\t{}\t{}",
            preset.code(),
            format.capacity(),
            format,
            preset.name()
        );
        if show_sample {
            let digits: String = "0123456789"
                .chars()
                .cycle()
                .skip(1)
                .take(format.capacity())
                .collect();
            match RawValue::new(digits, &format) {
                Ok(value) => {
                    let _ = write!(out, "\t{}", render_text(&format, &value, '_'));
                }
                Err(e) => tracing::warn!(preset = %preset, error = %e, "sample value rejected"),
            }
        }
        let _ = writeln!(out);
    }
}
