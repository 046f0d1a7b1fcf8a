// digitmask-cli: shared utilities for CLI tools.

use std::process;

use digitmask_core::format::Format;
use digitmask_core::preset::Preset;
use digitmask_engine::accept::InputPolicy;
use digitmask_engine::keys::EditKey;

/// Environment variable holding a `#` pattern.
pub const ENV_FORMAT: &str = "DIGITMASK_FORMAT";

/// Environment variable holding a preset code.
pub const ENV_PRESET: &str = "DIGITMASK_PRESET";

/// Environment variable holding the input policy (`strict` or `strip`).
pub const ENV_POLICY: &str = "DIGITMASK_POLICY";

/// Environment variable holding the log level.
pub const ENV_LOG: &str = "DIGITMASK_LOG";

/// Preset used when nothing else selects a format.
pub const DEFAULT_PRESET: Preset = Preset::Russia;

/// Placeholder drawn for empty slots unless `--placeholder` is given.
pub const DEFAULT_PLACEHOLDER: char = '_';

/// Options shared by every tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonArgs {
    pub format: Option<String>,
    pub preset: Option<String>,
    pub strip_non_digits: bool,
    pub placeholder: char,
    pub verbose: u8,
    /// Arguments not consumed by the common parser.
    pub rest: Vec<String>,
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            format: None,
            preset: None,
            strip_non_digits: false,
            placeholder: DEFAULT_PLACEHOLDER,
            verbose: 0,
            rest: Vec::new(),
        }
    }
}

/// Parse the options every tool understands:
///
/// - `-f, --format PATTERN` (also `--format=PATTERN`)
/// - `-p, --preset CODE` (also `--preset=CODE`)
/// - `--strip-non-digits`
/// - `--placeholder C`
/// - `-v, --verbose` (repeatable)
///
/// Everything else lands in `rest`, in order.
pub fn parse_common_args(args: &[String]) -> Result<CommonArgs, String> {
    let mut parsed = CommonArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--format=") {
            parsed.format = Some(val.to_string());
        } else if let Some(val) = arg.strip_prefix("--preset=") {
            parsed.preset = Some(val.to_string());
        } else {
            match arg.as_str() {
                "-f" | "--format" => parsed.format = Some(take_value(arg, iter.next())?),
                "-p" | "--preset" => parsed.preset = Some(take_value(arg, iter.next())?),
                "--strip-non-digits" => parsed.strip_non_digits = true,
                "--placeholder" => {
                    let val = take_value(arg, iter.next())?;
                    let mut chars = val.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => parsed.placeholder = c,
                        _ => return Err(format!("--placeholder expects one character, got {val:?}")),
                    }
                }
                "-v" | "--verbose" => parsed.verbose = parsed.verbose.saturating_add(1),
                "-vv" => parsed.verbose = parsed.verbose.saturating_add(2),
                _ => parsed.rest.push(arg.clone()),
            }
        }
    }

    Ok(parsed)
}

fn take_value(flag: &str, value: Option<&String>) -> Result<String, String> {
    value
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

/// Pick the format for this run.
///
/// Resolution order:
/// 1. `--format PATTERN`
/// 2. `--preset CODE`
/// 3. `DIGITMASK_FORMAT`
/// 4. `DIGITMASK_PRESET`
/// 5. the `ru` preset
pub fn resolve_format(args: &CommonArgs) -> Result<Format, String> {
    resolve_format_with(args, |key| std::env::var(key).ok())
}

/// [`resolve_format`] with an injectable environment lookup.
pub fn resolve_format_with(
    args: &CommonArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Format, String> {
    if let Some(pattern) = &args.format {
        return Format::parse(pattern).map_err(|e| format!("invalid --format {pattern:?}: {e}"));
    }
    if let Some(code) = &args.preset {
        return code
            .parse::<Preset>()
            .map(Preset::format)
            .map_err(|e| e.to_string());
    }
    if let Some(pattern) = env(ENV_FORMAT) {
        return Format::parse(&pattern).map_err(|e| format!("invalid {ENV_FORMAT}: {e}"));
    }
    if let Some(code) = env(ENV_PRESET) {
        return code
            .parse::<Preset>()
            .map(Preset::format)
            .map_err(|e| format!("invalid {ENV_PRESET}: {e}"));
    }
    Ok(DEFAULT_PRESET.format())
}

/// Pick the input policy: `--strip-non-digits` wins, then `DIGITMASK_POLICY`,
/// then strict.
pub fn resolve_policy(args: &CommonArgs) -> Result<InputPolicy, String> {
    resolve_policy_with(args, |key| std::env::var(key).ok())
}

pub fn resolve_policy_with(
    args: &CommonArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<InputPolicy, String> {
    if args.strip_non_digits {
        return Ok(InputPolicy::StripNonDigits);
    }
    match env(ENV_POLICY) {
        Some(name) => name
            .parse()
            .map_err(|e| format!("invalid {ENV_POLICY}: {e}")),
        None => Ok(InputPolicy::default()),
    }
}

/// Map `-v` count (or `DIGITMASK_LOG`) to a level. Default is `warn`.
pub fn log_level(verbose: u8, env_level: Option<&str>) -> tracing::Level {
    match verbose {
        0 => env_level
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(tracing::Level::WARN),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Install a stderr log subscriber. Safe to call once per process; later calls
/// are ignored.
pub fn init_logging(verbose: u8) {
    let env_level = std::env::var(ENV_LOG).ok();
    let level = log_level(verbose, env_level.as_deref());
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Parse one line of an edit script into keys.
///
/// - `<bs>` / `backspace` -> Backspace
/// - `<clear>` / `clear` -> Clear
/// - `paste:TEXT` -> Paste(TEXT)
/// - anything else -> one `Char` key per character
pub fn parse_keys(line: &str) -> Vec<EditKey> {
    if let Some(text) = line.strip_prefix("paste:") {
        return vec![EditKey::Paste(text.to_string())];
    }
    match line.trim() {
        "<bs>" | "backspace" => vec![EditKey::Backspace],
        "<clear>" | "clear" => vec![EditKey::Clear],
        other => other.chars().map(EditKey::Char).collect(),
    }
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Help text for the common options, shared by every tool.
pub const COMMON_OPTIONS_HELP: &str = "\
  -f, --format PATTERN    Format pattern, '#' marks a digit slot (e.g. \"+7 (###)###-##-##\")
  -p, --preset CODE       Built-in format: ru, us, us-ext, fr (default: ru)
  --strip-non-digits      Drop non-digits from input instead of rejecting it
  --placeholder C         Character drawn for empty slots (default: _)
  -v, --verbose           More log output on stderr (repeat for trace)
  -h, --help              Print this help

Environment:
  DIGITMASK_FORMAT, DIGITMASK_PRESET, DIGITMASK_POLICY (strict|strip),
  DIGITMASK_LOG (error|warn|info|debug|trace)";

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn parse_flags_and_rest() {
        let parsed = parse_common_args(&args(&[
            "-p",
            "fr",
            "--placeholder",
            "*",
            "-v",
            "123",
            "--strip-non-digits",
        ]))
        .unwrap();
        assert_eq!(parsed.preset.as_deref(), Some("fr"));
        assert_eq!(parsed.placeholder, '*');
        assert_eq!(parsed.verbose, 1);
        assert!(parsed.strip_non_digits);
        assert_eq!(parsed.rest, vec!["123".to_string()]);
    }

    #[test]
    fn parse_equals_form() {
        let parsed = parse_common_args(&args(&["--format=(###)"])).unwrap();
        assert_eq!(parsed.format.as_deref(), Some("(###)"));
    }

    #[test]
    fn missing_value_is_error() {
        assert!(parse_common_args(&args(&["--format"])).is_err());
        assert!(parse_common_args(&args(&["--placeholder", "ab"])).is_err());
    }

    #[test]
    fn format_resolution_order() {
        let env = |key: &str| match key {
            ENV_FORMAT => Some("##".to_string()),
            ENV_PRESET => Some("fr".to_string()),
            _ => None,
        };

        let explicit = CommonArgs {
            format: Some("#".into()),
            preset: Some("us".into()),
            ..CommonArgs::default()
        };
        assert_eq!(resolve_format_with(&explicit, env).unwrap().capacity(), 1);

        let preset = CommonArgs {
            preset: Some("us".into()),
            ..CommonArgs::default()
        };
        assert_eq!(
            resolve_format_with(&preset, env).unwrap(),
            Preset::UnitedStates.format()
        );

        let nothing = CommonArgs::default();
        assert_eq!(resolve_format_with(&nothing, env).unwrap().capacity(), 2);

        let env_preset_only = |key: &str| (key == ENV_PRESET).then(|| "fr".to_string());
        assert_eq!(
            resolve_format_with(&nothing, env_preset_only).unwrap(),
            Preset::France.format()
        );

        assert_eq!(
            resolve_format_with(&nothing, no_env).unwrap(),
            Preset::Russia.format()
        );
    }

    #[test]
    fn bad_format_reports_error() {
        let bad = CommonArgs {
            format: Some("+7 ()".into()),
            ..CommonArgs::default()
        };
        assert!(resolve_format_with(&bad, no_env).is_err());

        let bad_preset = CommonArgs {
            preset: Some("xx".into()),
            ..CommonArgs::default()
        };
        let err = resolve_format_with(&bad_preset, no_env).unwrap_err();
        assert!(err.contains("unknown preset"));
    }

    #[test]
    fn policy_resolution() {
        let strip = CommonArgs {
            strip_non_digits: true,
            ..CommonArgs::default()
        };
        assert_eq!(
            resolve_policy_with(&strip, no_env),
            Ok(InputPolicy::StripNonDigits)
        );

        let plain = CommonArgs::default();
        assert_eq!(resolve_policy_with(&plain, no_env), Ok(InputPolicy::Strict));
        let env = |key: &str| (key == ENV_POLICY).then(|| "strip".to_string());
        assert_eq!(
            resolve_policy_with(&plain, env),
            Ok(InputPolicy::StripNonDigits)
        );
        let bad = |key: &str| (key == ENV_POLICY).then(|| "loose".to_string());
        assert!(resolve_policy_with(&plain, bad).is_err());
    }

    #[test]
    fn log_levels() {
        assert_eq!(log_level(0, None), tracing::Level::WARN);
        assert_eq!(log_level(0, Some("debug")), tracing::Level::DEBUG);
        assert_eq!(log_level(0, Some("nonsense")), tracing::Level::WARN);
        assert_eq!(log_level(1, Some("error")), tracing::Level::DEBUG);
        assert_eq!(log_level(3, None), tracing::Level::TRACE);
    }

    #[test]
    fn edit_script_keys() {
        assert_eq!(parse_keys("<bs>"), vec![EditKey::Backspace]);
        assert_eq!(parse_keys("clear"), vec![EditKey::Clear]);
        assert_eq!(
            parse_keys("paste:(212) 555"),
            vec![EditKey::Paste("(212) 555".to_string())]
        );
        assert_eq!(
            parse_keys("9a"),
            vec![EditKey::Char('9'), EditKey::Char('a')]
        );
        assert!(parse_keys("").is_empty());
    }
}
