mod report;

use chrono::NaiveDate;
use datepat::{
    CalendarDate, ChronoLocales, Context, LocaleDateDetector, Options, ParseOutcome, PatternCodec, PatternSpec,
    SERVER_SIDE_PATTERN,
};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOCALE: &str = "en_US";
const LOG_ENV: &str = "DATEPAT_LOG";

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Format(NaiveDate),
    Parse(String),
    Explain,
}

#[derive(Debug)]
struct CliConfig {
    command: Command,
    pattern: Option<String>,
    locale: String,
    reference: Option<NaiveDate>,
    color: bool,
}

/// Locale detector or compiled pattern, whichever the flags ask for.
enum Codec {
    Locale(LocaleDateDetector),
    Pattern(PatternCodec),
}

fn run(config: &CliConfig) -> Result<(), String> {
    let options = Options::default();
    let detector = LocaleDateDetector::for_locale(&ChronoLocales, &config.locale, &options);
    let codec = match &config.pattern {
        Some(raw) => {
            let spec = PatternSpec::compile_with(raw, options.default_century).map_err(|err| format!("error: {err}"))?;
            Codec::Pattern(PatternCodec::new(spec, detector.month_names().to_vec()))
        }
        None => Codec::Locale(detector),
    };

    match &config.command {
        Command::Format(date) => {
            let date = CalendarDate::from(*date);
            let text = match &codec {
                Codec::Locale(detector) => detector.format(&date),
                Codec::Pattern(codec) => codec.format(&date),
            };
            println!("{text}");
        }
        Command::Parse(text) => {
            let mut context = Context::default();
            if let Some(reference) = config.reference {
                context.reference_date = reference;
            }
            let outcome = match &codec {
                Codec::Locale(detector) => detector.parse(text),
                Codec::Pattern(codec) => codec.parse(text, &context),
            };
            report::print_outcome(text, &outcome, config.color);
            if outcome == ParseOutcome::Invalid {
                return Err(format!("error: could not parse '{text}'"));
            }
        }
        Command::Explain => {
            let sample = CalendarDate::from(config.reference.unwrap_or_else(|| Context::default().reference_date));
            match &codec {
                Codec::Locale(detector) => report::print_locale(detector, &sample, config.color),
                Codec::Pattern(codec) => report::print_pattern(codec, &sample, config.color),
            }
        }
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    parse_args_from(std::env::args().skip(1), io::stdout().is_terminal())
}

fn parse_args_from(args: impl IntoIterator<Item = String>, color: bool) -> Result<CliConfig, String> {
    let mut command: Option<String> = None;
    let mut operands: Vec<String> = Vec::new();
    let mut pattern: Option<String> = None;
    let mut locale = DEFAULT_LOCALE.to_string();
    let mut reference: Option<NaiveDate> = None;
    let mut color = color;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("datepat {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--pattern" | "-p" => {
                let value = args.next().ok_or_else(|| "error: --pattern expects a value".to_string())?;
                pattern = Some(value);
            }
            "--locale" | "-l" => {
                locale = args.next().ok_or_else(|| "error: --locale expects a value".to_string())?;
            }
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference = Some(parse_date(&value, "--reference")?);
            }
            "--" => {
                operands.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--pattern=") => pattern = Some(arg.trim_start_matches("--pattern=").to_string()),
            _ if arg.starts_with("--locale=") => locale = arg.trim_start_matches("--locale=").to_string(),
            _ if arg.starts_with("--reference=") => {
                reference = Some(parse_date(arg.trim_start_matches("--reference="), "--reference")?);
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ if command.is_none() => command = Some(arg),
            _ => operands.push(arg),
        }
    }

    if pattern.as_deref() == Some(SERVER_SIDE_PATTERN) {
        return Err(format!("error: '{SERVER_SIDE_PATTERN}' needs a remote authority and cannot be used here"));
    }

    let operand = operands.join(" ");
    let command = match command.as_deref() {
        Some("format") if operand.trim().is_empty() => return Err("error: format expects a date".to_string()),
        Some("format") => Command::Format(parse_date(operand.trim(), "date")?),
        Some("parse") => Command::Parse(operand),
        Some("explain") if operand.is_empty() => Command::Explain,
        Some("explain") => return Err(format!("error: explain takes no input, got '{operand}'")),
        Some(other) => return Err(format!("error: unknown command '{other}'\n\n{}", help_text())),
        None => return Err(format!("error: no command given\n\n{}", help_text())),
    };

    Ok(CliConfig { command, pattern, locale, reference, color })
}

fn parse_date(value: &str, what: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| format!("error: invalid {what} '{value}' (expected YYYY-MM-DD)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "datepat {version}

Format and parse dates through display patterns or a locale's own layout.

Usage:
  datepat [OPTIONS] format <YYYY-MM-DD>
  datepat [OPTIONS] parse [--] <text...>
  datepat [OPTIONS] explain

Options:
  -p, --pattern <pattern>    Display pattern, e.g. \"-0d0M0y\" or \" _dmM_y\".
                             Without one the locale's layout is used.
  -l, --locale <tag>         Locale for layout and month names. Default: {default_locale}
  --reference <YYYY-MM-DD>   Date filling fields partial input leaves out.
                             Default: today
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                Log filter, e.g. debug. Default: warn

Exit codes:
  0  Success.
  1  Malformed pattern or text that does not fit it.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        default_locale = DEFAULT_LOCALE,
        log_env = LOG_ENV,
    )
}
