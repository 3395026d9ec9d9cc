mod debug_report;

use std::io::{self, IsTerminal, Read};
use textloc::{Localizer, Options};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TEXTLOC_LOG";

fn main() {
    init_tracing();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut session = match Localizer::with_defaults(&config.lang, config.script.as_deref()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    if let Some(locale) = &config.locale {
        session = session.with_locale(locale.clone());
    }

    let res = session.localize_verbose(&config.input, &config.lang, config.script.as_deref(), &config.options);
    if config.verbose {
        debug_report::print_run(&config.input, &res, config.color);
    } else {
        println!("{}", res.text);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    input: String,
    lang: String,
    script: Option<String>,
    locale: Option<String>,
    options: Options,
    verbose: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut lang = "zh".to_string();
    let mut script: Option<String> = None;
    let mut locale: Option<String> = None;
    let mut options = Options::default();
    let mut verbose = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            inline.clone().or_else(|| args.next()).ok_or_else(|| format!("error: {name} expects a value"))
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("textloc {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-v" | "--verbose" => verbose = true,
            "--proportional" => options.proportional_mixed_cjk = true,
            "--lang" | "-l" => lang = value("--lang")?,
            "--script" | "-s" => script = Some(value("--script")?),
            "--locale" => locale = Some(value("--locale")?),
            "--prev" => options.prev = Some(value("--prev")?),
            "--foll" => options.foll = Some(value("--foll")?),
            "--input" | "-i" => {
                let text = value("--input")?;
                set_input(&mut input, text)?;
            }
            "--" => {
                let rest = args.by_ref().collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args.by_ref()).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, lang, script, locale, options, verbose, color })
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "textloc {version}

Localize punctuation, spacing and directionality of a marked-up fragment.

Usage:
  textloc [OPTIONS] [--] <fragment...>
  textloc [OPTIONS] --input <fragment>

Options:
  -i, --input <text>         Fragment to localize. If omitted, reads remaining args
                             or stdin when no args are provided.
  -l, --lang <code>          Language of the fragment and session. Default: zh
  -s, --script <code>        Script code (Hans, Hant, Latn, Arab, ...).
                             Default: derived from the language.
  --locale <code>            Locale (FR or CH for French colon spacing).
  --prev <text>              Text assumed to precede the fragment.
  --foll <text>              Text assumed to follow the fragment.
  --proportional             Only convert CJK punctuation next to CJK text.
  -v, --verbose              Print a rule report instead of just the result.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                Log filter (tracing EnvFilter syntax), e.g. textloc=debug.

Exit codes:
  0  Success.
  1  Invalid label data.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
