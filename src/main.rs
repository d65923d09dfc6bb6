//! Collation-aware search CLI
//!
//! Finds every occurrence of a pattern in a UTF-8 text file, where equality
//! is decided by a collator at a chosen strength rather than by bytes.
//! `collsearch --strength=primary resume notes.txt` finds `Résumé`,
//! `RESUME` and `resume` alike.
//!
//! # Output Format
//!
//! Matches are written to stdout as: `<start>-<limit> <matched text>`, with
//! UTF-8 byte offsets into the file.
//!
//! Statistics are written to stderr upon completion:
//! `matches=N bytes=N elapsed_ms=N`
//!
//! Diagnostics go to stderr at the level named by `COLLSEARCH_LOG`
//! (`trace`, `debug`, `info`, `warn`, `error`; default `warn`).
//!
//! # Exit Codes
//!
//! - `0`: Success (regardless of match count)
//! - `1`: The input file could not be read
//! - `2`: Invalid arguments or configuration error

use collsearch::{
    german_collator, AlternateHandling, ElementComparison, Match, RuleCollator, SearchOptions,
    StringSearch, Strength, WordBreaks,
};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::Level;

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS] <pattern> <path>

OPTIONS:
    --strength=<S>          primary, secondary, tertiary, quaternary or identical (default: tertiary)
    --alternate=<A>         shifted or non-ignorable (default: non-ignorable)
    --comparison=<M>        standard, pattern-wildcard or any-wildcard (default: standard)
    --overlap               Report matches that overlap the previous one
    --canonical             Compare canonical forms at identical strength
    --backward              Report matches from the end of the text
    --words                 Only report matches on word boundaries
    --rules=<RULES>         Tailoring rules applied on top of the root order
    --locale=de             Use the built-in German tailoring
    --config=<FILE>         Read search options from a JSON file
    --help, -h              Show this help message",
        exe.to_string_lossy()
    );
}

/// Parses a log level name (case-insensitive).
fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn init_logging() {
    let level = env::var("COLLSEARCH_LOG")
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(msg: String) -> ! {
    eprintln!("{msg}");
    std::process::exit(2);
}

fn main() -> ExitCode {
    init_logging();

    let mut args = env::args_os();
    let exe = args.next().unwrap_or_else(|| "collsearch".into());
    let mut positional: Vec<String> = Vec::new();
    let mut strength: Option<Strength> = None;
    let mut alternate: Option<AlternateHandling> = None;
    let mut comparison: Option<ElementComparison> = None;
    let mut overlap = false;
    let mut canonical = false;
    let mut backward = false;
    let mut words = false;
    let mut rules: Option<String> = None;
    let mut german = false;
    let mut config: Option<PathBuf> = None;

    for arg in args {
        let Some(flag) = arg.to_str() else {
            fail(format!("argument is not valid UTF-8: {}", arg.to_string_lossy()));
        };
        if let Some(value) = flag.strip_prefix("--strength=") {
            strength = Some(
                Strength::parse(value)
                    .unwrap_or_else(|| fail(format!("invalid --strength value: {value}"))),
            );
            continue;
        }
        if let Some(value) = flag.strip_prefix("--alternate=") {
            alternate = Some(match value {
                "shifted" => AlternateHandling::Shifted,
                "non-ignorable" => AlternateHandling::NonIgnorable,
                _ => fail(format!("invalid --alternate value: {value}")),
            });
            continue;
        }
        if let Some(value) = flag.strip_prefix("--comparison=") {
            comparison = Some(
                ElementComparison::parse(value)
                    .unwrap_or_else(|| fail(format!("invalid --comparison value: {value}"))),
            );
            continue;
        }
        if let Some(value) = flag.strip_prefix("--rules=") {
            rules = Some(value.to_string());
            continue;
        }
        if let Some(value) = flag.strip_prefix("--locale=") {
            match value {
                "de" => german = true,
                "root" => german = false,
                _ => fail(format!("unsupported --locale value: {value}")),
            }
            continue;
        }
        if let Some(value) = flag.strip_prefix("--config=") {
            config = Some(PathBuf::from(value));
            continue;
        }
        match flag {
            "--overlap" => overlap = true,
            "--canonical" => canonical = true,
            "--backward" => backward = true,
            "--words" => words = true,
            "--help" | "-h" => {
                print_usage(&exe);
                return ExitCode::SUCCESS;
            }
            _ if flag.starts_with("--") => {
                eprintln!("unknown flag: {flag}");
                print_usage(&exe);
                return ExitCode::from(2);
            }
            _ => positional.push(flag.to_string()),
        }
    }

    let [pattern, path] = <[String; 2]>::try_from(positional).unwrap_or_else(|_| {
        print_usage(&exe);
        std::process::exit(2);
    });

    let mut collator = match (&rules, german) {
        (Some(_), true) => fail("--rules and --locale are mutually exclusive".to_string()),
        (Some(rules), false) => RuleCollator::with_rules(rules)
            .unwrap_or_else(|err| fail(format!("invalid --rules: {err}"))),
        (None, true) => german_collator(),
        (None, false) => RuleCollator::root(),
    };
    if let Some(strength) = strength {
        collator.set_strength(strength);
    }
    if let Some(alternate) = alternate {
        collator.set_alternate_handling(alternate);
    }

    let mut options = match &config {
        Some(config) => {
            let raw = fs::read_to_string(config).unwrap_or_else(|err| {
                fail(format!("cannot read config {}: {err}", config.display()))
            });
            serde_json::from_str::<SearchOptions>(&raw).unwrap_or_else(|err| {
                fail(format!("invalid config {}: {err}", config.display()))
            })
        }
        None => SearchOptions::default(),
    };
    options.overlap |= overlap;
    options.canonical |= canonical;
    if let Some(comparison) = comparison {
        options.element_comparison = comparison;
    }

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("cannot read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let start = Instant::now();
    if text.is_empty() {
        eprintln!("matches=0 bytes=0 elapsed_ms=0");
        return ExitCode::SUCCESS;
    }

    let built = if words {
        StringSearch::with_break_oracle(&pattern, &text, collator, Box::new(WordBreaks::new()))
    } else {
        StringSearch::new(&pattern, &text, collator)
    };
    let mut search = built.unwrap_or_else(|err| fail(format!("cannot search: {err}")));
    search.set_options(options);

    let mut count = 0usize;
    let mut emit = |found: Match| {
        count += 1;
        println!("{}-{} {}", found.start, found.limit, &text[found.range()]);
    };
    if backward {
        let mut next = search.last();
        while let Some(found) = next {
            emit(found);
            next = search.previous();
        }
    } else {
        for found in search.matches() {
            emit(found);
        }
    }

    eprintln!(
        "matches={} bytes={} elapsed_ms={}",
        count,
        text.len(),
        start.elapsed().as_millis()
    );
    ExitCode::SUCCESS
}
