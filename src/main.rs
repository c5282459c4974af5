//! slug-cleanup: inspect slug variants and build redirect tables.
//!
//! Usage:
//!   slug-cleanup variants <slug> [--locale <code>]   # all path variants as JSON
//!   slug-cleanup compare <slug> [--locale <code>]    # strategy comparison
//!   slug-cleanup redirect <path>                     # redirect decision for a path
//!   slug-cleanup rules <file> [--locale <code>]...   # redirect table for a catalog
//!   slug-cleanup check <file> [--locale <code>]      # validate every slug in a catalog
//!
//! Without `--locale`, single-slug commands use SLUG_DEFAULT_LOCALE and
//! `rules` covers every enabled locale. See `Config::from_env` for the
//! remaining environment variables.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use slug_cleanup::{catalog, config::Config, Locale, LocaleRegistry, VariantValidator};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Variants { slug: String, locales: Vec<String> },
    Compare { slug: String, locales: Vec<String> },
    Redirect { path: String },
    Rules { file: String, locales: Vec<String> },
    Check { file: String, locales: Vec<String> },
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some(command) = args.first() else {
        bail!("missing command (expected variants, compare, redirect, rules or check)");
    };

    let mut positional = Vec::new();
    let mut locales = Vec::new();
    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        if arg == "--locale" || arg == "-l" {
            let code = rest.next().context("--locale needs a value")?;
            locales.push(code.clone());
        } else {
            positional.push(arg.clone());
        }
    }

    let single = |what: &str| -> Result<String> {
        match positional.as_slice() {
            [value] => Ok(value.clone()),
            [] => bail!("{} needs a {}", command, what),
            _ => bail!("{} takes exactly one {}", command, what),
        }
    };

    Ok(match command.as_str() {
        "variants" => Command::Variants {
            slug: single("slug")?,
            locales,
        },
        "compare" => Command::Compare {
            slug: single("slug")?,
            locales,
        },
        "redirect" => Command::Redirect {
            path: single("path")?,
        },
        "rules" => Command::Rules {
            file: single("file")?,
            locales,
        },
        "check" => Command::Check {
            file: single("file")?,
            locales,
        },
        other => bail!("unknown command '{}'", other),
    })
}

/// Validate requested locale codes, or fall back to `default`.
fn resolve_locales(codes: &[String], default: Vec<Locale>) -> Result<Vec<Locale>> {
    if codes.is_empty() {
        return Ok(default);
    }
    codes
        .iter()
        .map(|code| Locale::from_code(code).with_context(|| format!("bad --locale {}", code)))
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(config: &Config, command: Command) -> Result<()> {
    let evaluator = config.redirect_evaluator();
    let normalizer = evaluator.normalizer();
    let all_enabled: Vec<Locale> = LocaleRegistry::get()
        .list_enabled()
        .iter()
        .map(|locale| Locale::from_code_or_default(locale.code))
        .collect();

    match command {
        Command::Variants { slug, locales } => {
            for locale in resolve_locales(&locales, vec![config.default_locale])? {
                print_json(&normalizer.build_variant_set(&slug, locale.code()))?;
            }
        }
        Command::Compare { slug, locales } => {
            for locale in resolve_locales(&locales, vec![config.default_locale])? {
                print_json(&normalizer.compare_variants(&slug, locale.code()))?;
            }
        }
        Command::Redirect { path } => {
            print_json(&evaluator.evaluate(&path))?;
        }
        Command::Rules { file, locales } => {
            let slugs = catalog::load_slugs(&file)?;
            let codes: Vec<&str> = resolve_locales(&locales, all_enabled)?
                .iter()
                .map(|locale| locale.code())
                .collect();

            let rules = evaluator.redirect_rules(&slugs, &codes);
            info!("Generated {} redirect rules", rules.len());
            print_json(&rules)?;
        }
        Command::Check { file, locales } => {
            let slugs = catalog::load_slugs(&file)?;
            let locales = resolve_locales(&locales, vec![config.default_locale])?;

            let mut failures = 0;
            for slug in &slugs {
                for locale in &locales {
                    let set = normalizer.build_variant_set(slug, locale.code());
                    let report = VariantValidator::validate(
                        &set,
                        locale.code(),
                        normalizer.section(),
                        normalizer.policy().short_max_len,
                    );
                    for warning in &report.warnings {
                        warn!("{} ({}): {}", slug, locale, warning);
                    }
                    if report.has_errors() {
                        failures += 1;
                        for error in &report.errors {
                            println!("{} ({}): {}", slug, locale, error);
                        }
                    }
                }
            }

            if failures > 0 {
                bail!("{} variant sets failed validation", failures);
            }
            info!("✓ All {} slugs produce clean variants", slugs.len());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging; stdout is reserved for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slug_cleanup=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let config = Config::from_env()?;
    run(&config, command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_variants_with_locale() {
        let command = parse_args(&args(&["variants", "越南語", "--locale", "vi"])).unwrap();
        assert_eq!(
            command,
            Command::Variants {
                slug: "越南語".to_string(),
                locales: vec!["vi".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_rules_with_multiple_locales() {
        let command =
            parse_args(&args(&["rules", "-l", "en", "slugs.txt", "-l", "zh-Hant"])).unwrap();
        assert_eq!(
            command,
            Command::Rules {
                file: "slugs.txt".to_string(),
                locales: vec!["en".to_string(), "zh-Hant".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_redirect() {
        let command = parse_args(&args(&["redirect", "/en/blog/x"])).unwrap();
        assert_eq!(
            command,
            Command::Redirect {
                path: "/en/blog/x".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["explode"])).is_err());
        assert!(parse_args(&args(&["variants"])).is_err());
        assert!(parse_args(&args(&["variants", "a", "b"])).is_err());
        assert!(parse_args(&args(&["variants", "a", "--locale"])).is_err());
    }

    #[test]
    fn test_resolve_locales() {
        let default = vec![Locale::ENGLISH];
        assert_eq!(resolve_locales(&[], default.clone()).unwrap(), default);
        assert_eq!(
            resolve_locales(&args(&["zh-Hans"]), default.clone()).unwrap(),
            vec![Locale::SIMPLIFIED_CHINESE]
        );
        assert!(resolve_locales(&args(&["fr"]), default).is_err());
    }
}
