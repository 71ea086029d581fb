//! Command-line arguments.

use clap::Parser;
use std::path::{Path, PathBuf};

use plistconv_core::{ConversionDefaults, ConvertOptions, Format};

#[derive(Debug, Parser)]
#[command(
    name = "plistconv",
    version,
    about = "Convert property lists between binary, XML, JSON and OpenStep"
)]
pub struct Cli {
    /// File to convert.
    #[arg(required_unless_present = "list_formats")]
    pub input: Option<PathBuf>,

    /// Destination file. Defaults to INPUT with the target format's extension.
    pub output: Option<PathBuf>,

    /// Target format: Binary, XML, JSON or OpenStep.
    #[arg(short, long, value_parser = parse_format)]
    pub format: Option<Format>,

    /// Omit optional whitespace (JSON and OpenStep).
    #[arg(long)]
    pub compact: bool,

    /// Sort dictionary keys.
    #[arg(long)]
    pub sort: bool,

    /// Enable engine debug tracing.
    #[arg(long)]
    pub debug: bool,

    /// Configuration file.
    #[arg(long, env = "PLISTCONV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,

    /// Print the supported format names and exit.
    #[arg(long, exclusive = true)]
    pub list_formats: bool,
}

fn parse_format(name: &str) -> Result<Format, String> {
    Format::from_description(name).ok_or_else(|| {
        let names: Vec<_> = Format::all().iter().map(|f| f.describe()).collect();
        format!("expected one of {}", names.join(", "))
    })
}

impl Cli {
    /// Explicit `--format`, else the output extension, else the configured default.
    pub fn resolve_format(&self, defaults: &ConversionDefaults) -> Format {
        self.format
            .or_else(|| self.output.as_deref().and_then(Format::from_extension))
            .unwrap_or(defaults.format)
    }

    /// Command-line flags on top of the configured ones.
    pub fn options(&self, defaults: &ConversionDefaults) -> ConvertOptions {
        defaults.options() | ConvertOptions::from_flags(self.debug, self.compact, self.sort)
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "trace"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Output path used when none was given: the input with `format`'s extension.
pub fn derive_output(input: &Path, format: Format) -> PathBuf {
    input.with_extension(format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("plistconv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_format_by_display_name() {
        let cli = parse(&["in.plist", "out", "--format", "OpenStep"]);
        assert_eq!(cli.format, Some(Format::OpenStep));
    }

    #[test]
    fn test_format_name_is_case_sensitive() {
        let result = Cli::try_parse_from(["plistconv", "in", "out", "-f", "json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_input_required_without_list_formats() {
        assert!(Cli::try_parse_from(["plistconv"]).is_err());
        assert!(parse(&["--list-formats"]).list_formats);
    }

    #[test]
    fn test_list_formats_is_exclusive() {
        assert!(Cli::try_parse_from(["plistconv", "in", "--list-formats"]).is_err());
    }

    #[test]
    fn test_resolve_format_precedence() {
        let defaults = ConversionDefaults {
            format: Format::Binary,
            ..Default::default()
        };

        let cli = parse(&["in.plist", "out.json", "-f", "XML"]);
        assert_eq!(cli.resolve_format(&defaults), Format::Xml);

        let cli = parse(&["in.plist", "out.json"]);
        assert_eq!(cli.resolve_format(&defaults), Format::Json);

        let cli = parse(&["in.plist", "out.plist"]);
        assert_eq!(cli.resolve_format(&defaults), Format::Binary);

        let cli = parse(&["in.plist"]);
        assert_eq!(cli.resolve_format(&defaults), Format::Binary);
    }

    #[test]
    fn test_flags_union_with_defaults() {
        let defaults = ConversionDefaults {
            sort: true,
            ..Default::default()
        };
        let cli = parse(&["in", "out", "--compact"]);
        let options = cli.options(&defaults);
        assert!(options.contains(ConvertOptions::SORT));
        assert!(options.contains(ConvertOptions::COMPACT));
        assert!(!options.contains(ConvertOptions::DEBUG));
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(parse(&["in"]).log_filter(), "info");
        assert_eq!(parse(&["in", "-v"]).log_filter(), "debug");
        assert_eq!(parse(&["in", "-v", "--debug"]).log_filter(), "trace");
    }

    #[test]
    fn test_derive_output() {
        assert_eq!(
            derive_output(Path::new("dir/Info.plist"), Format::Json),
            PathBuf::from("dir/Info.json")
        );
    }
}
