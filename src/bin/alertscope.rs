use alertscope::config::AnalysisConfig;
use alertscope::report::{self, Report};
use clap::Parser;
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufReader};

#[derive(Parser, Debug)]
#[command(name = "alertscope", version, about = "Alert-noise diagnosis for monitoring CSV exports")]
struct Cli {
    /// Input CSV file (`-` for stdin)
    #[arg(required = false)]
    input: Option<String>,

    /// Field delimiter of the export
    #[arg(long = "delimiter", default_value_t = ',')]
    delimiter: char,

    /// How many top patterns receive tuning recommendations
    #[arg(long = "top")]
    top: Option<usize>,

    /// Output format: json | text
    #[arg(long = "format", default_value = "json")]
    format: String,

    /// Analysis configuration file (JSON; partial documents override defaults)
    #[arg(long = "config")]
    config: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(k) = cli.top {
        config.top_k = k;
    }

    let delimiter = u8::try_from(cli.delimiter)
        .map_err(|_| anyhow::anyhow!("delimiter must be a single ASCII character"))?;

    let table = match cli.input.as_deref() {
        None | Some("-") => alertscope::table::read_table(io::stdin().lock(), delimiter)?,
        Some(path) => {
            let f = File::open(path)?;
            alertscope::table::read_table(BufReader::new(f), delimiter)?
        }
    };

    let out = report::analyze(&table, &config)?;
    if cli.format == "text" {
        print_report(&out);
    } else {
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

const PATTERN_DISPLAY_LIMIT: usize = 10;

fn print_report(report: &Report) {
    let roles = &report.roles;
    println!(
        "Columns -> description: {} | resource: {} | timestamp: {}",
        role_label(&roles.description),
        role_label(&roles.resource),
        role_label(&roles.timestamp),
    );
    if let Some(score) = roles.description_score {
        println!("Description column chosen by content scoring (score {score:.2})");
    }
    println!(
        "Total alerts: {}  distinct patterns: {}  unusable descriptions: {}",
        report.summary.total_rows, report.summary.distinct_patterns, report.summary.unusable_descriptions,
    );

    println!("\n[NOISE PATTERNS - TOP {PATTERN_DISPLAY_LIMIT}]");
    println!("{:<8} {:<8} {}", "Count", "Share", "Pattern");
    for p in report.patterns.iter().take(PATTERN_DISPLAY_LIMIT) {
        println!("{:<8} {:<7.1}% {}", p.count, p.share, p.pattern);
    }

    if let Some(resources) = &report.resources {
        println!("\n[NOISY ELEMENTS]");
        println!("{:<8} {}", "Count", "Element");
        for r in resources {
            println!("{:<8} {}", r.count, r.name);
        }
    }

    println!("\n[TIMELINE]");
    match &report.temporal {
        Some(t) => {
            println!("Range: {} to {} ({} days)", t.start, t.end, t.span_days);
            println!("Parsed dates: {}  unparsed: {}", t.parsed, t.unparsed);
            let months = t
                .by_month
                .iter()
                .map(|m| format!("{:02} -> {}", m.month, m.count))
                .join(", ");
            println!("Volume by month: {months}");
        }
        None => println!("No timeline available (timestamp column missing or no parsable dates)."),
    }

    println!("\n[TUNING PLAN]");
    for rec in &report.recommendations {
        println!("\nTarget pattern: {}", rec.pattern);
        println!("  Impact: {} alerts ({:.1}% of total)", rec.count, rec.share);
        println!("  Rule: {}", rec.rule);
        println!("  Action: {}", rec.action);
    }
}

fn role_label(role: &Option<String>) -> &str {
    role.as_deref().unwrap_or("NOT DETECTED")
}
