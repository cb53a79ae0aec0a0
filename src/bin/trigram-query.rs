use anyhow::{Context, Result};
use clap::Parser;
use regex::RegexBuilder;
use regex_trigram::limits::{MAX_CLASS, MAX_EXACT, MAX_SET};
use regex_trigram::query::trigrams;
use regex_trigram::{Analyzer, Limits};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the trigram query for a regular expression", long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Case-insensitive pattern
    #[arg(short = 'i', long)]
    ignore_case: bool,

    #[arg(long, default_value_t = MAX_EXACT, help = "Largest exact set tracked before falling back to prefix/suffix")]
    max_exact: usize,

    #[arg(long, default_value_t = MAX_SET, help = "Largest prefix or suffix set kept")]
    max_set: usize,

    #[arg(long, default_value_t = MAX_CLASS, help = "Largest character class expanded into an exact set")]
    max_class: usize,

    /// The pattern to analyze
    pattern: String,

    /// Texts to check against the query and the pattern
    texts: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let pattern = if args.ignore_case {
        format!("(?i){}", args.pattern)
    } else {
        args.pattern.clone()
    };

    if args.verbose {
        eprintln!("pattern: {}", pattern);
    }

    let node = regex_trigram::parse(&pattern).context("failed to parse regexp")?;
    if args.verbose {
        eprintln!("tree: {:?}", node);
    }

    let analyzer = Analyzer::new(Limits {
        max_exact: args.max_exact,
        max_set: args.max_set,
        max_class: args.max_class,
    });
    if args.verbose {
        eprintln!("limits: {:?}", analyzer.limits());
    }
    let q = analyzer.query(&node).context("failed to analyze regexp")?;

    if args.verbose {
        eprintln!("query: {:?}", q);
    }
    println!("{}", q);

    if args.texts.is_empty() {
        return Ok(());
    }

    let re = RegexBuilder::new(&pattern)
        .build()
        .context("failed to compile regex")?;

    let mut unsound = 0;
    for text in &args.texts {
        let admitted = q.matches(&trigrams(text));
        let matched = re.is_match(text);
        let verdict = match (admitted, matched) {
            (true, true) => "match",
            (true, false) => "candidate",
            (false, false) => "skip",
            (false, true) => {
                unsound += 1;
                "UNSOUND"
            }
        };
        println!("{}\t{:?}", verdict, text);
    }

    if unsound > 0 {
        anyhow::bail!("query rejected {} matching text(s)", unsound);
    }
    Ok(())
}
