use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wellscore::config::OutputFormat;
use wellscore::questionnaire::{load_answers_file, AnswerSet, RawAnswers};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_ANSWERS: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill in the questionnaire interactively (default if no subcommand)
    Assess,
    /// Score answers given on the command line or in a YAML file
    Score {
        /// Answer a question, e.g. --set age=45 --set smoker=Yes
        #[arg(long = "set", value_name = "ID=VALUE")]
        set: Vec<String>,

        /// YAML file mapping question ids to answers
        #[arg(long, value_name = "FILE")]
        answers: Option<PathBuf>,

        /// Output format (defaults to the config file's format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Show which rules contributed to each score
        #[arg(long)]
        breakdown: bool,

        /// Score even if some answers are missing or invalid
        #[arg(long)]
        partial: bool,
    },
    /// List the questions, their ids and accepted answers
    Questions,
    /// Create or overwrite the config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "wellscore")]
#[command(about = "Ten-question health check with risk and wellness scores", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/wellscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    wellscore::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Assess);
    let config_path = cli.config.map(PathBuf::from);

    // Init runs before config load so a broken config can be replaced
    if let Commands::Init = command {
        if let Err(e) = wellscore::config::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match wellscore::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    match command {
        Commands::Assess => {
            let theme = wellscore::tui::resolve_theme(config.theme);
            let app = wellscore::tui::App::new(theme, config.breakdown);
            if let Err(e) = wellscore::tui::run_tui(app).await {
                eprintln!("Terminal error: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Score {
            set,
            answers,
            format,
            breakdown,
            partial,
        } => {
            let raw = match collect_answers(answers, &set) {
                Ok(raw) => raw,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INVALID_ANSWERS);
                }
            };

            if let Err(errors) = wellscore::questionnaire::validate_answers(&raw) {
                if partial {
                    tracing::warn!(problems = errors.len(), "scoring incomplete answers");
                } else {
                    eprintln!("Invalid answers:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    std::process::exit(EXIT_INVALID_ANSWERS);
                }
            }

            let result = wellscore::scoring::compute_scores(&AnswerSet::from_raw(&raw));
            let format = format.unwrap_or(config.format);
            let show_breakdown = breakdown || config.breakdown;

            match format {
                OutputFormat::Text => {
                    let use_colors = wellscore::output::should_use_colors();
                    println!("{}", wellscore::output::format_result(&result, use_colors));
                    if show_breakdown {
                        println!();
                        println!("{}", wellscore::output::format_breakdown(&result, use_colors));
                    }
                }
                OutputFormat::Tsv => println!("{}", wellscore::output::format_tsv(&result)),
                OutputFormat::Json => match wellscore::output::format_json(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_FAILURE);
                    }
                },
            }
        }
        Commands::Questions => {
            let use_colors = wellscore::output::should_use_colors();
            println!("{}", wellscore::output::format_question_list(use_colors));
        }
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

/// File answers first, then `--set` flags on top.
fn collect_answers(file: Option<PathBuf>, assignments: &[String]) -> anyhow::Result<RawAnswers> {
    let mut raw = match file {
        Some(path) => load_answers_file(&path)?,
        None => RawAnswers::new(),
    };

    let mut overrides = RawAnswers::new();
    for assignment in assignments {
        let (id, value) = RawAnswers::parse_assignment(assignment)?;
        overrides.set(id, value);
    }
    raw.merge(overrides);

    tracing::debug!(answered = raw.len(), "collected answers");
    Ok(raw)
}
