use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use migrator::workflows::{
    ContestResultsImport, GhostMigration, GhostScoreImport, MemberImport, Rejudge,
    SubmissionExport, load_space,
};
use migrator::{OverwritePolicy, RunSummary, Workflow};
use platform::{
    CommunityClient, Filters, HttpClient, JudgeClient, PlatformConfig, SubmissionStatus,
    UniverseClient, UsersClient, client::DEFAULT_API_URL,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "eolymp-migrate")]
#[command(about = "Batch data migration utilities for the eolymp judging platform", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "EOLYMP_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "EOLYMP_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy solved-problem history of every participant into another contest as ghosts
    Ghosts {
        space_from: String,
        space_to: String,
        contest_from: String,
        contest_to: String,

        #[arg(long, value_enum, default_value = "ghost-only")]
        overwrite: OverwritePolicy,
    },
    /// Import a score history for one member from a CSV file
    GhostScore {
        space_key: String,
        member_id: String,
        contest_id: String,
        file: PathBuf,
    },
    /// Import final standings from a CSV file as ghost participants
    Results {
        space_key: String,
        contest_id: String,
        file: PathBuf,

        #[arg(long, value_enum, default_value = "ghost-only")]
        overwrite: OverwritePolicy,
    },
    /// Create or update space members from a CSV file
    Members {
        space_key: String,
        file: PathBuf,

        #[arg(long, value_enum, default_value = "any")]
        overwrite: OverwritePolicy,
    },
    /// Trigger a retest of contest submissions
    Rejudge {
        space_key: String,
        contest_id: String,

        #[command(flatten)]
        filter: SubmissionFilter,

        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
    /// Export contest submissions in a CSV table
    Export {
        space_key: String,
        contest_id: String,
        output: PathBuf,

        #[command(flatten)]
        filter: SubmissionFilter,

        /// Download source files to a given path
        #[arg(short = 'x', long)]
        source: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct SubmissionFilter {
    /// Only submissions for a given problem
    #[arg(short = 'p', value_name = "PROBLEM-ID")]
    problem: Option<String>,

    /// Only submissions of a given participant
    #[arg(short = 'u', value_name = "PARTICIPANT-ID")]
    participant: Option<String>,

    /// Only submissions in a given status
    #[arg(short = 's', value_name = "STATUS")]
    status: Option<SubmissionStatus>,
}

impl SubmissionFilter {
    fn into_filters(self) -> Filters {
        let mut filters = Filters::new();
        if let Some(problem) = self.problem {
            filters = filters.problem_id_equals(problem);
        }
        if let Some(status) = self.status {
            filters = filters.status_equals(status);
        }
        if let Some(participant) = self.participant {
            filters = filters.participant_id_equals(participant);
        }
        filters
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "eolymp_migrate={},migrator={},platform={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PlatformConfig::new(cli.api_url, cli.token);

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("{}", e);
        if e.is_setup() {
            eprintln!("{}", Cli::command().render_usage());
        }
        std::process::exit(-1);
    }
}

async fn run(command: Commands, config: &PlatformConfig) -> migrator::Result<()> {
    let http = HttpClient::new(config)?;
    let universe = UniverseClient::new(http.clone(), &config.api_url);

    match command {
        Commands::Ghosts {
            space_from,
            space_to,
            contest_from,
            contest_to,
            overwrite,
        } => {
            let from = load_space(&universe, &space_from).await?;
            let to = load_space(&universe, &space_to).await?;
            let source = JudgeClient::new(http.clone(), &from.url);
            let target = JudgeClient::new(http.clone(), &to.url);
            let members = CommunityClient::new(http, &to.url);

            execute(&GhostMigration::new(
                &source,
                &target,
                &members,
                contest_from,
                contest_to,
                overwrite,
            ))
            .await
        }
        Commands::GhostScore {
            space_key,
            member_id,
            contest_id,
            file,
        } => {
            let space = load_space(&universe, &space_key).await?;
            let judge = JudgeClient::new(http.clone(), &space.url);
            let members = CommunityClient::new(http, &space.url);

            execute(&GhostScoreImport::new(
                &judge, &members, member_id, contest_id, file,
            ))
            .await
        }
        Commands::Results {
            space_key,
            contest_id,
            file,
            overwrite,
        } => {
            let space = load_space(&universe, &space_key).await?;
            let judge = JudgeClient::new(http, &space.url);

            execute(&ContestResultsImport::new(&judge, contest_id, file, overwrite)).await
        }
        Commands::Members {
            space_key,
            file,
            overwrite,
        } => {
            let space = load_space(&universe, &space_key).await?;
            let members = CommunityClient::new(http.clone(), &space.url);
            let users = UsersClient::new(http, &config.api_url);

            execute(&MemberImport::new(&members, &users, space, file, overwrite)).await
        }
        Commands::Rejudge {
            space_key,
            contest_id,
            filter,
            interval_ms,
        } => {
            let space = load_space(&universe, &space_key).await?;
            let judge = JudgeClient::new(http, &space.url);

            execute(
                &Rejudge::new(&judge, contest_id, filter.into_filters())
                    .with_interval(Duration::from_millis(interval_ms)),
            )
            .await
        }
        Commands::Export {
            space_key,
            contest_id,
            output,
            filter,
            source,
        } => {
            let space = load_space(&universe, &space_key).await?;
            let judge = JudgeClient::new(http, &space.url);

            let mut export = SubmissionExport::new(&judge, contest_id, filter.into_filters(), output);
            if let Some(dir) = source {
                export = export.with_sources(dir);
            }
            execute(&export).await
        }
    }
}

async fn execute(workflow: &dyn Workflow) -> migrator::Result<()> {
    let summary: RunSummary = workflow.run().await?;
    summary.log(workflow.name());
    Ok(())
}
