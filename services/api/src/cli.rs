use crate::commands::{
    run_boundaries_generate, run_conditions_resolve, run_conditions_tags, run_inspection_grade,
    run_inspection_template, BoundariesGenerateArgs, ConditionsResolveArgs, InspectionGradeArgs,
};
use crate::server;
use broker_ai::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Brokerage Desk",
    about = "Run the brokerage domain service or its offline tooling from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate simplified province map outlines
    Boundaries {
        #[command(subcommand)]
        command: BoundariesCommand,
    },
    /// Grade inspection checklists
    Inspection {
        #[command(subcommand)]
        command: InspectionCommand,
    },
    /// Resolve quick-search card conditions
    Conditions {
        #[command(subcommand)]
        command: ConditionsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BoundariesCommand {
    /// Fetch province GeoJSON and write the generated map module
    Generate(BoundariesGenerateArgs),
}

#[derive(Subcommand, Debug)]
enum InspectionCommand {
    /// Grade a checklist CSV export
    Grade(InspectionGradeArgs),
    /// Print the standard checklist template
    Template,
}

#[derive(Subcommand, Debug)]
enum ConditionsCommand {
    /// Resolve a condition map given as JSON
    Resolve(ConditionsResolveArgs),
    /// List tag-only conditions and the property categories they apply to
    Tags,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Boundaries {
            command: BoundariesCommand::Generate(args),
        } => run_boundaries_generate(args).await,
        Command::Inspection {
            command: InspectionCommand::Grade(args),
        } => run_inspection_grade(args),
        Command::Inspection {
            command: InspectionCommand::Template,
        } => {
            run_inspection_template();
            Ok(())
        }
        Command::Conditions {
            command: ConditionsCommand::Resolve(args),
        } => run_conditions_resolve(args),
        Command::Conditions {
            command: ConditionsCommand::Tags,
        } => {
            run_conditions_tags();
            Ok(())
        }
    }
}
