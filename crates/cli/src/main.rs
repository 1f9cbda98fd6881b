use clap::{Parser, Subcommand};
use odyssey_cli::commands::{audit, catalog, ledger, metadata, project};
use odyssey_cli::telemetry;

#[derive(Parser)]
#[command(name = "odyssey")]
#[command(about = "Odyssey contracts tool: catalog and project state files, ledger dumps and audits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog state files
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Project state files
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Local ledger dumps
    Ledger {
        #[command(subcommand)]
        action: LedgerAction,
    },
    /// Rebuild audit trails from a ledger dump
    Audit {
        #[command(subcommand)]
        action: AuditAction,
    },
    /// Metadata documents
    Metadata {
        #[command(subcommand)]
        action: MetadataAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Write an empty catalog
    Spawn {
        #[arg(long)]
        out: String,
    },
    /// Apply one command (addOwner, updateDataset, ...) to a state file in place
    Invoke {
        #[arg(long)]
        state: String,

        #[arg(long)]
        command: String,

        /// Instruction argument as name=value; name=@file reads the value from a file
        #[arg(long = "arg")]
        args: Vec<String>,
    },
    /// Print owners and datasets
    Show {
        #[arg(long)]
        state: String,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    Spawn {
        /// Comma-separated dataset ids (64 lowercase hex characters each)
        #[arg(long)]
        datasets: String,

        #[arg(long)]
        access_key: String,

        #[arg(long)]
        out: String,
    },
    Invoke {
        #[arg(long)]
        state: String,

        #[arg(long)]
        command: String,

        #[arg(long = "arg")]
        args: Vec<String>,
    },
    Show {
        #[arg(long)]
        state: String,
    },
}

#[derive(Subcommand)]
enum LedgerAction {
    /// Write an empty ledger dump
    Init {
        #[arg(long)]
        out: String,
    },
    /// Execute one instruction and append it as a block.
    /// Without --command the instruction is a spawn.
    Exec {
        #[arg(long)]
        ledger: String,

        #[arg(long)]
        contract: String,

        /// Target instance (hex); defaults to the zero id for spawns
        #[arg(long)]
        instance: Option<String>,

        #[arg(long)]
        command: Option<String>,

        #[arg(long = "arg")]
        args: Vec<String>,
    },
}

#[derive(Subcommand)]
enum AuditAction {
    /// Every instruction on one instance, grouped by block with gap deltas
    Project {
        #[arg(long)]
        ledger: String,

        #[arg(long)]
        target: String,

        #[arg(long)]
        max_pages: Option<usize>,

        #[arg(long)]
        json: bool,
    },
    /// Usage of one dataset, with the current state of projects over it
    Dataset {
        #[arg(long)]
        ledger: String,

        #[arg(long)]
        target: String,

        #[arg(long)]
        max_pages: Option<usize>,
    },
}

#[derive(Subcommand)]
enum MetadataAction {
    /// Validate a metadata JSON document
    Check {
        #[arg(long)]
        json: String,
    },
}

fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Spawn { out } => catalog::spawn(&out),
            CatalogAction::Invoke { state, command, args } => catalog::invoke(&state, &command, &args),
            CatalogAction::Show { state } => catalog::show(&state),
        },
        Commands::Project { action } => match action {
            ProjectAction::Spawn {
                datasets,
                access_key,
                out,
            } => project::spawn(&datasets, &access_key, &out),
            ProjectAction::Invoke { state, command, args } => project::invoke(&state, &command, &args),
            ProjectAction::Show { state } => project::show(&state),
        },
        Commands::Ledger { action } => match action {
            LedgerAction::Init { out } => ledger::init(&out),
            LedgerAction::Exec {
                ledger: path,
                contract,
                instance,
                command,
                args,
            } => ledger::exec(&path, &contract, instance.as_deref(), command.as_deref(), &args),
        },
        Commands::Audit { action } => match action {
            AuditAction::Project {
                ledger,
                target,
                max_pages,
                json,
            } => audit::project(&ledger, &target, max_pages, json),
            AuditAction::Dataset {
                ledger,
                target,
                max_pages,
            } => audit::dataset(&ledger, &target, max_pages),
        },
        Commands::Metadata { action } => match action {
            MetadataAction::Check { json } => metadata::check(&json),
        },
    }
}
