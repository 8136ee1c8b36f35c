//! CLI argument parsing for the enrollment client.
//!
//! The CLI is intentionally thin: every command maps onto one library call
//! so the same core logic can be reused elsewhere.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint for the enrollment workflow.
#[derive(Parser, Debug)]
#[command(
    name = "agrireg",
    version,
    about = "Enrollment client for an agricultural beneficiary registry",
    after_help = "Commands:\n  new                         Start an empty draft\n  set <section> <field> <v>   Update one draft field\n  parcel add|set|remove       Manage farm parcels\n  step next|prev|goto         Move the wizard cursor\n  status [--json]             Show draft progress and errors\n  validate                    Run full-form validation\n  submit --user-id <ID>       Submit the draft to the registry\n  save-draft --user-id <ID>   Persist only the beneficiary profile\n  track --enrollment-id <ID>  Show an enrollment's status\n  reset                       Discard the draft\n\nExamples:\n  agrireg new\n  agrireg set beneficiary first_name Juan\n  agrireg parcel add\n  agrireg parcel set 0 farm_area 1.5\n  agrireg validate\n  agrireg submit --user-id 77",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Draft file path (defaults to the platform data directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub draft: Option<PathBuf>,

    /// Config file path (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    New(NewArgs),
    Set(SetArgs),
    Parcel(ParcelArgs),
    Step(StepArgs),
    Status(StatusArgs),
    Validate(ValidateArgs),
    Submit(SubmitArgs),
    SaveDraft(SaveDraftArgs),
    Track(TrackArgs),
    Reset(ResetArgs),
}

/// Start a fresh draft.
#[derive(Parser, Debug)]
#[command(about = "Start an empty enrollment draft")]
pub struct NewArgs {
    /// Replace an existing draft
    #[arg(long)]
    pub force: bool,
}

/// Update one field in one entity section.
#[derive(Parser, Debug)]
#[command(about = "Update one draft field")]
pub struct SetArgs {
    /// Entity section: beneficiary, farm_profile, farmer, fisherfolk,
    /// farmworker, or agri_youth
    pub section: String,

    /// Field name within the section
    pub field: String,

    /// New raw value (booleans accept true/false/1/0)
    pub value: String,
}

/// Farm parcel list management.
#[derive(Parser, Debug)]
#[command(about = "Manage the draft's farm parcels")]
pub struct ParcelArgs {
    #[command(subcommand)]
    pub command: ParcelCommand,
}

/// Parcel subcommands.
#[derive(Subcommand, Debug)]
pub enum ParcelCommand {
    /// Append an empty parcel
    Add,
    /// Update one field of the parcel at an index
    Set(ParcelSetArgs),
    /// Remove the parcel at an index
    Remove(ParcelRemoveArgs),
}

/// Inputs for `parcel set`.
#[derive(Parser, Debug)]
pub struct ParcelSetArgs {
    /// Zero-based parcel index
    pub index: usize,

    /// Field name on the parcel
    pub field: String,

    /// New raw value
    pub value: String,
}

/// Inputs for `parcel remove`.
#[derive(Parser, Debug)]
pub struct ParcelRemoveArgs {
    /// Zero-based parcel index
    pub index: usize,
}

/// Wizard cursor movement.
#[derive(Parser, Debug)]
#[command(about = "Move the wizard cursor")]
pub struct StepArgs {
    #[command(subcommand)]
    pub command: StepCommand,
}

/// Step subcommands.
#[derive(Subcommand, Debug)]
pub enum StepCommand {
    /// Advance one step
    Next,
    /// Go back one step
    Prev,
    /// Jump to a specific step (clamped to the wizard bounds)
    Goto(StepGotoArgs),
}

/// Inputs for `step goto`.
#[derive(Parser, Debug)]
pub struct StepGotoArgs {
    /// Target step, 1-based
    pub step: u32,
}

/// Draft status display.
#[derive(Parser, Debug)]
#[command(about = "Show draft progress, step, and recorded errors")]
pub struct StatusArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Full-form validation.
#[derive(Parser, Debug)]
#[command(about = "Run full-form validation and list errors")]
pub struct ValidateArgs {}

/// Submission inputs.
#[derive(Parser, Debug)]
#[command(about = "Submit the completed draft to the registry")]
pub struct SubmitArgs {
    /// Registry user id to stamp on created records
    #[arg(long, value_name = "ID")]
    pub user_id: i64,
}

/// Draft-save inputs.
#[derive(Parser, Debug)]
#[command(about = "Persist only the beneficiary profile with pending status")]
pub struct SaveDraftArgs {
    /// Registry user id to stamp on the created record
    #[arg(long, value_name = "ID")]
    pub user_id: i64,
}

/// Enrollment lookup inputs.
#[derive(Parser, Debug)]
#[command(about = "Show the status of a submitted enrollment")]
pub struct TrackArgs {
    /// Enrollment record id
    #[arg(long, value_name = "ID")]
    pub enrollment_id: i64,
}

/// Draft reset.
#[derive(Parser, Debug)]
#[command(about = "Discard the draft and clear the local store")]
pub struct ResetArgs {}
