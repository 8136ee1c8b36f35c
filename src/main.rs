use agrireg::cli::{
    Command, NewArgs, ParcelArgs, ParcelCommand, ResetArgs, RootArgs, SaveDraftArgs, SetArgs,
    StatusArgs, StepArgs, StepCommand, SubmitArgs, TrackArgs, ValidateArgs,
};
use agrireg::client::{HttpResourceClient, ResourceClient, RSBSA_ENROLLMENTS};
use agrireg::config;
use agrireg::draft::{
    default_draft_path, DraftStore, EnrollmentDraft, FormManager, JsonFileStore, Section,
    STEP_TITLES,
};
use agrireg::submit::{self, SubmitError};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = RootArgs::parse();
    let draft_path = resolve_draft_path(args.draft.as_deref())?;
    let config_path = resolve_config_path(args.config.as_deref())?;

    match args.command {
        Command::New(new_args) => cmd_new(&draft_path, &config_path, new_args),
        Command::Set(set_args) => cmd_set(&draft_path, set_args),
        Command::Parcel(parcel_args) => cmd_parcel(&draft_path, parcel_args),
        Command::Step(step_args) => cmd_step(&draft_path, step_args),
        Command::Status(status_args) => cmd_status(&draft_path, status_args),
        Command::Validate(validate_args) => cmd_validate(&draft_path, validate_args),
        Command::Submit(submit_args) => cmd_submit(&draft_path, &config_path, submit_args),
        Command::SaveDraft(save_args) => cmd_save_draft(&draft_path, &config_path, save_args),
        Command::Track(track_args) => cmd_track(&config_path, track_args),
        Command::Reset(reset_args) => cmd_reset(&draft_path, reset_args),
    }
}

fn resolve_draft_path(flag: Option<&Path>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path.to_path_buf()),
        None => default_draft_path(),
    }
}

fn resolve_config_path(flag: Option<&Path>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path.to_path_buf()),
        None => config::default_config_path(),
    }
}

fn open_manager(draft_path: &Path) -> Result<FormManager> {
    FormManager::open(Box::new(JsonFileStore::new(draft_path)))
}

fn open_client(config_path: &Path) -> Result<HttpResourceClient> {
    let config = config::load_config(config_path)?;
    let token = config::resolve_token();
    if token.is_none() {
        eprintln!(
            "warning: {} is not set; requests will be unauthenticated",
            config::TOKEN_ENV
        );
    }
    Ok(HttpResourceClient::new(config.api_base_url, token))
}

fn cmd_new(draft_path: &Path, config_path: &Path, args: NewArgs) -> Result<()> {
    let store = JsonFileStore::new(draft_path);
    if store.load()?.is_some() && !args.force {
        return Err(anyhow!(
            "draft already exists at {} (pass --force to replace it)",
            draft_path.display()
        ));
    }
    store.save(&EnrollmentDraft::default())?;
    println!("Started a new draft at {}", draft_path.display());

    if !config_path.is_file() {
        config::write_config(config_path, &config::default_config())
            .with_context(|| format!("bootstrap config {}", config_path.display()))?;
        println!("Wrote default config to {}", config_path.display());
    }
    Ok(())
}

fn cmd_set(draft_path: &Path, args: SetArgs) -> Result<()> {
    let section = Section::parse(&args.section).ok_or_else(|| {
        anyhow!(
            "unknown section {:?} (expected beneficiary, farm_profile, farmer, fisherfolk, farmworker, or agri_youth)",
            args.section
        )
    })?;
    let mut manager = open_manager(draft_path)?;
    manager.update_field(section, &args.field, &args.value)?;
    manager.flush()?;
    println!("Set {section}.{} ({}% complete)", args.field, manager.progress());
    Ok(())
}

fn cmd_parcel(draft_path: &Path, args: ParcelArgs) -> Result<()> {
    let mut manager = open_manager(draft_path)?;
    match args.command {
        ParcelCommand::Add => {
            manager.add_parcel()?;
            println!(
                "Added farm parcel #{} ({} total)",
                manager.draft().parcels.len() - 1,
                manager.draft().parcels.len()
            );
        }
        ParcelCommand::Set(set_args) => {
            manager.update_parcel(set_args.index, &set_args.field, &set_args.value)?;
            println!("Set parcels[{}].{}", set_args.index, set_args.field);
        }
        ParcelCommand::Remove(remove_args) => {
            manager.remove_parcel(remove_args.index)?;
            println!(
                "Removed farm parcel #{} ({} remaining)",
                remove_args.index,
                manager.draft().parcels.len()
            );
        }
    }
    manager.flush()
}

fn cmd_step(draft_path: &Path, args: StepArgs) -> Result<()> {
    let mut manager = open_manager(draft_path)?;
    let step = match args.command {
        StepCommand::Next => manager.next_step()?,
        StepCommand::Prev => manager.prev_step()?,
        StepCommand::Goto(goto_args) => manager.goto_step(goto_args.step)?,
    };
    manager.flush()?;
    println!("Step {step}: {}", STEP_TITLES[(step - 1) as usize]);
    Ok(())
}

fn cmd_status(draft_path: &Path, args: StatusArgs) -> Result<()> {
    let manager = open_manager(draft_path)?;
    let draft = manager.draft();
    let step = draft.current_step;
    let title = STEP_TITLES[(step - 1) as usize];
    if args.json {
        let status = serde_json::json!({
            "current_step": step,
            "step_title": title,
            "progress_percent": manager.progress(),
            "parcel_count": draft.parcels.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Step {step} of {}: {title}", agrireg::draft::TOTAL_STEPS);
        println!("Progress: {}%", manager.progress());
        println!("Farm parcels: {}", draft.parcels.len());
        println!("Run `agrireg validate` to list outstanding errors.");
    }
    Ok(())
}

fn cmd_validate(draft_path: &Path, _args: ValidateArgs) -> Result<()> {
    let mut manager = open_manager(draft_path)?;
    if manager.validate_form() {
        println!("Draft is valid.");
        return Ok(());
    }
    let errors = manager.errors();
    let count: usize = errors.values().map(Vec::len).sum();
    println!("{}", submit::describe_validation_errors(errors));
    Err(anyhow!("draft has {count} validation errors"))
}

fn cmd_submit(draft_path: &Path, config_path: &Path, args: SubmitArgs) -> Result<()> {
    let mut manager = open_manager(draft_path)?;
    let client = open_client(config_path)?;
    match submit::submit_complete_form(&client, manager.draft(), args.user_id) {
        Ok(record) => {
            println!("Enrollment submitted.");
            println!("Reference code: {}", record.reference_code);
            if record.livelihood.is_none() {
                println!("No livelihood detail was created for this category.");
            }
            // A successful full submission retires the local draft.
            manager.reset()?;
            Ok(())
        }
        Err(SubmitError::Validation { fields }) => {
            println!("{}", submit::describe_validation_errors(&fields));
            Err(anyhow!("draft failed validation; nothing was submitted"))
        }
        Err(SubmitError::Remote { step, failure }) => {
            if let Some(details) = &failure.details {
                eprintln!("server response: {details}");
            }
            Err(anyhow!(
                "{step} creation failed: {} (records created before this step remain on the server)",
                failure.message
            ))
        }
    }
}

fn cmd_save_draft(draft_path: &Path, config_path: &Path, args: SaveDraftArgs) -> Result<()> {
    let manager = open_manager(draft_path)?;
    let client = open_client(config_path)?;
    match submit::save_draft(&client, manager.draft(), args.user_id) {
        Ok(record) => {
            match record.get("id").and_then(Value::as_i64) {
                Some(id) => println!("Saved beneficiary profile draft (record id {id})."),
                None => println!("Saved beneficiary profile draft."),
            }
            Ok(())
        }
        Err(SubmitError::Validation { fields }) => {
            println!("{}", submit::describe_validation_errors(&fields));
            Err(anyhow!("draft save needs both name fields"))
        }
        Err(SubmitError::Remote { failure, .. }) => {
            Err(anyhow!("draft save failed: {}", failure.message))
        }
    }
}

fn cmd_track(config_path: &Path, args: TrackArgs) -> Result<()> {
    let client = open_client(config_path)?;
    let record = client
        .get_by_id(RSBSA_ENROLLMENTS, args.enrollment_id)
        .map_err(|failure| anyhow!("fetch enrollment: {}", failure.message))?;
    let reference = record
        .get("reference_code")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    println!("Reference code: {reference}");
    println!("Status: {}", submit::enrollment_status_label(&record));
    Ok(())
}

fn cmd_reset(draft_path: &Path, _args: ResetArgs) -> Result<()> {
    let mut manager = open_manager(draft_path)?;
    manager.reset()?;
    println!("Draft discarded.");
    Ok(())
}
