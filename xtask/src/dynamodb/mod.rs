//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;
use vivah_core::storage::TableNames;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy DynamoDB table infrastructure.
    Deploy(DeployCommand),
}

/// Deploy or update DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy DynamoDB table infrastructure.

By default, this command creates the Users, Profiles, Matches, Likes and
Messages tables with their key schemas and Global Secondary Indexes
(EmailIndex on Users, ChatIndex on Messages), adding any missing index to
tables that already exist.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials
  USERS_TABLE, PROFILES_TABLE, MATCHES_TABLE, LIKES_TABLE, MESSAGES_TABLE
                      - Override individual table names")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the tables instead of creating/updating.
    #[arg(long)]
    pub destroy: bool,

    /// Prefix prepended to every table name (e.g. `dev-`).
    #[arg(long, default_value = "")]
    pub prefix: String,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;
    let names = TableNames::from_env().with_prefix(&cmd.prefix);
    names.validate()?;
    let tables = config::vivah_table_configs(&names);

    if cmd.destroy {
        // Destroy flow
        let mut plans = Vec::with_capacity(tables.len());
        for table in &tables {
            let current = client::get_table_state(&dynamo_client, &table.table_name).await?;
            plans.push(planning::calculate_destroy_plan(
                current.as_ref(),
                &table.table_name,
            ));
        }

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in plans.iter().flat_map(planning::format_destroy_plan) {
                aprintln!("  {}", p_plan(&line));
            }
            aprintln!();
        }

        if !plans.iter().any(planning::DestroyPlan::has_changes) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        confirm(
            cmd.force,
            "Are you sure you want to delete these tables? ALL DATA WILL BE LOST",
            false,
        )?;

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting tables..."));
        }

        for plan in &plans {
            deploy::execute_destroy_plan(&dynamo_client, plan).await?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_g("Tables destroyed successfully."));
        }
    } else {
        // Deploy flow
        let mut plans = Vec::with_capacity(tables.len());
        for table in &tables {
            let current = client::get_table_state(&dynamo_client, &table.table_name).await?;
            plans.push(planning::calculate_deploy_plan(current.as_ref(), table));
        }

        if !global.is_silent() {
            aprintln!("{}", p_c("Deploy Plan:"));
            for line in plans.iter().flat_map(planning::format_deploy_plan) {
                aprintln!("  {}", p_plan(&line));
            }
            aprintln!();
        }

        if !plans.iter().any(planning::DeployPlan::has_changes) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            return Ok(());
        }

        confirm(cmd.force, "Apply these changes?", true)?;

        if !global.is_silent() {
            aprintln!("{}", p_b("Applying changes..."));
        }

        for plan in &plans {
            deploy::execute_deploy_plan(&dynamo_client, plan).await?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure deployed successfully."));
        }
    }

    Ok(())
}

fn confirm(force: bool, prompt: &str, default: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}
