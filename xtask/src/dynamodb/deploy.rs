//! Table deployment operations (Imperative Shell).

use super::client;
use super::config::{GsiConfig, TableConfig};
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, CreateGlobalSecondaryIndexAction, GlobalSecondaryIndex,
    GlobalSecondaryIndexUpdate, KeySchemaElement, KeyType, Projection, ProjectionType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use std::time::Duration;

/// Execute a deploy plan.
pub async fn execute_deploy_plan(client: &Client, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { config } => {
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
        }
        DeployPlan::AddGsis {
            config,
            gsis_to_add,
        } => {
            // DynamoDB accepts one GSI creation per update
            for gsi in gsis_to_add {
                add_gsi(client, config, gsi).await?;
                wait_for_table_active(client, &config.table_name).await?;
            }
        }
        DeployPlan::NoChanges { .. } => {}
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    if let DestroyPlan::DeleteTable { table_name } = plan {
        client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(DynamodbError::sdk)?;
    }
    Ok(())
}

fn key_schema(partition_key: &str, sort_key: Option<&str>) -> Result<Vec<KeySchemaElement>> {
    std::iter::once((partition_key, KeyType::Hash))
        .chain(sort_key.map(|sk| (sk, KeyType::Range)))
        .map(|(name, key_type)| {
            KeySchemaElement::builder()
                .attribute_name(name)
                .key_type(key_type)
                .build()
                .map_err(DynamodbError::sdk)
        })
        .collect()
}

fn attribute_definitions<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<AttributeDefinition>> {
    names
        .into_iter()
        .map(|name| {
            AttributeDefinition::builder()
                .attribute_name(name)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(DynamodbError::sdk)
        })
        .collect()
}

fn projection_all() -> Projection {
    Projection::builder()
        .projection_type(ProjectionType::All)
        .build()
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let mut request = client
        .create_table()
        .table_name(&config.table_name)
        .set_key_schema(Some(key_schema(
            &config.partition_key,
            config.sort_key.as_deref(),
        )?))
        .set_attribute_definitions(Some(attribute_definitions(config.attribute_names())?))
        .billing_mode(BillingMode::PayPerRequest);

    for gsi in &config.gsis {
        request = request.global_secondary_indexes(
            GlobalSecondaryIndex::builder()
                .index_name(&gsi.name)
                .set_key_schema(Some(key_schema(&gsi.partition_key, None)?))
                .projection(projection_all())
                .build()
                .map_err(DynamodbError::sdk)?,
        );
    }

    request.send().await.map_err(DynamodbError::sdk)?;
    Ok(())
}

async fn add_gsi(client: &Client, config: &TableConfig, gsi: &GsiConfig) -> Result<()> {
    client
        .update_table()
        .table_name(&config.table_name)
        .set_attribute_definitions(Some(attribute_definitions([gsi.partition_key.as_str()])?))
        .global_secondary_index_updates(
            GlobalSecondaryIndexUpdate::builder()
                .create(
                    CreateGlobalSecondaryIndexAction::builder()
                        .index_name(&gsi.name)
                        .set_key_schema(Some(key_schema(&gsi.partition_key, None)?))
                        .projection(projection_all())
                        .build()
                        .map_err(DynamodbError::sdk)?,
                )
                .build(),
        )
        .send()
        .await
        .map_err(DynamodbError::sdk)?;

    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.is_ready() {
                return Ok(());
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(DynamodbError::TableActivationTimeout {
        table_name: table_name.to_string(),
    })
}
