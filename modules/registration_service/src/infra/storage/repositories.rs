//! SeaORM repository implementations

use super::{entity, mapper};
use crate::contract::{
    CommitReceipt, CommitStep, PaymentSettingsView, RegistrationCommit, RegistrationError,
    RequirementsView, TokenContext,
};
use crate::domain::repository::{RegistrationRepository, RequirementsRepository, TokenRepository};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter,
    TransactionError, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

// ===== Token Repository =====

pub struct SeaOrmTokenRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTokenRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for SeaOrmTokenRepository {
    async fn find_with_application(&self, token: &str) -> Result<Option<TokenContext>> {
        let Some((token_row, application_row)) = entity::token::Entity::find_by_id(token)
            .find_also_related(entity::application::Entity)
            .one(&*self.db)
            .await?
        else {
            return Ok(None);
        };

        let application_row = application_row.ok_or_else(|| {
            anyhow::anyhow!("token '{}' references a missing application", token)
        })?;

        // The event row is reference data owned elsewhere; tolerate its
        // absence rather than failing the whole read.
        let event_name = entity::event::Entity::find_by_id(application_row.event_id)
            .one(&*self.db)
            .await?
            .map(|event| event.name)
            .unwrap_or_default();

        Ok(Some(mapper::token_context(
            token_row,
            application_row,
            event_name,
        )))
    }
}

// ===== Requirements Repository =====

pub struct SeaOrmRequirementsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmRequirementsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RequirementsRepository for SeaOrmRequirementsRepository {
    async fn find_requirements(
        &self,
        event_id: Uuid,
        application_type: &str,
    ) -> Result<Option<RequirementsView>> {
        let result = entity::requirements::Entity::find()
            .filter(entity::requirements::Column::EventId.eq(event_id))
            .filter(entity::requirements::Column::ApplicationType.eq(application_type))
            .one(&*self.db)
            .await?;

        Ok(result.map(|row| row.into()))
    }

    async fn find_payment_settings(&self, event_id: Uuid) -> Result<Option<PaymentSettingsView>> {
        let result = entity::payment_settings::Entity::find_by_id(event_id)
            .one(&*self.db)
            .await?;

        Ok(result.map(|row| row.into()))
    }
}

// ===== Registration Repository =====

pub struct SeaOrmRegistrationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmRegistrationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationRepository for SeaOrmRegistrationRepository {
    async fn commit(
        &self,
        commit: &RegistrationCommit,
    ) -> Result<CommitReceipt, RegistrationError> {
        let commit = commit.clone();

        let result = self
            .db
            .transaction::<_, CommitReceipt, RegistrationError>(move |txn| {
                Box::pin(async move { run_commit(txn, &commit).await })
            })
            .await;

        result.map_err(|err| match err {
            TransactionError::Connection(db_err) => RegistrationError::storage(db_err),
            TransactionError::Transaction(reg_err) => reg_err,
        })
    }
}

/// The redemption write sequence, executed inside one transaction.
///
/// The conditional token update is the at-most-once gate: it runs first and
/// nothing else is written when it matches no row. Every later failure
/// returns an error from the closure, which rolls the transaction back.
async fn run_commit(
    txn: &DatabaseTransaction,
    commit: &RegistrationCommit,
) -> Result<CommitReceipt, RegistrationError> {
    let now = chrono::Utc::now();

    // Compare-and-set: mark the token used iff it is still redeemable.
    let updated = entity::token::Entity::update_many()
        .col_expr(entity::token::Column::UsedAt, Expr::value(now))
        .filter(entity::token::Column::Token.eq(commit.token.clone()))
        .filter(entity::token::Column::UsedAt.is_null())
        .filter(entity::token::Column::ExpiresAt.gt(now))
        .exec(txn)
        .await
        .map_err(|err| commit_error(CommitStep::TokenInvalidate, err))?;

    if updated.rows_affected == 0 {
        let row = entity::token::Entity::find_by_id(commit.token.clone())
            .one(txn)
            .await
            .map_err(RegistrationError::storage)?;

        return Err(match row {
            None => RegistrationError::NotFound,
            Some(row) if row.used_at.is_some() => RegistrationError::AlreadyUsed,
            Some(row) if now >= row.expires_at => RegistrationError::Expired,
            Some(_) => RegistrationError::storage("token conditional update matched no row"),
        });
    }

    // Client upsert, only when the application carries an identity.
    if let Some(client_id) = commit.client_id {
        let existing = entity::client::Entity::find_by_id(client_id)
            .one(txn)
            .await
            .map_err(|err| commit_error(CommitStep::ClientUpsert, err))?;

        let mut active = mapper::client_active_model(commit, client_id, now);
        if existing.is_some() {
            // Overwrite in place, preserving the original creation stamp.
            active.created_at = sea_orm::ActiveValue::NotSet;
            entity::client::Entity::update(active)
                .exec(txn)
                .await
                .map_err(|err| commit_error(CommitStep::ClientUpsert, err))?;
        } else {
            entity::client::Entity::insert(active)
                .exec(txn)
                .await
                .map_err(|err| commit_error(CommitStep::ClientUpsert, err))?;
        }
    }

    entity::submission::Entity::insert(mapper::submission_active_model(commit, now))
        .exec(txn)
        .await
        .map_err(|err| commit_error(CommitStep::SubmissionInsert, err))?;

    entity::ticket::Entity::insert(mapper::ticket_active_model(commit, now))
        .exec(txn)
        .await
        .map_err(|err| commit_error(CommitStep::TicketInsert, err))?;

    entity::application::Entity::update_many()
        .col_expr(
            entity::application::Column::RegistrationCompleted,
            Expr::value(now),
        )
        .col_expr(entity::application::Column::UpdatedAt, Expr::value(now))
        .filter(entity::application::Column::Id.eq(commit.application_id))
        .exec(txn)
        .await
        .map_err(|err| commit_error(CommitStep::ApplicationUpdate, err))?;

    Ok(CommitReceipt {
        registration_id: commit.submission_id,
    })
}

fn commit_error(step: CommitStep, err: sea_orm::DbErr) -> RegistrationError {
    RegistrationError::Commit {
        step,
        message: err.to_string(),
    }
}
