//! Database migrations for the registration service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_event_tables::Migration),
            Box::new(m20260105_000002_create_registration_config::Migration),
            Box::new(m20260106_000003_create_redemption_tables::Migration),
        ]
    }
}

mod m20260105_000001_create_event_tables {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Events::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Events::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Events::Name).string().not_null())
                        .col(
                            ColumnDef::new(Events::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Applications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Applications::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Applications::UserId).uuid())
                        .col(ColumnDef::new(Applications::EventId).uuid().not_null())
                        .col(
                            ColumnDef::new(Applications::ApplicationType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Applications::ApplicantName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Applications::ApplicantEmail)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Applications::RegistrationCompleted)
                                .timestamp_with_time_zone(),
                        )
                        .col(
                            ColumnDef::new(Applications::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Applications::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_applications_event")
                                .from(Applications::Table, Applications::EventId)
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_applications_event_id")
                        .table(Applications::Table)
                        .col(Applications::EventId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Applications::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Events::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Events {
        Table,
        Id,
        Name,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Applications {
        Table,
        Id,
        UserId,
        EventId,
        ApplicationType,
        ApplicantName,
        ApplicantEmail,
        RegistrationCompleted,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20260105_000002_create_registration_config {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RegistrationRequirements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RegistrationRequirements::EventId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RegistrationRequirements::ApplicationType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RegistrationRequirements::RequiresPayment)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(RegistrationRequirements::PaymentAmount)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(RegistrationRequirements::AgreementText)
                                .text()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RegistrationRequirements::ProfileDeadlineDays)
                                .integer()
                                .not_null()
                                .default(30),
                        )
                        .col(
                            ColumnDef::new(RegistrationRequirements::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(RegistrationRequirements::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .primary_key(
                            Index::create()
                                .col(RegistrationRequirements::EventId)
                                .col(RegistrationRequirements::ApplicationType),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_registration_requirements_event")
                                .from(
                                    RegistrationRequirements::Table,
                                    RegistrationRequirements::EventId,
                                )
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PaymentSettings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PaymentSettings::EventId)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(PaymentSettings::CashEnabled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PaymentSettings::BankTransferEnabled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PaymentSettings::StripeEnabled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PaymentSettings::AllowInstallments)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PaymentSettings::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(PaymentSettings::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_payment_settings_event")
                                .from(PaymentSettings::Table, PaymentSettings::EventId)
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PaymentSettings::Table).to_owned())
                .await?;
            manager
                .drop_table(
                    Table::drop()
                        .table(RegistrationRequirements::Table)
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(DeriveIden)]
    enum RegistrationRequirements {
        Table,
        EventId,
        ApplicationType,
        RequiresPayment,
        PaymentAmount,
        AgreementText,
        ProfileDeadlineDays,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum PaymentSettings {
        Table,
        EventId,
        CashEnabled,
        BankTransferEnabled,
        StripeEnabled,
        AllowInstallments,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Events {
        Table,
        Id,
    }
}

mod m20260106_000003_create_redemption_tables {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RegistrationTokens::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RegistrationTokens::Token)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(RegistrationTokens::ApplicationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RegistrationTokens::ExpiresAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RegistrationTokens::UsedAt)
                                .timestamp_with_time_zone(),
                        )
                        .col(
                            ColumnDef::new(RegistrationTokens::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_registration_tokens_application")
                                .from(
                                    RegistrationTokens::Table,
                                    RegistrationTokens::ApplicationId,
                                )
                                .to(Applications::Table, Applications::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_registration_tokens_application_id")
                        .table(RegistrationTokens::Table)
                        .col(RegistrationTokens::ApplicationId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Clients::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Clients::Name).string().not_null())
                        .col(ColumnDef::new(Clients::Email).string().not_null())
                        .col(ColumnDef::new(Clients::EmergencyContactName).string())
                        .col(ColumnDef::new(Clients::EmergencyContactPhone).string())
                        .col(ColumnDef::new(Clients::MedicalConditions).text())
                        .col(ColumnDef::new(Clients::Allergies).text())
                        .col(ColumnDef::new(Clients::Medications).text())
                        .col(
                            ColumnDef::new(Clients::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Clients::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RegistrationSubmissions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RegistrationSubmissions::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(RegistrationSubmissions::ApplicationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RegistrationSubmissions::ClientId).uuid())
                        .col(
                            ColumnDef::new(RegistrationSubmissions::ConfirmedDetails)
                                .json()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RegistrationSubmissions::AgreementAccepted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(RegistrationSubmissions::AgreementAcceptedAt)
                                .timestamp_with_time_zone(),
                        )
                        .col(ColumnDef::new(RegistrationSubmissions::PaymentMethod).string())
                        .col(
                            ColumnDef::new(RegistrationSubmissions::PaymentAmount)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(RegistrationSubmissions::SubmittedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(RegistrationSubmissions::ProfileDeadline)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_registration_submissions_application")
                                .from(
                                    RegistrationSubmissions::Table,
                                    RegistrationSubmissions::ApplicationId,
                                )
                                .to(Applications::Table, Applications::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One submission per application, enforced by the database as
            // well as by the token gate.
            manager
                .create_index(
                    Index::create()
                        .name("idx_registration_submissions_application_id")
                        .table(RegistrationSubmissions::Table)
                        .col(RegistrationSubmissions::ApplicationId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Tickets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Tickets::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Tickets::EventId).uuid().not_null())
                        .col(ColumnDef::new(Tickets::ClientId).uuid())
                        .col(ColumnDef::new(Tickets::TicketType).string().not_null())
                        .col(
                            ColumnDef::new(Tickets::PriceGbp)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Tickets::PurchaseDate)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(Tickets::Status).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_tickets_event")
                                .from(Tickets::Table, Tickets::EventId)
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_tickets_event_id")
                        .table(Tickets::Table)
                        .col(Tickets::EventId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Tickets::Table).to_owned())
                .await?;
            manager
                .drop_table(
                    Table::drop()
                        .table(RegistrationSubmissions::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(RegistrationTokens::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum RegistrationTokens {
        Table,
        Token,
        ApplicationId,
        ExpiresAt,
        UsedAt,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Clients {
        Table,
        Id,
        Name,
        Email,
        EmergencyContactName,
        EmergencyContactPhone,
        MedicalConditions,
        Allergies,
        Medications,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum RegistrationSubmissions {
        Table,
        Id,
        ApplicationId,
        ClientId,
        ConfirmedDetails,
        AgreementAccepted,
        AgreementAcceptedAt,
        PaymentMethod,
        PaymentAmount,
        SubmittedAt,
        ProfileDeadline,
    }

    #[derive(DeriveIden)]
    enum Tickets {
        Table,
        Id,
        EventId,
        ClientId,
        TicketType,
        PriceGbp,
        PurchaseDate,
        Status,
    }

    #[derive(DeriveIden)]
    enum Applications {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Events {
        Table,
        Id,
    }
}
