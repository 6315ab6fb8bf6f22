//! SeaORM entities for database tables

/// Events reference table
///
/// Owned by the events subsystem; read here only to denormalize the event
/// name into the registration view.
pub mod event {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "events")]
    pub struct Model {
        /// Event ID
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Event display name
        pub name: String,

        /// Creation timestamp
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Applications table
///
/// Owned by the applications workflow; this service reads it and stamps
/// `registration_completed` on redemption.
pub mod application {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "applications")]
    pub struct Model {
        /// Application ID
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Applicant account, when one exists
        pub user_id: Option<Uuid>,

        /// Event the application targets
        pub event_id: Uuid,

        /// Application type ("artist", "trader", ...)
        pub application_type: String,

        /// Applicant display name
        pub applicant_name: String,

        /// Applicant contact email
        pub applicant_email: String,

        /// Set when the applicant completes registration
        pub registration_completed: Option<DateTimeUtc>,

        /// Creation timestamp
        pub created_at: DateTimeUtc,

        /// Last update timestamp
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to events
        #[sea_orm(
            belongs_to = "super::event::Entity",
            from = "Column::EventId",
            to = "super::event::Column::Id"
        )]
        Event,
    }

    impl Related<super::event::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Event.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Registration tokens table
pub mod token {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "registration_tokens")]
    pub struct Model {
        /// Opaque token string (primary key)
        #[sea_orm(primary_key, auto_increment = false)]
        pub token: String,

        /// Application this token belongs to
        pub application_id: Uuid,

        /// Expiry instant
        pub expires_at: DateTimeUtc,

        /// Set exactly once on redemption
        pub used_at: Option<DateTimeUtc>,

        /// Mint timestamp
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to applications
        #[sea_orm(
            belongs_to = "super::application::Entity",
            from = "Column::ApplicationId",
            to = "super::application::Column::Id"
        )]
        Application,
    }

    impl Related<super::application::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Application.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Registration requirements table, one row per (event, application type)
pub mod requirements {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "registration_requirements")]
    pub struct Model {
        /// Event ID (part of composite primary key)
        #[sea_orm(primary_key, auto_increment = false)]
        pub event_id: Uuid,

        /// Application type (part of composite primary key)
        #[sea_orm(primary_key, auto_increment = false)]
        pub application_type: String,

        /// Whether payment is required to register
        pub requires_payment: bool,

        /// Amount owed when payment is required
        pub payment_amount: Decimal,

        /// Agreement text the applicant must accept
        #[sea_orm(column_type = "Text")]
        pub agreement_text: String,

        /// Days granted to complete the attendee profile
        pub profile_deadline_days: i32,

        /// Creation timestamp
        pub created_at: DateTimeUtc,

        /// Last update timestamp
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Payment settings table, at most one row per event
pub mod payment_settings {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "payment_settings")]
    pub struct Model {
        /// Event ID
        #[sea_orm(primary_key, auto_increment = false)]
        pub event_id: Uuid,

        /// Cash accepted on the door
        pub cash_enabled: bool,

        /// Bank transfer accepted
        pub bank_transfer_enabled: bool,

        /// Card payments via Stripe accepted
        pub stripe_enabled: bool,

        /// Whether paying in installments is allowed
        pub allow_installments: bool,

        /// Creation timestamp
        pub created_at: DateTimeUtc,

        /// Last update timestamp
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Clients table, keyed by the applicant's account ID
pub mod client {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "clients")]
    pub struct Model {
        /// Client ID (= the application's user_id)
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Display name
        pub name: String,

        /// Contact email
        pub email: String,

        /// Emergency contact name
        pub emergency_contact_name: Option<String>,

        /// Emergency contact phone number
        pub emergency_contact_phone: Option<String>,

        /// Free-text medical conditions
        #[sea_orm(column_type = "Text", nullable)]
        pub medical_conditions: Option<String>,

        /// Free-text allergies
        #[sea_orm(column_type = "Text", nullable)]
        pub allergies: Option<String>,

        /// Free-text medications
        #[sea_orm(column_type = "Text", nullable)]
        pub medications: Option<String>,

        /// Creation timestamp
        pub created_at: DateTimeUtc,

        /// Last update timestamp
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Registration submissions table, exactly one row per redemption
pub mod submission {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "registration_submissions")]
    pub struct Model {
        /// Submission ID
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Application that was redeemed
        pub application_id: Uuid,

        /// Client the submission belongs to, when one exists
        pub client_id: Option<Uuid>,

        /// Opaque confirmed payload captured verbatim
        pub confirmed_details: Json,

        /// Whether the event agreement was accepted
        pub agreement_accepted: bool,

        /// When the agreement was accepted
        pub agreement_accepted_at: Option<DateTimeUtc>,

        /// Chosen payment method, if any
        pub payment_method: Option<String>,

        /// Amount owed per the resolved requirements
        pub payment_amount: Decimal,

        /// Redemption timestamp
        pub submitted_at: DateTimeUtc,

        /// Deadline for completing the attendee profile
        pub profile_deadline: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to applications
        #[sea_orm(
            belongs_to = "super::application::Entity",
            from = "Column::ApplicationId",
            to = "super::application::Column::Id"
        )]
        Application,
    }

    impl Related<super::application::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Application.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Tickets table, exactly one row per redemption
pub mod ticket {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "tickets")]
    pub struct Model {
        /// Ticket ID
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Event the ticket is for
        pub event_id: Uuid,

        /// Ticket holder, when a client identity exists
        pub client_id: Option<Uuid>,

        /// Ticket type, mirrors the application type
        pub ticket_type: String,

        /// Price in GBP; zero until payment reconciliation
        pub price_gbp: Decimal,

        /// Issue timestamp
        pub purchase_date: DateTimeUtc,

        /// Ticket status ("active", ...)
        pub status: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to events
        #[sea_orm(
            belongs_to = "super::event::Entity",
            from = "Column::EventId",
            to = "super::event::Column::Id"
        )]
        Event,
    }

    impl Related<super::event::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Event.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
