use chrono::Utc;
use entity::registration::RegistrationStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::registration::RegistrationRepository,
    model::registration::{
        CreateRegistrationParams, ParticipantParams, ParticipantRef, RegistrationFilter,
    },
};

mod create;
