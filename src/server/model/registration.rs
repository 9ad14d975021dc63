//! Registration domain models and parameters.

use entity::registration::RegistrationStatus;

use crate::{
    model::registration::{
        ParticipantDto, ParticipantInputDto, RegistrationDto, RegistrationStatusDto, ResubmitDto,
        SignupDto,
    },
    server::{error::AppError, util::validate::optional_text},
};

/// What a participant row points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRef {
    UserPlayer(i32),
    TeamMember(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantParams {
    pub reference: ParticipantRef,
    pub is_main_player: bool,
}

impl ParticipantParams {
    /// Resolves participant inputs and normalizes the main player flag.
    ///
    /// # Returns
    /// - `Ok(Vec<ParticipantParams>)` - Exactly one participant is flagged main; the first
    ///   one when the input flagged none
    /// - `Err(AppError::BadRequest("參賽者資料不完整"))` - An entry references neither or both
    /// - `Err(AppError::BadRequest("只能指定一位主要選手"))` - More than one main player
    pub fn from_dtos(inputs: Vec<ParticipantInputDto>) -> Result<Vec<Self>, AppError> {
        let mut participants = inputs
            .into_iter()
            .map(|input| {
                let reference = match (input.user_player_id, input.team_member_id) {
                    (Some(id), None) => ParticipantRef::UserPlayer(id),
                    (None, Some(id)) => ParticipantRef::TeamMember(id),
                    _ => return Err(AppError::BadRequest("參賽者資料不完整".to_string())),
                };
                Ok(Self {
                    reference,
                    is_main_player: input.is_main_player,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match participants.iter().filter(|p| p.is_main_player).count() {
            0 => {
                if let Some(first) = participants.first_mut() {
                    first.is_main_player = true;
                }
            }
            1 => {}
            _ => return Err(AppError::BadRequest("只能指定一位主要選手".to_string())),
        }

        Ok(participants)
    }

    pub fn user_player_ids(participants: &[Self]) -> Vec<i32> {
        participants
            .iter()
            .filter_map(|p| match p.reference {
                ParticipantRef::UserPlayer(id) => Some(id),
                ParticipantRef::TeamMember(_) => None,
            })
            .collect()
    }

    pub fn team_member_ids(participants: &[Self]) -> Vec<i32> {
        participants
            .iter()
            .filter_map(|p| match p.reference {
                ParticipantRef::TeamMember(id) => Some(id),
                ParticipantRef::UserPlayer(_) => None,
            })
            .collect()
    }
}

/// Signup request as received; participants are resolved by the service once the game,
/// category and team checks have passed.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupParams {
    pub game_id: i32,
    pub category_id: i32,
    pub team_id: Option<i32>,
    pub participants: Vec<ParticipantInputDto>,
    pub note: Option<String>,
}

impl SignupParams {
    pub fn from_dto(game_id: i32, dto: SignupDto) -> Result<Self, AppError> {
        let category_id = match dto.category_id {
            Some(id) if !dto.participants.is_empty() => id,
            _ => return Err(AppError::BadRequest("請填寫所有必填欄位".to_string())),
        };

        Ok(Self {
            game_id,
            category_id,
            team_id: dto.team_id,
            participants: dto.participants,
            note: optional_text(dto.note),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResubmitParams {
    pub registration_id: i32,
    pub participants: Vec<ParticipantInputDto>,
    pub note: Option<String>,
}

impl ResubmitParams {
    pub fn from_dto(registration_id: i32, dto: ResubmitDto) -> Result<Self, AppError> {
        if dto.participants.is_empty() {
            return Err(AppError::BadRequest("請填寫所有必填欄位".to_string()));
        }

        Ok(Self {
            registration_id,
            participants: dto.participants,
            note: optional_text(dto.note),
        })
    }
}

/// Rows inserted for a new registration.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRegistrationParams {
    pub game_id: i32,
    pub category_id: i32,
    pub team_id: Option<i32>,
    pub registrant_user_id: i32,
    pub note: Option<String>,
    pub participants: Vec<ParticipantParams>,
}

/// Filters for registration listings. `None` means unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationFilter {
    pub registrant_user_id: Option<i32>,
    pub game_id: Option<i32>,
    pub status: Option<RegistrationStatus>,
}

/// Review decision taken by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    pub fn status(self) -> RegistrationStatus {
        match self {
            ReviewDecision::Approve => RegistrationStatus::Approved,
            ReviewDecision::Reject => RegistrationStatus::Rejected,
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            ReviewDecision::Approve => "approve",
            ReviewDecision::Reject => "reject",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ReviewDecision::Approve => "報名已核准",
            ReviewDecision::Reject => "報名已拒絕",
        }
    }
}

pub fn parse_status(value: &str) -> Result<RegistrationStatus, AppError> {
    match value {
        "pending" => Ok(RegistrationStatus::Pending),
        "approved" => Ok(RegistrationStatus::Approved),
        "confirmed" => Ok(RegistrationStatus::Confirmed),
        "rejected" => Ok(RegistrationStatus::Rejected),
        _ => Err(AppError::BadRequest("無效的報名狀態".to_string())),
    }
}

pub fn status_into_dto(status: RegistrationStatus) -> RegistrationStatusDto {
    match status {
        RegistrationStatus::Pending => RegistrationStatusDto::Pending,
        RegistrationStatus::Approved => RegistrationStatusDto::Approved,
        RegistrationStatus::Confirmed => RegistrationStatusDto::Confirmed,
        RegistrationStatus::Rejected => RegistrationStatusDto::Rejected,
    }
}

/// Participant row with the display name of the person it references.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: i32,
    pub team_member_id: Option<i32>,
    pub user_player_id: Option<i32>,
    pub name: String,
    pub is_main_player: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationWithParticipants {
    pub registration: entity::registration::Model,
    pub participants: Vec<Participant>,
}

impl RegistrationWithParticipants {
    pub fn into_dto(self) -> RegistrationDto {
        let registration = self.registration;
        RegistrationDto {
            id: registration.id,
            game_id: registration.game_id,
            category_id: registration.category_id,
            team_id: registration.team_id,
            registrant_user_id: registration.registrant_user_id,
            status: status_into_dto(registration.status),
            note: registration.note,
            submitted_at: registration.submitted_at,
            reviewed_at: registration.reviewed_at,
            reviewed_by: registration.reviewed_by,
            created_at: registration.created_at,
            updated_at: registration.updated_at,
            participants: self
                .participants
                .into_iter()
                .map(|p| ParticipantDto {
                    id: p.id,
                    team_member_id: p.team_member_id,
                    user_player_id: p.user_player_id,
                    name: p.name,
                    is_main_player: p.is_main_player,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_participant_becomes_main_when_none_flagged() {
        let participants = ParticipantParams::from_dtos(vec![
            ParticipantInputDto::player(1, false),
            ParticipantInputDto::member(2, false),
        ])
        .unwrap();

        assert!(participants[0].is_main_player);
        assert!(!participants[1].is_main_player);
    }

    #[test]
    fn two_main_players_are_rejected() {
        let err = ParticipantParams::from_dtos(vec![
            ParticipantInputDto::player(1, true),
            ParticipantInputDto::player(2, true),
        ])
        .unwrap_err();

        assert_eq!(err.to_string(), "只能指定一位主要選手");
    }

    #[test]
    fn entry_without_reference_is_incomplete() {
        let err = ParticipantParams::from_dtos(vec![ParticipantInputDto::default()]).unwrap_err();

        assert_eq!(err.to_string(), "參賽者資料不完整");
    }

    #[test]
    fn signup_requires_category_and_participants() {
        let err = SignupParams::from_dto(
            1,
            SignupDto {
                category_id: Some(3),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "請填寫所有必填欄位");
    }

    #[test]
    fn ids_are_split_by_kind() {
        let participants = ParticipantParams::from_dtos(vec![
            ParticipantInputDto::player(1, true),
            ParticipantInputDto::member(7, false),
            ParticipantInputDto::player(4, false),
        ])
        .unwrap();

        assert_eq!(ParticipantParams::user_player_ids(&participants), vec![1, 4]);
        assert_eq!(ParticipantParams::team_member_ids(&participants), vec![7]);
    }
}
