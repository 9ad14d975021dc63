//! Team, team member and team staff domain models and parameters.

use chrono::{DateTime, NaiveDate, Utc};
use entity::{team_staff::StaffRole, user_player::Gender};

use crate::{
    model::team::{
        CreateTeamStaffDto, StaffRoleDto, TeamDto, TeamMemberDto, TeamMemberInputDto,
        TeamStaffDto, TeamSummaryDto, UpdateTeamMemberDto, UpdateTeamStaffDto,
    },
    server::{
        error::AppError,
        util::validate::{self, gender_code, optional_email, optional_text},
    },
};

/// Role given to members created without one.
pub const DEFAULT_MEMBER_ROLE: &str = "選手";

pub fn team_into_dto(entity: entity::team::Model) -> TeamDto {
    TeamDto {
        id: entity.id,
        user_id: entity.user_id,
        name: entity.name,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}

pub fn member_into_dto(entity: entity::team_member::Model) -> TeamMemberDto {
    TeamMemberDto {
        id: entity.id,
        team_id: entity.team_id,
        name: entity.name,
        role: entity.role,
        gender: gender_code(entity.gender).to_string(),
        birthday: entity.birthday,
        phone: entity.phone,
        email: entity.email,
        line_id: entity.line_id,
        is_banned: entity.is_banned,
        ban_reason: entity.ban_reason,
        ban_until: entity.ban_until,
        created_at: entity.created_at,
    }
}

pub fn staff_role_into_dto(role: StaffRole) -> StaffRoleDto {
    match role {
        StaffRole::Leader => StaffRoleDto::Leader,
        StaffRole::Coach => StaffRoleDto::Coach,
    }
}

pub fn staff_into_dto(entity: entity::team_staff::Model) -> TeamStaffDto {
    TeamStaffDto {
        id: entity.id,
        team_id: entity.team_id,
        role: staff_role_into_dto(entity.role),
        name: entity.name,
        phone: entity.phone,
        email: entity.email,
        address: entity.address,
        line_id: entity.line_id,
        created_at: entity.created_at,
    }
}

/// Team with its staff, currently active members and counts.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSummary {
    pub team: entity::team::Model,
    pub staff: Vec<entity::team_staff::Model>,
    pub members: Vec<entity::team_member::Model>,
    pub member_count: u64,
    pub registration_count: u64,
}

impl TeamSummary {
    pub fn into_dto(self) -> TeamSummaryDto {
        TeamSummaryDto {
            team: team_into_dto(self.team),
            staff: self.staff.into_iter().map(staff_into_dto).collect(),
            members: self.members.into_iter().map(member_into_dto).collect(),
            member_count: self.member_count,
            registration_count: self.registration_count,
        }
    }
}

/// Validates a team name: trimmed, 1..=50 characters.
pub fn team_name(value: &str) -> Result<String, AppError> {
    validate::name(value, "隊伍名稱不能為空", "隊伍名稱不能超過 50 個字元")
}

/// Validated member fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMemberParams {
    pub name: String,
    pub role: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub line_id: Option<String>,
}

impl TeamMemberParams {
    /// Checks name, gender, birthday and email in that order.
    pub fn from_dto(dto: TeamMemberInputDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate::name(&dto.name, "姓名不能為空", "姓名不能超過 50 個字元")?,
            role: optional_text(dto.role).unwrap_or_else(|| DEFAULT_MEMBER_ROLE.to_string()),
            gender: validate::gender(&dto.gender, "性別必須是 M 或 F")?,
            birthday: validate::birthday(&dto.birthday)?,
            phone: optional_text(dto.phone),
            email: optional_email(dto.email)?,
            line_id: optional_text(dto.line_id),
        })
    }
}

/// Partial member update. `None` leaves a field unchanged; `Some(None)` clears an optional one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateTeamMemberParams {
    pub name: Option<String>,
    pub role: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<NaiveDate>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub line_id: Option<Option<String>>,
    pub is_banned: Option<bool>,
    pub ban_reason: Option<Option<String>>,
    pub ban_until: Option<Option<DateTime<Utc>>>,
}

impl UpdateTeamMemberParams {
    pub fn from_dto(dto: UpdateTeamMemberDto) -> Result<Self, AppError> {
        let name = dto
            .name
            .map(|n| validate::name(&n, "姓名不能為空", "姓名不能超過 50 個字元"))
            .transpose()?;
        let gender = dto
            .gender
            .map(|g| validate::gender(&g, "性別必須是 M 或 F"))
            .transpose()?;
        let birthday = dto.birthday.map(|b| validate::birthday(&b)).transpose()?;
        let email = match dto.email {
            Some(email) => Some(optional_email(Some(email))?),
            None => None,
        };

        // Lifting a ban clears its reason and expiry.
        let (ban_reason, ban_until) = match dto.is_banned {
            Some(false) => (Some(None), Some(None)),
            _ => (
                dto.ban_reason.map(|r| optional_text(Some(r))),
                dto.ban_until.map(Some),
            ),
        };

        Ok(Self {
            name,
            role: dto.role.map(|r| {
                optional_text(Some(r)).unwrap_or_else(|| DEFAULT_MEMBER_ROLE.to_string())
            }),
            gender,
            birthday,
            phone: dto.phone.map(|p| optional_text(Some(p))),
            email,
            line_id: dto.line_id.map(|l| optional_text(Some(l))),
            is_banned: dto.is_banned,
            ban_reason,
            ban_until,
        })
    }
}

/// Parses `leader` / `coach`.
pub fn staff_role(value: &str) -> Result<StaffRole, AppError> {
    match value.trim() {
        "leader" => Ok(StaffRole::Leader),
        "coach" => Ok(StaffRole::Coach),
        _ => Err(AppError::BadRequest(
            "職位必須是 leader（領隊）或 coach（教練）".to_string(),
        )),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTeamStaffParams {
    pub team_id: i32,
    pub role: StaffRole,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub line_id: Option<String>,
}

impl CreateTeamStaffParams {
    pub fn from_dto(dto: CreateTeamStaffDto) -> Result<Self, AppError> {
        let missing = || AppError::BadRequest("隊伍ID、職位和姓名為必填欄位".to_string());

        let team_id = dto.team_id.ok_or_else(missing)?;
        let role = optional_text(dto.role).ok_or_else(missing)?;
        let name = optional_text(dto.name).ok_or_else(missing)?;

        Ok(Self {
            team_id,
            role: staff_role(&role)?,
            name,
            phone: optional_text(dto.phone),
            email: optional_email(dto.email)?,
            address: optional_text(dto.address),
            line_id: optional_text(dto.line_id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateTeamStaffParams {
    pub role: Option<StaffRole>,
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub line_id: Option<Option<String>>,
}

impl UpdateTeamStaffParams {
    pub fn from_dto(dto: UpdateTeamStaffDto) -> Result<Self, AppError> {
        let name = match dto.name {
            Some(name) => Some(optional_text(Some(name)).ok_or_else(|| {
                AppError::BadRequest("隊伍ID、職位和姓名為必填欄位".to_string())
            })?),
            None => None,
        };
        let email = match dto.email {
            Some(email) => Some(optional_email(Some(email))?),
            None => None,
        };

        Ok(Self {
            role: dto.role.map(|r| staff_role(&r)).transpose()?,
            name,
            phone: dto.phone.map(|p| optional_text(Some(p))),
            email,
            address: dto.address.map(|a| optional_text(Some(a))),
            line_id: dto.line_id.map(|l| optional_text(Some(l))),
        })
    }
}
