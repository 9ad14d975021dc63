pub use super::activity_log::Entity as ActivityLog;
pub use super::game::Entity as Game;
pub use super::game_category::Entity as GameCategory;
pub use super::game_detail::Entity as GameDetail;
pub use super::game_fee::Entity as GameFee;
pub use super::password_reset_token::Entity as PasswordResetToken;
pub use super::registration::Entity as Registration;
pub use super::registration_participant::Entity as RegistrationParticipant;
pub use super::team::Entity as Team;
pub use super::team_member::Entity as TeamMember;
pub use super::team_staff::Entity as TeamStaff;
pub use super::user::Entity as User;
pub use super::user_player::Entity as UserPlayer;
