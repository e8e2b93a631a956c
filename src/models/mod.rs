pub mod email;
pub mod invitation;

pub use email::{EmailPayload, OutgoingEmail, RelayResponse};
pub use invitation::{Invitation, Profile, ValidInvitation, FALLBACK_INVITER_NAME};
