//! Profile quality bonus.

use pulse_core::params::ScoringParams;
use pulse_core::types::MemberProfile;

/// Flat additive terms for verification, presence, and a profile photo,
/// plus `field_bonus` for each filled profile field (graduation year,
/// university, city, occupation) — up to four of them.
pub fn bonus(profile: &MemberProfile, params: &ScoringParams) -> f64 {
    let mut bonus = 0.0;
    if profile.is_verified {
        bonus += params.verified_bonus;
    }
    if profile.is_online {
        bonus += params.online_bonus;
    }
    if profile.has_avatar {
        bonus += params.photo_bonus;
    }
    bonus + f64::from(profile.filled_profile_fields.min(4)) * params.field_bonus
}
