//! Display helpers for a therapist profile card.

use std::fmt;

use theramatch_common::TherapistProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    TopMatch,
    Recommended,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::TopMatch => write!(f, "Top Match"),
            Badge::Recommended => write!(f, "Recommended"),
        }
    }
}

pub fn badge(profile: &TherapistProfile) -> Badge {
    if profile.ai_rank == 1 {
        Badge::TopMatch
    } else {
        Badge::Recommended
    }
}

pub fn heading(profile: &TherapistProfile) -> String {
    format!("Our #{} Recommendation for You", profile.ai_rank)
}

pub fn rank_label(profile: &TherapistProfile) -> String {
    format!("#{} Match", profile.ai_rank)
}

/// `(416) 555-1234` for North American numbers, otherwise the input as given.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let local = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return phone.to_string(),
    };
    format!("({}) {}-{}", &local[..3], &local[3..6], &local[6..])
}

/// Credential suffixes, minus the health-role entries that duplicate the title.
pub fn format_credentials(profile: &TherapistProfile) -> String {
    profile
        .suffixes
        .iter()
        .map(|suffix| suffix.label.as_str())
        .filter(|label| !label.is_empty() && !label.contains("HealthRoles"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `MARRIAGE_AND_FAMILY_THERAPIST` -> `Marriage And Family Therapist`.
pub fn format_health_role(role: &str) -> String {
    role.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn address_line(profile: &TherapistProfile) -> String {
    let location = &profile.primary_location;
    if location.address_line1.is_empty() {
        location.city_name.clone()
    } else {
        format!("{}, {}", location.address_line1, location.city_name)
    }
}

pub fn appointment_badges(profile: &TherapistProfile) -> Vec<&'static str> {
    let mut badges = Vec::new();
    if profile.appointment_types.in_person {
        badges.push("In-Person");
    }
    if profile.appointment_types.online {
        badges.push("Online");
    }
    badges
}

pub fn is_verified(profile: &TherapistProfile) -> bool {
    profile.verification_status == "VERIFIED"
}

pub fn call_link(profile: &TherapistProfile) -> String {
    format!("tel:{}", profile.primary_location.phone_number)
}
