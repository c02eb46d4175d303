//! Canonical venue and team names.
//!
//! Franchises were renamed and relocated over the league's history and venue
//! strings picked up city suffixes along the way. Lookups are exact-match;
//! names missing from the tables pass through untouched.

const VENUE_ALIASES: &[(&str, &str)] = &[
    ("Arun Jaitley Stadium, Delhi", "Arun Jaitley Stadium"),
    ("Brabourne Stadium, Mumbai", "Brabourne Stadium"),
    ("Dr DY Patil Sports Academy, Mumbai", "Dr DY Patil Sports Academy"),
    (
        "Dr. Y.S. Rajasekhara Reddy ACA-VDCA Cricket Stadium, Visakhapatnam",
        "Dr. Y.S. Rajasekhara Reddy ACA-VDCA Cricket Stadium",
    ),
    ("Eden Gardens, Kolkata", "Eden Gardens"),
    ("M Chinnaswamy Stadium, Bengaluru", "M Chinnaswamy Stadium"),
    ("M.Chinnaswamy Stadium", "M Chinnaswamy Stadium"),
    ("MA Chidambaram Stadium, Chepauk", "MA Chidambaram Stadium"),
    ("MA Chidambaram Stadium, Chepauk, Chennai", "MA Chidambaram Stadium"),
    (
        "Maharashtra Cricket Association Stadium, Pune",
        "Maharashtra Cricket Association Stadium",
    ),
    ("Narendra Modi Stadium, Ahmedabad", "Narendra Modi Stadium"),
    (
        "Punjab Cricket Association IS Bindra Stadium, Mohali",
        "Punjab Cricket Association IS Bindra Stadium",
    ),
    (
        "Punjab Cricket Association IS Bindra Stadium, Mohali, Chandigarh",
        "Punjab Cricket Association IS Bindra Stadium",
    ),
    (
        "Punjab Cricket Association Stadium, Mohali",
        "Punjab Cricket Association IS Bindra Stadium",
    ),
    (
        "Rajiv Gandhi International Stadium, Uppal",
        "Rajiv Gandhi International Stadium",
    ),
    (
        "Rajiv Gandhi International Stadium, Uppal, Hyderabad",
        "Rajiv Gandhi International Stadium",
    ),
    ("Sardar Patel Stadium, Motera", "Narendra Modi Stadium"),
    ("Sawai Mansingh Stadium, Jaipur", "Sawai Mansingh Stadium"),
    ("Zayed Cricket Stadium, Abu Dhabi", "Sheikh Zayed Stadium"),
    (
        "Himachal Pradesh Cricket Association Stadium, Dharamsala",
        "Himachal Pradesh Cricket Association Stadium",
    ),
    ("Wankhede Stadium, Mumbai", "Wankhede Stadium"),
];

const TEAM_ALIASES: &[(&str, &str)] = &[
    ("Deccan Chargers", "Sunrisers Hyderabad"),
    ("Delhi Daredevils", "Delhi Capitals"),
    ("Rising Pune Supergiant", "Rising Pune Supergiants"),
    ("Pune Warriors", "Rising Pune Supergiants"),
    ("Royal Challengers Bangalore", "Royal Challengers Bengaluru"),
    ("Kings XI Punjab", "Punjab Kings"),
    ("Gujarat Lions", "Gujarat Titans"),
];

const TEAM_SHORT_NAMES: &[(&str, &str)] = &[
    ("Sunrisers Hyderabad", "SRH"),
    ("Rajasthan Royals", "RR"),
    ("Gujarat Titans", "GT"),
    ("Mumbai Indians", "MI"),
    ("Chennai Super Kings", "CSK"),
    ("Punjab Kings", "PK"),
    ("Kolkata Knight Riders", "KKR"),
    ("Lucknow Super Giants", "LSG"),
    ("Delhi Capitals", "DC"),
    ("Royal Challengers Bengaluru", "RCB"),
    ("Kochi Tuskers Kerala", "KTK"),
    ("Rising Pune Supergiants", "RPS"),
];

const VENUE_LABEL_WIDTH: usize = 18;

fn lookup<'a>(table: &'a [(&'a str, &'a str)], name: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
}

pub fn canonical_venue(name: &str) -> &str {
    lookup(VENUE_ALIASES, name).unwrap_or(name)
}

pub fn canonical_team(name: &str) -> &str {
    lookup(TEAM_ALIASES, name).unwrap_or(name)
}

/// Replaces `value` in place when it has a canonical form.
pub fn normalize_team_in_place(value: &mut String) {
    if let Some(canonical) = lookup(TEAM_ALIASES, value) {
        *value = canonical.to_string();
    }
}

pub fn normalize_venue_in_place(value: &mut String) {
    if let Some(canonical) = lookup(VENUE_ALIASES, value) {
        *value = canonical.to_string();
    }
}

/// Team abbreviation for compact labels; unknown teams keep their full name.
pub fn short_name(team: &str) -> &str {
    lookup(TEAM_SHORT_NAMES, canonical_team(team)).unwrap_or(team)
}

/// Venue label for chart axes: text before the first comma, clipped.
pub fn venue_label(venue: &str) -> String {
    let canonical = canonical_venue(venue);
    let head = canonical.split(',').next().unwrap_or(canonical).trim();
    if head.chars().count() > VENUE_LABEL_WIDTH {
        let clipped: String = head.chars().take(VENUE_LABEL_WIDTH).collect();
        format!("{clipped}...")
    } else {
        head.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renamed_franchises_map_to_current_names() {
        assert_eq!(canonical_team("Delhi Daredevils"), "Delhi Capitals");
        assert_eq!(canonical_team("Kings XI Punjab"), "Punjab Kings");
        assert_eq!(canonical_team("Deccan Chargers"), "Sunrisers Hyderabad");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(canonical_team("Mumbai Indians"), "Mumbai Indians");
        assert_eq!(canonical_venue("Kingsmead"), "Kingsmead");
    }

    #[test]
    fn normalization_is_idempotent() {
        for (alias, _) in VENUE_ALIASES {
            let once = canonical_venue(alias);
            assert_eq!(canonical_venue(once), once);
        }
        for (alias, _) in TEAM_ALIASES {
            let once = canonical_team(alias);
            assert_eq!(canonical_team(once), once);
        }
    }

    #[test]
    fn in_place_normalization_rewrites_aliases_only() {
        let mut team = "Gujarat Lions".to_string();
        normalize_team_in_place(&mut team);
        assert_eq!(team, "Gujarat Titans");

        let mut venue = "Sardar Patel Stadium, Motera".to_string();
        normalize_venue_in_place(&mut venue);
        assert_eq!(venue, "Narendra Modi Stadium");
    }

    #[test]
    fn short_names_fall_back_to_full_name() {
        assert_eq!(short_name("Royal Challengers Bangalore"), "RCB");
        assert_eq!(short_name("Nowhere XI"), "Nowhere XI");
    }

    #[test]
    fn venue_labels_are_clipped() {
        assert_eq!(venue_label("Eden Gardens"), "Eden Gardens");
        assert_eq!(
            venue_label("Maharashtra Cricket Association Stadium"),
            "Maharashtra Cricke..."
        );
        assert_eq!(venue_label("Kingsmead, Durban"), "Kingsmead");
    }
}
