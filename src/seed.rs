use crate::storage::{State, Storage};

/// Canonical seed data: the 50 states plus the inhabited territories.
pub const STATE_NAMES: [&str; 55] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
    "American Samoa",
    "Guam",
    "Northern Mariana Islands",
    "Puerto Rico",
    "U.S. Virgin Islands",
];

/// Replace the stored collection with the canonical list.
pub fn replace_states<S: Storage>(storage: &S) -> anyhow::Result<()> {
    let states: Vec<State> = STATE_NAMES.iter().map(|name| State::new(*name)).collect();
    storage.replace_all(&states)?;
    log::info!("🌱 Seeded {} states and territories", states.len());
    Ok(())
}
