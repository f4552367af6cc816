//! achievements.json construction

use std::collections::HashSet;

use super::super::types::{Achievement, SchemaAchievement};

/// Local image names for an achievement: (color, grey), relative to steam_settings
pub fn icon_file_names(name: &str) -> (String, String) {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    (
        format!("images/{}.jpg", safe),
        format!("images/{}_gray.jpg", safe),
    )
}

/// Map the schema to the emulator's manifest. Icons point at the files under `images/`
/// that are listed in `local_icons`; any other icon keeps its remote URL. `None` keeps
/// every URL.
pub fn build_manifest(
    schema: &[SchemaAchievement],
    local_icons: Option<&HashSet<String>>,
) -> Vec<Achievement> {
    let pick = |local: String, remote: &str| match local_icons {
        Some(saved) if saved.contains(&local) => local,
        _ => remote.to_string(),
    };
    schema
        .iter()
        .map(|entry| {
            let (icon_name, gray_name) = icon_file_names(&entry.name);
            Achievement {
                name: entry.name.clone(),
                display_name: entry.display_name.clone(),
                description: entry.description.clone(),
                hidden: entry.hidden,
                icon: pick(icon_name, &entry.icon),
                icongray: pick(gray_name, &entry.icongray),
            }
        })
        .collect()
}
