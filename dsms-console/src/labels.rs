//! Label grouping model
//!
//! Groups the flat label list by the free-text `group` field for
//! faceted display, and provides the chip text-contrast helper.

use shared::models::Label;

/// One display group; `name = None` is the ungrouped bucket
#[derive(Debug, Clone)]
pub struct LabelGroup {
    pub name: Option<String>,
    pub labels: Vec<Label>,
}

/// Group labels for display: groups sorted by name with the ungrouped
/// bucket last, labels within each group sorted by name
pub fn group_labels(labels: &[Label]) -> Vec<LabelGroup> {
    let mut named: Vec<LabelGroup> = Vec::new();
    let mut ungrouped: Vec<Label> = Vec::new();

    for label in labels {
        match &label.group {
            Some(group) => match named.iter_mut().find(|g| g.name.as_deref() == Some(group)) {
                Some(existing) => existing.labels.push(label.clone()),
                None => named.push(LabelGroup {
                    name: Some(group.clone()),
                    labels: vec![label.clone()],
                }),
            },
            None => ungrouped.push(label.clone()),
        }
    }

    named.sort_by(|a, b| a.name.cmp(&b.name));
    for group in &mut named {
        group.labels.sort_by(|a, b| a.name.cmp(&b.name));
    }
    if !ungrouped.is_empty() {
        ungrouped.sort_by(|a, b| a.name.cmp(&b.name));
        named.push(LabelGroup {
            name: None,
            labels: ungrouped,
        });
    }
    named
}

/// Foreground color for a label chip over its background color.
///
/// Perceptual brightness `0.299 R + 0.587 G + 0.114 B`; bright
/// backgrounds get black text, dark ones white. Invalid or missing
/// colors render black-on-light-gray, so black.
pub fn label_text_color(color: Option<&str>) -> &'static str {
    match parse_hex_color(color) {
        Some((r, g, b)) => {
            let brightness = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
            if brightness > 160.0 { "#000000" } else { "#ffffff" }
        }
        None => "#000000",
    }
}

fn parse_hex_color(color: Option<&str>) -> Option<(u8, u8, u8)> {
    let hex = color?.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &str, group: Option<&str>) -> Label {
        Label {
            id: 0,
            name: name.to_string(),
            color: None,
            group: group.map(str::to_string),
            description: None,
            is_active: true,
        }
    }

    #[test]
    fn test_groups_sorted_ungrouped_last() {
        let labels = vec![
            label("Fragile", Some("Handling")),
            label("Heavy", Some("Handling")),
            label("Quarantine", None),
            label("Cold Chain", Some("Storage")),
            label("Archived", None),
        ];
        let groups = group_labels(&labels);
        let names: Vec<Option<&str>> = groups.iter().map(|g| g.name.as_deref()).collect();
        assert_eq!(names, [Some("Handling"), Some("Storage"), None]);

        let handling: Vec<&str> = groups[0].labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(handling, ["Fragile", "Heavy"]);
        let ungrouped: Vec<&str> = groups[2].labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(ungrouped, ["Archived", "Quarantine"]);
    }

    #[test]
    fn test_no_empty_ungrouped_bucket() {
        let labels = vec![label("Fragile", Some("Handling"))];
        let groups = group_labels(&labels);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].name.is_some());
    }

    #[test]
    fn test_text_color_thresholds() {
        assert_eq!(label_text_color(Some("#FFFFFF")), "#000000");
        assert_eq!(label_text_color(Some("#000000")), "#ffffff");
        assert_eq!(label_text_color(None), "#000000");
        // dark grey stays white-on-dark, light grey flips to black text
        assert_eq!(label_text_color(Some("#999999")), "#ffffff");
        assert_eq!(label_text_color(Some("#AAAAAA")), "#000000");
        // saturated red is dark despite the high R channel
        assert_eq!(label_text_color(Some("#FF0000")), "#ffffff");
    }

    #[test]
    fn test_invalid_colors_default_to_black() {
        for bad in ["red", "#FFF", "#GGGGGG", "", "#12345", "123456"] {
            assert_eq!(label_text_color(Some(bad)), "#000000", "for {:?}", bad);
        }
    }
}
