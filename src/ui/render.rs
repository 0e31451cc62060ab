//! Plain-text rendering of the display state.

use std::fmt::Write as _;

use crate::models::{ClusterItemView, InputField, InputState, ItemView, Price};
use crate::state::DisplayState;

/// Renders the results part of the page
pub fn render_state(state: &DisplayState) -> String {
    let mut out = String::new();

    if state.loading {
        out.push_str("Loading...\n");
    }
    if state.cluster_loading {
        out.push_str("Loading cluster items...\n");
    }

    if let Some(notice) = &state.error {
        let _ = writeln!(
            out,
            "! Could not load {} ({}): {}  [type 'dismiss']",
            notice.operation, notice.kind, notice.message
        );
    }

    if let Some(item) = &state.viewed_item {
        out.push_str("== Viewed Item ==\n");
        write_item(&mut out, item);
    }

    if !state.recommendations.is_empty() {
        out.push_str("== Recommended Items ==\n");
        for (i, item) in state.recommendations.iter().enumerate() {
            let _ = writeln!(out, "[{}]", i + 1);
            write_item(&mut out, item);
        }
    }

    if !state.cluster_items.is_empty() {
        match state.cluster_id {
            Some(id) => {
                let _ = writeln!(out, "== Items from Same Cluster (#{}) ==", id);
            }
            None => out.push_str("== Items from Same Cluster ==\n"),
        }
        for (i, item) in state.cluster_items.iter().enumerate() {
            let _ = writeln!(out, "[{}]", i + 1);
            write_cluster_item(&mut out, item);
        }
    }

    out
}

/// Renders the current form values
pub fn render_input(input: &InputState) -> String {
    let mut out = String::new();
    for field in InputField::ALL {
        let _ = writeln!(out, "{:>10}: {:?}", field.label(), input.get(field));
    }
    out
}

fn write_item(out: &mut String, item: &ItemView) {
    line(out, "Title", item.title.as_deref());
    line(out, "Image", item.image.as_deref());
    price_line(out, item.price.as_ref());
    line(out, "Category", item.category_name.as_deref());
    line(out, "Condition", item.condition.as_deref());
    line(out, "Seller", item.seller_username.as_deref());
    line(out, "Location", item.location.as_deref());
    line(out, "Shipping", item.shipping.as_deref());
    line(out, "Description", item.short_description.as_deref());
    for (name, value) in &item.aspects {
        let _ = writeln!(out, "    {}: {}", name, value);
    }
}

fn write_cluster_item(out: &mut String, item: &ClusterItemView) {
    line(out, "Title", item.title.as_deref());
    line(out, "Image", item.image.as_deref());
    price_line(out, item.price.as_ref());
    line(out, "Condition", item.condition.as_deref());
    line(out, "Category", item.category_name.as_deref());
    line(out, "Seller", item.seller_username.as_deref());
}

fn price_line(out: &mut String, price: Option<&Price>) {
    let text = price.map(Price::to_string);
    line(out, "Price", text.as_deref());
}

/// Absent values render nothing at all
fn line(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "  {}: {}", label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::state::{ErrorNotice, Operation};

    #[test]
    fn test_empty_state_renders_nothing() {
        assert_eq!(render_state(&DisplayState::default()), "");
    }

    #[test]
    fn test_viewed_item_skips_absent_fields() {
        let state = DisplayState {
            viewed_item: Some(ItemView {
                title: Some("Desk Lamp".to_string()),
                price: Some(Price {
                    value: Some("19.99".to_string()),
                    currency: Some("USD".to_string()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let text = render_state(&state);
        assert!(text.contains("== Viewed Item =="));
        assert!(text.contains("  Title: Desk Lamp\n"));
        assert!(text.contains("  Price: 19.99 USD\n"));
        assert!(!text.contains("Seller"));
        assert!(!text.contains("Recommended"));
    }

    #[test]
    fn test_loading_and_error_lines() {
        let state = DisplayState {
            loading: true,
            error: Some(ErrorNotice::new(
                1,
                Operation::ClusterItems,
                &ClientError::Backend("Item ID not found".to_string()),
            )),
            ..Default::default()
        };

        let text = render_state(&state);
        assert!(text.starts_with("Loading...\n"));
        assert!(text.contains("Could not load cluster items (backend)"));
        assert!(text.contains("Item ID not found"));
    }

    #[test]
    fn test_cluster_section_header() {
        let state = DisplayState {
            cluster_items: vec![ClusterItemView {
                title: Some("Chair".to_string()),
                ..Default::default()
            }],
            cluster_id: Some(12),
            ..Default::default()
        };
        let text = render_state(&state);
        assert!(text.contains("== Items from Same Cluster (#12) =="));
        assert!(text.contains("[1]\n  Title: Chair\n"));
    }

    #[test]
    fn test_render_input() {
        let mut input = InputState::new();
        input.set_item_id("v1|1|0");
        let text = render_input(&input);
        assert!(text.contains("Item ID: \"v1|1|0\""));
        assert!(text.contains("Max Price: \"\""));
    }
}
