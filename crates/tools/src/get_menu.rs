//! Cafeteria menu tool: reads the menu for a weekday.

use std::sync::Arc;

use campusdesk_core::services::{Menu, MenuService};
use chrono::Weekday;
use tracing::warn;

pub struct GetMenuTool {
    service: Arc<dyn MenuService>,
}

impl GetMenuTool {
    pub fn new(service: Arc<dyn MenuService>) -> Self {
        Self { service }
    }

    pub async fn execute(&self, day: Weekday) -> String {
        match self.service.menu_for_day(day).await {
            Ok(Some(menu)) if !menu.items.is_empty() => format_menu(&menu),
            Ok(_) => format!("No menu is available for {}.", weekday_name(day)),
            Err(e) => {
                warn!(error = %e, "Menu lookup failed");
                format!("Failed to get menu for {}: {e}", weekday_name(day))
            }
        }
    }
}

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn format_menu(menu: &Menu) -> String {
    let mut out = format!("Menu for {}:", weekday_name(menu.day));
    for item in &menu.items {
        out.push_str("\n- ");
        out.push_str(&item.name);
        if let Some(description) = &item.description {
            out.push_str(&format!(": {description}"));
        }
        if let Some(price) = item.price {
            out.push_str(&format!(" ({price:.2})"));
        }
    }
    out
}
